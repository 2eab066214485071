use std::io::Write;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::db::{BookRepository, CatalogError, CatalogSession};
use crate::models::{Book, SearchField};

use super::helpers::{surface_error, StatusMessage};
use super::input::{LineSource, PromptError};
use super::render;

const MENU: &str = "\n📚 Library Menu:
1. 📖 Add a book
2. ❌ Remove a book
3. 🔎 Search for a book
4. 📚 Display All Books
5. 📊 Display Statistics
6. 🚪 Exit";

const CHOICE_PROMPT: &str = "Enter your choice: ";
const PAUSE_PROMPT: &str = "\nPress Enter to continue...";
const INVALID_CHOICE: &str = "❌ Invalid choice. Please try again.";
const INVALID_SEARCH_FIELD: &str = "❌ Invalid search type. Use 'title' or 'author'.";
pub const FAREWELL: &str = "📚 Library saved to database. 👋 Goodbye!";
pub const INTERRUPT_FAREWELL: &str = "👋 Exiting Library Manager. Goodbye!";

/// The six entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Search,
    List,
    Stats,
    Exit,
}

impl MenuChoice {
    /// Map the trimmed input to a menu entry. Anything but `1`-`6` is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::Search),
            "4" => Some(Self::List),
            "5" => Some(Self::Stats),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// How the loop ended. Both are a clean exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited,
    Interrupted,
}

/// Interactive menu loop. Owns the repository, a line source and the writer
/// that receives prompts and results.
pub struct Menu<L, W> {
    repo: BookRepository,
    input: L,
    output: W,
    color: bool,
}

impl<L: LineSource, W: Write> Menu<L, W> {
    pub fn new(repo: BookRepository, input: L, output: W) -> Self {
        Self {
            repo,
            input,
            output,
            color: false,
        }
    }

    /// Colour success and failure lines. Only sensible for a real terminal.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_parts(self) -> (L, W) {
        (self.input, self.output)
    }

    /// Show the menu until the user exits or interrupts. Catalog failures
    /// never end the loop; only a broken terminal does.
    pub fn run(&mut self) -> Result<Outcome> {
        let outcome = match self.drive() {
            Ok(()) => {
                writeln!(self.output, "{FAREWELL}").context("failed to write farewell")?;
                Outcome::Exited
            }
            Err(PromptError::Interrupted) => {
                writeln!(self.output, "\n{INTERRUPT_FAREWELL}")
                    .context("failed to write farewell")?;
                Outcome::Interrupted
            }
            Err(PromptError::Io(err)) => return Err(err).context("terminal I/O failed"),
        };
        self.output.flush().context("failed to flush output")?;
        Ok(outcome)
    }

    fn drive(&mut self) -> Result<(), PromptError> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let answer = self.prompt(CHOICE_PROMPT)?;

            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Exit) => return Ok(()),
                Some(choice) => {
                    debug!("menu choice {choice:?}");
                    self.dispatch(choice)?;
                }
                None => self.show(StatusMessage::error(INVALID_CHOICE))?,
            }

            self.prompt(PAUSE_PROMPT)?;
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), PromptError> {
        match choice {
            MenuChoice::Add => self.add_book(),
            MenuChoice::Remove => self.remove_book(),
            MenuChoice::Search => self.search_books(),
            MenuChoice::List => self.list_books(),
            MenuChoice::Stats => self.show_statistics(),
            MenuChoice::Exit => Ok(()),
        }
    }

    /// Connect before asking anything, so an unreachable database is
    /// reported without collecting answers first.
    fn open_session(&mut self) -> Result<Option<CatalogSession>, PromptError> {
        match self.repo.open() {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                self.report(err.into())?;
                Ok(None)
            }
        }
    }

    fn add_book(&mut self) -> Result<(), PromptError> {
        let Some(mut session) = self.open_session()? else {
            return Ok(());
        };

        let title = self.prompt("Enter book title: ")?;
        let author = self.prompt("Enter author: ")?;
        let year = self.prompt("Enter publication year: ")?;
        let genre = self.prompt("Enter genre: ")?;
        let read_status = self
            .prompt("Have you read it? (yes/no): ")?
            .eq_ignore_ascii_case("yes");

        let book = Book {
            title,
            author,
            year,
            genre,
            read_status,
        };

        match session.add(&book) {
            Ok(()) => self.show(StatusMessage::success(format!(
                "✅ Book \"{}\" added successfully.",
                book.title
            ))),
            Err(err) => self.report(err),
        }
    }

    fn remove_book(&mut self) -> Result<(), PromptError> {
        let Some(mut session) = self.open_session()? else {
            return Ok(());
        };
        let title = self.prompt("Enter the title of the book to remove: ")?;

        match session.remove(&title) {
            Ok(0) => self.show(StatusMessage::error(format!(
                "❌ Book \"{title}\" not found."
            ))),
            Ok(_) => self.show(StatusMessage::success(format!(
                "🗑️ Book \"{title}\" removed successfully."
            ))),
            Err(err) => self.report(err),
        }
    }

    fn search_books(&mut self) -> Result<(), PromptError> {
        let Some(session) = self.open_session()? else {
            return Ok(());
        };
        let answer = self.prompt("Search by (title/author): ")?;
        let field = match answer.parse::<SearchField>() {
            Ok(field) => field,
            Err(err) => {
                debug!("{err}");
                return self.show(StatusMessage::error(INVALID_SEARCH_FIELD));
            }
        };

        let term = self.prompt(&format!("Enter {field}: "))?;
        match session.search(field, &term) {
            Ok(books) if books.is_empty() => {
                self.show(StatusMessage::error(render::no_match(&term)))
            }
            Ok(books) => self.show(StatusMessage::info(render::search_results(&books, &term))),
            Err(err) => self.report(err),
        }
    }

    fn list_books(&mut self) -> Result<(), PromptError> {
        match self.repo.list_all() {
            Ok(books) => self.show(StatusMessage::info(render::library_listing(&books))),
            Err(err) => self.report(err),
        }
    }

    fn show_statistics(&mut self) -> Result<(), PromptError> {
        match self.repo.stats() {
            Ok(stats) => self.show(StatusMessage::info(render::statistics(&stats))),
            Err(err) => self.report(err),
        }
    }

    /// Print the failure and keep going; no catalog error ends the loop.
    fn report(&mut self, err: CatalogError) -> Result<(), PromptError> {
        let text = match &err {
            CatalogError::Connection(cause) => {
                warn!("database connection failed: {cause}");
                format!("❌ Database connection failed: {cause}")
            }
            CatalogError::Query(cause) => {
                warn!("query failed: {cause:#}");
                format!("❌ Error: {}", surface_error(cause))
            }
        };
        self.show(StatusMessage::error(text))
    }

    fn show(&mut self, message: StatusMessage) -> Result<(), PromptError> {
        writeln!(self.output, "{}", message.paint(self.color))?;
        Ok(())
    }

    /// Print `label`, wait for a line and return it trimmed.
    fn prompt(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let line = self.input.read_line()?;
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_through_six_are_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 4 "), Some(MenuChoice::List));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("9"), None);
        assert_eq!(MenuChoice::parse("abc"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("01"), None);
    }
}
