//! Domain models that mirror the `books` table and get passed between the
//! repository and the menu. They stay plain data holders so the persistence
//! and presentation layers can own the interesting logic.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single catalog record. Every field is stored verbatim, including `year`,
/// which is free text because nothing validates it on the way in.
pub struct Book {
    /// Natural lookup key for removal. Not unique.
    pub title: String,
    pub author: String,
    /// Publication year as the user typed it.
    pub year: String,
    pub genre: String,
    /// Whether the user has finished reading the book.
    pub read_status: bool,
}

impl Book {
    /// Label shown after the dash in listings.
    pub fn status_label(&self) -> &'static str {
        if self.read_status {
            "Read"
        } else {
            "Not Read"
        }
    }
}

impl fmt::Display for Book {
    /// `<title> by <author> (<year>) - <Read|Not Read>`, the one-line form used
    /// by both listings and search results.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {}",
            self.title,
            self.author,
            self.year,
            self.status_label()
        )
    }
}

/// Columns a search may target. The column name written into the query comes
/// from this enum, never from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Returned when the user asks to search by anything other than title or
/// author.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid search field {0:?}, expected 'title' or 'author'")]
pub struct InvalidSearchField(pub String);

impl FromStr for SearchField {
    type Err = InvalidSearchField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("title") {
            Ok(SearchField::Title)
        } else if trimmed.eq_ignore_ascii_case("author") {
            Ok(SearchField::Author)
        } else {
            Err(InvalidSearchField(trimmed.to_string()))
        }
    }
}

/// Aggregate counts behind the statistics screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LibraryStats {
    pub total: u64,
    pub read: u64,
}

impl LibraryStats {
    /// Share of books marked read, in percent. An empty library is 0%.
    pub fn percentage_read(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.read as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune(read_status: bool) -> Book {
        Book {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            year: "1965".to_string(),
            genre: "Science Fiction".to_string(),
            read_status,
        }
    }

    #[test]
    fn display_matches_listing_format() {
        assert_eq!(dune(true).to_string(), "Dune by Frank Herbert (1965) - Read");
        assert_eq!(
            dune(false).to_string(),
            "Dune by Frank Herbert (1965) - Not Read"
        );
    }

    #[test]
    fn search_field_parses_allow_list_only() {
        assert_eq!(" Title ".parse::<SearchField>(), Ok(SearchField::Title));
        assert_eq!("AUTHOR".parse::<SearchField>(), Ok(SearchField::Author));
        assert_eq!(
            "genre".parse::<SearchField>(),
            Err(InvalidSearchField("genre".to_string()))
        );
        assert!("title; DROP TABLE books".parse::<SearchField>().is_err());
    }

    #[test]
    fn percentage_handles_empty_library() {
        assert_eq!(LibraryStats::default().percentage_read(), 0.0);
        let stats = LibraryStats { total: 3, read: 1 };
        assert_eq!(format!("{:.2}", stats.percentage_read()), "33.33");
    }
}
