use library_catalog::*;
use tempfile::TempDir;

fn config_in(dir: &std::path::Path) -> DbConfig {
    DbConfig {
        host: Some(dir.to_string_lossy().into_owned()),
        name: Some("library".to_string()),
        user: Some("reader".to_string()),
        password: Some("secret".to_string()),
    }
}

fn setup_repo() -> (TempDir, BookRepository) {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    ensure_schema(&config).unwrap();
    (dir, BookRepository::new(config))
}

/// Run the menu over `lines` and return the outcome plus everything printed.
fn run_script(repo: BookRepository, lines: &[&str]) -> (Outcome, String) {
    let mut menu = Menu::new(repo, ScriptedInput::new(lines.iter().copied()), Vec::new());
    let outcome = menu.run().unwrap();
    let (_, output) = menu.into_parts();
    (outcome, String::from_utf8(output).unwrap())
}

const ADD_DUNE: &[&str] = &[
    "1",
    "  Dune ",
    "Frank Herbert",
    "1965",
    "Science Fiction",
    "YES",
    "",
];

#[test]
fn exit_choice_says_goodbye() {
    let (_dir, repo) = setup_repo();
    let (outcome, output) = run_script(repo, &["6"]);

    assert_eq!(outcome, Outcome::Exited);
    assert!(output.contains("📚 Library Menu:"));
    assert!(output.contains("📚 Library saved to database. 👋 Goodbye!"));
    assert!(!output.contains("Press Enter to continue"));
}

#[test]
fn running_out_of_input_is_an_interrupt() {
    let (_dir, repo) = setup_repo();
    let (outcome, output) = run_script(repo, &[]);

    assert_eq!(outcome, Outcome::Interrupted);
    assert!(output.contains("👋 Exiting Library Manager. Goodbye!"));
}

#[test]
fn interrupt_mid_operation_exits_without_writing() {
    let (dir, repo) = setup_repo();
    let (outcome, _) = run_script(repo, &["1", "Dune", "Frank Herbert"]);

    assert_eq!(outcome, Outcome::Interrupted);
    let check = BookRepository::new(config_in(dir.path()));
    assert!(check.list_all().unwrap().is_empty());
}

#[test]
fn invalid_choices_reprint_the_menu() {
    let (_dir, repo) = setup_repo();
    let (outcome, output) = run_script(repo, &["9", "", "abc", "", "6"]);

    assert_eq!(outcome, Outcome::Exited);
    assert_eq!(output.matches("❌ Invalid choice. Please try again.").count(), 2);
    assert_eq!(output.matches("📚 Library Menu:").count(), 3);
}

#[test]
fn add_then_list_shows_trimmed_fields() {
    let (dir, repo) = setup_repo();
    let mut script = ADD_DUNE.to_vec();
    script.extend(["4", "", "6"]);
    let (_, output) = run_script(repo, &script);

    assert!(output.contains("✅ Book \"Dune\" added successfully."));
    assert!(output.contains("📘 Dune by Frank Herbert (1965) - Read"));

    let check = BookRepository::new(config_in(dir.path()));
    let books = check.list_all().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].genre, "Science Fiction");
    assert!(books[0].read_status);
}

#[test]
fn only_yes_counts_as_read() {
    let (dir, repo) = setup_repo();
    let (_, _) = run_script(
        repo,
        &["1", "Emma", "Jane Austen", "1815", "Novel", "y", "", "6"],
    );

    let check = BookRepository::new(config_in(dir.path()));
    assert!(!check.list_all().unwrap()[0].read_status);
}

#[test]
fn empty_library_listing() {
    let (_dir, repo) = setup_repo();
    let (_, output) = run_script(repo, &["4", "", "6"]);
    assert!(output.contains("📭 The library is empty."));
}

#[test]
fn remove_reports_found_and_missing() {
    let (_dir, repo) = setup_repo();
    let mut script = ADD_DUNE.to_vec();
    script.extend(["2", "dune", "", "2", "dune", "", "6"]);
    let (_, output) = run_script(repo, &script);

    assert!(output.contains("🗑️ Book \"dune\" removed successfully."));
    assert!(output.contains("❌ Book \"dune\" not found."));
}

#[test]
fn search_by_title_and_unknown_field() {
    let (_dir, repo) = setup_repo();
    let mut script = ADD_DUNE.to_vec();
    script.extend([
        "3", "Title", "DUN", "",
        "3", "genre", "",
        "3", "author", "tolkien", "",
        "6",
    ]);
    let (_, output) = run_script(repo, &script);

    assert!(output.contains("Enter title: "));
    assert!(output.contains("📖 Search Results:"));
    assert!(output.contains("📚 Dune by Frank Herbert (1965) - Read"));
    assert!(output.contains("❌ Invalid search type. Use 'title' or 'author'."));
    assert!(output.contains("❌ No books found matching \"tolkien\"."));
}

#[test]
fn statistics_screen() {
    let (_dir, repo) = setup_repo();
    let mut script = ADD_DUNE.to_vec();
    script.extend(["1", "Emma", "Jane Austen", "1815", "Novel", "no", ""]);
    script.extend(["1", "Dracula", "Bram Stoker", "1897", "Horror", "no", ""]);
    script.extend(["5", "", "6"]);
    let (_, output) = run_script(repo, &script);

    assert!(output.contains("📚 Total books: 3"));
    assert!(output.contains("📖 Books read: 1"));
    assert!(output.contains("📈 Percentage read: 33.33%"));
}

#[test]
fn connection_failure_is_reported_and_loop_survives() {
    let dir = TempDir::new().unwrap();
    let repo = BookRepository::new(config_in(&dir.path().join("missing")));
    let (outcome, output) = run_script(repo, &["4", "", "5", "", "6"]);

    assert_eq!(outcome, Outcome::Exited);
    assert_eq!(output.matches("❌ Database connection failed:").count(), 2);
    assert!(output.contains("📚 Library saved to database. 👋 Goodbye!"));
}

#[test]
fn missing_setting_is_named_in_the_failure() {
    let (dir, _) = setup_repo();
    let mut config = config_in(dir.path());
    config.host = None;
    let (_, output) = run_script(BookRepository::new(config), &["5", "", "6"]);

    assert!(output.contains("❌ Database connection failed: DB_HOST is not set"));
}

#[test]
fn unreachable_database_is_reported_before_any_field_prompt() {
    let dir = TempDir::new().unwrap();
    let repo = BookRepository::new(config_in(&dir.path().join("missing")));
    // After the failure the next line answers the pause, not a field prompt.
    let (outcome, output) = run_script(repo, &["1", "", "2", "", "3", "", "6"]);

    assert_eq!(outcome, Outcome::Exited);
    assert_eq!(output.matches("❌ Database connection failed:").count(), 3);
    assert!(!output.contains("Enter book title: "));
    assert!(!output.contains("Enter the title of the book to remove: "));
    assert!(!output.contains("Search by (title/author): "));
    assert!(output.contains("📚 Library saved to database. 👋 Goodbye!"));
}

#[test]
fn messages_echo_the_title_as_typed() {
    let (_dir, repo) = setup_repo();
    let mut script = ADD_DUNE.to_vec();
    script.extend(["2", "DUNE", "", "3", "title", "DuNe", "", "6"]);
    let (_, output) = run_script(repo, &script);

    assert!(output.contains("🗑️ Book \"DUNE\" removed successfully."));
    assert!(output.contains("❌ No books found matching \"DuNe\"."));
}
