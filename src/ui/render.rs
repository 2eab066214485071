//! Plain-text rendering of catalog results. Everything here is pure: the
//! functions build strings and the menu decides where they go.

use crate::models::{Book, LibraryStats};

const LISTING_RULE_WIDTH: usize = 40;
const STATS_RULE_WIDTH: usize = 30;

pub const EMPTY_LIBRARY: &str = "📭 The library is empty.";

pub fn book_line(book: &Book) -> String {
    book.to_string()
}

/// Full collection listing, or the empty-library notice.
pub fn library_listing(books: &[Book]) -> String {
    if books.is_empty() {
        return EMPTY_LIBRARY.to_string();
    }

    let rule = "=".repeat(LISTING_RULE_WIDTH);
    let mut lines = Vec::with_capacity(books.len() + 3);
    lines.push("\n📖 Library Collection:".to_string());
    lines.push(rule.clone());
    lines.extend(books.iter().map(|book| format!("📘 {}", book_line(book))));
    lines.push(rule);
    lines.join("\n")
}

/// Search hits, or a message naming the term that found nothing.
pub fn search_results(books: &[Book], term: &str) -> String {
    if books.is_empty() {
        return no_match(term);
    }

    let mut lines = Vec::with_capacity(books.len() + 1);
    lines.push("\n📖 Search Results:".to_string());
    lines.extend(books.iter().map(|book| format!("📚 {}", book_line(book))));
    lines.join("\n")
}

pub fn no_match(term: &str) -> String {
    format!("❌ No books found matching \"{term}\".")
}

pub fn statistics(stats: &LibraryStats) -> String {
    let rule = "=".repeat(STATS_RULE_WIDTH);
    [
        "\n📊 Library Statistics".to_string(),
        rule.clone(),
        format!("📚 Total books: {}", group_thousands(stats.total)),
        format!("📖 Books read: {}", group_thousands(stats.read)),
        format!("📈 Percentage read: {:.2}%", stats.percentage_read()),
        rule,
    ]
    .join("\n")
}

/// `1234567` becomes `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
