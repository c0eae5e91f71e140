//! Heading text normalization.

use regex::Regex;
use std::sync::OnceLock;

/// Strip table-of-contents artifacts from a line of text.
///
/// Removes every run of two or more periods (leader dots), then a trailing
/// whitespace-separated page number, then surrounding whitespace.
///
/// ```
/// use pdf_sections::outline::clean_text;
///
/// assert_eq!(clean_text("Introduction.... 12"), "Introduction");
/// assert_eq!(clean_text("  Results  "), "Results");
/// ```
pub fn clean_text(text: &str) -> String {
    static RE_LEADER_DOTS: OnceLock<Regex> = OnceLock::new();
    let re_leader_dots = RE_LEADER_DOTS.get_or_init(|| Regex::new(r"\.{2,}").unwrap());

    static RE_PAGE_NUMBER: OnceLock<Regex> = OnceLock::new();
    let re_page_number = RE_PAGE_NUMBER.get_or_init(|| Regex::new(r"\s+\d+$").unwrap());

    let without_dots = re_leader_dots.replace_all(text, "");
    let without_page = re_page_number.replace(&without_dots, "");
    without_page.trim().to_string()
}
