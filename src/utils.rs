// src/utils.rs
use chrono::NaiveDate;

/// Folder name used when a company name sanitizes to nothing.
pub const FALLBACK_FOLDER_NAME: &str = "Company";

/// Reduce a company name to a folder-safe token.
///
/// Keeps alphanumerics, spaces, hyphens and underscores, trims the result and
/// turns the remaining spaces into underscores.
pub fn sanitize_company_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let sanitized = kept.trim().replace(' ', "_");
    if sanitized.is_empty() {
        FALLBACK_FOLDER_NAME.to_string()
    } else {
        sanitized
    }
}

/// Date suffix for application folders.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Truncate to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Escape text so Typst renders it literally inside markup.
pub fn escape_typst_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '#' | '*' | '_' | '`' | '$' | '@' | '<' | '>' | '[' | ']' | '~' | '/'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Join items as "a, b and c".
pub fn join_natural(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
