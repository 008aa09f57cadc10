//! Shared helpers for contract generation.

use chrono::Local;

/// Current date in `YYYY-MM-DD` form. Always computed server-side; callers
/// cannot supply their own contract date.
pub fn current_contract_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Sanitize a subject name for use in filenames.
///
/// Whitespace runs become single underscores and every remaining character
/// outside `[A-Za-z0-9_-]` is stripped. An empty result falls back to
/// `"Employee"`. Idempotent: sanitizing twice gives the same string.
pub fn sanitize_subject_name(name: &str) -> String {
    let mut result = String::new();
    let mut pending_separator = false;

    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            pending_separator = !result.is_empty();
        } else if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            if pending_separator {
                result.push('_');
                pending_separator = false;
            }
            result.push(ch);
        }
    }

    if result.is_empty() {
        return "Employee".to_string();
    }
    result
}
