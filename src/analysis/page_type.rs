use crate::analysis::PageType;
use std::collections::HashMap;

/// Derives the page type from the counts of `<input type=...>` values
///
/// A page is a login form only with exactly one password field and exactly
/// one submit control. Zero or several of either yields `Unknown`.
pub fn classify_page(input_type_counts: &HashMap<String, u32>) -> PageType {
    let count = |key: &str| input_type_counts.get(key).copied().unwrap_or(0);

    if count("password") == 1 && count("submit") == 1 {
        PageType::LoginForm
    } else {
        PageType::Unknown
    }
}
