//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Uppercased first letter of a name, for avatar badges.
///
/// Usage in templates: `{{ user_name|initial }}`
#[askama::filter_fn]
pub fn initial(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let name = value.to_string();
    Ok(name
        .trim()
        .chars()
        .next()
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().to_string()))
}
