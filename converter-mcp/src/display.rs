//! Presentation helpers: input parsing and result formatting
//!
//! These mirror what a converter front-end shows to the user and are kept
//! out of converter-core, which only deals in numbers and unit names.

use converter_core::UnitCategory;
use serde::Serialize;
use thiserror::Error;

/// Default number of decimals for a converted value
pub const DEFAULT_RESULT_DECIMALS: usize = 4;

/// Decimals used when echoing the input value
pub const INPUT_DECIMALS: usize = 2;

/// Errors from interpreting user-supplied numeric text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Enter a value to convert!")]
    Empty,

    #[error("Enter a valid number: '{0}'")]
    InvalidNumber(String),
}

/// Parse a number typed by a user.
///
/// Either `,` or `.` is accepted as the decimal separator, but only one
/// separator may appear. A leading `-` is allowed.
pub fn parse_value(text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    let invalid = || InputError::InvalidNumber(text.to_string());

    let digits = text.strip_prefix('-').unwrap_or(text);
    let separators = digits.chars().filter(|c| *c == ',' || *c == '.').count();
    let well_formed = separators <= 1
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.');
    if !well_formed {
        return Err(invalid());
    }

    let normalized = text.replace(',', ".");
    let value: f64 = normalized.parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Render "1.00 km = 1000.0000 m"
pub fn format_result(
    value: f64,
    from_symbol: &str,
    result: f64,
    to_symbol: &str,
    decimals: usize,
) -> String {
    format!(
        "{:.*} {} = {:.*} {}",
        INPUT_DECIMALS, value, from_symbol, decimals, result, to_symbol
    )
}

/// Render "Conversion: Length (km → m)"
pub fn format_info(category: UnitCategory, from_symbol: &str, to_symbol: &str) -> String {
    format!("Conversion: {} ({} → {})", category, from_symbol, to_symbol)
}

/// Colour a front-end uses to highlight results of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultColor {
    Green,
    Blue,
    Red,
}

pub fn category_color(category: UnitCategory) -> ResultColor {
    match category {
        UnitCategory::Length => ResultColor::Green,
        UnitCategory::Mass => ResultColor::Blue,
        UnitCategory::Temperature => ResultColor::Red,
    }
}

/// Initial (source, target) choice for a unit list: the first unit and,
/// when there is one, the second.
pub fn default_selection<'a>(units: &[&'a str]) -> Option<(&'a str, &'a str)> {
    let from = *units.first()?;
    let to = units[1.min(units.len() - 1)];
    Some((from, to))
}
