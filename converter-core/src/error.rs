//! Conversion errors

use thiserror::Error;

use crate::UnitCategory;

/// Errors raised by the registry and the conversion engine.
///
/// A conversion either yields a fully computed number or one of these;
/// nothing is partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Unit name is not a member of the category's unit set
    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit {
        unit: String,
        category: UnitCategory,
    },

    /// Category label does not name one of the supported categories
    #[error("Unknown category '{0}'. Valid: Length, Mass, Temperature")]
    UnknownCategory(String),
}

impl ConversionError {
    pub fn unknown_unit(unit: &str, category: UnitCategory) -> Self {
        ConversionError::UnknownUnit {
            unit: unit.to_string(),
            category,
        }
    }

    /// Machine-readable code, in the style of structured tool errors
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            ConversionError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
        }
    }
}
