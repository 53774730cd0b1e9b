//! Unit categories

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::ConversionError;

/// The closed set of categories a conversion can be requested in.
///
/// Selects both the unit table and the conversion strategy: Length and Mass
/// scale linearly through a base unit, Temperature pivots through Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Length,
    Mass,
    Temperature,
}

impl UnitCategory {
    /// All categories, in display order
    pub const ALL: [UnitCategory; 3] = [
        UnitCategory::Length,
        UnitCategory::Mass,
        UnitCategory::Temperature,
    ];

    /// Fixed label used by callers to name the category
    pub fn label(&self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Mass => "Mass",
            UnitCategory::Temperature => "Temperature",
        }
    }

    /// Whether conversions in this category are a pure scale through a base unit
    pub fn is_linear(&self) -> bool {
        !matches!(self, UnitCategory::Temperature)
    }

    /// Display name of the base unit for linear categories
    pub fn base_unit(&self) -> Option<&'static str> {
        match self {
            UnitCategory::Length => Some("Meters (m)"),
            UnitCategory::Mass => Some("Kilograms (kg)"),
            UnitCategory::Temperature => None,
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for UnitCategory {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| ConversionError::UnknownCategory(s.to_string()))
    }
}
