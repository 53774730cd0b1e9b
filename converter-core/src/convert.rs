//! Conversion engine
//!
//! Linear categories scale through their base unit; temperature pivots
//! through Celsius. Every call is a pure function of its inputs.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::unit::{symbol_of, TemperatureUnit};
use crate::units::UNITS;
use crate::{ConversionError, UnitCategory};

/// Convert `value` from one unit to another within a category
pub fn convert(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    category: UnitCategory,
) -> Result<f64, ConversionError> {
    let result = match category {
        UnitCategory::Temperature => convert_temperature(value, from_unit, to_unit),
        UnitCategory::Length | UnitCategory::Mass => {
            convert_linear(value, from_unit, to_unit, category)
        }
    }?;

    debug!(value, from_unit, to_unit, %category, result, "converted");
    Ok(result)
}

/// Convert with the category given by its label.
///
/// An unrecognized label fails with `UnknownCategory` instead of falling
/// back to any particular table.
pub fn convert_labeled(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    category: &str,
) -> Result<f64, ConversionError> {
    let category: UnitCategory = category.parse()?;
    convert(value, from_unit, to_unit, category)
}

fn convert_linear(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    category: UnitCategory,
) -> Result<f64, ConversionError> {
    let from = UNITS
        .definition(category, from_unit)
        .ok_or_else(|| ConversionError::unknown_unit(from_unit, category))?;
    let to = UNITS
        .definition(category, to_unit)
        .ok_or_else(|| ConversionError::unknown_unit(to_unit, category))?;

    Ok(to.from_base(from.to_base(value)))
}

fn convert_temperature(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    let from = TemperatureUnit::from_name(from_unit)
        .ok_or_else(|| ConversionError::unknown_unit(from_unit, UnitCategory::Temperature))?;
    let to = TemperatureUnit::from_name(to_unit)
        .ok_or_else(|| ConversionError::unknown_unit(to_unit, UnitCategory::Temperature))?;

    Ok(to.from_celsius(from.to_celsius(value)))
}

/// A single conversion, as a caller submits it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub category: UnitCategory,
}

impl ConversionRequest {
    pub fn new(value: f64, from_unit: &str, to_unit: &str, category: UnitCategory) -> Self {
        ConversionRequest {
            value,
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            category,
        }
    }

    /// Run the conversion, consuming the request
    pub fn execute(self) -> Result<ConversionResult, ConversionError> {
        let result = convert(self.value, &self.from_unit, &self.to_unit, self.category)?;

        Ok(ConversionResult {
            from_symbol: symbol_of(&self.from_unit).to_string(),
            to_symbol: symbol_of(&self.to_unit).to_string(),
            input: self.value,
            result,
            category: self.category,
        })
    }
}

/// Outcome of a conversion with the symbols a caller needs for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub input: f64,
    pub result: f64,
    pub from_symbol: String,
    pub to_symbol: String,
    pub category: UnitCategory,
}
