//! Unit representation: linear definitions, temperature scales, symbols

use std::fmt;
use serde::{Serialize, Deserialize};

/// A unit in a linear category.
///
/// `factor` is the number of these units in one base unit, so the base unit
/// itself has a factor of 1.0 and converting `v` of this unit to the base
/// unit is `v / factor`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitDefinition {
    /// Display name, also the lookup key (e.g., "Meters (m)")
    pub name: &'static str,
    /// Units per one base unit
    pub factor: f64,
}

impl UnitDefinition {
    pub const fn new(name: &'static str, factor: f64) -> Self {
        UnitDefinition { name, factor }
    }

    pub fn symbol(&self) -> &'static str {
        symbol_of(self.name)
    }

    pub fn is_base(&self) -> bool {
        self.factor == 1.0
    }

    /// Express `value` of this unit in the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value / self.factor
    }

    /// Express a base-unit `value` in this unit
    pub fn from_base(&self, value: f64) -> f64 {
        value * self.factor
    }
}

impl fmt::Display for UnitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Temperature scales. These have no scale factor; each has a fixed affine
/// relation to Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

impl TemperatureUnit {
    /// All scales, in definition order
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius (°C)",
            TemperatureUnit::Fahrenheit => "Fahrenheit (°F)",
            TemperatureUnit::Kelvin => "Kelvin (K)",
        }
    }

    pub fn symbol(&self) -> &'static str {
        symbol_of(self.name())
    }

    /// Look up a scale by its exact display name
    pub fn from_name(name: &str) -> Option<Self> {
        TemperatureUnit::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Extract the unit symbol from a display name.
///
/// Returns the text between the last `(` and the last `)`, e.g.
/// "Meters (m)" → "m". Returns "" when the name is empty, lacks either
/// parenthesis, or the last `)` does not come after the last `(`.
pub fn symbol_of(display_name: &str) -> &str {
    let (Some(open), Some(close)) = (display_name.rfind('('), display_name.rfind(')')) else {
        return "";
    };

    let start = open + 1;
    if close > start {
        &display_name[start..close]
    } else {
        ""
    }
}
