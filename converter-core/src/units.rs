//! Unit definitions - fixed tables for length, mass and temperature

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::unit::{TemperatureUnit, UnitDefinition};
use crate::UnitCategory;

/// Length units, base: meter
pub static LENGTH_UNITS: [UnitDefinition; 3] = [
    UnitDefinition::new("Meters (m)", 1.0),
    UnitDefinition::new("Kilometers (km)", 0.001),
    UnitDefinition::new("Centimeters (cm)", 100.0),
];

/// Mass units, base: kilogram
pub static MASS_UNITS: [UnitDefinition; 3] = [
    UnitDefinition::new("Kilograms (kg)", 1.0),
    UnitDefinition::new("Grams (g)", 1000.0),
    UnitDefinition::new("Tons (t)", 0.001),
];

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Read-only registry of every known unit, built once and shared.
pub struct UnitRegistry {
    linear: HashMap<UnitCategory, LinearTable>,
}

struct LinearTable {
    ordered: &'static [UnitDefinition],
    by_name: HashMap<&'static str, &'static UnitDefinition>,
}

impl LinearTable {
    fn new(ordered: &'static [UnitDefinition]) -> Self {
        let by_name = ordered.iter().map(|u| (u.name, u)).collect();
        LinearTable { ordered, by_name }
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut linear = HashMap::new();
        linear.insert(UnitCategory::Length, LinearTable::new(&LENGTH_UNITS));
        linear.insert(UnitCategory::Mass, LinearTable::new(&MASS_UNITS));
        UnitRegistry { linear }
    }

    /// Display names of every unit in a category, in definition order
    pub fn units(&self, category: UnitCategory) -> Vec<&'static str> {
        match category {
            UnitCategory::Temperature => TemperatureUnit::ALL.iter().map(|t| t.name()).collect(),
            _ => self.definitions(category).iter().map(|u| u.name).collect(),
        }
    }

    /// Scale definitions of a linear category; empty for Temperature
    pub fn definitions(&self, category: UnitCategory) -> &'static [UnitDefinition] {
        self.linear.get(&category).map(|t| t.ordered).unwrap_or(&[])
    }

    /// Definition of a unit in a linear category, by display name
    pub fn definition(&self, category: UnitCategory, name: &str) -> Option<&'static UnitDefinition> {
        self.linear.get(&category)?.by_name.get(name).copied()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// List unit display names for a category label.
///
/// Unrecognized labels yield an empty list rather than an error.
pub fn list_units(category: &str) -> Vec<&'static str> {
    match category.parse::<UnitCategory>() {
        Ok(category) => UNITS.units(category),
        Err(_) => Vec::new(),
    }
}
