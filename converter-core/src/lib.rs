//! Converter Core - Unit Registry and Conversion Engine
//!
//! Converts numeric values between units within three categories:
//! - Length (m, km, cm) - linear, base unit meter
//! - Mass (kg, g, t) - linear, base unit kilogram
//! - Temperature (°C, °F, K) - affine, pivots through Celsius
//!
//! All unit data is static and read-only, so every operation is a pure
//! function that may be called from any thread without synchronization.
//! Units are identified by their display name, e.g. "Meters (m)".

mod category;
mod convert;
mod error;
mod unit;
mod units;

pub use category::UnitCategory;
pub use convert::{convert, convert_labeled, ConversionRequest, ConversionResult};
pub use error::ConversionError;
pub use unit::{symbol_of, TemperatureUnit, UnitDefinition, KELVIN_OFFSET};
pub use units::{list_units, UnitRegistry, LENGTH_UNITS, MASS_UNITS, UNITS};
