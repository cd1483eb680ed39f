//! Display-time unit conversions
//!
//! Applied only when presenting values in a different system than the one
//! they were fetched in. Fetched batches are already in the requested system,
//! so the aggregation pipeline never calls these.

/// Factor between metres per second and miles per hour
pub const MPS_TO_MPH: f64 = 2.237;

/// Convert a temperature from Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert a temperature from Fahrenheit to Celsius
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Convert a wind speed from metres per second to miles per hour
#[must_use]
pub fn mps_to_mph(mps: f64) -> f64 {
    mps * MPS_TO_MPH
}

/// Convert a wind speed from miles per hour to metres per second
#[must_use]
pub fn mph_to_mps(mph: f64) -> f64 {
    mph / MPS_TO_MPH
}
