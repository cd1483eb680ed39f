//! Domain layer for Skycast
//!
//! Core value objects, display-time unit conversions, and domain errors.
//! This layer has no I/O and no async; everything here is plain data and
//! validation.

pub mod conversions;
pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
