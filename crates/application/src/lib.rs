//! Application layer - Use cases and orchestration
//!
//! Contains the forecast aggregation pipeline, the query facade, the
//! coalescing request throttle, and the port definitions implemented by
//! infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
