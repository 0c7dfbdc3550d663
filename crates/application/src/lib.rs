//! Application layer - Use cases and orchestration
//!
//! Contains the extract/transform/load use case, the port definitions the
//! infrastructure layer implements, and the pure mapping from the provider's
//! forecast document onto domain records.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
