//! Domain layer for the weather forecast ETL
//!
//! Contains the two persisted record types (locations and forecast readings)
//! and the database-assigned location identifier. This layer has no I/O and
//! defines the ubiquitous language shared by the other crates.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
