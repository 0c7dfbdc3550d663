//! Value Objects - Immutable, identity-less domain primitives

mod location_id;

pub use location_id::LocationId;
