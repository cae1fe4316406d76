//! # Entity Model
//!
//! Plain data that crosses every boundary: schema ↔ traversal ↔ save
//! pipeline ↔ the caller's persistence layer.
//!
//! This module is pure data: no I/O, no state.

pub mod entity;
pub mod value;
pub mod values;

pub use entity::{Entity, EntityReference, EntityStatus};
pub use value::Value;
pub use values::{EntityValues, entity_values};
