//! # Property Schemas
//!
//! Declarative description of entity fields, resolution of builder
//! properties against live values, classification predicates, and the
//! collection/site configuration that ties schemas to storage paths.

pub mod collection;
pub mod predicates;
pub mod property;
pub mod resolve;

pub use collection::{EntityCollection, SiteConfig};
pub use predicates::{editable_property, is_hidden, is_read_only};
pub use property::{
    ArrayItems, ArrayProperty, AutoValue, BooleanProperty, DateMode, DateProperty,
    DEFAULT_ONE_OF_TYPE, DEFAULT_ONE_OF_VALUE, Disabled, DisabledConfig, EnumValues,
    MapProperty, NumberProperty, OneOf, Properties, Property, PropertyBuilder,
    PropertyContext, PropertyKind, PropertyOrBuilder, ReferenceProperty, StorageConfig,
    StringProperty, Validation, properties,
};
pub use resolve::{ResolvedProperties, resolve_properties, resolve_property};
