//! # cms-schema — Schema-Driven Entity Values
//!
//! The data core of a schema-driven content-management framework. Entity
//! schemas are declared as [`Property`] trees; forms, tables and the
//! persistence layer call into this crate to seed, transform and check the
//! values those schemas describe.
//!
//! ## Design Principles
//!
//! 1. **Closed data types**: `PropertyKind` is an enum, matched exhaustively everywhere
//! 2. **Static schemas only past resolution**: builders are resolved into `ResolvedProperties` before any traversal
//! 3. **Copy-on-write**: every operation returns a new values tree
//! 4. **Pass-through over failure**: values that do not fit the schema are carried over, never rejected
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use cms_schema::{
//!     AutoValue, EntityCollection, EntityStatus, EntityValues, NoCallbacks, Property,
//!     SaveRequest, Value, prepare_values_for_save,
//! };
//!
//! # fn example() -> cms_schema::Result<()> {
//! let products = EntityCollection::new("products", "Products")
//!     .with_property("name", Property::string().required())
//!     .with_property("currency", Property::string().with_default("EUR"))
//!     .with_property("added_on", Property::date().with_auto_value(AutoValue::OnCreate));
//!
//! // Seed the form of a new product
//! let values: EntityValues = products.default_values();
//!
//! // Prepare it for persistence
//! let saved = prepare_values_for_save(SaveRequest {
//!     collection: &products,
//!     path: "products",
//!     entity_id: None,
//!     values: &values,
//!     previous_values: None,
//!     status: EntityStatus::New,
//!     timestamp_now: &Value::Timestamp(Utc::now()),
//!     callbacks: &NoCallbacks,
//! })?;
//! assert_eq!(saved.get("name"), Some(&Value::Null));
//! # Ok(())
//! # }
//! ```
//!
//! ## Operations
//!
//! | Call | Consumer | Purpose |
//! |------|----------|---------|
//! | `get_default_values_for` | form initializer | seed a new entity's form state |
//! | `update_date_auto_values` | pre-save | inject timestamps per auto-value policy |
//! | `sanitize_data` | pre-save | required keys exist (as `Null`) before persistence |
//! | `traverse_values_properties` | all of the above | generic recursive primitive |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod schema;
pub mod traverse;
pub mod defaults;
pub mod datasource;
pub mod binding;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Entity, EntityReference, EntityStatus, EntityValues, Value, entity_values,
};

// ============================================================================
// Re-exports: Schema
// ============================================================================

pub use schema::{
    ArrayItems, AutoValue, DEFAULT_ONE_OF_TYPE, DEFAULT_ONE_OF_VALUE, DateMode, Disabled,
    EntityCollection, OneOf, Properties, Property, PropertyBuilder, PropertyContext,
    PropertyKind, PropertyOrBuilder, ResolvedProperties, SiteConfig, Validation,
    editable_property, is_hidden, is_read_only, properties, resolve_properties,
    resolve_property,
};

// ============================================================================
// Re-exports: Operations
// ============================================================================

pub use traverse::{traverse_value_property, traverse_values_properties};
pub use defaults::get_default_values_for;
pub use datasource::{
    DateAutoValueUpdate, EntityCallbacks, NoCallbacks, PreSaveContext, SaveRequest,
    check_delete, complete_delete, complete_save, get_reference_from, prepare_values_for_save,
    sanitize_data, set_date_to_midnight, update_date_auto_values,
};
pub use binding::{FieldBinding, select_field_binding};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Unresolved property builder at `{key}`")]
    UnresolvedBuilder { key: String },

    #[error("Field misconfiguration in {binding}: {message}")]
    FieldMisconfiguration { binding: &'static str, message: String },

    #[error("Callback rejected the operation: {0}")]
    Callback(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
