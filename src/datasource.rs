//! # Save Preparation
//!
//! Operations run by the persistence layer around a save or delete:
//! timestamp injection for auto-valued dates, null-filling of required
//! fields, and the user hooks registered on a collection.
//!
//! ```text
//! SaveRequest ─▶ resolve builders ─▶ on_pre_save ─▶ update_date_auto_values ─▶ sanitize_data ─▶ values to persist
//! ```

use chrono::NaiveTime;
use tracing::debug;

use crate::model::{Entity, EntityReference, EntityStatus, EntityValues, Value};
use crate::schema::{
    AutoValue, DateMode, DateProperty, EntityCollection, PropertyContext, PropertyKind,
    ResolvedProperties, resolve_properties,
};
use crate::traverse::traverse_values_properties;
use crate::Result;

// ============================================================================
// Date auto-values
// ============================================================================

/// Input of [`update_date_auto_values`].
#[derive(Debug, Clone, Copy)]
pub struct DateAutoValueUpdate<'a> {
    pub input_values: &'a EntityValues,
    pub properties: &'a ResolvedProperties,
    pub status: EntityStatus,
    /// Value written into auto-valued dates, usually the current time.
    pub timestamp_now: &'a Value,
}

/// Overwrite auto-valued date fields with `timestamp_now`.
///
/// `on_update` dates are refreshed on every save; `on_create` dates only
/// when the entity is new or a copy. Dates in `date` mode are then
/// normalized to midnight. Every other value is left alone.
pub fn update_date_auto_values(update: DateAutoValueUpdate<'_>) -> EntityValues {
    let DateAutoValueUpdate { input_values, properties, status, timestamp_now } = update;
    traverse_values_properties(input_values, properties, |value, property| {
        let PropertyKind::Date(date) = &property.kind else {
            return value.cloned();
        };
        let resolved = if applies_auto_value(date, status) {
            Some(timestamp_now.clone())
        } else {
            value.cloned()
        };
        match date.mode {
            Some(DateMode::Date) => resolved.map(set_date_to_midnight),
            _ => resolved,
        }
    })
}

fn applies_auto_value(date: &DateProperty, status: EntityStatus) -> bool {
    match (status, date.auto_value) {
        (EntityStatus::Existing, Some(AutoValue::OnUpdate)) => true,
        (EntityStatus::New | EntityStatus::Copy, Some(_)) => true,
        _ => false,
    }
}

/// Move a timestamp to 00:00:00 UTC of its calendar day.
///
/// Values that are not timestamps are returned unchanged.
pub fn set_date_to_midnight(value: Value) -> Value {
    match value {
        Value::Timestamp(t) => Value::Timestamp(t.date_naive().and_time(NaiveTime::MIN).and_utc()),
        other => other,
    }
}

// ============================================================================
// Required fields
// ============================================================================

/// Set every required top-level field that is absent to `Null`.
///
/// Absent optional fields stay absent and present values are kept, `Null`
/// included. Returns a new tree.
pub fn sanitize_data(values: &EntityValues, properties: &ResolvedProperties) -> EntityValues {
    let mut result = values.clone();
    for (key, property) in properties.iter() {
        if !values.contains_key(key) && property.is_required() {
            result.insert(key.clone(), Value::Null);
        }
    }
    result
}

pub fn get_reference_from(entity: &Entity) -> EntityReference {
    EntityReference::new(entity.id.clone(), entity.path.clone())
}

// ============================================================================
// Callbacks
// ============================================================================

/// What an [`EntityCallbacks::on_pre_save`] hook gets to see.
#[derive(Debug, Clone, Copy)]
pub struct PreSaveContext<'a> {
    pub collection: &'a EntityCollection,
    pub path: &'a str,
    pub entity_id: Option<&'a str>,
    pub values: &'a EntityValues,
    pub previous_values: Option<&'a EntityValues>,
    pub status: EntityStatus,
}

/// Hooks a collection runs around saves and deletes.
///
/// Every hook has a pass-through default. An `Err` aborts the operation.
pub trait EntityCallbacks: Send + Sync {
    /// Rewrite the values about to be saved.
    fn on_pre_save(&self, context: &PreSaveContext<'_>) -> Result<EntityValues> {
        Ok(context.values.clone())
    }

    /// Observe an entity after its values were persisted.
    fn on_save_success(&self, entity: &Entity) {
        let _ = entity;
    }

    /// Veto a delete.
    fn on_pre_delete(&self, entity: &Entity) -> Result<()> {
        let _ = entity;
        Ok(())
    }

    /// Observe an entity after it was deleted.
    fn on_delete(&self, entity: &Entity) {
        let _ = entity;
    }
}

/// Callbacks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallbacks;

impl EntityCallbacks for NoCallbacks {}

// ============================================================================
// Pipeline
// ============================================================================

/// Everything needed to prepare an entity's values for persistence.
#[derive(Clone, Copy)]
pub struct SaveRequest<'a> {
    pub collection: &'a EntityCollection,
    /// Path the entity is saved under; may differ from the collection path
    /// for subcollections.
    pub path: &'a str,
    pub entity_id: Option<&'a str>,
    pub values: &'a EntityValues,
    pub previous_values: Option<&'a EntityValues>,
    pub status: EntityStatus,
    pub timestamp_now: &'a Value,
    pub callbacks: &'a dyn EntityCallbacks,
}

/// Run the pre-save steps and return the values to persist.
pub fn prepare_values_for_save(request: SaveRequest<'_>) -> Result<EntityValues> {
    let SaveRequest {
        collection,
        path,
        entity_id,
        values,
        previous_values,
        status,
        timestamp_now,
        callbacks,
    } = request;

    let mut context = PropertyContext::new(path, values);
    context.entity_id = entity_id;
    context.previous_values = previous_values;
    let properties = resolve_properties(&collection.properties, &context);

    let values = callbacks.on_pre_save(&PreSaveContext {
        collection,
        path,
        entity_id,
        values,
        previous_values,
        status,
    })?;
    debug!(%path, ?status, "pre-save hook done");

    let values = update_date_auto_values(DateAutoValueUpdate {
        input_values: &values,
        properties: &properties,
        status,
        timestamp_now,
    });
    let values = sanitize_data(&values, &properties);
    debug!(%path, fields = values.len(), "values prepared for save");
    Ok(values)
}

/// Run the pre-delete hook for `entity`.
pub fn check_delete(callbacks: &dyn EntityCallbacks, entity: &Entity) -> Result<()> {
    callbacks.on_pre_delete(entity)?;
    debug!(path = %entity.path, id = %entity.id, "delete allowed");
    Ok(())
}

/// Run the post-save hook once the storage layer has written `entity`.
pub fn complete_save(callbacks: &dyn EntityCallbacks, entity: &Entity) {
    callbacks.on_save_success(entity);
    debug!(path = %entity.path, id = %entity.id, "entity saved");
}

/// Run the post-delete hook once the storage layer has removed `entity`.
pub fn complete_delete(callbacks: &dyn EntityCallbacks, entity: &Entity) {
    callbacks.on_delete(entity);
    debug!(path = %entity.path, id = %entity.id, "entity deleted");
}
