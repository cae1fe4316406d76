//! Default values used to seed the form of a new entity.

use crate::model::{EntityValues, Value};
use crate::schema::{MapProperty, Properties, PropertyKind, PropertyOrBuilder};

/// Collect the declared defaults of `properties`.
///
/// Maps with nested properties contribute the defaults of their children,
/// and only when at least one child has one. Builders contribute nothing,
/// since they cannot be evaluated without live values.
pub fn get_default_values_for(properties: &Properties) -> EntityValues {
    properties
        .iter()
        .filter_map(|(key, slot)| default_value_for(slot).map(|value| (key.clone(), value)))
        .collect()
}

fn default_value_for(slot: &PropertyOrBuilder) -> Option<Value> {
    let property = slot.as_static()?;
    match &property.kind {
        PropertyKind::Map(MapProperty { properties: Some(children), .. }) => {
            let defaults = get_default_values_for(children);
            (!defaults.is_empty()).then_some(Value::Map(defaults))
        }
        _ => property.default_value.clone(),
    }
}
