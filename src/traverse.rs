//! # Value Traversal
//!
//! Walks a values tree alongside its property schema and applies an
//! operation to every scalar leaf, rebuilding map, array and one-of
//! structure around the results.
//!
//! ```text
//! (values, properties, op) ──▶ map      ──▶ recurse into nested properties
//!                              array    ──▶ per element against `of` / positional item
//!                              one-of   ──▶ per entry against the tagged child property
//!                              leaf     ──▶ op(value, property)
//! ```
//!
//! The schema drives iteration: keys present in the values but absent from
//! the schema are carried over untouched, and keys present in the schema
//! but absent from the values are still visited (with `None`). Input is
//! never mutated.
//!
//! Data that does not fit the schema (a list where a map was expected, a
//! one-of entry without a known tag) is passed through as-is. Nothing here
//! returns an error.

use tracing::{trace, warn};

use crate::model::{EntityValues, Value};
use crate::schema::{
    ArrayItems, ArrayProperty, MapProperty, OneOf, Properties, Property, PropertyKind,
    PropertyOrBuilder, ResolvedProperties,
};

/// Apply `operation` to every leaf of `input` described by `properties`.
///
/// For every schema key, the transformed value replaces the input value.
/// When the transformation yields `None` the key is left as it was in
/// `input` (absent stays absent).
pub fn traverse_values_properties<F>(
    input: &EntityValues,
    properties: &ResolvedProperties,
    mut operation: F,
) -> EntityValues
where
    F: FnMut(Option<&Value>, &Property) -> Option<Value>,
{
    traverse_map(Some(input), properties.as_properties(), &mut operation)
}

/// Apply `operation` to every leaf of a single value described by `property`.
///
/// `property` is expected to be resolved; a builder found below it is
/// skipped and its value passed through.
pub fn traverse_value_property<F>(
    value: Option<&Value>,
    property: &Property,
    mut operation: F,
) -> Option<Value>
where
    F: FnMut(Option<&Value>, &Property) -> Option<Value>,
{
    traverse_value(value, property, &mut operation)
}

fn traverse_map<F>(
    input: Option<&EntityValues>,
    properties: &Properties,
    operation: &mut F,
) -> EntityValues
where
    F: FnMut(Option<&Value>, &Property) -> Option<Value>,
{
    let mut output = input.cloned().unwrap_or_default();
    for (key, slot) in properties {
        let PropertyOrBuilder::Static(property) = slot else {
            warn!(%key, "unresolved property builder during traversal, value left untouched");
            continue;
        };
        let value = input.and_then(|values| values.get(key));
        if let Some(updated) = traverse_value(value, property, operation) {
            output.insert(key.clone(), updated);
        }
    }
    output
}

fn traverse_value<F>(value: Option<&Value>, property: &Property, operation: &mut F) -> Option<Value>
where
    F: FnMut(Option<&Value>, &Property) -> Option<Value>,
{
    match &property.kind {
        PropertyKind::Map(MapProperty { properties: Some(properties), .. }) => match value {
            None | Some(Value::Null) => Some(Value::Map(traverse_map(None, properties, operation))),
            Some(Value::Map(values)) => Some(Value::Map(traverse_map(Some(values), properties, operation))),
            Some(other) => {
                trace!(found = other.type_name(), "map property holds a non-map value, passing through");
                Some(other.clone())
            }
        },
        PropertyKind::Array(array) => traverse_array(value, array, operation),
        PropertyKind::Map(MapProperty { properties: None, .. })
        | PropertyKind::String(_)
        | PropertyKind::Number(_)
        | PropertyKind::Boolean(_)
        | PropertyKind::Date(_)
        | PropertyKind::Reference(_) => operation(value, property),
    }
}

fn traverse_array<F>(value: Option<&Value>, array: &ArrayProperty, operation: &mut F) -> Option<Value>
where
    F: FnMut(Option<&Value>, &Property) -> Option<Value>,
{
    let Some(Value::List(entries)) = value else {
        return value.cloned();
    };
    let entries = match &array.items {
        ArrayItems::None => entries.clone(),
        ArrayItems::Of(of) => match of.as_ref() {
            PropertyOrBuilder::Static(of) => entries
                .iter()
                .map(|entry| traverse_value(Some(entry), of, operation).unwrap_or(Value::Null))
                .collect(),
            PropertyOrBuilder::Builder(_) => {
                warn!("unresolved array `of` builder during traversal, value left untouched");
                entries.clone()
            }
        },
        ArrayItems::Positional(items) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| match items.get(i) {
                Some(PropertyOrBuilder::Static(item)) => {
                    traverse_value(Some(entry), item, operation).unwrap_or(Value::Null)
                }
                _ => entry.clone(),
            })
            .collect(),
        ArrayItems::OneOf(one_of) => entries
            .iter()
            .map(|entry| traverse_one_of_entry(entry, one_of, operation))
            .collect(),
    };
    Some(Value::List(entries))
}

fn traverse_one_of_entry<F>(entry: &Value, one_of: &OneOf, operation: &mut F) -> Value
where
    F: FnMut(Option<&Value>, &Property) -> Option<Value>,
{
    // Null and non-map entries carry no tag
    let Value::Map(fields) = entry else {
        return entry.clone();
    };
    // Schema keys are strings; integer tags are looked up by their decimal form
    let (raw_tag, tag) = match fields.get(one_of.type_field()) {
        Some(raw @ Value::String(tag)) if !tag.is_empty() => (raw, tag.clone()),
        Some(raw @ Value::Int(tag)) if *tag != 0 => (raw, tag.to_string()),
        _ => {
            trace!(type_field = one_of.type_field(), "one-of entry without a tag, passing through");
            return entry.clone();
        }
    };
    let Some(PropertyOrBuilder::Static(child)) = one_of.properties().get(&tag) else {
        trace!(%tag, "one-of entry with unknown tag, passing through");
        return entry.clone();
    };

    let mut rebuilt = EntityValues::with_capacity(2);
    rebuilt.insert(one_of.type_field().to_owned(), raw_tag.clone());
    if let Some(payload) = traverse_value(fields.get(one_of.value_field()), child, operation) {
        rebuilt.insert(one_of.value_field().to_owned(), payload);
    }
    Value::Map(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::model::entity_values;
    use crate::schema::{PropertyBuilder, properties};

    fn resolved(props: Properties) -> ResolvedProperties {
        ResolvedProperties::try_from(props).unwrap()
    }

    fn identity(value: Option<&Value>, _: &Property) -> Option<Value> {
        value.cloned()
    }

    fn shout(value: Option<&Value>, _: &Property) -> Option<Value> {
        match value {
            Some(Value::String(s)) => Some(Value::String(s.to_uppercase())),
            other => other.cloned(),
        }
    }

    #[test]
    fn test_leaves_transformed_and_extra_keys_kept() {
        let props = resolved(properties([("name", Property::string())]));
        let input = entity_values([("name", "ada"), ("untracked", "x")]);
        let out = traverse_values_properties(&input, &props, shout);
        assert_eq!(out, entity_values([("name", "ADA"), ("untracked", "x")]));
        // input untouched
        assert_eq!(input.get("name"), Some(&Value::from("ada")));
    }

    #[test]
    fn test_none_result_keeps_input_value() {
        let props = resolved(properties([("name", Property::string())]));
        let input = entity_values([("name", "ada")]);
        let out = traverse_values_properties(&input, &props, |_, _| None);
        assert_eq!(out, input);
    }

    #[test]
    fn test_missing_map_yields_empty_map() {
        let props = resolved(properties([(
            "publisher",
            Property::map(properties([("name", Property::string())])),
        )]));
        let out = traverse_values_properties(&EntityValues::new(), &props, identity);
        assert_eq!(out, entity_values([("publisher", Value::Map(EntityValues::new()))]));
    }

    #[test]
    fn test_map_without_properties_is_a_leaf() {
        let mut seen = Vec::new();
        let props = resolved(properties([("meta", Property::new(PropertyKind::Map(MapProperty::default())))]));
        let input = entity_values([("meta", Value::Map(entity_values([("a", 1)])))]);
        traverse_values_properties(&input, &props, |value, property| {
            seen.push(property.data_type());
            value.cloned()
        });
        assert_eq!(seen, vec!["map"]);
    }

    #[test]
    fn test_map_holding_wrong_shape_passes_through() {
        let props = resolved(properties([(
            "publisher",
            Property::map(properties([("name", Property::string())])),
        )]));
        let input = entity_values([("publisher", "not a map")]);
        assert_eq!(traverse_values_properties(&input, &props, shout), input);
    }

    #[test]
    fn test_null_map_is_filled_like_a_missing_one() {
        let props = resolved(properties([(
            "publisher",
            Property::map(properties([("name", Property::string().with_default("anon"))])),
        )]));
        let input = entity_values([("publisher", Value::Null)]);
        let out = traverse_values_properties(&input, &props, |value, property| {
            value.cloned().or_else(|| property.default_value.clone())
        });
        assert_eq!(
            out,
            entity_values([("publisher", Value::Map(entity_values([("name", "anon")])))])
        );
    }

    #[test]
    fn test_array_of_preserves_order_and_length() {
        let props = resolved(properties([("tags", Property::array_of(Property::string()))]));
        let input = entity_values([("tags", vec!["a", "b", "c"])]);
        let out = traverse_values_properties(&input, &props, shout);
        assert_eq!(out, entity_values([("tags", vec!["A", "B", "C"])]));
    }

    #[test]
    fn test_array_element_dropped_by_operation_becomes_null() {
        let props = resolved(properties([("tags", Property::array_of(Property::string()))]));
        let input = entity_values([("tags", vec!["a", "b"])]);
        let out = traverse_values_properties(&input, &props, |v, _| {
            v.filter(|v| v.as_str() == Some("a")).cloned()
        });
        assert_eq!(out["tags"], Value::List(vec![Value::from("a"), Value::Null]));
    }

    #[test]
    fn test_array_non_list_passes_through() {
        let props = resolved(properties([("tags", Property::array_of(Property::string()))]));
        let input = entity_values([("tags", "oops")]);
        assert_eq!(traverse_values_properties(&input, &props, shout), input);
        let out = traverse_values_properties(&EntityValues::new(), &props, shout);
        assert!(out.is_empty());
    }

    #[test]
    fn test_positional_items() {
        let props = resolved(properties([(
            "pair",
            Property::array(ArrayItems::Positional(vec![
                Property::string().into(),
                Property::number().into(),
            ])),
        )]));
        let input = entity_values([("pair", vec![Value::from("x"), Value::from(1), Value::from("extra")])]);
        let mut visited = Vec::new();
        traverse_values_properties(&input, &props, |v, p| {
            visited.push(p.data_type());
            v.cloned()
        });
        assert_eq!(visited, vec!["string", "number"]);
    }

    #[test]
    fn test_one_of_known_and_unknown_tags() {
        let one_of = OneOf::new(properties([
            ("text", Property::string()),
            ("count", Property::number()),
        ]));
        let props = resolved(properties([("blocks", Property::array_one_of(one_of))]));
        let input = entity_values([(
            "blocks",
            Value::List(vec![
                Value::Map(entity_values([("type", "text"), ("value", "hi")])),
                Value::Map(entity_values([("type", "video"), ("value", "y")])),
                Value::Null,
                Value::from(5),
                Value::Map(entity_values([("value", "untagged")])),
            ]),
        )]);
        let out = traverse_values_properties(&input, &props, shout);
        assert_eq!(
            out["blocks"],
            Value::List(vec![
                Value::Map(entity_values([("type", "text"), ("value", "HI")])),
                Value::Map(entity_values([("type", "video"), ("value", "y")])),
                Value::Null,
                Value::from(5),
                Value::Map(entity_values([("value", "untagged")])),
            ])
        );
    }

    #[test]
    fn test_one_of_integer_tag_matches_decimal_key() {
        let one_of = OneOf::new(properties([("5", Property::string())]));
        let props = resolved(properties([("blocks", Property::array_one_of(one_of))]));
        let input = entity_values([(
            "blocks",
            Value::List(vec![
                Value::Map(entity_values([("type", Value::from(5)), ("value", Value::from("hi"))])),
                Value::Map(entity_values([("type", Value::from(0)), ("value", Value::from("zero"))])),
                Value::Map(entity_values([("type", Value::from(7)), ("value", Value::from("seven"))])),
            ]),
        )]);
        let out = traverse_values_properties(&input, &props, shout);
        assert_eq!(
            out["blocks"],
            Value::List(vec![
                // the tag keeps its integer form
                Value::Map(entity_values([("type", Value::from(5)), ("value", Value::from("HI"))])),
                Value::Map(entity_values([("type", Value::from(0)), ("value", Value::from("zero"))])),
                Value::Map(entity_values([("type", Value::from(7)), ("value", Value::from("seven"))])),
            ])
        );
    }

    #[test]
    fn test_one_of_custom_fields_drop_extra_keys() {
        let one_of = OneOf::new(properties([("text", Property::string())]))
            .with_fields("kind", "payload")
            .unwrap();
        let props = resolved(properties([("blocks", Property::array_one_of(one_of))]));
        let input = entity_values([(
            "blocks",
            Value::List(vec![Value::Map(entity_values([
                ("kind", "text"),
                ("payload", "hi"),
                ("extra", "gone"),
            ]))]),
        )]);
        let out = traverse_values_properties(&input, &props, shout);
        assert_eq!(
            out["blocks"],
            Value::List(vec![Value::Map(entity_values([("kind", "text"), ("payload", "HI")]))])
        );
    }

    #[test]
    fn test_nested_builder_passes_through() {
        let nested = Property::map(properties([(
            "inner",
            PropertyOrBuilder::from(PropertyBuilder::new(|_| Property::string())),
        )]));
        let value = Value::Map(entity_values([("inner", "keep")]));
        let out = traverse_value_property(Some(&value), &nested, shout);
        assert_eq!(out, Some(value));
    }
}
