//! Builder resolution.
//!
//! Turns a schema that may contain [`PropertyBuilder`]s into a fully static
//! one by evaluating every builder against the live form state. Traversal
//! only ever sees the result, wrapped in [`ResolvedProperties`].

use crate::{Error, Result};
use super::property::{
    ArrayItems, Properties, Property, PropertyContext, PropertyKind, PropertyOrBuilder,
};

/// Properties guaranteed to contain no builders, at any depth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedProperties(Properties);

impl ResolvedProperties {
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.0.get(key).and_then(PropertyOrBuilder::as_static)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Property)> {
        self.0
            .iter()
            .filter_map(|(key, slot)| slot.as_static().map(|p| (key, p)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_properties(&self) -> &Properties { &self.0 }
    pub fn into_inner(self) -> Properties { self.0 }
}

impl TryFrom<Properties> for ResolvedProperties {
    type Error = Error;

    /// Accept a schema that is already static.
    fn try_from(properties: Properties) -> Result<Self> {
        if let Some(key) = properties
            .iter()
            .find_map(|(key, slot)| (!slot.is_static()).then(|| key.clone()))
        {
            return Err(Error::UnresolvedBuilder { key });
        }
        Ok(Self(properties))
    }
}

/// Resolve a single slot, including every builder nested below it.
pub fn resolve_property(slot: &PropertyOrBuilder, context: &PropertyContext<'_>) -> Property {
    let property = match slot {
        PropertyOrBuilder::Static(p) => p.clone(),
        PropertyOrBuilder::Builder(builder) => builder.build(context),
    };
    resolve_nested(property, context)
}

/// Resolve every slot of `properties` against `context`.
pub fn resolve_properties(
    properties: &Properties,
    context: &PropertyContext<'_>,
) -> ResolvedProperties {
    ResolvedProperties(resolve_map(properties, context))
}

fn resolve_map(properties: &Properties, context: &PropertyContext<'_>) -> Properties {
    properties
        .iter()
        .map(|(key, slot)| (key.clone(), resolve_property(slot, context).into()))
        .collect()
}

fn resolve_nested(mut property: Property, context: &PropertyContext<'_>) -> Property {
    match &mut property.kind {
        PropertyKind::Map(map) => {
            if let Some(children) = map.properties.as_mut() {
                *children = resolve_map(children, context);
            }
        }
        PropertyKind::Array(array) => match &mut array.items {
            ArrayItems::None => {}
            ArrayItems::Of(of) => {
                let resolved = resolve_property(&**of, context);
                **of = resolved.into();
            }
            ArrayItems::Positional(items) => {
                for item in items.iter_mut() {
                    let resolved = resolve_property(item, context);
                    *item = resolved.into();
                }
            }
            ArrayItems::OneOf(one_of) => {
                let resolved = resolve_map(one_of.properties(), context);
                *one_of.properties_mut() = resolved;
            }
        },
        PropertyKind::String(_)
        | PropertyKind::Number(_)
        | PropertyKind::Boolean(_)
        | PropertyKind::Date(_)
        | PropertyKind::Reference(_) => {}
    }
    property
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityValues, Value, entity_values};
    use crate::schema::property::{Disabled, OneOf, PropertyBuilder, properties};

    fn price_builder() -> PropertyOrBuilder {
        PropertyBuilder::new(|ctx| {
            let available = matches!(ctx.values.get("available"), Some(Value::Bool(true)));
            Property::number()
                .with_name("Price")
                .with_disabled(Disabled::Flag(!available))
        })
        .into()
    }

    #[test]
    fn test_builder_sees_live_values() {
        let values = entity_values([("available", true)]);
        let ctx = PropertyContext::new("products", &values);
        let resolved = resolve_property(&price_builder(), &ctx);
        assert_eq!(resolved.disabled, Some(Disabled::Flag(false)));

        let empty = EntityValues::new();
        let ctx = PropertyContext::new("products", &empty);
        let resolved = resolve_property(&price_builder(), &ctx);
        assert_eq!(resolved.disabled, Some(Disabled::Flag(true)));
    }

    #[test]
    fn test_nested_builders_resolved() {
        let schema = properties([
            ("price", price_builder()),
            ("publisher", Property::map(properties([("fee", price_builder())])).into()),
            ("prices", Property::array_of(price_builder()).into()),
            (
                "blocks",
                Property::array_one_of(OneOf::new(properties([("price", price_builder())]))).into(),
            ),
        ]);
        let values = EntityValues::new();
        let resolved = resolve_properties(&schema, &PropertyContext::new("products", &values));
        assert_eq!(resolved.len(), 4);
        assert!(resolved.as_properties().values().all(PropertyOrBuilder::is_static));
        assert!(ResolvedProperties::try_from(resolved.into_inner()).is_ok());
    }

    #[test]
    fn test_try_from_rejects_builders() {
        let schema = properties([("price", price_builder())]);
        match ResolvedProperties::try_from(schema) {
            Err(Error::UnresolvedBuilder { key }) => assert_eq!(key, "price"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
