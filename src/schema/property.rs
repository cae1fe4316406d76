//! Property schemas: the description of one entity field.
//!
//! A [`Property`] carries the attributes every field shares (name,
//! validation, read-only/disabled flags, default value) plus a
//! [`PropertyKind`] holding the data-type specific configuration. The
//! kind is a closed enum, so every consumer matches it exhaustively.
//!
//! Schemas are usually authored in JSON:
//!
//! ```json
//! { "dataType": "date", "name": "Added on", "autoValue": "on_create" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{EntityValues, Value};
use crate::{Error, Result};

/// Key holding the variant tag of a one-of array entry, unless overridden.
pub const DEFAULT_ONE_OF_TYPE: &str = "type";
/// Key holding the payload of a one-of array entry, unless overridden.
pub const DEFAULT_ONE_OF_VALUE: &str = "value";

/// Property slots keyed by field name, in declaration order.
pub type Properties = IndexMap<String, PropertyOrBuilder>;

/// Allowed values of an enum-like string or number field, mapped to labels.
/// Declaration order is the order options are offered in.
pub type EnumValues = IndexMap<String, String>;

/// Build `Properties` from (key, property) pairs.
pub fn properties<K, P>(pairs: impl IntoIterator<Item = (K, P)>) -> Properties
where
    K: Into<String>,
    P: Into<PropertyOrBuilder>,
{
    pairs.into_iter().map(|(k, p)| (k.into(), p.into())).collect()
}

fn is_false(b: &bool) -> bool { !*b }

// ============================================================================
// Property
// ============================================================================

/// Schema node describing one entity field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default, alias = "title", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<Disabled>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<u32>,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl Property {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            name: None,
            description: None,
            validation: None,
            read_only: false,
            disabled: None,
            editable: None,
            default_value: None,
            column_width: None,
            kind,
        }
    }

    pub fn string() -> Self { Self::new(PropertyKind::String(StringProperty::default())) }
    pub fn number() -> Self { Self::new(PropertyKind::Number(NumberProperty::default())) }
    pub fn boolean() -> Self { Self::new(PropertyKind::Boolean(BooleanProperty::default())) }
    pub fn date() -> Self { Self::new(PropertyKind::Date(DateProperty::default())) }

    pub fn reference(path: impl Into<String>) -> Self {
        Self::new(PropertyKind::Reference(ReferenceProperty {
            path: Some(path.into()),
            preview_properties: None,
        }))
    }

    pub fn map(properties: Properties) -> Self {
        Self::new(PropertyKind::Map(MapProperty {
            properties: Some(properties),
            preview_properties: None,
        }))
    }

    pub fn array(items: ArrayItems) -> Self {
        Self::new(PropertyKind::Array(ArrayProperty { items, expanded: None }))
    }

    /// Array whose every element is described by `of`.
    pub fn array_of(of: impl Into<PropertyOrBuilder>) -> Self {
        Self::array(ArrayItems::Of(Box::new(of.into())))
    }

    /// Array of tagged entries, see [`OneOf`].
    pub fn array_one_of(one_of: OneOf) -> Self {
        Self::array(ArrayItems::OneOf(one_of))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.validation.get_or_insert_with(Validation::default).required = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_disabled(mut self, disabled: Disabled) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Disable the field and hide it from forms.
    pub fn hidden(self) -> Self {
        self.with_disabled(Disabled::Config(DisabledConfig {
            hidden: true,
            ..DisabledConfig::default()
        }))
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the auto-value policy. Only meaningful on date properties.
    pub fn with_auto_value(mut self, auto_value: AutoValue) -> Self {
        if let PropertyKind::Date(date) = &mut self.kind {
            date.auto_value = Some(auto_value);
        }
        self
    }

    /// Set the display mode. Only meaningful on date properties.
    pub fn with_date_mode(mut self, mode: DateMode) -> Self {
        if let PropertyKind::Date(date) = &mut self.kind {
            date.mode = Some(mode);
        }
        self
    }

    pub fn data_type(&self) -> &'static str {
        self.kind.data_type()
    }

    pub fn is_required(&self) -> bool {
        self.validation.as_ref().is_some_and(|v| v.required)
    }

    /// True when no builder remains anywhere in this schema subtree.
    pub fn is_static(&self) -> bool {
        match &self.kind {
            PropertyKind::Map(map) => map
                .properties
                .as_ref()
                .is_none_or(|props| props.values().all(PropertyOrBuilder::is_static)),
            PropertyKind::Array(array) => match &array.items {
                ArrayItems::None => true,
                ArrayItems::Of(of) => of.is_static(),
                ArrayItems::Positional(items) => items.iter().all(PropertyOrBuilder::is_static),
                ArrayItems::OneOf(one_of) => {
                    one_of.properties().values().all(PropertyOrBuilder::is_static)
                }
            },
            PropertyKind::String(_)
            | PropertyKind::Number(_)
            | PropertyKind::Boolean(_)
            | PropertyKind::Date(_)
            | PropertyKind::Reference(_) => true,
        }
    }
}

/// Validation rules of a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Validation {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_message: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub unique: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// `disabled: true` or `disabled: { hidden, clearOnDisabled, disabledMessage }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Disabled {
    Flag(bool),
    Config(DisabledConfig),
}

impl Disabled {
    pub fn is_disabled(&self) -> bool {
        match self {
            Disabled::Flag(flag) => *flag,
            Disabled::Config(_) => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisabledConfig {
    pub hidden: bool,
    pub clear_on_disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_message: Option<String>,
}

// ============================================================================
// Data-type specific configuration
// ============================================================================

/// Data type of a property and the structure that goes with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all = "snake_case")]
pub enum PropertyKind {
    String(StringProperty),
    Number(NumberProperty),
    Boolean(BooleanProperty),
    Date(DateProperty),
    Reference(ReferenceProperty),
    Map(MapProperty),
    Array(ArrayProperty),
}

impl PropertyKind {
    pub fn data_type(&self) -> &'static str {
        match self {
            PropertyKind::String(_) => "string",
            PropertyKind::Number(_) => "number",
            PropertyKind::Boolean(_) => "boolean",
            PropertyKind::Date(_) => "date",
            PropertyKind::Reference(_) => "reference",
            PropertyKind::Map(_) => "map",
            PropertyKind::Array(_) => "array",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<EnumValues>,
    #[serde(skip_serializing_if = "is_false")]
    pub multiline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub markdown: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub url: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub email: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,
}

/// Where uploaded files for a string field are stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    pub storage_path: String,
    pub accepted_files: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<EnumValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanProperty {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_value: Option<AutoValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DateMode>,
}

/// When a date field is overwritten with the current timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoValue {
    OnCreate,
    OnUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
    /// Calendar day only, stored at midnight.
    Date,
    DateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceProperty {
    /// Collection the referenced entities live in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_properties: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_properties: Option<Vec<String>>,
}

// ============================================================================
// Arrays
// ============================================================================

/// What describes the elements of an array property.
///
/// `of` and `oneOf` exclude each other, so a schema can hold at most one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArrayItems {
    /// No element schema; values are opaque.
    #[default]
    None,
    /// Every element follows the same property.
    Of(Box<PropertyOrBuilder>),
    /// Element `i` follows property `i`.
    Positional(Vec<PropertyOrBuilder>),
    /// Elements are tagged entries, see [`OneOf`].
    OneOf(OneOf),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawArrayProperty", into = "RawArrayProperty")]
pub struct ArrayProperty {
    pub items: ArrayItems,
    pub expanded: Option<bool>,
}

/// Wire shape of an array property, before the `of`/`oneOf` check.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArrayProperty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    of: Option<RawArrayOf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    one_of: Option<OneOf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expanded: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawArrayOf {
    Single(Box<PropertyOrBuilder>),
    Positional(Vec<PropertyOrBuilder>),
}

impl TryFrom<RawArrayProperty> for ArrayProperty {
    type Error = Error;

    fn try_from(raw: RawArrayProperty) -> Result<Self> {
        let items = match (raw.of, raw.one_of) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidSchema(
                    "array property declares both `of` and `oneOf`".into(),
                ));
            }
            (Some(RawArrayOf::Single(of)), None) => ArrayItems::Of(of),
            (Some(RawArrayOf::Positional(items)), None) => ArrayItems::Positional(items),
            (None, Some(one_of)) => ArrayItems::OneOf(one_of),
            (None, None) => ArrayItems::None,
        };
        Ok(Self { items, expanded: raw.expanded })
    }
}

impl From<ArrayProperty> for RawArrayProperty {
    fn from(array: ArrayProperty) -> Self {
        let (of, one_of) = match array.items {
            ArrayItems::None => (None, None),
            ArrayItems::Of(of) => (Some(RawArrayOf::Single(of)), None),
            ArrayItems::Positional(items) => (Some(RawArrayOf::Positional(items)), None),
            ArrayItems::OneOf(one_of) => (None, Some(one_of)),
        };
        Self { of, one_of, expanded: array.expanded }
    }
}

/// Discriminated-union element schema for arrays.
///
/// Each entry is a map `{ <type_field>: tag, <value_field>: payload }`; the
/// tag selects the child property in `properties` that governs the payload.
/// Discriminator keys default to [`DEFAULT_ONE_OF_TYPE`] and
/// [`DEFAULT_ONE_OF_VALUE`], and are validated when the `OneOf` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOneOf", into = "RawOneOf")]
pub struct OneOf {
    type_field: String,
    value_field: String,
    properties: Properties,
}

impl OneOf {
    pub fn new(properties: Properties) -> Self {
        Self {
            type_field: DEFAULT_ONE_OF_TYPE.to_owned(),
            value_field: DEFAULT_ONE_OF_VALUE.to_owned(),
            properties,
        }
    }

    /// Use custom discriminator keys.
    pub fn with_fields(
        mut self,
        type_field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Result<Self> {
        let type_field = type_field.into();
        let value_field = value_field.into();
        if type_field.is_empty() || value_field.is_empty() {
            return Err(Error::InvalidSchema("oneOf discriminator keys must not be empty".into()));
        }
        if type_field == value_field {
            return Err(Error::InvalidSchema(format!(
                "oneOf type and value keys must differ, both are `{type_field}`"
            )));
        }
        self.type_field = type_field;
        self.value_field = value_field;
        Ok(self)
    }

    pub fn type_field(&self) -> &str { &self.type_field }
    pub fn value_field(&self) -> &str { &self.value_field }
    pub fn properties(&self) -> &Properties { &self.properties }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties { &mut self.properties }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOneOf {
    #[serde(default)]
    type_field: Option<String>,
    #[serde(default)]
    value_field: Option<String>,
    properties: Properties,
}

impl TryFrom<RawOneOf> for OneOf {
    type Error = Error;

    fn try_from(raw: RawOneOf) -> Result<Self> {
        OneOf::new(raw.properties).with_fields(
            raw.type_field.unwrap_or_else(|| DEFAULT_ONE_OF_TYPE.to_owned()),
            raw.value_field.unwrap_or_else(|| DEFAULT_ONE_OF_VALUE.to_owned()),
        )
    }
}

impl From<OneOf> for RawOneOf {
    fn from(one_of: OneOf) -> Self {
        Self {
            type_field: Some(one_of.type_field),
            value_field: Some(one_of.value_field),
            properties: one_of.properties,
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Live form state handed to a [`PropertyBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct PropertyContext<'a> {
    pub values: &'a EntityValues,
    pub previous_values: Option<&'a EntityValues>,
    /// Collection path of the entity.
    pub path: &'a str,
    pub entity_id: Option<&'a str>,
}

impl<'a> PropertyContext<'a> {
    pub fn new(path: &'a str, values: &'a EntityValues) -> Self {
        Self { values, previous_values: None, path, entity_id: None }
    }

    pub fn with_entity_id(mut self, entity_id: &'a str) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_previous_values(mut self, previous_values: &'a EntityValues) -> Self {
        self.previous_values = Some(previous_values);
        self
    }
}

type BuildFn = dyn Fn(&PropertyContext<'_>) -> Property + Send + Sync;

/// A property computed from live values, e.g. a price field that is only
/// enabled while the product is available.
#[derive(Clone)]
pub struct PropertyBuilder(Arc<BuildFn>);

impl PropertyBuilder {
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&PropertyContext<'_>) -> Property + Send + Sync + 'static,
    {
        Self(Arc::new(build))
    }

    pub fn build(&self, context: &PropertyContext<'_>) -> Property {
        (self.0)(context)
    }
}

impl fmt::Debug for PropertyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PropertyBuilder(..)")
    }
}

impl PartialEq for PropertyBuilder {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A property slot: either a static schema or a builder resolved against
/// live values before any traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyOrBuilder {
    Static(Property),
    Builder(PropertyBuilder),
}

impl PropertyOrBuilder {
    pub fn as_static(&self) -> Option<&Property> {
        match self {
            PropertyOrBuilder::Static(p) => Some(p),
            PropertyOrBuilder::Builder(_) => None,
        }
    }

    pub fn is_builder(&self) -> bool {
        matches!(self, PropertyOrBuilder::Builder(_))
    }

    pub fn is_static(&self) -> bool {
        self.as_static().is_some_and(Property::is_static)
    }
}

impl From<Property> for PropertyOrBuilder {
    fn from(p: Property) -> Self { PropertyOrBuilder::Static(p) }
}

impl From<PropertyBuilder> for PropertyOrBuilder {
    fn from(b: PropertyBuilder) -> Self { PropertyOrBuilder::Builder(b) }
}

impl Serialize for PropertyOrBuilder {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PropertyOrBuilder::Static(p) => p.serialize(serializer),
            PropertyOrBuilder::Builder(_) => Err(serde::ser::Error::custom(
                "property builders cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyOrBuilder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Property::deserialize(deserializer).map(PropertyOrBuilder::Static)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_string_property() {
        let p: Property = serde_json::from_value(json!({
            "dataType": "string",
            "title": "Currency",
            "enumValues": { "EUR": "Euros", "DOL": "Dollars" },
            "validation": { "required": true },
            "defaultValue": "EUR"
        }))
        .unwrap();
        assert_eq!(p.name.as_deref(), Some("Currency"));
        assert!(p.is_required());
        assert_eq!(p.default_value, Some(Value::from("EUR")));
        let PropertyKind::String(s) = &p.kind else { panic!("expected string") };
        assert_eq!(s.enum_values.as_ref().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_deserialize_date_auto_value() {
        let p: Property = serde_json::from_value(json!({
            "dataType": "date",
            "autoValue": "on_create",
            "mode": "date"
        }))
        .unwrap();
        assert_eq!(
            p.kind,
            PropertyKind::Date(DateProperty {
                auto_value: Some(AutoValue::OnCreate),
                mode: Some(DateMode::Date),
            })
        );
    }

    #[test]
    fn test_deserialize_disabled_forms() {
        let flag: Property =
            serde_json::from_value(json!({ "dataType": "boolean", "disabled": true })).unwrap();
        assert_eq!(flag.disabled, Some(Disabled::Flag(true)));

        let config: Property = serde_json::from_value(json!({
            "dataType": "number",
            "disabled": { "hidden": true, "disabledMessage": "no" }
        }))
        .unwrap();
        let Some(Disabled::Config(c)) = config.disabled else { panic!("expected config") };
        assert!(c.hidden);
        assert_eq!(c.disabled_message.as_deref(), Some("no"));
    }

    #[test]
    fn test_deserialize_array_variants() {
        let single: Property = serde_json::from_value(json!({
            "dataType": "array",
            "of": { "dataType": "reference", "path": "products" }
        }))
        .unwrap();
        let PropertyKind::Array(a) = &single.kind else { panic!("expected array") };
        assert!(matches!(a.items, ArrayItems::Of(_)));

        let positional: Property = serde_json::from_value(json!({
            "dataType": "array",
            "of": [{ "dataType": "string" }, { "dataType": "number" }]
        }))
        .unwrap();
        let PropertyKind::Array(a) = &positional.kind else { panic!("expected array") };
        assert!(matches!(&a.items, ArrayItems::Positional(items) if items.len() == 2));

        let one_of: Property = serde_json::from_value(json!({
            "dataType": "array",
            "oneOf": { "properties": { "text": { "dataType": "string" } } }
        }))
        .unwrap();
        let PropertyKind::Array(a) = &one_of.kind else { panic!("expected array") };
        let ArrayItems::OneOf(o) = &a.items else { panic!("expected oneOf") };
        assert_eq!(o.type_field(), DEFAULT_ONE_OF_TYPE);
        assert_eq!(o.value_field(), DEFAULT_ONE_OF_VALUE);
    }

    #[test]
    fn test_array_with_of_and_one_of_is_rejected() {
        let err = serde_json::from_value::<Property>(json!({
            "dataType": "array",
            "of": { "dataType": "string" },
            "oneOf": { "properties": {} }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("both `of` and `oneOf`"));
    }

    #[test]
    fn test_one_of_fields_validated() {
        assert!(OneOf::new(Properties::new()).with_fields("", "value").is_err());
        assert!(OneOf::new(Properties::new()).with_fields("kind", "kind").is_err());
        let ok = OneOf::new(Properties::new()).with_fields("kind", "payload").unwrap();
        assert_eq!(ok.type_field(), "kind");
        assert_eq!(ok.value_field(), "payload");
    }

    #[test]
    fn test_serialize_roundtrips_schema() {
        let p = Property::map(properties([
            ("name", Property::string().with_default("Default publisher")),
            ("added_on", Property::date().with_auto_value(AutoValue::OnUpdate)),
        ]))
        .with_name("Publisher");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["dataType"], json!("map"));
        assert_eq!(json["properties"]["added_on"]["autoValue"], json!("on_update"));
        let back: Property = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_builder_cannot_be_serialized() {
        let slot = PropertyOrBuilder::from(PropertyBuilder::new(|_| Property::string()));
        assert!(serde_json::to_value(&slot).is_err());
    }

    #[test]
    fn test_is_static_sees_nested_builders() {
        let nested = Property::map(properties([(
            "inner",
            PropertyOrBuilder::from(PropertyBuilder::new(|_| Property::number())),
        )]));
        assert!(!nested.is_static());
        assert!(Property::array_of(Property::string()).is_static());
    }
}
