//! Field bindings: which form control renders a property.
//!
//! [`select_field_binding`] picks the control for a resolved property. The
//! `*Binding::new` constructors are for controls that only work on a
//! specific array shape; they fail with
//! [`Error::FieldMisconfiguration`] when handed anything else.

use crate::model::Value;
use crate::schema::{
    ArrayItems, MapProperty, Properties, Property, PropertyKind, PropertyOrBuilder,
    ReferenceProperty, StringProperty, is_read_only,
};
use crate::{Error, Result};

/// Form control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldBinding {
    ReadOnly,
    Text,
    MultilineText,
    Markdown,
    Select,
    MultiSelect,
    StorageUpload,
    MultipleStorageUpload,
    Switch,
    DateTime,
    Reference,
    Map,
    KeyValue,
    ArrayOfReferences,
    Repeat,
    Block,
}

/// Pick the form control for `property`.
pub fn select_field_binding(property: &Property) -> FieldBinding {
    if is_read_only(property) {
        return FieldBinding::ReadOnly;
    }
    match &property.kind {
        PropertyKind::String(string) => string_binding(string),
        PropertyKind::Number(number) if number.enum_values.is_some() => FieldBinding::Select,
        PropertyKind::Number(_) => FieldBinding::Text,
        PropertyKind::Boolean(_) => FieldBinding::Switch,
        PropertyKind::Date(_) => FieldBinding::DateTime,
        PropertyKind::Reference(_) => FieldBinding::Reference,
        PropertyKind::Map(MapProperty { properties: Some(_), .. }) => FieldBinding::Map,
        PropertyKind::Map(MapProperty { properties: None, .. }) => FieldBinding::KeyValue,
        PropertyKind::Array(array) => match &array.items {
            ArrayItems::Of(of) => match of.as_static().map(|p| &p.kind) {
                Some(PropertyKind::Reference(_)) => FieldBinding::ArrayOfReferences,
                Some(PropertyKind::String(s)) if s.enum_values.is_some() => FieldBinding::MultiSelect,
                Some(PropertyKind::Number(n)) if n.enum_values.is_some() => FieldBinding::MultiSelect,
                Some(PropertyKind::String(s)) if s.storage.is_some() => {
                    FieldBinding::MultipleStorageUpload
                }
                Some(_) => FieldBinding::Repeat,
                None => FieldBinding::ReadOnly,
            },
            ArrayItems::OneOf(_) => FieldBinding::Block,
            ArrayItems::Positional(_) | ArrayItems::None => FieldBinding::ReadOnly,
        },
    }
}

fn string_binding(string: &StringProperty) -> FieldBinding {
    if string.enum_values.is_some() {
        FieldBinding::Select
    } else if string.storage.is_some() {
        FieldBinding::StorageUpload
    } else if string.markdown {
        FieldBinding::Markdown
    } else if string.multiline {
        FieldBinding::MultilineText
    } else {
        FieldBinding::Text
    }
}

fn misconfigured(binding: &'static str, message: &str) -> Error {
    Error::FieldMisconfiguration {
        binding,
        message: message.to_owned(),
    }
}

fn single_of<'p>(property: &'p Property, binding: &'static str) -> Result<&'p Property> {
    let PropertyKind::Array(array) = &property.kind else {
        return Err(misconfigured(binding, "expected an array property"));
    };
    match &array.items {
        ArrayItems::Of(of) => match of.as_ref() {
            PropertyOrBuilder::Static(of) => Ok(of),
            PropertyOrBuilder::Builder(_) => {
                Err(misconfigured(binding, "array `of` must be resolved before binding"))
            }
        },
        ArrayItems::Positional(_) => Err(misconfigured(
            binding,
            "using array properties instead of single one in `of`",
        )),
        ArrayItems::OneOf(_) | ArrayItems::None => {
            Err(misconfigured(binding, "array property has no `of`"))
        }
    }
}

// ============================================================================
// Array of references
// ============================================================================

/// Multiple-reference selector.
#[derive(Debug, Clone, Copy)]
pub struct ArrayOfReferencesBinding<'p> {
    pub property: &'p Property,
    pub of: &'p ReferenceProperty,
}

impl<'p> ArrayOfReferencesBinding<'p> {
    pub fn new(property: &'p Property) -> Result<Self> {
        const NAME: &str = "ArrayOfReferences";
        match &single_of(property, NAME)?.kind {
            PropertyKind::Reference(of) => Ok(Self { property, of }),
            _ => Err(misconfigured(NAME, "expected a property containing references")),
        }
    }

    /// Collection the references point to.
    pub fn target_path(&self) -> Option<&'p str> {
        self.of.path.as_deref()
    }

    /// Whether the panel starts expanded; defaults to true.
    pub fn expanded(&self) -> bool {
        match &self.property.kind {
            PropertyKind::Array(array) => array.expanded.unwrap_or(true),
            _ => true,
        }
    }

    /// Ids of the entities currently referenced by `value`.
    pub fn selected_ids(value: Option<&Value>) -> Vec<&str> {
        value
            .and_then(Value::as_list)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_reference)
                    .map(|r| r.id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// Array of maps
// ============================================================================

/// Table editor for an array whose elements are maps.
#[derive(Debug, Clone, Copy)]
pub struct ArrayOfMapsBinding<'p> {
    pub property: &'p Property,
    pub columns: &'p Properties,
}

impl<'p> ArrayOfMapsBinding<'p> {
    pub fn new(property: &'p Property) -> Result<Self> {
        const NAME: &str = "ArrayOfMaps";
        match &single_of(property, NAME)?.kind {
            PropertyKind::Map(MapProperty { properties: Some(columns), .. }) => {
                Ok(Self { property, columns })
            }
            _ => Err(misconfigured(NAME, "this array field should have type map")),
        }
    }

    /// Form field names of the cells in row `index`, e.g. `prices[2].amount`.
    pub fn entry_field_names(&self, name: &str, index: usize) -> Vec<String> {
        self.columns
            .keys()
            .map(|key| format!("{name}[{index}].{key}"))
            .collect()
    }
}

// ============================================================================
// Array of stored files
// ============================================================================

/// Preview of several uploaded files.
#[derive(Debug, Clone, Copy)]
pub struct ArrayOfStorageBinding<'p> {
    pub property: &'p Property,
    pub of: &'p StringProperty,
}

impl<'p> ArrayOfStorageBinding<'p> {
    pub fn new(property: &'p Property) -> Result<Self> {
        const NAME: &str = "ArrayOfStorage";
        match &single_of(property, NAME)?.kind {
            PropertyKind::String(of) => Ok(Self { property, of }),
            _ => Err(misconfigured(NAME, "expected an array of string properties")),
        }
    }

    /// Stored file paths in `value`, skipping anything that is not a string.
    pub fn file_paths(value: Option<&Value>) -> Vec<&str> {
        value
            .and_then(Value::as_list)
            .map(|entries| entries.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
