//! Property classification used by forms and tables.

use super::property::{ArrayItems, Disabled, Property, PropertyKind, PropertyOrBuilder};

/// Whether the field can be edited by a user at all.
///
/// True for explicitly read-only fields, for dates filled by an
/// auto-value, and for references without a (non-empty) collection path.
pub fn is_read_only(property: &Property) -> bool {
    if property.read_only {
        return true;
    }
    match &property.kind {
        PropertyKind::Date(date) => date.auto_value.is_some(),
        PropertyKind::Reference(reference) => reference.path.as_deref().is_none_or(str::is_empty),
        _ => false,
    }
}

/// Whether the field is hidden from forms (`disabled: { hidden: true }`).
pub fn is_hidden(property: &Property) -> bool {
    matches!(&property.disabled, Some(Disabled::Config(config)) if config.hidden)
}

/// Whether the field can be edited inline, e.g. in a table cell.
pub fn editable_property(slot: &PropertyOrBuilder) -> bool {
    let PropertyOrBuilder::Static(property) = slot else {
        return false;
    };
    if let PropertyKind::Array(array) = &property.kind {
        match &array.items {
            ArrayItems::Of(of) if of.is_builder() => return false,
            ArrayItems::Positional(_) => return false,
            _ => {}
        }
    }
    property.editable.unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::property::{
        AutoValue, PropertyBuilder, PropertyKind, ReferenceProperty,
    };

    #[test]
    fn test_read_only_rules() {
        assert!(!is_read_only(&Property::string()));
        assert!(is_read_only(&Property::string().read_only()));
        assert!(is_read_only(&Property::date().with_auto_value(AutoValue::OnCreate)));
        assert!(!is_read_only(&Property::date()));
        assert!(!is_read_only(&Property::reference("products")));
        let unbound = Property::new(PropertyKind::Reference(ReferenceProperty::default()));
        assert!(is_read_only(&unbound));
        let blank = Property::new(PropertyKind::Reference(ReferenceProperty {
            path: Some(String::new()),
            ..ReferenceProperty::default()
        }));
        assert!(is_read_only(&blank));
    }

    #[test]
    fn test_hidden_only_for_structured_disabled() {
        assert!(is_hidden(&Property::string().hidden()));
        assert!(!is_hidden(&Property::string().with_disabled(Disabled::Flag(true))));
        assert!(!is_hidden(&Property::string()));
    }

    #[test]
    fn test_editable_property() {
        let builder = PropertyOrBuilder::from(PropertyBuilder::new(|_| Property::string()));
        assert!(!editable_property(&builder));

        let of_builder = Property::array_of(PropertyBuilder::new(|_| Property::string()));
        assert!(!editable_property(&of_builder.into()));

        let positional = Property::array(ArrayItems::Positional(vec![Property::string().into()]));
        assert!(!editable_property(&positional.into()));

        assert!(editable_property(&Property::array_of(Property::string()).into()));
        assert!(editable_property(&Property::string().into()));
        assert!(!editable_property(&Property::string().with_editable(false).into()));
    }
}
