//! Static field tables describing an auditable type.
//!
//! A [`TypeSchema`] lists the declared fields of a record type in declaration
//! order. It is generated by `#[derive(Auditable)]` and lives in a `static`,
//! so the table is available even when no instance of the type exists (an
//! empty list still knows its item type).

/// One declared field of an auditable type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name as it appears in change locators.
    pub name: &'static str,
    /// Whether the field is marked as the identity key of its type.
    pub key: bool,
}

impl FieldSchema {
    /// A plain field.
    pub const fn new(name: &'static str) -> Self {
        Self { name, key: false }
    }

    /// A field marked as the identity key.
    pub const fn key(name: &'static str) -> Self {
        Self { name, key: true }
    }
}

/// The ordered field table of an auditable type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeSchema {
    /// Simple (unqualified) type name.
    pub name: &'static str,
    /// Declared fields in declaration order.
    pub fields: &'static [FieldSchema],
}

impl TypeSchema {
    /// Create a schema from a name and a field table.
    pub const fn new(name: &'static str, fields: &'static [FieldSchema]) -> Self {
        Self { name, fields }
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the type declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of the field called `name`, if declared.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Resolve the identity key of this type.
    ///
    /// Returns the first field, in declaration order, that is either named
    /// `default_name` or carries the key marker.
    pub fn key_field(&self, default_name: &str) -> Option<(usize, &'static FieldSchema)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, f)| f.name == default_name || f.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ACCOUNT: TypeSchema =
        TypeSchema::new("Account", &[FieldSchema::new("id"), FieldSchema::new("accountName")]);

    static SUBJECT: TypeSchema = TypeSchema::new(
        "Subject",
        &[FieldSchema::key("subjectId"), FieldSchema::new("subjectName")],
    );

    static WHEEL: TypeSchema =
        TypeSchema::new("Wheel", &[FieldSchema::new("wheelId"), FieldSchema::new("wheelBrand")]);

    #[test]
    fn key_by_default_name() {
        let (index, field) = ACCOUNT.key_field("id").unwrap();
        assert_eq!(index, 0);
        assert_eq!(field.name, "id");
    }

    #[test]
    fn key_by_marker() {
        let (index, field) = SUBJECT.key_field("id").unwrap();
        assert_eq!(index, 0);
        assert_eq!(field.name, "subjectId");
        assert!(field.key);
    }

    #[test]
    fn first_match_in_declaration_order_wins() {
        static MIXED: TypeSchema = TypeSchema::new(
            "Mixed",
            &[FieldSchema::new("label"), FieldSchema::key("code"), FieldSchema::new("id")],
        );
        let (index, field) = MIXED.key_field("id").unwrap();
        assert_eq!(index, 1);
        assert_eq!(field.name, "code");
    }

    #[test]
    fn no_key_resolves_to_none() {
        assert!(WHEEL.key_field("id").is_none());
        assert_eq!(WHEEL.key_field("wheelId").map(|(i, _)| i), Some(0));
    }

    #[test]
    fn field_lookup() {
        assert_eq!(ACCOUNT.field_index("accountName"), Some(1));
        assert_eq!(ACCOUNT.field_index("missing"), None);
        assert_eq!(ACCOUNT.len(), 2);
        assert!(!ACCOUNT.is_empty());
    }
}
