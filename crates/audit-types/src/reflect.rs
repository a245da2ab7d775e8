//! Runtime view of auditable values.
//!
//! [`Auditable`] is the capability a record type exposes to the diff engine:
//! its static field table plus index-based access to each field's value.
//! [`AuditValue`] classifies a single field value into a [`FieldValue`],
//! dispatching on the concrete type of the field.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, SystemTime};

use crate::schema::{FieldSchema, TypeSchema};
use crate::value::Value;

/// A record type whose fields can be enumerated and compared generically.
///
/// Normally implemented with `#[derive(Auditable)]`. Hand-written
/// implementations must return `Some` from [`field`](Auditable::field) for
/// every index below `schema().len()`; a `None` there is reported by the diff
/// engine as a field-access failure.
pub trait Auditable: Any + fmt::Debug {
    /// The field table of this type.
    fn type_schema() -> &'static TypeSchema
    where
        Self: Sized;

    /// The field table of the runtime type of `self`.
    fn schema(&self) -> &'static TypeSchema;

    /// Classified value of the field at `index` in declaration order.
    fn field(&self, index: usize) -> Option<FieldValue<'_>>;

    fn as_any(&self) -> &dyn Any;

    /// Full value equality against another auditable value.
    ///
    /// Values of different runtime types are never equal. The default compares
    /// every declared field with [`FieldValue::same_as`].
    fn eq_dyn(&self, other: &dyn Auditable) -> bool {
        if self.as_any().type_id() != other.as_any().type_id() {
            return false;
        }
        (0..self.schema().len()).all(|index| match (self.field(index), other.field(index)) {
            (Some(a), Some(b)) => a.same_as(&b),
            _ => false,
        })
    }
}

impl dyn Auditable {
    /// Simple name of the runtime type.
    pub fn type_name(&self) -> &'static str {
        self.schema().name
    }

    /// Returns `true` if the runtime type is `T`.
    pub fn is<T: Auditable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow as the concrete type `T`, if that is the runtime type.
    pub fn downcast_ref<T: Auditable>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Declared fields with their values, in declaration order.
    ///
    /// The value is `None` where the field could not be read.
    pub fn fields(
        &self,
    ) -> impl Iterator<Item = (&'static FieldSchema, Option<FieldValue<'_>>)> + '_ {
        self.schema()
            .fields
            .iter()
            .enumerate()
            .map(move |(index, field)| (field, self.field(index)))
    }
}

/// A field value after classification.
#[derive(Clone, Debug)]
pub enum FieldValue<'a> {
    /// No value (`None`).
    Absent,
    /// An atomic value compared by equality.
    Leaf(Value),
    /// A nested record compared field by field.
    Composite(&'a dyn Auditable),
    /// A list of records matched by identity key.
    Collection(Collection<'a>),
}

impl FieldValue<'_> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Full value equality.
    ///
    /// Values of different classifications are never equal; collections are
    /// equal when they hold equal items in the same order.
    pub fn same_as(&self, other: &FieldValue<'_>) -> bool {
        match (self, other) {
            (Self::Absent, FieldValue::Absent) => true,
            (Self::Leaf(a), FieldValue::Leaf(b)) => a == b,
            (Self::Composite(a), FieldValue::Composite(b)) => a.eq_dyn(*b),
            (Self::Collection(a), FieldValue::Collection(b)) => a.same_as(b),
            _ => false,
        }
    }
}

/// The items of a list-valued field together with the item type's schema.
#[derive(Clone, Debug)]
pub struct Collection<'a> {
    item: &'static TypeSchema,
    items: Vec<&'a dyn Auditable>,
}

impl<'a> Collection<'a> {
    /// Create a collection from already-erased items.
    pub fn new(item: &'static TypeSchema, items: Vec<&'a dyn Auditable>) -> Self {
        Self { item, items }
    }

    /// Collect typed items, taking the item schema from `T`.
    pub fn of<T, I>(items: I) -> Self
    where
        T: Auditable,
        I: IntoIterator<Item = &'a T>,
    {
        Self {
            item: T::type_schema(),
            items: items.into_iter().map(|i| i as &dyn Auditable).collect(),
        }
    }

    /// Schema of the item type.
    pub fn item_schema(&self) -> &'static TypeSchema {
        self.item
    }

    /// Items in iteration order.
    pub fn items(&self) -> &[&'a dyn Auditable] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn same_as(&self, other: &Collection<'_>) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(a, b)| a.eq_dyn(*b))
    }
}

/// Classification of a field value by its concrete type.
///
/// Built-in scalars, strings, `Duration`, `SystemTime` and `()` are leaves.
/// `Option::None` is absent, `Vec`/`VecDeque`/slices of auditable records are
/// collections, and derived record types are composites.
pub trait AuditValue {
    fn audit_value(&self) -> FieldValue<'_>;
}

macro_rules! impl_audit_leaf {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl AuditValue for $type {
                fn audit_value(&self) -> FieldValue<'_> {
                    FieldValue::Leaf(Value::$variant((*self).into()))
                }
            }
        )*
    };
}

impl_audit_leaf!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    i128 => Int128,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    u128 => Uint128,
    f32 => Float,
    f64 => Float,
    bool => Bool,
    char => Char,
    Duration => Duration,
    SystemTime => Timestamp,
);

impl AuditValue for isize {
    #[allow(clippy::cast_possible_truncation)]
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Leaf(Value::Int(*self as i64))
    }
}

impl AuditValue for usize {
    #[allow(clippy::cast_possible_truncation)]
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Leaf(Value::Uint(*self as u64))
    }
}

impl AuditValue for str {
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Leaf(Value::Text(self.to_string()))
    }
}

impl AuditValue for String {
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Leaf(Value::Text(self.clone()))
    }
}

impl AuditValue for () {
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Leaf(Value::Unit)
    }
}

impl<T: AuditValue + ?Sized> AuditValue for &T {
    fn audit_value(&self) -> FieldValue<'_> {
        (**self).audit_value()
    }
}

impl<T: AuditValue + ?Sized> AuditValue for Box<T> {
    fn audit_value(&self) -> FieldValue<'_> {
        (**self).audit_value()
    }
}

impl<T: AuditValue> AuditValue for Option<T> {
    fn audit_value(&self) -> FieldValue<'_> {
        match self {
            Some(inner) => inner.audit_value(),
            None => FieldValue::Absent,
        }
    }
}

impl<T: Auditable> AuditValue for [T] {
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Collection(Collection::of(self))
    }
}

impl<T: Auditable> AuditValue for Vec<T> {
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Collection(Collection::of(self))
    }
}

impl<T: Auditable> AuditValue for VecDeque<T> {
    fn audit_value(&self) -> FieldValue<'_> {
        FieldValue::Collection(Collection::of(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, audit_types::Auditable)]
    struct Account {
        id: u32,
        account_name: String,
    }

    #[derive(Debug, Clone, PartialEq, audit_types::Auditable)]
    #[audit(rename_all = "camelCase")]
    struct Client {
        client_id: u32,
        nickname: Option<String>,
        primary: Account,
        accounts: Vec<Account>,
    }

    #[derive(Debug, Clone, PartialEq, audit_types::Auditable)]
    struct Session {
        id: u32,
        timeout: Duration,
        expires_at: Option<SystemTime>,
    }

    fn account(id: u32, name: &str) -> Account {
        Account {
            id,
            account_name: name.to_string(),
        }
    }

    #[test]
    fn scalars_classify_as_leaves() {
        assert!(matches!(7u8.audit_value(), FieldValue::Leaf(Value::Uint(7))));
        assert!(matches!((-7i32).audit_value(), FieldValue::Leaf(Value::Int(-7))));
        assert!(matches!(true.audit_value(), FieldValue::Leaf(Value::Bool(true))));
        assert!(matches!(().audit_value(), FieldValue::Leaf(Value::Unit)));
        match "x".audit_value() {
            FieldValue::Leaf(Value::Text(s)) => assert_eq!(s, "x"),
            other => panic!("expected text leaf, got {:?}", other),
        }
    }

    #[test]
    fn time_types_classify_as_leaves() {
        let timeout = Duration::from_secs(30);
        assert!(matches!(
            timeout.audit_value(),
            FieldValue::Leaf(Value::Duration(d)) if d == timeout
        ));

        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
        assert!(matches!(
            at.audit_value(),
            FieldValue::Leaf(Value::Timestamp(t)) if t == at
        ));
    }

    #[test]
    fn derive_accepts_time_fields() {
        let session = Session {
            id: 1,
            timeout: Duration::from_secs(30),
            expires_at: None,
        };
        assert!(matches!(session.field(1), Some(FieldValue::Leaf(Value::Duration(_)))));
        assert!(matches!(session.field(2), Some(FieldValue::Absent)));

        let renewed = Session {
            expires_at: Some(SystemTime::UNIX_EPOCH),
            ..session.clone()
        };
        assert!(!(&session as &dyn Auditable).eq_dyn(&renewed));
    }

    #[test]
    fn option_none_is_absent() {
        let none: Option<u32> = None;
        assert!(none.audit_value().is_absent());
        assert!(matches!(Some(3u32).audit_value(), FieldValue::Leaf(Value::Uint(3))));
    }

    #[test]
    fn derived_struct_is_composite() {
        let a = account(1, "a1");
        match a.audit_value() {
            FieldValue::Composite(obj) => {
                assert_eq!(obj.type_name(), "Account");
                assert!(obj.is::<Account>());
                assert_eq!(obj.downcast_ref::<Account>(), Some(&a));
            }
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn vec_of_records_is_collection_with_item_schema() {
        let empty: Vec<Account> = Vec::new();
        match empty.audit_value() {
            FieldValue::Collection(c) => {
                assert!(c.is_empty());
                assert_eq!(c.item_schema().name, "Account");
            }
            other => panic!("expected collection, got {:?}", other),
        }
    }

    #[test]
    fn derive_keeps_field_names_by_default() {
        let names: Vec<_> = Account::type_schema().fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "account_name"]);
    }

    #[test]
    fn derive_emits_camel_case_field_table() {
        let schema = Client::type_schema();
        assert_eq!(schema.name, "Client");
        let names: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["clientId", "nickname", "primary", "accounts"]);
    }

    #[test]
    fn field_access_by_index() {
        let client = Client {
            client_id: 1,
            nickname: None,
            primary: account(1, "a1"),
            accounts: vec![account(2, "a2")],
        };
        assert!(matches!(client.field(0), Some(FieldValue::Leaf(Value::Uint(1)))));
        assert!(matches!(client.field(1), Some(FieldValue::Absent)));
        assert!(matches!(client.field(2), Some(FieldValue::Composite(_))));
        assert!(matches!(client.field(3), Some(FieldValue::Collection(ref c)) if c.len() == 1));
        assert!(client.field(4).is_none());
    }

    #[test]
    fn erased_fields_in_declaration_order() {
        let a = account(4, "a4");
        let erased: &dyn Auditable = &a;
        let fields: Vec<_> = erased.fields().collect();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0.name, "id");
        assert!(matches!(fields[0].1, Some(FieldValue::Leaf(Value::Uint(4)))));
        match &fields[1] {
            (field, Some(FieldValue::Leaf(Value::Text(name)))) => {
                assert_eq!(field.name, "account_name");
                assert_eq!(name, "a4");
            }
            other => panic!("expected text field, got {:?}", other),
        }
    }

    #[test]
    fn structural_equality_across_erased_values() {
        let a = account(1, "a1");
        let b = account(1, "a1");
        let c = account(1, "other");
        assert!((&a as &dyn Auditable).eq_dyn(&b));
        assert!(!(&a as &dyn Auditable).eq_dyn(&c));

        let client = Client {
            client_id: 1,
            nickname: None,
            primary: account(1, "a1"),
            accounts: vec![],
        };
        assert!(!(&a as &dyn Auditable).eq_dyn(&client));
    }

    #[test]
    fn collections_compare_in_order() {
        let left = vec![account(1, "a1"), account(2, "a2")];
        let right = vec![account(2, "a2"), account(1, "a1")];
        assert!(left.audit_value().same_as(&left.clone().audit_value()));
        assert!(!left.audit_value().same_as(&right.audit_value()));
    }
}
