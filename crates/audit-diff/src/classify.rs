//! Value classification: leaf, collection, or composite.
//!
//! The classification itself happens in [`AuditValue`](audit_types::AuditValue),
//! which dispatches on the concrete type of each field. This module names the
//! categories for the traversal and decides when a pair of field values can
//! be compared at all.

use std::fmt;

use audit_types::FieldValue;

/// Category of a present field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Atomic value compared by equality.
    Leaf,
    /// List of records matched by identity key.
    Collection,
    /// Nested record recursed into.
    Composite,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => write!(f, "leaf"),
            Self::Collection => write!(f, "collection"),
            Self::Composite => write!(f, "composite"),
        }
    }
}

/// Classify a field value. Absent values have no category.
pub fn classify(value: &FieldValue<'_>) -> Option<ValueKind> {
    match value {
        FieldValue::Absent => None,
        FieldValue::Leaf(_) => Some(ValueKind::Leaf),
        FieldValue::Collection(_) => Some(ValueKind::Collection),
        FieldValue::Composite(_) => Some(ValueKind::Composite),
    }
}
