//! Error types for the diff crate.

/// Errors that can occur during a diff.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// The previous or current snapshot was not supplied.
    #[error("provided data is not valid: previous or current object is missing")]
    InvalidInput,

    /// A list item type declares neither an `id` field nor a key-marked field.
    #[error(
        "the audit system lacks the information it needs to determine what has changed: \
         item type {type_name} declares no identity key"
    )]
    UnresolvableIdentity {
        /// The list item type.
        type_name: &'static str,
    },

    /// A declared field could not be read, or the two snapshots disagree on
    /// the shape of its value.
    #[error("cannot access field {field} of {type_name}")]
    FieldAccess {
        /// The type declaring the field.
        type_name: &'static str,
        /// The declared field name.
        field: &'static str,
    },

    /// The identity key of a list item is not a leaf value.
    #[error("identity key {field} of {type_name} is not a leaf value")]
    UnsupportedKey {
        /// The list item type.
        type_name: &'static str,
        /// The identity field.
        field: &'static str,
    },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
