//! Structural diff engine for audit trails.
//!
//! Compares two snapshots of the same [`Auditable`] type and reports what
//! changed as an ordered sequence of [`ChangeType`] records: scalar field
//! changes located by a dotted path, and list changes matched by each item's
//! identity key.
//!
//! The derive expands to paths under `audit_types`. Crates that depend only
//! on `audit-diff` point it at the re-export with `#[audit(crate = ..)]`:
//!
//! ```
//! use audit_diff::{diff, Auditable};
//!
//! #[derive(Debug, Auditable)]
//! #[audit(crate = "audit_diff::audit_types")]
//! struct Book {
//!     id: u32,
//!     title: String,
//! }
//!
//! # fn main() -> Result<(), audit_diff::DiffError> {
//! let before = Book { id: 1, title: "Dune".into() };
//! let after = Book { id: 1, title: "Dune Messiah".into() };
//! let changes = diff(&before, &after)?;
//! assert_eq!(changes[0].property(), Some("title"));
//! # Ok(())
//! # }
//! ```
//!
//! # Key Types
//!
//! - [`Differ`] / [`DiffConfig`] -- Configured traversal engine
//! - [`ChangeType`] / [`PropertyUpdate`] / [`ListUpdate`] -- Change records over the inputs
//! - [`ValueKind`] -- Leaf, collection, or composite classification
//! - [`DiffError`] -- Failures: missing input, unresolvable list identity, unreadable fields

pub mod change;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
mod list;
pub mod path;

pub use audit_types;
pub use audit_types::{Auditable, FieldSchema, TypeSchema, Value};
pub use change::{ChangeType, ListUpdate, PropertyUpdate};
pub use classify::{classify, ValueKind};
pub use config::{DiffConfig, DEFAULT_KEY_FIELD};
pub use engine::{diff, diff_optional, Differ};
pub use error::{DiffError, DiffResult};
