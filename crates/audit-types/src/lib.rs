//! Reflection model for the audit diff engine.
//!
//! Record types opt in to auditing by implementing [`Auditable`], usually via
//! `#[derive(Auditable)]`. The diff engine never sees concrete types: it walks
//! the static [`TypeSchema`] of a value and reads each field as a classified
//! [`FieldValue`].
//!
//! # Key Types
//!
//! - [`Value`] -- Owned snapshot of a leaf (scalar, text, char, time) value
//! - [`TypeSchema`] / [`FieldSchema`] -- Ordered field table and identity-key marker
//! - [`Auditable`] -- Capability trait: schema plus index-based field access
//! - [`AuditValue`] / [`FieldValue`] / [`Collection`] -- Per-type value classification

extern crate self as audit_types;

pub mod reflect;
pub mod schema;
pub mod value;

pub use audit_derive::Auditable;
pub use reflect::{AuditValue, Auditable, Collection, FieldValue};
pub use schema::{FieldSchema, TypeSchema};
pub use value::Value;
