//! `#[derive(Auditable)]` for record types.
//!
//! Generates the static field table and the index-based field accessor the
//! diff engine walks. Supported attributes:
//!
//! - container: `#[audit(rename = "Name")]`, `#[audit(rename_all = "camelCase")]`,
//!   `#[audit(crate = "path::to::audit_types")]` when `audit_types` is only
//!   reachable through a re-export
//! - field: `#[audit(key)]`, `#[audit(rename = "wireName")]`

use proc_macro::TokenStream;

mod attr;
mod auditable;
mod util;

#[proc_macro_derive(Auditable, attributes(audit))]
pub fn derive_auditable(input: TokenStream) -> TokenStream {
    auditable::derive_auditable(input.into()).into()
}
