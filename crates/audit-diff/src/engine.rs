//! The traversal engine: walk two snapshots field by field.
//!
//! The walk is depth-first and pre-order. Each declared field of the previous
//! snapshot's runtime type is read from both sides and either skipped,
//! reported as a scalar change, handed to the list reconciler, or recursed
//! into with an extended path. Records are appended to one output vector in
//! traversal order.

use audit_types::{Auditable, FieldValue};
use tracing::{debug, trace};

use crate::change::{ChangeType, PropertyUpdate};
use crate::classify::classify;
use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::list;
use crate::path;

/// Computes change sequences between two snapshots of the same type.
///
/// A `Differ` only holds its configuration; it keeps no state between calls
/// and can be shared freely across threads.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    config: DiffConfig,
}

impl Differ {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff two snapshots.
    pub fn diff<'a, T: Auditable>(
        &self,
        previous: &'a T,
        current: &'a T,
    ) -> DiffResult<Vec<ChangeType<'a>>> {
        self.walk_root(previous, current)
    }

    /// Diff two snapshots that may be missing.
    ///
    /// Fails with [`DiffError::InvalidInput`] if either side is `None`.
    pub fn diff_optional<'a, T: Auditable>(
        &self,
        previous: Option<&'a T>,
        current: Option<&'a T>,
    ) -> DiffResult<Vec<ChangeType<'a>>> {
        match (previous, current) {
            (Some(previous), Some(current)) => self.walk_root(previous, current),
            _ => Err(DiffError::InvalidInput),
        }
    }

    fn walk_root<'a>(
        &self,
        previous: &'a dyn Auditable,
        current: &'a dyn Auditable,
    ) -> DiffResult<Vec<ChangeType<'a>>> {
        let root = self
            .config
            .root_label
            .as_deref()
            .unwrap_or_else(|| previous.type_name());
        debug!(root, "diff started");

        let mut changes = Vec::new();
        self.walk(previous, current, root, 0, &mut changes)?;

        debug!(root, changes = changes.len(), "diff finished");
        Ok(changes)
    }

    fn walk<'a>(
        &self,
        previous: &'a dyn Auditable,
        current: &'a dyn Auditable,
        parent: &str,
        depth: usize,
        out: &mut Vec<ChangeType<'a>>,
    ) -> DiffResult<()> {
        let schema = previous.schema();

        for (index, field) in schema.fields.iter().enumerate() {
            let access = || DiffError::FieldAccess {
                type_name: schema.name,
                field: field.name,
            };
            let before = previous.field(index).ok_or_else(access)?;
            let after = current.field(index).ok_or_else(access)?;

            match (before, after) {
                (FieldValue::Absent, FieldValue::Absent) => {}
                (FieldValue::Absent, _) | (_, FieldValue::Absent) => {
                    let property = path::normalize(parent, field.name, depth);
                    trace!(%property, "field present on one side only");
                    out.push(PropertyUpdate::located(property).into());
                }
                (FieldValue::Collection(before), FieldValue::Collection(after)) => {
                    list::reconcile(field.name, &before, &after, &self.config, out)?;
                }
                (FieldValue::Leaf(before), FieldValue::Leaf(after)) => {
                    if before != after {
                        let property = path::normalize(parent, field.name, depth);
                        trace!(%property, %before, %after, "scalar field changed");
                        out.push(PropertyUpdate::between(property, previous, current).into());
                    }
                }
                (FieldValue::Composite(before), FieldValue::Composite(after)) => {
                    let child = path::child(parent, field.name);
                    self.walk(before, after, &child, depth + 1, out)?;
                }
                (before, after) => {
                    debug!(
                        type_name = schema.name,
                        field = field.name,
                        previous = ?classify(&before),
                        current = ?classify(&after),
                        "field classified differently in the two snapshots"
                    );
                    return Err(access());
                }
            }
        }

        Ok(())
    }
}

/// Diff two snapshots with the default configuration.
pub fn diff<'a, T: Auditable>(previous: &'a T, current: &'a T) -> DiffResult<Vec<ChangeType<'a>>> {
    Differ::default().diff(previous, current)
}

/// Diff two possibly missing snapshots with the default configuration.
pub fn diff_optional<'a, T: Auditable>(
    previous: Option<&'a T>,
    current: Option<&'a T>,
) -> DiffResult<Vec<ChangeType<'a>>> {
    Differ::default().diff_optional(previous, current)
}
