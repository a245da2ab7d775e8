//! List reconciliation: match list items across snapshots by identity key.
//!
//! Every list field produces exactly two records: a [`ListUpdate`] naming the
//! added and removed items, then a [`PropertyUpdate`] describing at most one
//! modified item. The second record is appended even when nothing was
//! modified, with all of its fields unset.

use std::collections::HashMap;

use audit_types::{Auditable, Collection, FieldSchema, FieldValue, Value};
use tracing::{trace, warn};

use crate::change::{ChangeType, ListUpdate, PropertyUpdate};
use crate::config::DiffConfig;
use crate::error::{DiffError, DiffResult};
use crate::path;

/// Identity of a list item. `None` when the key field itself is absent.
type ItemKey = Option<Value>;

/// Items of one side of a list, indexed by identity key.
///
/// Duplicate keys collapse to the last item carrying them.
struct KeyedItems<'a> {
    entries: Vec<(ItemKey, &'a dyn Auditable)>,
    index: HashMap<ItemKey, usize>,
}

impl<'a> KeyedItems<'a> {
    fn build(
        collection: &Collection<'a>,
        key_index: usize,
        key_field: &'static FieldSchema,
    ) -> DiffResult<Self> {
        let mut entries = Vec::with_capacity(collection.len());
        let mut index = HashMap::with_capacity(collection.len());

        for (pos, &item) in collection.items().iter().enumerate() {
            let key = read_key(item, key_index, key_field)?;
            if index.insert(key.clone(), pos).is_some() {
                warn!(
                    item_type = item.type_name(),
                    key_field = key_field.name,
                    key = ?key,
                    "duplicate identity key in list, keeping the last item"
                );
            }
            entries.push((key, item));
        }

        Ok(Self { entries, index })
    }

    /// Items that won their key, in source order.
    fn winners(&self) -> impl Iterator<Item = (&ItemKey, &'a dyn Auditable)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(pos, (key, _))| self.index.get(key) == Some(pos))
            .map(|(_, (key, item))| (key, *item))
    }

    fn get(&self, key: &ItemKey) -> Option<&'a dyn Auditable> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    fn contains(&self, key: &ItemKey) -> bool {
        self.index.contains_key(key)
    }
}

fn read_key(
    item: &dyn Auditable,
    key_index: usize,
    key_field: &'static FieldSchema,
) -> DiffResult<ItemKey> {
    match item.field(key_index) {
        Some(FieldValue::Absent) => Ok(None),
        Some(FieldValue::Leaf(value)) => Ok(Some(value)),
        Some(FieldValue::Composite(_) | FieldValue::Collection(_)) => {
            Err(DiffError::UnsupportedKey {
                type_name: item.type_name(),
                field: key_field.name,
            })
        }
        None => Err(DiffError::FieldAccess {
            type_name: item.type_name(),
            field: key_field.name,
        }),
    }
}

/// Reconcile one list field and append its two records to `out`.
pub(crate) fn reconcile<'a>(
    field: &str,
    previous: &Collection<'a>,
    current: &Collection<'a>,
    config: &DiffConfig,
    out: &mut Vec<ChangeType<'a>>,
) -> DiffResult<()> {
    let item_schema = previous.item_schema();
    let (key_index, key_field) = item_schema
        .key_field(&config.default_key_field)
        .ok_or(DiffError::UnresolvableIdentity {
            type_name: item_schema.name,
        })?;

    let before = KeyedItems::build(previous, key_index, key_field)?;
    let after = KeyedItems::build(current, key_index, key_field)?;

    let added: Vec<_> = after
        .winners()
        .filter(|(key, _)| !before.contains(key))
        .map(|(_, item)| item)
        .collect();
    let removed: Vec<_> = before
        .winners()
        .filter(|(key, _)| !after.contains(key))
        .map(|(_, item)| item)
        .collect();

    trace!(
        field,
        item_type = item_schema.name,
        key = key_field.name,
        added = added.len(),
        removed = removed.len(),
        "reconciled list field"
    );

    out.push(ChangeType::ListUpdate(ListUpdate {
        property: field.to_string(),
        added,
        removed,
    }));
    let modified = modified_item(field, key_field, &before, &after)?;
    out.push(ChangeType::PropertyUpdate(modified));

    Ok(())
}

/// The first item whose key exists on both sides with unequal values.
///
/// A previous item is a removal candidate unless an equal item with the same
/// key exists in the current list; the current item under that key is then the
/// matching addition candidate. Only the first such pair is reported, located
/// at its first differing field.
fn modified_item<'a>(
    field: &str,
    key_field: &'static FieldSchema,
    before: &KeyedItems<'a>,
    after: &KeyedItems<'a>,
) -> DiffResult<PropertyUpdate<'a>> {
    let pair = before.winners().find_map(|(key, previous)| {
        let current = after.get(key)?;
        (!previous.eq_dyn(current)).then_some((previous, current))
    });

    let Some((previous, current)) = pair else {
        return Ok(PropertyUpdate::default());
    };

    let property = first_differing_field(previous, current)?
        .map(|differing| path::list_item(field, key_field.name, differing));

    Ok(PropertyUpdate {
        property,
        previous: Some(previous),
        current: Some(current),
    })
}

fn first_differing_field(
    previous: &dyn Auditable,
    current: &dyn Auditable,
) -> DiffResult<Option<&'static str>> {
    let schema = previous.schema();
    for (index, field) in schema.fields.iter().enumerate() {
        let access = || DiffError::FieldAccess {
            type_name: schema.name,
            field: field.name,
        };
        let a = previous.field(index).ok_or_else(access)?;
        let b = current.field(index).ok_or_else(access)?;
        if !a.same_as(&b) {
            return Ok(Some(field.name));
        }
    }

    Ok(None)
}
