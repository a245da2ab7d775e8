//! Change records produced by a diff.
//!
//! Records borrow the objects they refer to from the two input snapshots, so
//! a change sequence lives no longer than the inputs it was computed from.

use audit_types::Auditable;

/// One detected difference.
#[derive(Clone, Debug)]
pub enum ChangeType<'a> {
    /// A scalar field changed, or a list item was modified.
    PropertyUpdate(PropertyUpdate<'a>),
    /// Items were added to or removed from a list field.
    ListUpdate(ListUpdate<'a>),
}

impl<'a> ChangeType<'a> {
    /// The locator of this change, if set.
    ///
    /// Always set for list updates. Unset only for the property update that
    /// follows a list update when no list item was modified.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::PropertyUpdate(update) => update.property.as_deref(),
            Self::ListUpdate(update) => Some(&update.property),
        }
    }

    pub fn as_property_update(&self) -> Option<&PropertyUpdate<'a>> {
        match self {
            Self::PropertyUpdate(update) => Some(update),
            Self::ListUpdate(_) => None,
        }
    }

    pub fn as_list_update(&self) -> Option<&ListUpdate<'a>> {
        match self {
            Self::ListUpdate(update) => Some(update),
            Self::PropertyUpdate(_) => None,
        }
    }
}

impl<'a> From<PropertyUpdate<'a>> for ChangeType<'a> {
    fn from(update: PropertyUpdate<'a>) -> Self {
        Self::PropertyUpdate(update)
    }
}

impl<'a> From<ListUpdate<'a>> for ChangeType<'a> {
    fn from(update: ListUpdate<'a>) -> Self {
        Self::ListUpdate(update)
    }
}

/// A changed property.
///
/// For scalar changes `previous`/`current` are the whole objects that declare
/// the changed field, not the field values. For list item modifications they
/// are the two versions of the modified item. When only one side of a field
/// is absent both references are unset.
#[derive(Clone, Debug, Default)]
pub struct PropertyUpdate<'a> {
    pub property: Option<String>,
    pub previous: Option<&'a dyn Auditable>,
    pub current: Option<&'a dyn Auditable>,
}

impl<'a> PropertyUpdate<'a> {
    /// A located update without object references.
    pub fn located(property: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            previous: None,
            current: None,
        }
    }

    /// A located update referring to both versions of an object.
    pub fn between(
        property: impl Into<String>,
        previous: &'a dyn Auditable,
        current: &'a dyn Auditable,
    ) -> Self {
        Self {
            property: Some(property.into()),
            previous: Some(previous),
            current: Some(current),
        }
    }

    /// Returns `true` if no field of this update is set.
    pub fn is_unset(&self) -> bool {
        self.property.is_none() && self.previous.is_none() && self.current.is_none()
    }

    /// The previous object as the concrete type `T`.
    pub fn previous_as<T: Auditable>(&self) -> Option<&'a T> {
        self.previous.and_then(|p| p.downcast_ref::<T>())
    }

    /// The current object as the concrete type `T`.
    pub fn current_as<T: Auditable>(&self) -> Option<&'a T> {
        self.current.and_then(|c| c.downcast_ref::<T>())
    }
}

/// Items added to and removed from a list field, matched by identity key.
#[derive(Clone, Debug)]
pub struct ListUpdate<'a> {
    /// Name of the list field.
    pub property: String,
    /// Items present only in the current snapshot, in current order.
    pub added: Vec<&'a dyn Auditable>,
    /// Items present only in the previous snapshot, in previous order.
    pub removed: Vec<&'a dyn Auditable>,
}

impl<'a> ListUpdate<'a> {
    /// Returns `true` if nothing was added or removed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Added items as the concrete type `T`.
    pub fn added_as<T: Auditable>(&self) -> Vec<&'a T> {
        self.added.iter().filter_map(|i| i.downcast_ref::<T>()).collect()
    }

    /// Removed items as the concrete type `T`.
    pub fn removed_as<T: Auditable>(&self) -> Vec<&'a T> {
        self.removed.iter().filter_map(|i| i.downcast_ref::<T>()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_types::Auditable;

    #[derive(Debug, Clone, PartialEq, Auditable)]
    struct Tag {
        id: u32,
        label: String,
    }

    fn tag(id: u32, label: &str) -> Tag {
        Tag {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn property_accessor_covers_both_variants() {
        let a = tag(1, "a");
        let b = tag(1, "b");

        let scalar: ChangeType<'_> = PropertyUpdate::between("label", &a, &b).into();
        assert_eq!(scalar.property(), Some("label"));

        let list: ChangeType<'_> = ListUpdate {
            property: "tags".into(),
            added: vec![],
            removed: vec![],
        }
        .into();
        assert_eq!(list.property(), Some("tags"));

        let sentinel: ChangeType<'_> = PropertyUpdate::default().into();
        assert_eq!(sentinel.property(), None);
    }

    #[test]
    fn typed_views_downcast_references() {
        let a = tag(1, "a");
        let b = tag(1, "b");
        let update = PropertyUpdate::between("label", &a, &b);

        assert_eq!(update.previous_as::<Tag>(), Some(&a));
        assert_eq!(update.current_as::<Tag>(), Some(&b));
        assert!(!update.is_unset());
        assert!(PropertyUpdate::default().is_unset());
        assert!(!PropertyUpdate::located("label").is_unset());
    }

    #[test]
    fn list_views_preserve_order() {
        let one = tag(1, "one");
        let two = tag(2, "two");
        let update = ListUpdate {
            property: "tags".into(),
            added: vec![&two, &one],
            removed: vec![],
        };

        assert_eq!(update.added_as::<Tag>(), vec![&two, &one]);
        assert!(update.removed_as::<Tag>().is_empty());
        assert!(!update.is_empty());
    }

    #[test]
    fn variant_views() {
        let sentinel: ChangeType<'_> = PropertyUpdate::default().into();
        assert!(sentinel.as_property_update().is_some());
        assert!(sentinel.as_list_update().is_none());
    }
}
