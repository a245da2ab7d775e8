//! Change locators.
//!
//! Scalar changes are located by a dotted path that starts at the root type
//! name (`Book.category.categoryName`). A change on a direct field of the root
//! drops the root segment and is located by the field name alone. Whether a
//! field is direct is decided by nesting depth, never by counting separators,
//! so a root label such as `com.acme.Order` does not change the outcome. List
//! locators are the list field name, optionally followed by the identity key
//! and the first modified field (`accounts[id].accountName`).

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Extend `parent` by one field.
pub fn child(parent: &str, field: &str) -> String {
    let mut path = String::with_capacity(parent.len() + field.len() + 1);
    path.push_str(parent);
    path.push(SEPARATOR);
    path.push_str(field);
    path
}

/// Normalized locator of a scalar change on `field`.
///
/// `depth` is the nesting level of the record declaring the field, zero for
/// the root. Direct root fields are located by name alone; deeper fields keep
/// the full path from the root.
pub fn normalize(parent: &str, field: &str, depth: usize) -> String {
    if depth == 0 {
        field.to_string()
    } else {
        child(parent, field)
    }
}

/// Locator of a modified list item: `field[key].differing`.
pub fn list_item(field: &str, key: &str, differing: &str) -> String {
    format!("{field}[{key}]{SEPARATOR}{differing}")
}
