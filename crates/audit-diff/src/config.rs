use serde::{Deserialize, Serialize};

/// Field name treated as the identity key of list items when no field is
/// explicitly marked.
pub const DEFAULT_KEY_FIELD: &str = "id";

/// Configuration for the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Field name that identifies list items, in addition to fields carrying
    /// the `#[audit(key)]` marker. The first match in declaration order wins.
    pub default_key_field: String,
    /// Label used as the first locator segment instead of the root type's
    /// name. Only visible in locators of nested changes, since direct root
    /// fields are reported by field name alone.
    pub root_label: Option<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            default_key_field: DEFAULT_KEY_FIELD.to_string(),
            root_label: None,
        }
    }
}

impl DiffConfig {
    /// Default configuration with a custom root label.
    pub fn with_root_label(label: impl Into<String>) -> Self {
        Self {
            root_label: Some(label.into()),
            ..Default::default()
        }
    }

    /// Default configuration with a custom identity field name.
    pub fn with_key_field(name: impl Into<String>) -> Self {
        Self {
            default_key_field: name.into(),
            ..Default::default()
        }
    }
}
