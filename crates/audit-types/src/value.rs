use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

/// Owned snapshot of a leaf field value.
///
/// Leaf values are compared by direct equality and never recursed into. A
/// `Value` is also what an identity key resolves to when list items are
/// matched across snapshots, so it implements [`Eq`] and [`Hash`]; floats
/// compare by bit pattern for that purpose.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Int128(i128),
    Uint(u64),
    Uint128(u128),
    Float(f64),
    Char(char),
    Text(String),
    Duration(Duration),
    Timestamp(SystemTime),
    Unit,
}

impl Value {
    /// Short name of the variant, used in log fields.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Int128(_) => "int128",
            Self::Uint(_) => "uint",
            Self::Uint128(_) => "uint128",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Text(_) => "text",
            Self::Duration(_) => "duration",
            Self::Timestamp(_) => "timestamp",
            Self::Unit => "unit",
        }
    }

    /// Borrow the text payload, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int128(a), Self::Int128(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Uint128(a), Self::Uint128(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Unit, Self::Unit) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Int128(v) => v.hash(state),
            Self::Uint(v) => v.hash(state),
            Self::Uint128(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Char(v) => v.hash(state),
            Self::Text(v) => v.hash(state),
            Self::Duration(v) => v.hash(state),
            Self::Timestamp(v) => v.hash(state),
            Self::Unit => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Int128(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Uint128(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Duration(v) => write!(f, "{v:?}"),
            Self::Timestamp(v) => match v.duration_since(SystemTime::UNIX_EPOCH) {
                Ok(since) => write!(f, "@{}.{:09}", since.as_secs(), since.subsec_nanos()),
                Err(_) => write!(f, "{v:?}"),
            },
            Self::Unit => write!(f, "()"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
