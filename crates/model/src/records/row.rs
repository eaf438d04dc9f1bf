use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Primary key of a row in the target table.
///
/// The id column type is only known at runtime, so the key keeps whatever
/// representation the driver decoded and is bound back with the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Uuid(Uuid),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(v) => write!(f, "{v}"),
            RowId::Uuid(v) => write!(f, "{v}"),
            RowId::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Int(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Int(v as i64)
    }
}

impl From<Uuid> for RowId {
    fn from(v: Uuid) -> Self {
        RowId::Uuid(v)
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

/// A row whose timezone column holds a legacy identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedRow {
    pub id: RowId,
    pub timezone: String,
}

impl AffectedRow {
    pub fn new(id: impl Into<RowId>, timezone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timezone: timezone.into(),
        }
    }
}
