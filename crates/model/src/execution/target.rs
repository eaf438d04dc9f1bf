use serde::{Deserialize, Serialize};

pub const DEFAULT_TABLE: &str = "srs_configs";
pub const DEFAULT_ID_COLUMN: &str = "id";
pub const DEFAULT_ZONE_COLUMN: &str = "timezone";

/// The table being remediated and the two columns the tool touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetTable {
    /// Optionally schema-qualified, e.g. `public.srs_configs`.
    pub table: String,
    pub id_column: String,
    pub zone_column: String,
}

impl TargetTable {
    pub fn new(
        table: impl Into<String>,
        id_column: impl Into<String>,
        zone_column: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            id_column: id_column.into(),
            zone_column: zone_column.into(),
        }
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE, DEFAULT_ID_COLUMN, DEFAULT_ZONE_COLUMN)
    }
}
