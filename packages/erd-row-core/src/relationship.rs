//! Relationship between table fields.

use serde::{Deserialize, Serialize};

use crate::field::{FieldId, TableId};

/// Relationship edge drawn from a source field to a target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Relationship id
    pub id: String,
    /// Display name (usually the foreign key name)
    #[serde(default)]
    pub name: String,
    /// Table the edge starts from
    pub source_table_id: TableId,
    /// Field the edge starts from
    pub source_field_id: FieldId,
    /// Table the edge points at
    pub target_table_id: TableId,
    /// Field the edge points at
    pub target_field_id: FieldId,
}

impl Relationship {
    /// Returns true if this relationship ends at the given table field.
    pub fn targets(&self, table: &TableId, field: &FieldId) -> bool {
        self.target_table_id == *table && self.target_field_id == *field
    }
}

/// Counts relationships whose target is the given table field.
pub fn count_inbound(relationships: &[Relationship], table: &TableId, field: &FieldId) -> usize {
    relationships
        .iter()
        .filter(|rel| rel.targets(table, field))
        .count()
}
