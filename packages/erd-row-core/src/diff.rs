//! Diff verdicts for a field compared against a reference schema.

use serde::{Deserialize, Serialize};

use crate::field::{FieldId, TableId, TypeRef};

/// Query interface of the external diff engine.
///
/// Queries may be expensive; rows never call them while rendering.
pub trait DiffEngine: Send + Sync {
    fn is_field_removed(&self, field: &FieldId) -> bool;

    fn is_new_field(&self, field: &FieldId) -> bool;

    /// New name of a renamed field.
    fn renamed_to(&self, field: &FieldId) -> Option<String>;

    /// New type of a retyped field.
    fn retyped_to(&self, field: &FieldId) -> Option<TypeRef>;

    fn has_field_changed(&self, field: &FieldId, table: &TableId) -> bool;

    /// Revision of the underlying comparison. Rows reclassify when it moves.
    fn revision(&self) -> u64 {
        0
    }
}

/// Snapshot of the five diff queries for one field.
///
/// The default value is the "no diff" verdict shown before the first
/// classification resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffVerdict {
    pub removed: bool,
    pub is_new: bool,
    pub renamed_to: Option<String>,
    pub retyped_to: Option<TypeRef>,
    pub changed: bool,
}

impl DiffVerdict {
    /// Runs all five queries against the engine and returns them as one snapshot.
    pub fn classify(engine: &dyn DiffEngine, field: &FieldId, table: &TableId) -> Self {
        Self {
            removed: engine.is_field_removed(field),
            is_new: engine.is_new_field(field),
            renamed_to: engine.renamed_to(field),
            retyped_to: engine.retyped_to(field),
            changed: engine.has_field_changed(field, table),
        }
    }

    /// Returns the display tag: removed > new > changed > none.
    pub fn tag(&self) -> DiffTag {
        if self.removed {
            DiffTag::Removed
        } else if self.is_new {
            DiffTag::New
        } else if self.changed {
            DiffTag::Changed
        } else {
            DiffTag::None
        }
    }
}

/// Priority-ordered diff tag used for the row icon and tone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffTag {
    #[default]
    None,
    Changed,
    New,
    Removed,
}
