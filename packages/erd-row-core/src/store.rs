//! Schema store boundary: field mutations and shared editor state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::field::{FieldId, TableId, TypeRef};
use crate::relationship::Relationship;

/// Partial field update. Absent members are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,
}

impl FieldPatch {
    /// Patch that only renames the field.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Global editor state container as seen by a row.
///
/// Mutations are fire-and-forget: the row never waits on them and never
/// observes their failure. Validation and persistence belong to the store.
pub trait SchemaStore: Send + Sync {
    /// Requests a partial update of a field.
    fn update_field(&self, table: &TableId, field: &FieldId, patch: FieldPatch);

    /// Requests removal of a field.
    fn remove_field(&self, table: &TableId, field: &FieldId);

    /// Returns true if the diagram is read-only.
    fn read_only(&self) -> bool;

    /// Returns all relationships in the diagram.
    fn relationships(&self) -> Arc<[Relationship]>;

    /// Returns the name of the custom type currently highlighted, if any.
    fn highlighted_custom_type(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_patch_serializes_only_name() {
        let patch = FieldPatch::rename("Users");
        assert_ne!(patch, FieldPatch::default());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "name": "Users" })
        );
        assert_eq!(serde_json::to_value(FieldPatch::default()).unwrap(), serde_json::json!({}));
    }
}
