//! Render cache keyed by the props a row actually displays.

use std::sync::Arc;

use crate::field::{FieldId, TableId};
use crate::present::RowProps;

/// The prop values a row's output depends on.
///
/// Two props snapshots with equal keys render identically, whatever else
/// differs between them (defaults, timestamps, allocation identity).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderKey {
    pub id: FieldId,
    pub name: String,
    pub primary_key: bool,
    pub nullable: bool,
    pub comments: String,
    pub unique: bool,
    pub type_id: String,
    pub type_name: String,
    pub character_maximum_length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub focused: bool,
    pub highlighted: bool,
    pub visible: bool,
    pub is_connectable: bool,
    pub table_node_id: TableId,
}

impl From<&RowProps> for RenderKey {
    fn from(props: &RowProps) -> Self {
        let field = &props.field;
        Self {
            id: field.id.clone(),
            name: field.name.clone(),
            primary_key: field.primary_key,
            nullable: field.nullable,
            comments: field.comments.clone(),
            unique: field.unique,
            type_id: field.type_ref.id.clone(),
            type_name: field.type_ref.name.clone(),
            character_maximum_length: field.character_maximum_length,
            precision: field.precision,
            scale: field.scale,
            focused: props.focused,
            highlighted: props.highlighted,
            visible: props.visible,
            is_connectable: props.is_connectable,
            table_node_id: props.table_node_id.clone(),
        }
    }
}

/// Single-entry memo cache.
#[derive(Debug)]
pub struct RenderCache<K, V> {
    entry: Option<(K, Arc<V>)>,
    hits: u64,
    misses: u64,
}

impl<K: PartialEq, V> RenderCache<K, V> {
    pub fn new() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached value for `key`, rendering and storing it on a miss.
    pub fn get_or_render(&mut self, key: K, render: impl FnOnce() -> V) -> Arc<V> {
        if let Some((cached_key, value)) = &self.entry {
            if *cached_key == key {
                self.hits += 1;
                return Arc::clone(value);
            }
        }
        self.misses += 1;
        let value = Arc::new(render());
        self.entry = Some((key, Arc::clone(&value)));
        value
    }

    /// Returns the last rendered value, if any.
    pub fn last(&self) -> Option<Arc<V>> {
        self.entry.as_ref().map(|(_, value)| Arc::clone(value))
    }

    /// Drops the cached entry.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Returns `(hits, misses)`.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl<K: PartialEq, V> Default for RenderCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
