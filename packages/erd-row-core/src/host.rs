//! Host graph engine and display preference boundaries.

use serde::{Deserialize, Serialize};

use crate::field::TableId;

/// Live drag-to-connect gesture state, owned by the host graph engine.
///
/// Rows only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDrag {
    /// A connection gesture is in progress
    pub in_progress: bool,
    /// Node the gesture started from
    pub from_node: Option<TableId>,
    /// Port the gesture started from
    pub from_port: Option<String>,
}

impl ConnectionDrag {
    /// No gesture in progress.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Gesture started from the given node and port.
    pub fn from(node: TableId, port: impl Into<String>) -> Self {
        Self {
            in_progress: true,
            from_node: Some(node),
            from_port: Some(port.into()),
        }
    }
}

/// Node-graph engine hosting the diagram.
pub trait GraphHost: Send + Sync {
    /// Returns the current drag-to-connect state.
    fn connection(&self) -> ConnectionDrag;

    /// Asks the engine to recompute the port geometry of a node.
    fn update_node_internals(&self, node: &TableId);
}

/// User display preferences relevant to a row.
pub trait DisplayPreferences: Send + Sync {
    /// Whether type badges carry the `(len)` / `(p, s)` attribute suffix.
    fn show_field_attributes(&self) -> bool;
}
