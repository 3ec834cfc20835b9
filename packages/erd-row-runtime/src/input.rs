//! Pointer and keyboard input delivered to rows.

use serde::{Deserialize, Serialize};

use crate::row::RowKey;

/// Keys the rename input reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyPress {
    Enter,
    Escape,
    Other(String),
}

/// Input targeted at one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowInput {
    /// Double-click on the field label
    LabelDoubleClick,
    /// Rename input text changed
    NameInput(String),
    /// Key pressed in the rename input
    Key(KeyPress),
    /// Rename input lost focus
    Blur,
    /// Rename-confirm button clicked
    ConfirmClick,
    /// Delete button clicked
    DeleteClick,
    PointerEnter,
    PointerLeave,
}

/// Whether an input may bubble to the canvas's drag/selection handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Event queued on the runtime input channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Input for a mounted row
    Row { key: RowKey, input: RowInput },
    /// Pointer-down anywhere in the document; `target` is the row hit, if any
    PointerDown { target: Option<RowKey> },
}
