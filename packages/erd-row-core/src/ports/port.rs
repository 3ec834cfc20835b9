//! Port primitives handed to the host graph engine.

use serde::{Deserialize, Serialize};

use crate::field::FieldId;

use super::{LEFT_SOURCE_PREFIX, RIGHT_SOURCE_PREFIX, TARGET_PREFIX};

/// Side of the row a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortSide {
    Left,
    Right,
}

/// Whether edges start or end at a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortDirection {
    Source,
    Target,
}

/// Connection endpoint of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// Port id, stable across renders
    pub id: String,
    pub side: PortSide,
    pub direction: PortDirection,
    /// Visible and interactive
    pub visible: bool,
    /// Stretched over the whole row as a drop target
    pub overlay: bool,
}

impl Port {
    pub(crate) fn source(side: PortSide, field: &FieldId, visible: bool) -> Self {
        let prefix = match side {
            PortSide::Left => LEFT_SOURCE_PREFIX,
            PortSide::Right => RIGHT_SOURCE_PREFIX,
        };
        Self {
            id: format!("{prefix}{field}"),
            side,
            direction: PortDirection::Source,
            visible,
            overlay: false,
        }
    }

    pub(crate) fn target(ordinal: usize, field: &FieldId, open_for_drop: bool) -> Self {
        Self {
            id: target_port_id(ordinal, field),
            side: PortSide::Left,
            direction: PortDirection::Target,
            visible: open_for_drop,
            overlay: open_for_drop,
        }
    }
}

/// Returns the id of the target port with the given ordinal.
pub fn target_port_id(ordinal: usize, field: &FieldId) -> String {
    format!("{TARGET_PREFIX}{ordinal}_{field}")
}

/// Ports a connectable row exposes this frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortSet {
    /// Left and right source ports, in that order
    pub sources: [Port; 2],
    /// Target ports by ordinal; the last one is the open port
    pub targets: Vec<Port>,
}

impl PortSet {
    /// Returns the open target port.
    pub fn open_port(&self) -> Option<&Port> {
        self.targets.last()
    }

    /// Returns the ordinal of the open port, which equals the inbound edge count.
    pub fn open_ordinal(&self) -> usize {
        self.targets.len().saturating_sub(1)
    }

    /// Iterates over every port, sources first.
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.sources.iter().chain(self.targets.iter())
    }
}
