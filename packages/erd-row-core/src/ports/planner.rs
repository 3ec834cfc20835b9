//! Derives the port set of a row from edge count and drag state.

use crate::field::{FieldId, TableId};
use crate::host::ConnectionDrag;

use super::is_source_port;
use super::port::{Port, PortSet, PortSide};

/// Inputs to port planning for one frame.
#[derive(Debug, Clone, Copy)]
pub struct PortPlanInput<'a> {
    pub field: &'a FieldId,
    pub table_node: &'a TableId,
    /// Relationships ending at this field
    pub inbound_count: usize,
    pub connectable: bool,
    pub focused: bool,
    pub read_only: bool,
    pub drag: &'a ConnectionDrag,
}

/// Stateless port planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortPlanner;

impl PortPlanner {
    /// Plans the ports for this frame. Non-connectable rows expose none.
    pub fn plan(input: &PortPlanInput<'_>) -> Option<PortSet> {
        if !input.connectable {
            return None;
        }

        let sources_visible = input.focused && !input.read_only;
        let sources = [
            Port::source(PortSide::Left, input.field, sources_visible),
            Port::source(PortSide::Right, input.field, sources_visible),
        ];

        let open_for_drop = Self::accepts_drop(input.drag, input.table_node);
        let n = input.inbound_count;
        let targets = (0..=n)
            .map(|ordinal| Port::target(ordinal, input.field, ordinal == n && open_for_drop))
            .collect();

        Some(PortSet { sources, targets })
    }

    /// Returns true if an in-flight drag may be dropped on this table's open port.
    ///
    /// The drag must be in progress, start on another table, and start from a
    /// source port.
    pub fn accepts_drop(drag: &ConnectionDrag, table_node: &TableId) -> bool {
        if !drag.in_progress {
            return false;
        }
        let other_node = drag
            .from_node
            .as_ref()
            .is_some_and(|node| node != table_node);
        let from_source = drag.from_port.as_deref().is_some_and(is_source_port);
        other_node && from_source
    }
}
