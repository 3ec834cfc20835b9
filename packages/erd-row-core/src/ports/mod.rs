//! Connection port planning for a field row.

mod planner;
mod port;

pub use planner::{PortPlanInput, PortPlanner};
pub use port::{target_port_id, Port, PortDirection, PortSet, PortSide};

/// Id prefix of the left-hand source port.
pub const LEFT_SOURCE_PREFIX: &str = "left_rel_";
/// Id prefix of the right-hand source port.
pub const RIGHT_SOURCE_PREFIX: &str = "right_rel_";
/// Id prefix of target ports, followed by `<ordinal>_<fieldId>`.
pub const TARGET_PREFIX: &str = "target_rel_";

/// Returns true if the port id names a source port on either side.
pub fn is_source_port(port_id: &str) -> bool {
    port_id.starts_with(LEFT_SOURCE_PREFIX) || port_id.starts_with(RIGHT_SOURCE_PREFIX)
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
