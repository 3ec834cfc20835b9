//! Field row model for entity-relationship diagram tables.
//!
//! Provides the field and relationship data model, the collaborator traits a
//! host editor implements, the rename state machine, connection port
//! planning, diff verdicts, and the memoized row presenter.

pub mod config;
pub mod diff;
pub mod edit;
pub mod error;
pub mod field;
pub mod host;
pub mod memo;
pub mod ports;
pub mod present;
pub mod relationship;
pub mod store;

pub use config::RowConfig;
pub use diff::{DiffEngine, DiffTag, DiffVerdict};
pub use edit::{CommitOutcome, RowEditState};
pub use error::{Result, RowError};
pub use field::{Field, FieldId, TableId, TypeRef};
pub use host::{ConnectionDrag, DisplayPreferences, GraphHost};
pub use memo::{RenderCache, RenderKey};
pub use ports::{Port, PortDirection, PortPlanner, PortSet, PortSide};
pub use present::{
    present, RenameInput, RowActions, RowContext, RowProps, RowState, RowTone, RowView, TypeBadge,
};
pub use relationship::{count_inbound, Relationship};
pub use store::{FieldPatch, SchemaStore};
