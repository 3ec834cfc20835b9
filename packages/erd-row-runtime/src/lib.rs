//! Tick-based event loop driving ER diagram field rows.
//!
//! A [`Runtime`] owns mounted [`FieldRow`]s, a virtual clock with timers and
//! an animation-frame queue, and the click-away listener registry. Each tick
//! runs the input, timer, frame and render phases in that order.

mod debounce;
mod input;
mod listeners;
mod row;
mod runtime;
mod scheduler;
mod tick_phases;

pub use debounce::{Debouncer, FrameSlot};
pub use input::{KeyPress, Propagation, RowInput, RuntimeEvent};
pub use listeners::PointerListeners;
pub use row::{FieldRow, RowCtx, RowEnv, RowKey, RowTask, RowTaskKind};
pub use runtime::Runtime;
pub use scheduler::{Scheduler, TaskHandle};
pub use tick_phases::{TickPhase, TickPhaseProcessor};

pub use erd_row_core::{Result, RowError};
