//! Tick phase handling

use std::time::Duration;

use crate::Result;

/// Runtime tick phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    /// Drain queued input events
    Input,
    /// Advance the clock and fire expired timers
    Timers,
    /// Run tasks deferred to the next frame
    Frame,
    /// Observe shared state and re-render rows
    Render,
}

impl TickPhase {
    pub const ORDER: [TickPhase; 4] = [
        TickPhase::Input,
        TickPhase::Timers,
        TickPhase::Frame,
        TickPhase::Render,
    ];
}

/// Trait for tick phase processing
pub trait TickPhaseProcessor {
    /// Process a specific tick phase. `elapsed` is only consumed by the timer phase.
    fn process_tick_phase(&mut self, phase: TickPhase, elapsed: Duration) -> Result<()>;
}

impl TickPhaseProcessor for crate::Runtime {
    fn process_tick_phase(&mut self, phase: TickPhase, elapsed: Duration) -> Result<()> {
        match phase {
            TickPhase::Input => self.process_input_phase(),
            TickPhase::Timers => self.process_timer_phase(elapsed),
            TickPhase::Frame => self.process_frame_phase(),
            TickPhase::Render => self.process_render_phase(),
        }
    }
}
