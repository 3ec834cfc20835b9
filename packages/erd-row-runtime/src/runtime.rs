//! Runtime loop with tick phases.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use erd_row_core::present::{RowProps, RowView};
use erd_row_core::{RowConfig, RowError};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::input::{Propagation, RowInput, RuntimeEvent};
use crate::listeners::PointerListeners;
use crate::row::{FieldRow, RowCtx, RowEnv, RowKey, RowTask};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::tick_phases::{TickPhase, TickPhaseProcessor};
use crate::Result;

/// Single-threaded event loop owning every mounted row.
#[derive(Debug)]
pub struct Runtime {
    /// Configuration
    config: RowConfig,
    /// External collaborators
    env: RowEnv,
    /// Tick duration
    tick_duration: Duration,
    /// Timers and frame tasks of all rows
    scheduler: Scheduler<RowTask>,
    /// Mounted rows
    rows: BTreeMap<RowKey, FieldRow>,
    /// Rows in edit mode listening for click-away
    listeners: PointerListeners,
    /// Input event sender handed to the host shell
    input_tx: mpsc::Sender<RuntimeEvent>,
    /// Input event receiver, drained once per tick
    input_rx: mpsc::Receiver<RuntimeEvent>,
    /// Next row key
    next_key: u64,
    /// Current tick count
    tick_count: u64,
}

impl Runtime {
    /// Create a new runtime. The input channel holds up to `tickrate * 100` events.
    pub fn new(config: RowConfig, env: RowEnv) -> Result<Self> {
        config.validate()?;
        let tick_duration = config.tick_duration();
        let (input_tx, input_rx) = mpsc::channel(config.tickrate as usize * 100);

        Ok(Self {
            config,
            env,
            tick_duration,
            scheduler: Scheduler::new(),
            rows: BTreeMap::new(),
            listeners: PointerListeners::new(),
            input_tx,
            input_rx,
            next_key: 0,
            tick_count: 0,
        })
    }

    pub fn config(&self) -> &RowConfig {
        &self.config
    }

    /// Returns a sender for queueing input events.
    pub fn input_sender(&self) -> mpsc::Sender<RuntimeEvent> {
        self.input_tx.clone()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns `(pending timers, pending frame tasks)`.
    pub fn pending_tasks(&self) -> (usize, usize) {
        (
            self.scheduler.pending_timers(),
            self.scheduler.pending_frames(),
        )
    }

    /// Number of rows listening for click-away.
    pub fn click_away_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn row(&self, key: RowKey) -> Option<&FieldRow> {
        self.rows.get(&key)
    }

    /// Last rendered view of a row.
    pub fn view(&self, key: RowKey) -> Option<Arc<RowView>> {
        self.rows.get(&key).and_then(FieldRow::view)
    }

    /// Last rendered view of a row as JSON, for host shells.
    pub fn view_json(&self, key: RowKey) -> Result<serde_json::Value> {
        let view = self.view(key).ok_or(RowError::RowNotMounted { key: key.0 })?;
        serde_json::to_value(view.as_ref()).map_err(|e| RowError::SerializationError(e.to_string()))
    }

    /// Mounts a row and paints it with the default diff verdict.
    pub fn mount(&mut self, props: RowProps) -> RowKey {
        self.next_key += 1;
        let key = RowKey(self.next_key);
        let Self {
            config,
            env,
            scheduler,
            rows,
            listeners,
            ..
        } = self;
        let mut ctx = RowCtx {
            scheduler,
            listeners,
            env,
        };
        let mut row = FieldRow::mount(key, props, config.geometry_debounce(), &mut ctx);
        row.render(&mut ctx);
        rows.insert(key, row);
        key
    }

    /// Replaces a row's props and re-renders it.
    pub fn update_props(&mut self, key: RowKey, props: RowProps) -> Result<()> {
        self.with_row(key, |row, ctx| {
            row.update_props(props, ctx);
            row.render(ctx);
        })
    }

    /// Unmounts a row, cancelling its pending tasks.
    pub fn unmount(&mut self, key: RowKey) -> Result<()> {
        let row = self
            .rows
            .remove(&key)
            .ok_or(RowError::RowNotMounted { key: key.0 })?;
        let mut ctx = RowCtx {
            scheduler: &mut self.scheduler,
            listeners: &mut self.listeners,
            env: &self.env,
        };
        row.unmount(&mut ctx);
        Ok(())
    }

    /// Delivers input to a row and re-renders it.
    pub fn dispatch(&mut self, key: RowKey, input: RowInput) -> Result<Propagation> {
        self.with_row(key, |row, ctx| {
            let propagation = row.handle_input(input, ctx);
            row.render(ctx);
            propagation
        })
    }

    /// Handles a document-level pointer-down. Every editing row other than
    /// `target` commits its rename. Returns the number of rows notified.
    pub fn pointer_down(&mut self, target: Option<RowKey>) -> usize {
        let outside = self.listeners.outside(target);
        let mut notified = 0;
        for key in outside {
            let result = self.with_row(key, |row, ctx| {
                row.click_away(ctx);
                row.render(ctx);
            });
            match result {
                Ok(()) => notified += 1,
                Err(e) => tracing::warn!("Dropping click-away listener: {}", e),
            }
        }
        notified
    }

    fn with_row<R>(
        &mut self,
        key: RowKey,
        f: impl FnOnce(&mut FieldRow, &mut RowCtx<'_>) -> R,
    ) -> Result<R> {
        let Self {
            env,
            scheduler,
            rows,
            listeners,
            ..
        } = self;
        let Some(row) = rows.get_mut(&key) else {
            listeners.unsubscribe(key);
            return Err(RowError::RowNotMounted { key: key.0 });
        };
        let mut ctx = RowCtx {
            scheduler,
            listeners,
            env,
        };
        Ok(f(row, &mut ctx))
    }

    /// Execute a single tick, advancing the clock by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) -> Result<()> {
        for phase in TickPhase::ORDER {
            self.process_tick_phase(phase, elapsed)?;
        }
        self.tick_count += 1;
        Ok(())
    }

    /// Execute ticks until the virtual clock has advanced by `duration`.
    pub fn run_for(&mut self, duration: Duration) -> Result<()> {
        let target = self.now() + duration;
        while self.now() < target {
            let step = self.tick_duration.min(target - self.now());
            self.tick(step)?;
        }
        Ok(())
    }

    /// Drive ticks from a tokio interval until `shutdown` resolves.
    pub async fn run(&mut self, mut shutdown: oneshot::Receiver<()>) -> Result<()> {
        let mut interval = tokio::time::interval(self.tick_duration);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = interval.tick().await;

        loop {
            tokio::select! {
                instant = interval.tick() => {
                    let elapsed = instant.duration_since(last);
                    last = instant;
                    self.tick(elapsed)?;
                }
                _ = &mut shutdown => {
                    tracing::debug!("Runtime shutting down after {} ticks", self.tick_count);
                    return Ok(());
                }
            }
        }
    }

    /// Input phase: drain the input channel.
    pub(crate) fn process_input_phase(&mut self) -> Result<()> {
        let mut processed = 0;
        while let Ok(event) = self.input_rx.try_recv() {
            match event {
                RuntimeEvent::Row { key, input } => {
                    if let Err(e) = self.dispatch(key, input) {
                        // Input racing an unmount is expected
                        tracing::debug!("Dropping input: {}", e);
                    }
                }
                RuntimeEvent::PointerDown { target } => {
                    self.pointer_down(target);
                }
            }
            processed += 1;
        }
        if processed > 0 {
            tracing::trace!("Processed {} input events", processed);
        }
        Ok(())
    }

    /// Timer phase: advance the clock and fire expired timers.
    pub(crate) fn process_timer_phase(&mut self, elapsed: Duration) -> Result<()> {
        let due = self.scheduler.advance(elapsed);
        self.run_tasks(due);
        Ok(())
    }

    /// Frame phase: run tasks deferred to this frame.
    pub(crate) fn process_frame_phase(&mut self) -> Result<()> {
        let frame = self.scheduler.take_frame();
        self.run_tasks(frame);
        Ok(())
    }

    /// Render phase: re-render every row against the current shared state.
    pub(crate) fn process_render_phase(&mut self) -> Result<()> {
        let Self {
            env,
            scheduler,
            rows,
            listeners,
            ..
        } = self;
        let mut ctx = RowCtx {
            scheduler,
            listeners,
            env,
        };
        for row in rows.values_mut() {
            row.render(&mut ctx);
        }
        Ok(())
    }

    fn run_tasks(&mut self, tasks: Vec<(TaskHandle, RowTask)>) {
        for (handle, RowTask { row: key, kind }) in tasks {
            if self
                .with_row(key, |row, ctx| row.run_task(handle, kind, ctx))
                .is_err()
            {
                tracing::warn!("Task for unmounted {} fired", key);
            }
        }
    }
}
