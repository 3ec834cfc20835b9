//! Field row component: wires edit state, port planning and diff
//! classification to the scheduler and the external collaborators.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use erd_row_core::memo::{RenderCache, RenderKey};
use erd_row_core::present::{present, RowContext, RowProps, RowState, RowView};
use erd_row_core::{
    count_inbound, CommitOutcome, DiffEngine, DiffVerdict, DisplayPreferences, FieldId,
    FieldPatch, GraphHost, RowEditState, SchemaStore, TableId,
};

use crate::debounce::{Debouncer, FrameSlot};
use crate::input::{KeyPress, Propagation, RowInput};
use crate::listeners::PointerListeners;
use crate::scheduler::{Scheduler, TaskHandle};

/// Identifies a mounted row instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub u64);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Task scheduled on behalf of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTask {
    pub row: RowKey,
    pub kind: RowTaskKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTaskKind {
    /// Ask the host to recompute the node's port geometry
    NotifyGeometry { node: TableId },
    /// Run the five diff queries for a field
    ClassifyDiff { field: FieldId, table: TableId },
}

/// External collaborators shared by every row.
#[derive(Clone)]
pub struct RowEnv {
    pub store: Arc<dyn SchemaStore>,
    pub diff: Arc<dyn DiffEngine>,
    pub host: Arc<dyn GraphHost>,
    pub preferences: Arc<dyn DisplayPreferences>,
}

impl RowEnv {
    /// Reads the shared editor state a row renders against.
    pub fn context(&self, props: &RowProps) -> RowContext {
        let relationships = self.store.relationships();
        RowContext {
            read_only: self.store.read_only(),
            inbound_count: count_inbound(&relationships, &props.table_node_id, &props.field.id),
            drag: self.host.connection(),
            highlighted_custom_type: self.store.highlighted_custom_type(),
            show_field_attributes: self.preferences.show_field_attributes(),
        }
    }
}

impl fmt::Debug for RowEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowEnv").finish_non_exhaustive()
    }
}

/// Mutable runtime resources a row may touch while handling an event.
pub struct RowCtx<'a> {
    pub scheduler: &'a mut Scheduler<RowTask>,
    pub listeners: &'a mut PointerListeners,
    pub env: &'a RowEnv,
}

type ViewKey = (RenderKey, RowContext, u64);

/// One mounted field row.
#[derive(Debug)]
pub struct FieldRow {
    key: RowKey,
    props: RowProps,
    edit: RowEditState,
    hovered: bool,
    /// Latest diff snapshot; default until the first classification lands
    verdict: DiffVerdict,
    diff_slot: FrameSlot,
    /// Diff engine revision the pending or current verdict was taken at
    diff_revision: u64,
    geometry: Debouncer,
    /// Inbound edge count seen at the last render
    observed_edges: usize,
    /// Bumped on every change to row-local state
    state_revision: u64,
    cache: RenderCache<ViewKey, RowView>,
}

impl FieldRow {
    /// Mounts a row: schedules the first diff classification and the initial
    /// geometry notification.
    pub fn mount(
        key: RowKey,
        props: RowProps,
        geometry_delay: Duration,
        ctx: &mut RowCtx<'_>,
    ) -> Self {
        let context = ctx.env.context(&props);
        let mut row = Self {
            key,
            edit: RowEditState::new(&props.field.name),
            hovered: false,
            verdict: DiffVerdict::default(),
            diff_slot: FrameSlot::new(),
            diff_revision: ctx.env.diff.revision(),
            geometry: Debouncer::new(geometry_delay),
            observed_edges: context.inbound_count,
            state_revision: 0,
            cache: RenderCache::new(),
            props,
        };
        tracing::debug!(
            "Mounting {} for field {} on table {}",
            key,
            row.props.field.id,
            row.props.table_node_id
        );
        row.schedule_classification(ctx);
        row.schedule_geometry(ctx);
        row
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn props(&self) -> &RowProps {
        &self.props
    }

    pub fn edit_state(&self) -> &RowEditState {
        &self.edit
    }

    pub fn verdict(&self) -> &DiffVerdict {
        &self.verdict
    }

    /// Returns true while a diff classification waits for its frame.
    pub fn classification_pending(&self) -> bool {
        self.diff_slot.is_pending()
    }

    /// Returns true while a geometry notification waits for its delay.
    pub fn geometry_pending(&self) -> bool {
        self.geometry.is_pending()
    }

    /// Returns `(hits, misses)` of the render cache.
    pub fn render_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    /// Last rendered view.
    pub fn view(&self) -> Option<Arc<RowView>> {
        self.cache.last()
    }

    /// Replaces the props. A new field id aborts a rename in progress, voids
    /// the pending classification and schedules a fresh one; a new table node
    /// also rearms the geometry notification.
    pub fn update_props(&mut self, props: RowProps, ctx: &mut RowCtx<'_>) {
        let field_changed = props.field.id != self.props.field.id;
        let node_changed = props.table_node_id != self.props.table_node_id;
        self.props = props;

        if field_changed || node_changed {
            if field_changed {
                // The previous verdict and any typed rename belong to another field
                self.verdict = DiffVerdict::default();
                if self.edit.editing() {
                    tracing::debug!("{} dropped rename in progress on field change", self.key);
                }
                self.edit.abort(&self.props.field.name);
                ctx.listeners.unsubscribe(self.key);
                self.bump();
            }
            self.schedule_classification(ctx);
        }
        if node_changed {
            self.schedule_geometry(ctx);
        }
    }

    /// Tears the row down, voiding both pending tasks and the click-away listener.
    pub fn unmount(mut self, ctx: &mut RowCtx<'_>) {
        let geometry = self.geometry.cancel(ctx.scheduler);
        let diff = self.diff_slot.cancel(ctx.scheduler);
        ctx.listeners.unsubscribe(self.key);
        self.cache.clear();
        tracing::debug!(
            "Unmounted {} (cancelled geometry: {}, cancelled diff: {})",
            self.key,
            geometry,
            diff
        );
    }

    /// Handles pointer and keyboard input aimed at this row.
    pub fn handle_input(&mut self, input: RowInput, ctx: &mut RowCtx<'_>) -> Propagation {
        match input {
            RowInput::LabelDoubleClick => {
                if ctx.env.store.read_only() {
                    return Propagation::Continue;
                }
                self.enter_edit_mode(ctx);
                Propagation::Stop
            }
            RowInput::NameInput(text) => {
                if self.edit.set_pending(&text) {
                    self.bump();
                }
                Propagation::Continue
            }
            RowInput::Key(KeyPress::Enter) => {
                self.commit(ctx);
                Propagation::Continue
            }
            RowInput::Key(KeyPress::Escape) => {
                self.abort(ctx);
                Propagation::Continue
            }
            RowInput::Key(KeyPress::Other(_)) => Propagation::Continue,
            RowInput::Blur => {
                self.commit(ctx);
                Propagation::Continue
            }
            RowInput::ConfirmClick => {
                if !self.edit.editing() || ctx.env.store.read_only() {
                    return Propagation::Continue;
                }
                self.commit(ctx);
                Propagation::Stop
            }
            RowInput::DeleteClick => {
                if self.edit.editing() || ctx.env.store.read_only() {
                    return Propagation::Continue;
                }
                tracing::debug!("{} requests removal of field {}", self.key, self.props.field.id);
                ctx.env
                    .store
                    .remove_field(&self.props.table_node_id, &self.props.field.id);
                Propagation::Stop
            }
            RowInput::PointerEnter => {
                self.set_hovered(true);
                Propagation::Continue
            }
            RowInput::PointerLeave => {
                self.set_hovered(false);
                Propagation::Continue
            }
        }
    }

    /// Pointer-down outside the row while editing confirms the rename.
    pub fn click_away(&mut self, ctx: &mut RowCtx<'_>) {
        if self.edit.editing() {
            tracing::trace!("{} click-away while editing", self.key);
            self.commit(ctx);
        }
    }

    /// Enters edit mode. Refused on read-only diagrams.
    pub fn enter_edit_mode(&mut self, ctx: &mut RowCtx<'_>) -> bool {
        let read_only = ctx.env.store.read_only();
        if !self.edit.enter(read_only, &self.props.field.name) {
            return false;
        }
        ctx.listeners.subscribe(self.key);
        self.bump();
        tracing::debug!("{} entered edit mode", self.key);
        true
    }

    /// Leaves edit mode, requesting a rename unless the input is blank.
    pub fn commit(&mut self, ctx: &mut RowCtx<'_>) -> CommitOutcome {
        let outcome = self.edit.commit();
        match &outcome {
            CommitOutcome::Idle => return outcome,
            CommitOutcome::Discarded => {
                tracing::debug!("{} discarded blank rename", self.key);
            }
            CommitOutcome::Rename(name) => {
                tracing::debug!(
                    "{} renames field {} to {:?}",
                    self.key,
                    self.props.field.id,
                    name
                );
                ctx.env.store.update_field(
                    &self.props.table_node_id,
                    &self.props.field.id,
                    FieldPatch::rename(name.as_str()),
                );
            }
        }
        ctx.listeners.unsubscribe(self.key);
        self.bump();
        outcome
    }

    /// Leaves edit mode and restores the pending name to the field's name.
    pub fn abort(&mut self, ctx: &mut RowCtx<'_>) {
        let was_editing = self.edit.editing();
        self.edit.abort(&self.props.field.name);
        ctx.listeners.unsubscribe(self.key);
        self.bump();
        if was_editing {
            tracing::debug!("{} aborted rename", self.key);
        }
    }

    /// Runs a task fired by the scheduler. Voided handles are ignored.
    pub fn run_task(&mut self, handle: TaskHandle, kind: RowTaskKind, ctx: &mut RowCtx<'_>) {
        match kind {
            RowTaskKind::NotifyGeometry { node } => {
                if !self.geometry.settle(handle) {
                    tracing::trace!("{} ignored voided geometry notification", self.key);
                    return;
                }
                tracing::debug!("{} notifies host to update internals of {}", self.key, node);
                ctx.env.host.update_node_internals(&node);
            }
            RowTaskKind::ClassifyDiff { field, table } => {
                if !self.diff_slot.settle(handle) {
                    tracing::trace!("{} ignored voided diff classification", self.key);
                    return;
                }
                let verdict = DiffVerdict::classify(ctx.env.diff.as_ref(), &field, &table);
                tracing::debug!("{} classified field {}: {:?}", self.key, field, verdict.tag());
                if verdict != self.verdict {
                    self.verdict = verdict;
                    self.bump();
                }
            }
        }
    }

    /// Renders the row against the current shared state.
    ///
    /// Also observes the inbound edge count and the diff engine revision,
    /// rearming the geometry debounce or the classification when they move.
    pub fn render(&mut self, ctx: &mut RowCtx<'_>) -> Arc<RowView> {
        let context = ctx.env.context(&self.props);

        if context.inbound_count != self.observed_edges {
            tracing::debug!(
                "{} inbound edges {} -> {}",
                self.key,
                self.observed_edges,
                context.inbound_count
            );
            self.observed_edges = context.inbound_count;
            self.schedule_geometry(ctx);
        }

        let revision = ctx.env.diff.revision();
        if revision != self.diff_revision {
            self.diff_revision = revision;
            self.schedule_classification(ctx);
        }

        let key = (RenderKey::from(&self.props), context.clone(), self.state_revision);
        let props = &self.props;
        let state = RowState {
            edit: &self.edit,
            hovered: self.hovered,
            verdict: &self.verdict,
        };
        self.cache
            .get_or_render(key, || present(props, state, &context))
    }

    fn schedule_classification(&mut self, ctx: &mut RowCtx<'_>) {
        let task = RowTask {
            row: self.key,
            kind: RowTaskKind::ClassifyDiff {
                field: self.props.field.id.clone(),
                table: self.props.table_node_id.clone(),
            },
        };
        self.diff_slot.schedule(ctx.scheduler, task);
        tracing::trace!("{} deferred diff classification to next frame", self.key);
    }

    fn schedule_geometry(&mut self, ctx: &mut RowCtx<'_>) {
        let task = RowTask {
            row: self.key,
            kind: RowTaskKind::NotifyGeometry {
                node: self.props.table_node_id.clone(),
            },
        };
        self.geometry.trigger(ctx.scheduler, task);
        tracing::trace!(
            "{} geometry notification due in {:?}",
            self.key,
            self.geometry.delay()
        );
    }

    fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.state_revision += 1;
    }
}
