//! Shared spies and fixtures for runtime integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use erd_row_core::{
    ConnectionDrag, DiffEngine, DiffVerdict, Field, FieldId, FieldPatch, GraphHost,
    Relationship, RowConfig, RowProps, SchemaStore, TableId, TypeRef,
};
use erd_row_runtime::{RowEnv, Runtime};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Schema store that records every mutation request.
#[derive(Default)]
pub struct RecordingStore {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    read_only: bool,
    relationships: Vec<Relationship>,
    highlighted_custom_type: Option<String>,
    updates: Vec<(TableId, FieldId, FieldPatch)>,
    removals: Vec<(TableId, FieldId)>,
}

impl RecordingStore {
    pub fn set_read_only(&self, read_only: bool) {
        self.state.lock().read_only = read_only;
    }

    pub fn set_highlighted_custom_type(&self, name: Option<&str>) {
        self.state.lock().highlighted_custom_type = name.map(str::to_string);
    }

    pub fn add_relationship(&self, source: (&str, &str), target: (&str, &str)) {
        let mut state = self.state.lock();
        let id = format!("rel_{}", state.relationships.len());
        state.relationships.push(Relationship {
            id,
            name: String::new(),
            source_table_id: TableId::new(source.0),
            source_field_id: FieldId::new(source.1),
            target_table_id: TableId::new(target.0),
            target_field_id: FieldId::new(target.1),
        });
    }

    pub fn updates(&self) -> Vec<(TableId, FieldId, FieldPatch)> {
        self.state.lock().updates.clone()
    }

    pub fn removals(&self) -> Vec<(TableId, FieldId)> {
        self.state.lock().removals.clone()
    }
}

impl SchemaStore for RecordingStore {
    fn update_field(&self, table: &TableId, field: &FieldId, patch: FieldPatch) {
        self.state
            .lock()
            .updates
            .push((table.clone(), field.clone(), patch));
    }

    fn remove_field(&self, table: &TableId, field: &FieldId) {
        self.state
            .lock()
            .removals
            .push((table.clone(), field.clone()));
    }

    fn read_only(&self) -> bool {
        self.state.lock().read_only
    }

    fn relationships(&self) -> Arc<[Relationship]> {
        Arc::from(self.state.lock().relationships.clone())
    }

    fn highlighted_custom_type(&self) -> Option<String> {
        self.state.lock().highlighted_custom_type.clone()
    }
}

/// Diff engine answering from a script and counting queries.
#[derive(Default)]
pub struct ScriptedDiff {
    verdicts: Mutex<HashMap<FieldId, DiffVerdict>>,
    queries: Mutex<Vec<(&'static str, FieldId)>>,
    revision: AtomicU64,
}

impl ScriptedDiff {
    pub fn set(&self, field: &str, verdict: DiffVerdict) {
        self.verdicts.lock().insert(FieldId::new(field), verdict);
    }

    pub fn bump_revision(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    pub fn queries(&self) -> Vec<(&'static str, FieldId)> {
        self.queries.lock().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }

    fn lookup(&self, query: &'static str, field: &FieldId) -> DiffVerdict {
        self.queries.lock().push((query, field.clone()));
        self.verdicts.lock().get(field).cloned().unwrap_or_default()
    }
}

impl DiffEngine for ScriptedDiff {
    fn is_field_removed(&self, field: &FieldId) -> bool {
        self.lookup("removed", field).removed
    }

    fn is_new_field(&self, field: &FieldId) -> bool {
        self.lookup("new", field).is_new
    }

    fn renamed_to(&self, field: &FieldId) -> Option<String> {
        self.lookup("renamed", field).renamed_to
    }

    fn retyped_to(&self, field: &FieldId) -> Option<TypeRef> {
        self.lookup("retyped", field).retyped_to
    }

    fn has_field_changed(&self, field: &FieldId, _table: &TableId) -> bool {
        self.lookup("changed", field).changed
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

/// Graph host with a settable drag state that records geometry notifications.
#[derive(Default)]
pub struct RecordingHost {
    drag: Mutex<ConnectionDrag>,
    notifications: Mutex<Vec<TableId>>,
}

impl RecordingHost {
    pub fn set_drag(&self, drag: ConnectionDrag) {
        *self.drag.lock() = drag;
    }

    pub fn notifications(&self) -> Vec<TableId> {
        self.notifications.lock().clone()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.lock().len()
    }
}

impl GraphHost for RecordingHost {
    fn connection(&self) -> ConnectionDrag {
        self.drag.lock().clone()
    }

    fn update_node_internals(&self, node: &TableId) {
        self.notifications.lock().push(node.clone());
    }
}

/// Runtime wired to spies.
pub struct Harness {
    pub store: Arc<RecordingStore>,
    pub diff: Arc<ScriptedDiff>,
    pub host: Arc<RecordingHost>,
    pub runtime: Runtime,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(RowConfig::default())
    }

    pub fn with_config(config: RowConfig) -> Self {
        init_tracing();
        let store = Arc::new(RecordingStore::default());
        let diff = Arc::new(ScriptedDiff::default());
        let host = Arc::new(RecordingHost::default());
        let env = RowEnv {
            store: store.clone(),
            diff: diff.clone(),
            host: host.clone(),
            preferences: Arc::new(config.clone()),
        };
        let runtime = Runtime::new(config, env).unwrap();
        Self {
            store,
            diff,
            host,
            runtime,
        }
    }
}

/// Props for field `field_id` named `name` on table `table`.
pub fn props(table: &str, field_id: &str, name: &str) -> RowProps {
    RowProps::new(
        TableId::new(table),
        Field::new(field_id, name, TypeRef::new("varchar", "varchar(255) NOT NULL")),
    )
}
