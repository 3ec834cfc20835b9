//! Inline rename, click-away, and delete interactions.

mod common;

use common::{ms, props, Harness};
use erd_row_core::{FieldId, FieldPatch, TableId};
use erd_row_runtime::{KeyPress, Propagation, RowInput, RuntimeEvent};
use ntest::timeout;
use pretty_assertions::assert_eq;

fn rename(name: &str) -> (TableId, FieldId, FieldPatch) {
    (TableId::new("users"), FieldId::new("f1"), FieldPatch::rename(name))
}

#[timeout(1000)]
#[test]
fn test_double_click_enters_edit_mode() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    let propagation = h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    assert_eq!(propagation, Propagation::Stop);

    let row = h.runtime.row(key).unwrap();
    assert!(row.edit_state().editing());
    assert_eq!(row.edit_state().pending_name(), "users");
    assert_eq!(h.runtime.click_away_listeners(), 1);

    let view = h.runtime.view(key).unwrap();
    let input = view.rename_input.as_ref().unwrap();
    assert_eq!(input.value, "users");
    assert!(input.autofocus);
    assert!(view.actions.confirm_rename);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_enter_commits_trimmed_name_once() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    h.runtime
        .dispatch(key, RowInput::NameInput("  Users ".to_string()))?;
    assert_eq!(
        h.runtime.view(key).unwrap().rename_input.as_ref().unwrap().value,
        "  Users "
    );
    h.runtime.dispatch(key, RowInput::Key(KeyPress::Enter))?;

    assert_eq!(h.store.updates(), vec![rename("Users")]);
    assert!(!h.runtime.row(key).unwrap().edit_state().editing());
    assert_eq!(h.runtime.click_away_listeners(), 0);

    // Blur after the input is gone must not commit again
    h.runtime.dispatch(key, RowInput::Blur)?;
    assert_eq!(h.store.updates().len(), 1);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_whitespace_commit_leaves_name_unchanged() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    h.runtime.dispatch(key, RowInput::NameInput("  ".to_string()))?;
    h.runtime.dispatch(key, RowInput::Key(KeyPress::Enter))?;

    assert!(h.store.updates().is_empty());
    assert!(!h.runtime.row(key).unwrap().edit_state().editing());
    assert_eq!(h.runtime.view(key).unwrap().label, "users");
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_escape_aborts_and_restores_current_name() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    h.runtime
        .dispatch(key, RowInput::NameInput("whatever".to_string()))?;
    // Renamed elsewhere while the input is open
    h.runtime.update_props(key, props("users", "f1", "members"))?;
    h.runtime.dispatch(key, RowInput::Key(KeyPress::Escape))?;

    let row = h.runtime.row(key).unwrap();
    assert!(!row.edit_state().editing());
    assert_eq!(row.edit_state().pending_name(), "members");
    assert!(h.store.updates().is_empty());
    assert_eq!(h.runtime.click_away_listeners(), 0);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_blur_commits() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    h.runtime
        .dispatch(key, RowInput::NameInput("accounts".to_string()))?;
    h.runtime.dispatch(key, RowInput::Blur)?;

    assert_eq!(h.store.updates(), vec![rename("accounts")]);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_other_keys_are_ignored() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    let propagation = h
        .runtime
        .dispatch(key, RowInput::Key(KeyPress::Other("a".to_string())))?;
    assert_eq!(propagation, Propagation::Continue);
    assert!(h.runtime.row(key).unwrap().edit_state().editing());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_click_away_commits_instead_of_aborting() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    h.runtime
        .dispatch(key, RowInput::NameInput("people".to_string()))?;

    // A pointer-down inside the row keeps editing
    assert_eq!(h.runtime.pointer_down(Some(key)), 0);
    assert!(h.runtime.row(key).unwrap().edit_state().editing());

    assert_eq!(h.runtime.pointer_down(None), 1);
    assert_eq!(h.store.updates(), vec![rename("people")]);
    assert_eq!(h.runtime.click_away_listeners(), 0);

    // Listener is gone once editing ends
    assert_eq!(h.runtime.pointer_down(None), 0);
    assert_eq!(h.store.updates().len(), 1);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_click_away_through_input_channel() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));
    let other = h.runtime.mount(props("orders", "o1", "user_id"));
    let tx = h.runtime.input_sender();

    tx.try_send(RuntimeEvent::Row {
        key,
        input: RowInput::LabelDoubleClick,
    })?;
    tx.try_send(RuntimeEvent::Row {
        key,
        input: RowInput::NameInput("Users".to_string()),
    })?;
    h.runtime.tick(ms(16))?;
    assert!(h.runtime.row(key).unwrap().edit_state().editing());

    tx.try_send(RuntimeEvent::PointerDown {
        target: Some(other),
    })?;
    h.runtime.tick(ms(16))?;
    assert_eq!(h.store.updates(), vec![rename("Users")]);
    assert!(!h.runtime.row(key).unwrap().edit_state().editing());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_confirm_button_commits_and_stops_propagation() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    // Not editing: the button is not shown, nothing happens
    assert_eq!(
        h.runtime.dispatch(key, RowInput::ConfirmClick)?,
        Propagation::Continue
    );

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    h.runtime.dispatch(key, RowInput::NameInput("Users".to_string()))?;
    assert_eq!(
        h.runtime.dispatch(key, RowInput::ConfirmClick)?,
        Propagation::Stop
    );
    assert_eq!(h.store.updates(), vec![rename("Users")]);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_enter_without_editing_is_noop() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::NameInput("ignored".to_string()))?;
    h.runtime.dispatch(key, RowInput::Key(KeyPress::Enter))?;
    h.runtime.dispatch(key, RowInput::Blur)?;

    assert!(h.store.updates().is_empty());
    assert_eq!(h.runtime.row(key).unwrap().edit_state().pending_name(), "users");
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_read_only_blocks_edit_and_delete() -> anyhow::Result<()> {
    let mut h = Harness::new();
    h.store.set_read_only(true);
    let key = h.runtime.mount(props("users", "f1", "users"));

    assert_eq!(
        h.runtime.dispatch(key, RowInput::LabelDoubleClick)?,
        Propagation::Continue
    );
    assert!(!h.runtime.row(key).unwrap().edit_state().editing());
    assert_eq!(h.runtime.click_away_listeners(), 0);

    h.runtime.dispatch(key, RowInput::PointerEnter)?;
    let view = h.runtime.view(key).unwrap();
    assert!(!view.actions.delete);
    assert!(!view.actions.confirm_rename);

    assert_eq!(
        h.runtime.dispatch(key, RowInput::DeleteClick)?,
        Propagation::Continue
    );
    assert!(h.store.removals().is_empty());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_delete_on_hover_stops_propagation() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    assert!(!h.runtime.view(key).unwrap().actions.delete);
    h.runtime.dispatch(key, RowInput::PointerEnter)?;
    assert!(h.runtime.view(key).unwrap().actions.delete);

    assert_eq!(
        h.runtime.dispatch(key, RowInput::DeleteClick)?,
        Propagation::Stop
    );
    assert_eq!(
        h.store.removals(),
        vec![(TableId::new("users"), FieldId::new("f1"))]
    );

    h.runtime.dispatch(key, RowInput::PointerLeave)?;
    assert!(!h.runtime.view(key).unwrap().actions.delete);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_delete_hidden_while_editing() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));

    h.runtime.dispatch(key, RowInput::PointerEnter)?;
    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    assert!(!h.runtime.view(key).unwrap().actions.delete);
    assert_eq!(
        h.runtime.dispatch(key, RowInput::DeleteClick)?,
        Propagation::Continue
    );
    assert!(h.store.removals().is_empty());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_unmount_while_editing_releases_listener() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "users"));
    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    assert_eq!(h.runtime.click_away_listeners(), 1);

    h.runtime.unmount(key)?;
    assert_eq!(h.runtime.click_away_listeners(), 0);
    assert_eq!(h.runtime.pointer_down(None), 0);
    assert!(h.store.updates().is_empty());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_field_change_abandons_rename_in_progress() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let key = h.runtime.mount(props("users", "f1", "email"));

    h.runtime.dispatch(key, RowInput::LabelDoubleClick)?;
    h.runtime.dispatch(key, RowInput::NameInput("mail".to_string()))?;
    h.runtime.update_props(key, props("users", "f2", "created_at"))?;

    let row = h.runtime.row(key).unwrap();
    assert!(!row.edit_state().editing());
    assert_eq!(row.edit_state().pending_name(), "created_at");
    assert_eq!(h.runtime.click_away_listeners(), 0);
    assert!(h.runtime.view(key).unwrap().rename_input.is_none());

    h.runtime.dispatch(key, RowInput::Key(KeyPress::Enter))?;
    assert_eq!(h.runtime.pointer_down(None), 0);
    assert!(h.store.updates().is_empty());
    Ok(())
}
