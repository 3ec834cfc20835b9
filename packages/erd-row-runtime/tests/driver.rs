//! Real-time driver over a paused tokio clock.

mod common;

use std::time::Duration;

use common::{props, Harness};
use erd_row_core::{DiffVerdict, RowTone, TableId};
use erd_row_runtime::{RowInput, RuntimeEvent};
use tokio::sync::oneshot;

#[tokio::test(start_paused = true)]
async fn test_run_drives_timers_frames_and_input() -> anyhow::Result<()> {
    let mut h = Harness::new();
    h.diff.set(
        "f1",
        DiffVerdict {
            is_new: true,
            ..DiffVerdict::default()
        },
    );
    let key = h.runtime.mount(props("users", "f1", "email"));
    h.runtime
        .input_sender()
        .send(RuntimeEvent::Row {
            key,
            input: RowInput::LabelDoubleClick,
        })
        .await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let _ = shutdown_tx.send(());
    });
    h.runtime.run(shutdown_rx).await?;

    assert!(h.runtime.tick_count() > 0);
    assert!(h.runtime.now() >= Duration::from_millis(100));
    assert_eq!(h.host.notifications(), vec![TableId::new("users")]);
    assert_eq!(h.diff.query_count(), 5);

    let view = h.runtime.view(key).unwrap();
    assert_eq!(view.tone, RowTone::DiffNew);
    assert!(view.rename_input.is_some());
    assert_eq!(h.runtime.click_away_listeners(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_run_returns_when_shutdown_sender_dropped() -> anyhow::Result<()> {
    let mut h = Harness::new();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    drop(shutdown_tx);
    h.runtime.run(shutdown_rx).await?;
    assert!(h.runtime.pending_tasks() == (0, 0));
    Ok(())
}
