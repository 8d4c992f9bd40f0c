use std::time::Duration;

use tickdown::CliContext;
use tickdown::commands;
use tickdown_core::{AppConfig, AppConfigExt, Level, TimerId, TimerState};
use tokio::time::sleep;

fn test_context() -> CliContext {
    CliContext::with_config(AppConfig {
        tick_period_ms: 100,
        ..AppConfig::default()
    })
}

#[tokio::test(start_paused = true)]
async fn start_with_seconds_tracks_timer() {
    let ctx = test_context();

    commands::start_timer(&ctx, Some(3), None, None).await.unwrap();

    let entries = ctx.timers.lock().await.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label, "timer");
    assert_eq!(entries[0].seconds, 3);

    // 100ms period from the config
    sleep(Duration::from_millis(350)).await;
    assert_eq!(
        ctx.timers.lock().await.entries()[0].state,
        TimerState::Completed
    );
}

#[tokio::test(start_paused = true)]
async fn start_with_level_uses_preset() {
    let ctx = test_context();

    commands::start_timer(&ctx, None, Some(Level::High), None)
        .await
        .unwrap();
    commands::start_timer(&ctx, None, Some(Level::Low), Some("warmup".to_string()))
        .await
        .unwrap();

    let entries = ctx.timers.lock().await.entries();
    assert_eq!(entries[0].label, "high");
    assert_eq!(entries[0].seconds, 30);
    assert_eq!(entries[1].label, "warmup");
    assert_eq!(entries[1].seconds, 60);

    commands::cancel_all(&ctx).await;
}

#[tokio::test(start_paused = true)]
async fn start_requires_exactly_one_length() {
    let ctx = test_context();

    assert!(commands::start_timer(&ctx, None, None, None).await.is_err());
    assert!(
        commands::start_timer(&ctx, Some(5), Some(Level::Low), None)
            .await
            .is_err()
    );
    assert!(ctx.timers.lock().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_and_exit_stop_timers() {
    let ctx = test_context();
    commands::start_timer(&ctx, Some(50), None, None).await.unwrap();
    commands::start_timer(&ctx, Some(50), None, None).await.unwrap();

    commands::cancel_timer(&ctx, 1).await;
    {
        let timers = ctx.timers.lock().await;
        assert_eq!(
            timers.get(TimerId(1)).map(|h| h.state()),
            Some(TimerState::Cancelled)
        );
        assert_eq!(timers.running(), 1);
    }

    commands::exit(&ctx).await.unwrap();
    assert_eq!(ctx.timers.lock().await.running(), 0);

    commands::prune_timers(&ctx).await;
    assert!(ctx.timers.lock().await.is_empty());
}

#[tokio::test]
async fn set_period_persists_to_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let ctx = test_context().with_config_path(&path);

    commands::set_period(&ctx, 250).await.unwrap();
    assert_eq!(ctx.config.read().await.tick_period_ms, 250);

    let stored = AppConfig::load_from(&path).unwrap();
    assert_eq!(stored.tick_period_ms, 250);
    assert_eq!(stored.levels, AppConfig::default().levels);

    // Zero is stored as the 1ms minimum
    commands::set_period(&ctx, 0).await.unwrap();
    assert_eq!(AppConfig::load_from(&path).unwrap().tick_period_ms, 1);
}
