// SPDX-License-Identifier: MPL-2.0
use message_bar::config::{self, parse_hex_color, Settings, MAX_SHOW_HIDE_MS};
use message_bar::message::ShowRequest;
use message_bar::MessageBar;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn settings_round_trip_through_config_dir() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let base = Some(dir.path().to_path_buf());

    let mut settings = Settings::default();
    settings.appearance.error_color = "#AA0000".to_string();
    settings.behavior.hide_status_bar = true;
    settings.animation.exit_stall_timeout_ms = 0;

    config::save_with_override(&settings, base.clone()).expect("Failed to save settings");
    assert!(dir.path().join("settings.toml").exists());

    let (loaded, warning) = config::load_with_override(base);
    assert!(warning.is_none());
    assert_eq!(loaded, settings);

    let bar_config = loaded.bar_config();
    assert_eq!(Some(bar_config.error_color), parse_hex_color("#AA0000"));
    assert!(bar_config.hide_status_bar_while_visible);
    assert_eq!(loaded.runtime_options().exit_stall_timeout, None);
}

#[test]
fn hand_written_file_is_understood() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r##"
[appearance]
info_color = "#123456"

[behavior]
haptic_feedback = false

[animation]
show_hide_ms = 999999
"##,
    )
    .expect("Failed to write settings file");

    let settings = config::load_from_path(&path).expect("Failed to load settings");

    assert_eq!(settings.appearance.error_color, Settings::default().appearance.error_color);
    assert!(!settings.bar_config().haptic_feedback_enabled);
    assert_eq!(
        settings.runtime_options().show_hide,
        Duration::from_millis(MAX_SHOW_HIDE_MS)
    );
}

#[tokio::test(start_paused = true)]
async fn loaded_settings_drive_a_running_bar() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[animation]\nshow_hide_ms = 100\n").expect("Failed to write settings");

    let settings = config::load_from_path(&path).expect("Failed to load settings");
    let bar = MessageBar::headless(settings.bar_config(), settings.runtime_options());

    bar.show(ShowRequest::info().duration(Duration::from_secs(1)))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1150)).await;

    // 1s on screen plus a 100ms exit
    assert!(bar.snapshot().await.unwrap().is_idle());
}

#[tokio::test(start_paused = true)]
async fn slow_animation_finishes_its_exit_before_the_next_message() {
    let mut settings = Settings::default();
    settings.animation.show_hide_ms = 3_000;
    let bar = MessageBar::headless(settings.bar_config(), settings.runtime_options());

    let first = bar
        .show(ShowRequest::info().duration(Duration::from_secs(1)))
        .unwrap();
    let second = bar
        .show(ShowRequest::info().duration(Duration::from_secs(10)))
        .unwrap();

    // First exit runs from 1s to 4s
    tokio::time::sleep(Duration::from_millis(3_200)).await;
    let snapshot = bar.snapshot().await.unwrap();
    assert_eq!(snapshot.visible, Some(first));
    assert_eq!(snapshot.queued, 1);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(bar.snapshot().await.unwrap().visible, Some(second));
}
