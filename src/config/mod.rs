// SPDX-License-Identifier: MPL-2.0
//! Configuration: the in-memory [`BarConfig`] and the on-disk `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[appearance]` - Message and text colors as `#RRGGBB` hex strings
//! - `[behavior]` - Status bar hiding and haptic feedback
//! - `[animation]` - Enter/exit timing and the exit-stall watchdog
//!
//! # Examples
//!
//! ```no_run
//! use message_bar::config;
//!
//! let (settings, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! let bar_config = settings.bar_config();
//! let options = settings.runtime_options();
//! # let _ = (bar_config, options);
//! ```

pub mod defaults;
mod options;
pub mod paths;

pub use defaults::*;
pub use options::{BarConfig, BarConfigBuilder, MessageStyle, TextFont};

use crate::error::{Error, Result};
use crate::runtime::RuntimeOptions;
use iced::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Color settings. Unparseable values fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppearanceSettings {
    #[serde(default = "default_error_color")]
    pub error_color: String,
    #[serde(default = "default_success_color")]
    pub success_color: String,
    #[serde(default = "default_info_color")]
    pub info_color: String,
    #[serde(default = "default_title_color")]
    pub title_color: String,
    #[serde(default = "default_message_color")]
    pub message_color: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            error_color: default_error_color(),
            success_color: default_success_color(),
            info_color: default_info_color(),
            title_color: default_title_color(),
            message_color: default_message_color(),
        }
    }
}

/// Behavior toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BehaviorSettings {
    /// Hide the status bar while a message is on screen.
    #[serde(default = "default_hide_status_bar")]
    pub hide_status_bar: bool,

    /// Emit a haptic pulse when a message finishes appearing.
    #[serde(default = "default_haptic_feedback")]
    pub haptic_feedback: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            hide_status_bar: DEFAULT_HIDE_STATUS_BAR,
            haptic_feedback: DEFAULT_HAPTIC_FEEDBACK,
        }
    }
}

/// Animation timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnimationSettings {
    /// Slide-in/slide-out length in milliseconds.
    #[serde(default = "default_show_hide_ms")]
    pub show_hide_ms: u64,

    /// Exit-stall watchdog in milliseconds; `0` waits forever.
    #[serde(default = "default_exit_stall_timeout_ms")]
    pub exit_stall_timeout_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            show_hide_ms: DEFAULT_SHOW_HIDE_MS,
            exit_stall_timeout_ms: DEFAULT_EXIT_STALL_TIMEOUT_MS,
        }
    }
}

// =============================================================================
// Main Settings Struct
// =============================================================================

/// Persisted settings with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Settings {
    #[serde(default)]
    pub appearance: AppearanceSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub animation: AnimationSettings,
}

impl Settings {
    /// Builds the in-memory configuration. Fonts and icons keep their
    /// defaults; they are not persisted.
    #[must_use]
    pub fn bar_config(&self) -> BarConfig {
        let defaults = BarConfig::default();
        let appearance = &self.appearance;

        BarConfig::builder()
            .with_error_color(parse_hex_color(&appearance.error_color).unwrap_or(defaults.error_color))
            .with_success_color(
                parse_hex_color(&appearance.success_color).unwrap_or(defaults.success_color),
            )
            .with_info_color(parse_hex_color(&appearance.info_color).unwrap_or(defaults.info_color))
            .with_title_color(parse_hex_color(&appearance.title_color).unwrap_or(defaults.title_color))
            .with_message_color(
                parse_hex_color(&appearance.message_color).unwrap_or(defaults.message_color),
            )
            .with_status_bar_hidden(self.behavior.hide_status_bar)
            .with_haptic_feedback(self.behavior.haptic_feedback)
            .build()
    }

    /// Builds the driver timing options. The exit-stall timeout is raised to
    /// twice the animation length when configured shorter.
    #[must_use]
    pub fn runtime_options(&self) -> RuntimeOptions {
        let show_hide_ms = self.animation.show_hide_ms.min(MAX_SHOW_HIDE_MS);
        let exit_stall_timeout = match self.animation.exit_stall_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        RuntimeOptions {
            show_hide: Duration::from_millis(show_hide_ms),
            exit_stall_timeout,
        }
        .normalized()
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_error_color() -> String {
    DEFAULT_ERROR_COLOR_HEX.to_string()
}

fn default_success_color() -> String {
    DEFAULT_SUCCESS_COLOR_HEX.to_string()
}

fn default_info_color() -> String {
    DEFAULT_INFO_COLOR_HEX.to_string()
}

fn default_title_color() -> String {
    DEFAULT_TITLE_COLOR_HEX.to_string()
}

fn default_message_color() -> String {
    DEFAULT_MESSAGE_COLOR_HEX.to_string()
}

fn default_hide_status_bar() -> bool {
    DEFAULT_HIDE_STATUS_BAR
}

fn default_haptic_feedback() -> bool {
    DEFAULT_HAPTIC_FEEDBACK
}

fn default_show_hide_ms() -> u64 {
    DEFAULT_SHOW_HIDE_MS
}

fn default_exit_stall_timeout_ms() -> u64 {
    DEFAULT_EXIT_STALL_TIMEOUT_MS
}

/// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
#[must_use]
pub fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return None;
    }
    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();

    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if hex.len() == 8 { channel(6)? } else { u8::MAX };
    Some(Color::from_rgba8(r, g, b, f32::from(a) / 255.0))
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads settings from the default path.
///
/// Returns a tuple of (settings, optional_warning). If the file exists but
/// cannot be read, defaults are returned together with a warning.
pub fn load() -> (Settings, Option<String>) {
    load_with_override(None)
}

/// Loads settings from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Settings, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(settings) => return (settings, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load settings");
                    return (
                        Settings::default(),
                        Some(format!("could not load {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Settings::default(), None)
}

/// Loads settings from a specific path.
pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves settings to the default path.
pub fn save(settings: &Settings) -> Result<()> {
    save_with_override(settings, None)
}

/// Saves settings to a custom directory.
pub fn save_with_override(settings: &Settings, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(settings, &path);
    }
    Ok(())
}

/// Saves settings to a specific path, creating parent directories.
pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::design_tokens::palette;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let mut settings = Settings::default();
        settings.appearance.error_color = "#AA0000".to_string();
        settings.behavior.hide_status_bar = true;
        settings.animation.show_hide_ms = 400;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&settings, &path).expect("failed to save settings");
        let loaded = load_from_path(&path).expect("failed to load settings");

        assert_eq!(loaded, settings);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "not = valid = toml").expect("failed to write");

        let result = load_from_path(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_warns_on_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[behavior\n").expect("failed to write");

        let (settings, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(settings, Settings::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (settings, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(settings, Settings::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let settings: Settings = toml::from_str("[behavior]\nhide_status_bar = true\n")
            .expect("partial settings should parse");

        assert!(settings.behavior.hide_status_bar);
        assert_eq!(settings.behavior.haptic_feedback, DEFAULT_HAPTIC_FEEDBACK);
        assert_eq!(settings.animation, AnimationSettings::default());
        assert_eq!(settings.appearance, AppearanceSettings::default());
    }

    #[test]
    fn parse_hex_color_accepts_rgb_and_rgba() {
        assert_eq!(parse_hex_color("#FF0000"), Some(Color::from_rgb8(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::from_rgb8(0, 255, 0)));

        let translucent = parse_hex_color("#0000FF80").expect("rgba should parse");
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn parse_hex_color_rejects_garbage() {
        assert!(parse_hex_color("").is_none());
        assert!(parse_hex_color("#FFF").is_none());
        assert!(parse_hex_color("#GG0000").is_none());
        assert!(parse_hex_color("#ééé").is_none());
    }

    #[test]
    fn bar_config_falls_back_on_invalid_colors() {
        let mut settings = Settings::default();
        settings.appearance.info_color = "blue-ish".to_string();
        settings.appearance.error_color = "#800000".to_string();
        settings.behavior.haptic_feedback = false;

        let config = settings.bar_config();
        assert_eq!(config.info_color, palette::INFO);
        assert_eq!(config.error_color, Color::from_rgb8(128, 0, 0));
        assert!(!config.haptic_feedback_enabled);
    }

    #[test]
    fn runtime_options_map_zero_timeout_to_none() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.runtime_options().exit_stall_timeout,
            Some(Duration::from_millis(DEFAULT_EXIT_STALL_TIMEOUT_MS))
        );

        settings.animation.exit_stall_timeout_ms = 0;
        settings.animation.show_hide_ms = 60_000;
        let options = settings.runtime_options();
        assert!(options.exit_stall_timeout.is_none());
        assert_eq!(options.show_hide, Duration::from_millis(MAX_SHOW_HIDE_MS));
    }

    #[test]
    fn slow_animation_lengthens_the_stall_timeout() {
        let mut settings = Settings::default();
        settings.animation.show_hide_ms = 3_000;

        let options = settings.runtime_options();

        assert_eq!(options.show_hide, Duration::from_millis(3_000));
        assert_eq!(options.exit_stall_timeout, Some(Duration::from_millis(6_000)));
    }
}
