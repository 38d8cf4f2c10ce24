// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Messages**: Display duration
//! - **Animation**: Enter/exit timing and the exit-stall watchdog
//! - **Behavior**: Status bar and haptic feedback flags
//! - **Appearance**: Default color hex strings written to `settings.toml`

// ==========================================================================
// Message Defaults
// ==========================================================================

/// Default time a message stays visible before auto-dismiss (in seconds).
pub const DEFAULT_DURATION_SECS: f64 = 3.0;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Length of the slide-in and slide-out animations (in milliseconds).
pub const DEFAULT_SHOW_HIDE_MS: u64 = 250;

/// Maximum accepted animation length (in milliseconds).
pub const MAX_SHOW_HIDE_MS: u64 = 5_000;

/// How long to wait for an exit animation to report completion before
/// forcibly unmounting the surface (in milliseconds). `0` disables.
pub const DEFAULT_EXIT_STALL_TIMEOUT_MS: u64 = 2_000;

// ==========================================================================
// Behavior Defaults
// ==========================================================================

/// Whether the status bar is hidden while a message is on screen.
pub const DEFAULT_HIDE_STATUS_BAR: bool = false;

/// Whether a haptic pulse accompanies each presented message.
pub const DEFAULT_HAPTIC_FEEDBACK: bool = true;

// ==========================================================================
// Appearance Defaults
// ==========================================================================

pub const DEFAULT_ERROR_COLOR_HEX: &str = "#FF0000";
pub const DEFAULT_SUCCESS_COLOR_HEX: &str = "#00FF00";
pub const DEFAULT_INFO_COLOR_HEX: &str = "#0000FF";
pub const DEFAULT_TITLE_COLOR_HEX: &str = "#FFFFFF";
pub const DEFAULT_MESSAGE_COLOR_HEX: &str = "#FFFFFF";
