// SPDX-License-Identifier: MPL-2.0
//! Message values and the pending queue.
//!
//! # Components
//!
//! - [`MessageId`] - process-unique identity returned by `show`
//! - [`MessageType`] - success, error or info; selects default styling
//! - [`ShowRequest`] - caller-facing description of a message to enqueue
//! - [`record`] - the immutable [`MessageRecord`] owned by the scheduler
//! - [`queue`] - FIFO [`PendingQueue`] of not-yet-shown records
//!
//! # Usage
//!
//! ```
//! use message_bar::message::{MessageType, ShowRequest};
//! use std::time::Duration;
//!
//! let request = ShowRequest::new(MessageType::Success)
//!     .title("Saved")
//!     .body("Your changes are safe")
//!     .duration(Duration::from_secs(2));
//! assert!(request.validate().is_ok());
//! ```

mod queue;
mod record;

pub use queue::{Identified, PendingQueue};
pub use record::{DismissCallback, MessageRecord};

use crate::config::defaults::DEFAULT_DURATION_SECS;
use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Unique identifier for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

impl MessageId {
    /// Creates a new process-unique message ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// Message type. Selects the default colors and icon, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Success,
    Error,
    Info,
}

/// Text direction used when laying out a message.
///
/// `Auto` follows whatever the renderer derives from the system locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritingDirection {
    #[default]
    Auto,
    LeftToRight,
    RightToLeft,
}

impl WritingDirection {
    /// Returns true when layout must be mirrored.
    #[must_use]
    pub fn is_right_to_left(self) -> bool {
        self == WritingDirection::RightToLeft
    }
}

/// Interactive element rendered after the message text.
///
/// Pressing it reports `action` back to the caller; it never dismisses
/// the message on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessory {
    pub label: String,
    pub action: String,
}

impl Accessory {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Everything a caller provides to `show`.
///
/// Defaults: no title, no body, 3 second duration, auto-dismiss on,
/// automatic writing direction, no accessory, no dismiss callback.
pub struct ShowRequest {
    pub(crate) kind: MessageType,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) duration_secs: f64,
    pub(crate) auto_dismiss: bool,
    pub(crate) writing_direction: WritingDirection,
    pub(crate) accessory: Option<Accessory>,
    pub(crate) on_dismiss: Option<DismissCallback>,
}

impl ShowRequest {
    pub fn new(kind: MessageType) -> Self {
        Self {
            kind,
            title: None,
            body: None,
            duration_secs: DEFAULT_DURATION_SECS,
            auto_dismiss: true,
            writing_direction: WritingDirection::Auto,
            accessory: None,
            on_dismiss: None,
        }
    }

    pub fn success() -> Self {
        Self::new(MessageType::Success)
    }

    pub fn error() -> Self {
        Self::new(MessageType::Error)
    }

    pub fn info() -> Self {
        Self::new(MessageType::Info)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets how long the message stays visible before auto-dismiss.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration_secs = duration.as_secs_f64();
        self
    }

    /// Same as [`ShowRequest::duration`], in (possibly fractional or invalid)
    /// seconds. Validation happens in [`ShowRequest::validate`].
    #[must_use]
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// When `false`, no timer is armed and only a tap or an explicit cancel
    /// removes the message.
    #[must_use]
    pub fn auto_dismiss(mut self, auto_dismiss: bool) -> Self {
        self.auto_dismiss = auto_dismiss;
        self
    }

    #[must_use]
    pub fn writing_direction(mut self, direction: WritingDirection) -> Self {
        self.writing_direction = direction;
        self
    }

    #[must_use]
    pub fn accessory(mut self, accessory: Accessory) -> Self {
        self.accessory = Some(accessory);
        self
    }

    /// Callback run once when the user dismisses the message with a tap.
    ///
    /// Never runs for timeouts, explicit cancels or forced cancel-all.
    #[must_use]
    pub fn on_dismiss(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_dismiss = Some(Box::new(callback));
        self
    }

    /// Returns the message type.
    #[must_use]
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    /// Rejects requests that cannot be scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDuration`] when auto-dismiss is on and the
    /// duration is not a positive finite number of seconds.
    pub fn validate(&self) -> Result<()> {
        let valid = self.duration_secs.is_finite() && self.duration_secs > 0.0;
        if self.auto_dismiss && !valid {
            return Err(Error::InvalidDuration(self.duration_secs));
        }
        Ok(())
    }

    /// Duration the auto-dismiss timer will be armed with.
    ///
    /// Unusable values map to zero; they only survive validation when
    /// auto-dismiss is off, in which case the duration is never read.
    pub(crate) fn resolved_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.duration_secs).unwrap_or(Duration::ZERO)
    }
}

impl fmt::Debug for ShowRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowRequest")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("body", &self.body)
            .field("duration_secs", &self.duration_secs)
            .field("auto_dismiss", &self.auto_dismiss)
            .field("writing_direction", &self.writing_direction)
            .field("accessory", &self.accessory)
            .field("has_on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}
