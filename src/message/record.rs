// SPDX-License-Identifier: MPL-2.0
//! The message record owned by the scheduler.
//!
//! Content, timing and style are fixed at construction. The only mutable
//! state is the one-shot dismissal guard and the displayed flag, both
//! driven by the scheduler.

use super::queue::Identified;
use super::{Accessory, MessageId, MessageType, ShowRequest, WritingDirection};
use crate::config::{BarConfig, MessageStyle};
use crate::error::Result;
use std::fmt;
use std::time::Duration;

/// Callback run when the user dismisses a message by tapping it.
pub type DismissCallback = Box<dyn FnOnce() + Send + 'static>;

/// One notification, from enqueue until its exit animation completes.
pub struct MessageRecord {
    id: MessageId,
    kind: MessageType,
    title: Option<String>,
    body: Option<String>,
    duration: Duration,
    auto_dismiss: bool,
    writing_direction: WritingDirection,
    accessory: Option<Accessory>,
    style: MessageStyle,
    on_dismiss: Option<DismissCallback>,
    has_been_dismissed: bool,
    is_displayed: bool,
}

impl MessageRecord {
    /// Builds a record, resolving its style from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::InvalidDuration`] when the request
    /// fails [`ShowRequest::validate`].
    pub fn new(id: MessageId, request: ShowRequest, config: &BarConfig) -> Result<Self> {
        request.validate()?;
        let duration = request.resolved_duration();
        Ok(Self {
            id,
            kind: request.kind,
            title: request.title,
            body: request.body,
            duration,
            auto_dismiss: request.auto_dismiss,
            writing_direction: request.writing_direction,
            accessory: request.accessory,
            style: config.style_for(request.kind),
            on_dismiss: request.on_dismiss,
            has_been_dismissed: false,
            is_displayed: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> MessageType {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Non-empty title, if any.
    #[must_use]
    pub fn visible_title(&self) -> Option<&str> {
        self.title().filter(|t| !t.is_empty())
    }

    /// Non-empty body, if any.
    #[must_use]
    pub fn visible_body(&self) -> Option<&str> {
        self.body().filter(|b| !b.is_empty())
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn auto_dismiss(&self) -> bool {
        self.auto_dismiss
    }

    #[must_use]
    pub fn writing_direction(&self) -> WritingDirection {
        self.writing_direction
    }

    #[must_use]
    pub fn accessory(&self) -> Option<&Accessory> {
        self.accessory.as_ref()
    }

    #[must_use]
    pub fn style(&self) -> &MessageStyle {
        &self.style
    }

    #[must_use]
    pub fn has_on_dismiss(&self) -> bool {
        self.on_dismiss.is_some()
    }

    /// Whether a dismissal sequence has started.
    #[must_use]
    pub fn has_been_dismissed(&self) -> bool {
        self.has_been_dismissed
    }

    /// Whether the record is currently mounted on the presentation surface.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.is_displayed
    }

    /// Claims the one-shot dismissal guard.
    ///
    /// Returns `false` if a dismissal already started for this record.
    pub(crate) fn begin_dismissal(&mut self) -> bool {
        if self.has_been_dismissed {
            return false;
        }
        self.has_been_dismissed = true;
        true
    }

    pub(crate) fn set_displayed(&mut self, displayed: bool) {
        self.is_displayed = displayed;
    }

    /// Runs the dismiss callback. Subsequent calls do nothing.
    pub(crate) fn run_on_dismiss(&mut self) {
        if let Some(callback) = self.on_dismiss.take() {
            callback();
        }
    }
}

impl Identified for MessageRecord {
    fn message_id(&self) -> MessageId {
        self.id
    }
}

impl fmt::Debug for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageRecord")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("body", &self.body)
            .field("duration", &self.duration)
            .field("auto_dismiss", &self.auto_dismiss)
            .field("writing_direction", &self.writing_direction)
            .field("has_been_dismissed", &self.has_been_dismissed)
            .field("is_displayed", &self.is_displayed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ui::design_tokens::palette;
    use iced::Color;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn record(request: ShowRequest) -> MessageRecord {
        MessageRecord::new(MessageId::new(), request, &BarConfig::default()).unwrap()
    }

    #[test]
    fn record_copies_request_content() {
        let r = record(
            ShowRequest::error()
                .title("Upload failed")
                .body("Check your connection")
                .duration(Duration::from_millis(1500))
                .writing_direction(WritingDirection::RightToLeft)
                .accessory(Accessory::new("Retry", "retry")),
        );

        assert_eq!(r.kind(), MessageType::Error);
        assert_eq!(r.title(), Some("Upload failed"));
        assert_eq!(r.body(), Some("Check your connection"));
        assert_eq!(r.duration(), Duration::from_millis(1500));
        assert!(r.auto_dismiss());
        assert!(r.writing_direction().is_right_to_left());
        assert_eq!(r.accessory().map(|a| a.action.as_str()), Some("retry"));
        assert_eq!(r.style().background, palette::ERROR);
        assert!(!r.has_been_dismissed());
        assert!(!r.is_displayed());
    }

    #[test]
    fn invalid_duration_never_becomes_a_record() {
        let config = BarConfig::default();
        for secs in [-1.0, 0.0, f64::NAN] {
            let result =
                MessageRecord::new(MessageId::new(), ShowRequest::info().duration_secs(secs), &config);
            assert!(matches!(result, Err(Error::InvalidDuration(_))));
        }
    }

    #[test]
    fn sticky_record_keeps_unused_duration() {
        let r = record(ShowRequest::info().duration_secs(-1.0).auto_dismiss(false));
        assert!(!r.auto_dismiss());
        assert_eq!(r.duration(), Duration::ZERO);
    }

    #[test]
    fn empty_strings_are_not_visible_text() {
        let r = record(ShowRequest::info().title("").body("body"));
        assert_eq!(r.visible_title(), None);
        assert_eq!(r.visible_body(), Some("body"));
    }

    #[test]
    fn dismissal_guard_is_one_shot() {
        let mut r = record(ShowRequest::success());
        assert!(r.begin_dismissal());
        assert!(!r.begin_dismissal());
        assert!(r.has_been_dismissed());
    }

    #[test]
    fn on_dismiss_runs_at_most_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut r = record(ShowRequest::success().on_dismiss(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(r.has_on_dismiss());
        r.run_on_dismiss();
        r.run_on_dismiss();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!r.has_on_dismiss());
    }

    #[test]
    fn style_is_snapshotted_at_creation() {
        let mut config = BarConfig::default();
        let r = MessageRecord::new(MessageId::new(), ShowRequest::info(), &config).unwrap();

        config.info_color = Color::from_rgb(0.2, 0.2, 0.2);

        assert_eq!(r.style().background, palette::INFO);
    }
}
