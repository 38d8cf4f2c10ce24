// SPDX-License-Identifier: MPL-2.0
//! Presentation scheduler.
//!
//! The [`Scheduler`] owns the pending queue and the single visible message.
//! It decides when the next message is pulled, arbitrates between the
//! auto-dismiss timer, user taps and explicit cancels, and sequences the
//! overlay calls for each transition.
//!
//! # States
//!
//! - [`Phase::Idle`]: nothing visible, layer released
//! - [`Phase::Presenting`]: a message is entering or fully shown
//! - [`Phase::Dismissing`]: the exit animation of the visible message is in flight
//!
//! # Time
//!
//! The scheduler never sleeps. Arming a timer only records an
//! [`ArmedTimer`]; whoever drives the scheduler waits for `duration` and
//! then calls [`Scheduler::timer_elapsed`] with the token. Re-arming or
//! dismissing invalidates the token, so a late fire is ignored.
//!
//! # Threading
//!
//! All methods take `&mut self`; the owner serializes every event (enqueue,
//! tap, cancel, timer fire, animation completion) through a single task.


use crate::application::port::{Extent, Feedback, LayerOptions, Overlay, SurfaceHandle};
use crate::config::BarConfig;
use crate::error::Result;
use crate::message::{MessageId, MessageRecord, PendingQueue, ShowRequest};
use std::fmt;
use std::time::Duration;

/// Process-wide handler run on every tap that lands on the visible message.
pub type TapHandler = Box<dyn FnMut() + Send + 'static>;

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Presenting,
    Dismissing,
}

/// Why a dismissal started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The user tapped the message.
    Gesture,
    /// The auto-dismiss timer fired.
    Timeout,
    /// `cancel(id)` targeted the visible message.
    Cancelled,
}

impl DismissReason {
    #[must_use]
    pub fn is_user_gesture(self) -> bool {
        self == DismissReason::Gesture
    }
}

/// Identifies one arming of the auto-dismiss timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// The single outstanding auto-dismiss timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    pub token: TimerToken,
    pub message: MessageId,
    pub duration: Duration,
}

/// Point-in-time view of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub phase: Phase,
    pub visible: Option<MessageId>,
    pub surface: Option<SurfaceHandle>,
    pub queued: usize,
}

impl Snapshot {
    /// Nothing visible and nothing waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle && self.visible.is_none() && self.queued == 0
    }
}

struct Visible {
    record: MessageRecord,
    surface: SurfaceHandle,
    extent: Extent,
    dismissal: Option<DismissReason>,
    entered: bool,
}

/// Serializes messages onto a single presentation surface.
pub struct Scheduler<O, F> {
    config: BarConfig,
    queue: PendingQueue<MessageRecord>,
    visible: Option<Visible>,
    phase: Phase,
    timer: Option<ArmedTimer>,
    next_timer_token: u64,
    layer_attached: bool,
    tap_handler: Option<TapHandler>,
    overlay: O,
    feedback: F,
}

impl<O: Overlay, F: Feedback> Scheduler<O, F> {
    /// Creates a scheduler with the default configuration.
    pub fn new(overlay: O, feedback: F) -> Self {
        Self::with_config(BarConfig::default(), overlay, feedback)
    }

    pub fn with_config(config: BarConfig, overlay: O, feedback: F) -> Self {
        Self {
            config,
            queue: PendingQueue::new(),
            visible: None,
            phase: Phase::Idle,
            timer: None,
            next_timer_token: 0,
            layer_attached: false,
            tap_handler: None,
            overlay,
            feedback,
        }
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    /// Replaces the configuration for messages created from now on.
    pub fn configure(&mut self, config: BarConfig) {
        tracing::debug!("configuration replaced");
        self.config = config;
    }

    pub fn set_tap_handler(&mut self, handler: Option<TapHandler>) {
        self.tap_handler = handler;
    }

    // -------------------------------------------------------------------------
    // Caller operations
    // -------------------------------------------------------------------------

    /// Validates `request`, enqueues it and returns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::InvalidDuration`] for an auto-dismissing
    /// request without a positive duration. Nothing is enqueued in that case.
    pub fn show(&mut self, request: ShowRequest) -> Result<MessageId> {
        let id = MessageId::new();
        self.show_with_id(id, request)?;
        Ok(id)
    }

    /// Same as [`Scheduler::show`] with an identity allocated by the caller.
    pub fn show_with_id(&mut self, id: MessageId, request: ShowRequest) -> Result<()> {
        let record = MessageRecord::new(id, request, &self.config)?;
        self.enqueue(record);
        Ok(())
    }

    /// Appends `record` to the pending queue and presents it right away
    /// when nothing is visible.
    pub fn enqueue(&mut self, record: MessageRecord) {
        let id = record.id();
        if self.visible_id() == Some(id) || self.queue.contains(id) {
            tracing::warn!(%id, "message already scheduled, ignoring duplicate");
            return;
        }

        self.queue.enqueue(record);
        tracing::debug!(%id, queued = self.queue.len(), "message enqueued");

        if self.visible.is_none() {
            self.present_next();
        }
    }

    /// Handles a tap on `surface`.
    ///
    /// Taps on anything but the visible surface are ignored. The tap handler
    /// runs for every accepted tap; the dismissal itself starts only once.
    pub fn tap(&mut self, surface: SurfaceHandle) {
        if self.visible_surface() != Some(surface) {
            tracing::trace!(%surface, "tap on stale surface ignored");
            return;
        }

        self.dismiss_current(DismissReason::Gesture);

        if let Some(handler) = self.tap_handler.as_mut() {
            handler();
        }
    }

    /// Cancels one message.
    ///
    /// The visible message is animated out without running its dismiss
    /// callback; a queued one is discarded silently. Unknown ids are a no-op.
    pub fn cancel(&mut self, id: MessageId) {
        if self.visible_id() == Some(id) {
            self.dismiss_current(DismissReason::Cancelled);
            return;
        }

        if self.queue.remove(id).is_some() {
            tracing::debug!(%id, queued = self.queue.len(), "queued message discarded");
        } else {
            tracing::trace!(%id, "cancel for unknown message ignored");
        }
    }

    /// Cancels everything.
    ///
    /// Without `force` this only clears state that is already idle. With
    /// `force` the visible surface is stripped without animation, the queue
    /// is emptied and the scheduler returns to [`Phase::Idle`]. No dismiss
    /// callback runs either way.
    pub fn cancel_all(&mut self, force: bool) {
        if !force {
            if self.visible.is_none() && self.queue.is_empty() {
                self.reset_timer();
                self.queue.clear();
            } else {
                tracing::trace!("polite cancel-all while busy ignored");
            }
            return;
        }

        if let Some(mut visible) = self.visible.take() {
            self.overlay.unmount(visible.surface);
            visible.record.set_displayed(false);
            tracing::debug!(id = %visible.record.id(), "visible message stripped");
        }

        let discarded = self.queue.len();
        self.queue.clear();
        self.become_idle();
        tracing::debug!(discarded, "forced cancel-all");
    }

    // -------------------------------------------------------------------------
    // Driver events
    // -------------------------------------------------------------------------

    /// Reports that the timer armed with `token` fired.
    pub fn timer_elapsed(&mut self, token: TimerToken) {
        match self.timer {
            Some(timer) if timer.token == token => {
                self.timer = None;
                self.dismiss_current(DismissReason::Timeout);
            }
            _ => tracing::trace!(?token, "stale timer ignored"),
        }
    }

    /// Reports that the enter animation of `surface` completed.
    pub fn enter_finished(&mut self, surface: SurfaceHandle) {
        let Some(visible) = self.visible.as_mut() else {
            return;
        };
        if visible.surface != surface || visible.entered || visible.dismissal.is_some() {
            return;
        }
        visible.entered = true;

        let kind = visible.record.kind();
        let allowed = self.config.haptic_feedback_enabled
            && self.feedback.device_class().supports_haptics();
        if allowed {
            self.feedback.notify(kind);
        }
        tracing::trace!(%surface, feedback = allowed, "enter animation finished");
    }

    /// Reports that the exit animation of `surface` completed.
    pub fn exit_finished(&mut self, surface: SurfaceHandle) {
        if self.exiting_surface() != Some(surface) {
            tracing::trace!(%surface, "exit completion for stale surface ignored");
            return;
        }
        self.complete_exit();
    }

    /// Gives up on the exit animation of `surface` and finishes the dismissal
    /// as if it had completed.
    pub fn exit_stalled(&mut self, surface: SurfaceHandle) {
        if self.exiting_surface() != Some(surface) {
            return;
        }
        tracing::warn!(%surface, "exit animation stalled, unmounting without completion");
        self.complete_exit();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True from presentation start until the exit animation completes.
    #[must_use]
    pub fn is_message_visible(&self) -> bool {
        self.visible.is_some()
    }

    #[must_use]
    pub fn visible_message(&self) -> Option<&MessageRecord> {
        self.visible.as_ref().map(|v| &v.record)
    }

    #[must_use]
    pub fn visible_id(&self) -> Option<MessageId> {
        self.visible.as_ref().map(|v| v.record.id())
    }

    #[must_use]
    pub fn visible_surface(&self) -> Option<SurfaceHandle> {
        self.visible.as_ref().map(|v| v.surface)
    }

    /// Surface whose exit animation is in flight.
    #[must_use]
    pub fn exiting_surface(&self) -> Option<SurfaceHandle> {
        self.visible
            .as_ref()
            .filter(|v| v.dismissal.is_some())
            .map(|v| v.surface)
    }

    #[must_use]
    pub fn armed_timer(&self) -> Option<ArmedTimer> {
        self.timer
    }

    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_queued(&self, id: MessageId) -> bool {
        self.queue.contains(id)
    }

    #[must_use]
    pub fn is_layer_attached(&self) -> bool {
        self.layer_attached
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            visible: self.visible_id(),
            surface: self.visible_surface(),
            queued: self.queue.len(),
        }
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Pulls the queue head onto the surface, or goes idle when empty.
    fn present_next(&mut self) {
        self.reset_timer();

        let Some(mut record) = self.queue.dequeue() else {
            self.become_idle();
            return;
        };

        if !self.layer_attached {
            self.overlay.attach(LayerOptions {
                hide_status_bar: self.config.hide_status_bar_while_visible,
            });
            self.layer_attached = true;
            tracing::info!("presentation layer attached");
        }

        let extent = self.overlay.measure(&record);
        let surface = self.overlay.mount(&record, extent);
        record.set_displayed(true);

        let id = record.id();
        let timer = record.auto_dismiss().then(|| record.duration());

        self.visible = Some(Visible {
            record,
            surface,
            extent,
            dismissal: None,
            entered: false,
        });
        self.phase = Phase::Presenting;
        self.overlay.animate_in(surface, extent);
        tracing::debug!(%id, %surface, queued = self.queue.len(), "message presented");

        if let Some(duration) = timer {
            self.arm_timer(id, duration);
        }
    }

    /// Starts the exit animation of the visible message, once.
    fn dismiss_current(&mut self, reason: DismissReason) {
        let Some(visible) = self.visible.as_mut() else {
            return;
        };
        if !visible.record.begin_dismissal() {
            tracing::trace!(id = %visible.record.id(), ?reason, "already dismissing");
            return;
        }
        visible.dismissal = Some(reason);
        let (id, surface, extent) = (visible.record.id(), visible.surface, visible.extent);

        self.reset_timer();
        self.phase = Phase::Dismissing;
        self.overlay.animate_out(surface, extent);
        tracing::debug!(%id, ?reason, "dismissal started");
    }

    /// Unmounts the dismissed message, runs its callback for gesture
    /// dismissals, then pulls the next one.
    fn complete_exit(&mut self) {
        let Some(mut visible) = self.visible.take() else {
            return;
        };

        self.overlay.unmount(visible.surface);
        visible.record.set_displayed(false);

        let reason = visible.dismissal;
        if reason.is_some_and(DismissReason::is_user_gesture) {
            visible.record.run_on_dismiss();
        }
        tracing::debug!(id = %visible.record.id(), ?reason, "message dismissed");
        drop(visible);

        self.present_next();
    }

    fn become_idle(&mut self) {
        self.reset_timer();
        self.phase = Phase::Idle;
        if self.layer_attached {
            self.overlay.detach();
            self.layer_attached = false;
            tracing::info!("presentation layer released");
        }
    }

    fn arm_timer(&mut self, message: MessageId, duration: Duration) {
        self.next_timer_token += 1;
        self.timer = Some(ArmedTimer {
            token: TimerToken(self.next_timer_token),
            message,
            duration,
        });
    }

    fn reset_timer(&mut self) {
        self.timer = None;
    }
}

impl<O, F> fmt::Debug for Scheduler<O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("phase", &self.phase)
            .field("visible", &self.visible.as_ref().map(|v| v.record.id()))
            .field("queued", &self.queue.len())
            .field("timer", &self.timer)
            .field("layer_attached", &self.layer_attached)
            .finish_non_exhaustive()
    }
}
