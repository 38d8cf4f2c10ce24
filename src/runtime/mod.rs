// SPDX-License-Identifier: MPL-2.0
//! Tokio driver for the scheduler.
//!
//! A single task owns the [`Scheduler`] and serializes everything that can
//! touch it: caller commands from [`MessageBar`] handles, completions and
//! taps reported by the overlay through an [`OverlaySink`], the auto-dismiss
//! timer and the exit-stall watchdog.
//!
//! # Channels
//!
//! - Commands and overlay reports share one unbounded channel, so callers
//!   never block and relative order is preserved
//! - Snapshots are answered over a oneshot channel
//!
//! # Lifetime
//!
//! The task stops on [`MessageBar::shutdown`] or when every handle is
//! dropped. Sinks hold a weak sender and never keep the task alive. On the
//! way out the scheduler is force-cancelled so the layer is released.

pub mod shared;

use crate::application::port::{Feedback, Overlay, SurfaceHandle};
use crate::application::scheduler::{Scheduler, Snapshot, TapHandler, TimerToken};
use crate::config::{BarConfig, DEFAULT_EXIT_STALL_TIMEOUT_MS, DEFAULT_SHOW_HIDE_MS};
use crate::error::{Error, Result};
use crate::infrastructure::{HeadlessOverlay, TracingFeedback};
use crate::message::{MessageId, ShowRequest};
use crate::ui::toast::ToastMessage;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

/// Timing options for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Length of the enter and exit animations.
    pub show_hide: Duration,
    /// How long to wait for an exit completion before finishing the
    /// dismissal anyway. `None` waits forever.
    pub exit_stall_timeout: Option<Duration>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            show_hide: Duration::from_millis(DEFAULT_SHOW_HIDE_MS),
            exit_stall_timeout: Some(Duration::from_millis(DEFAULT_EXIT_STALL_TIMEOUT_MS)),
        }
    }
}

impl RuntimeOptions {
    /// Raises the exit-stall timeout to at least twice `show_hide`, so the
    /// watchdog only ever fires after the exit animation should have ended.
    #[must_use]
    pub fn normalized(self) -> Self {
        let floor = self.show_hide.saturating_mul(2);
        Self {
            exit_stall_timeout: self.exit_stall_timeout.map(|timeout| timeout.max(floor)),
            ..self
        }
    }
}

/// Everything the driver task reacts to.
enum Event {
    Show { id: MessageId, request: ShowRequest },
    Cancel(MessageId),
    CancelAll { force: bool },
    Configure(BarConfig),
    SetTapHandler(Option<TapHandler>),
    Tap(SurfaceHandle),
    EnterFinished(SurfaceHandle),
    ExitFinished(SurfaceHandle),
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown,
}

// =============================================================================
// Handles
// =============================================================================

/// Cloneable handle to a running message bar.
///
/// All methods enqueue a command and return immediately; the only error
/// besides request validation is [`Error::Closed`].
#[derive(Debug, Clone)]
pub struct MessageBar {
    tx: mpsc::UnboundedSender<Event>,
}

impl MessageBar {
    /// Spawns the driver task on the current Tokio runtime.
    ///
    /// `make_overlay` receives the sink the overlay reports completions and
    /// taps through.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime, like `tokio::spawn`.
    pub fn spawn<O, F>(
        config: BarConfig,
        options: RuntimeOptions,
        make_overlay: impl FnOnce(OverlaySink) -> O,
        feedback: F,
    ) -> Self
    where
        O: Overlay + 'static,
        F: Feedback + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = OverlaySink {
            tx: tx.downgrade(),
        };
        let scheduler = Scheduler::with_config(config, make_overlay(sink), feedback);

        tokio::spawn(drive(scheduler, options.normalized(), rx));

        Self { tx }
    }

    /// Spawns a bar backed by the headless overlay and tracing feedback.
    pub fn headless(config: BarConfig, options: RuntimeOptions) -> Self {
        let show_hide = options.show_hide;
        Self::spawn(
            config,
            options,
            |sink| HeadlessOverlay::new(sink, show_hide),
            TracingFeedback::default(),
        )
    }

    /// Validates and enqueues a message.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDuration`] for an auto-dismissing request without a
    /// positive duration, [`Error::Closed`] when the driver has stopped.
    pub fn show(&self, request: ShowRequest) -> Result<MessageId> {
        request.validate()?;
        let id = MessageId::new();
        self.send(Event::Show { id, request })?;
        Ok(id)
    }

    /// Cancels one message. Unknown or finished ids are ignored.
    pub fn cancel(&self, id: MessageId) -> Result<()> {
        self.send(Event::Cancel(id))
    }

    /// Cancels everything; see [`Scheduler::cancel_all`].
    pub fn cancel_all(&self, force: bool) -> Result<()> {
        self.send(Event::CancelAll { force })
    }

    /// Replaces the configuration for messages shown from now on.
    pub fn configure(&self, config: BarConfig) -> Result<()> {
        self.send(Event::Configure(config))
    }

    /// Installs the handler run on every tap of the visible message.
    pub fn set_tap_handler(&self, handler: impl FnMut() + Send + 'static) -> Result<()> {
        self.send(Event::SetTapHandler(Some(Box::new(handler))))
    }

    pub fn clear_tap_handler(&self) -> Result<()> {
        self.send(Event::SetTapHandler(None))
    }

    /// Reports a tap on `surface`, e.g. from a UI that renders the toast.
    pub fn tap(&self, surface: SurfaceHandle) -> Result<()> {
        self.send(Event::Tap(surface))
    }

    /// Routes a toast view message.
    ///
    /// Taps are forwarded to the scheduler; accessory presses are returned
    /// to the caller as the action key.
    pub fn handle_toast(&self, message: ToastMessage) -> Result<Option<String>> {
        match message {
            ToastMessage::Tapped(surface) => self.tap(surface).map(|()| None),
            ToastMessage::AccessoryPressed { message, action } => {
                tracing::debug!(id = %message, %action, "accessory pressed");
                Ok(Some(action))
            }
        }
    }

    /// Current scheduler state.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Event::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| Error::Closed)
    }

    /// Whether a message is presented or still animating out.
    pub async fn is_message_visible(&self) -> Result<bool> {
        Ok(self.snapshot().await?.visible.is_some())
    }

    /// Stops the driver task. Visible messages are stripped without
    /// animation and no callbacks run.
    pub fn shutdown(&self) -> Result<()> {
        self.send(Event::Shutdown)
    }

    /// Whether the driver task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Returns a sink for overlays created outside of [`MessageBar::spawn`].
    #[must_use]
    pub fn sink(&self) -> OverlaySink {
        OverlaySink {
            tx: self.tx.downgrade(),
        }
    }

    fn send(&self, event: Event) -> Result<()> {
        self.tx.send(event).map_err(|_| Error::Closed)
    }
}

/// Channel through which an overlay reports completions and taps.
///
/// Reports for a stopped driver are dropped.
#[derive(Debug, Clone)]
pub struct OverlaySink {
    tx: mpsc::WeakUnboundedSender<Event>,
}

impl OverlaySink {
    pub fn enter_finished(&self, surface: SurfaceHandle) {
        self.report(Event::EnterFinished(surface));
    }

    pub fn exit_finished(&self, surface: SurfaceHandle) {
        self.report(Event::ExitFinished(surface));
    }

    pub fn tap(&self, surface: SurfaceHandle) {
        self.report(Event::Tap(surface));
    }

    fn report(&self, event: Event) {
        let delivered = self.tx.upgrade().is_some_and(|tx| tx.send(event).is_ok());
        if !delivered {
            tracing::trace!("overlay report dropped, driver stopped");
        }
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Show { id, .. } => write!(f, "Show({id})"),
            Event::Cancel(id) => write!(f, "Cancel({id})"),
            Event::CancelAll { force } => write!(f, "CancelAll(force: {force})"),
            Event::Configure(_) => f.write_str("Configure"),
            Event::SetTapHandler(h) => write!(f, "SetTapHandler(set: {})", h.is_some()),
            Event::Tap(s) => write!(f, "Tap({s})"),
            Event::EnterFinished(s) => write!(f, "EnterFinished({s})"),
            Event::ExitFinished(s) => write!(f, "ExitFinished({s})"),
            Event::Snapshot(_) => f.write_str("Snapshot"),
            Event::Shutdown => f.write_str("Shutdown"),
        }
    }
}

// =============================================================================
// Driver task
// =============================================================================

/// Deadlines derived from the scheduler after every event.
#[derive(Debug, Default)]
struct Deadlines {
    timer: Option<(TimerToken, Instant)>,
    exit_stall: Option<(SurfaceHandle, Instant)>,
}

impl Deadlines {
    /// Starts a deadline for any timer or exit the scheduler armed since the
    /// last sync, and forgets the ones it dropped.
    fn sync<O: Overlay, F: Feedback>(
        &mut self,
        scheduler: &Scheduler<O, F>,
        options: &RuntimeOptions,
    ) {
        let now = Instant::now();

        self.timer = match (scheduler.armed_timer(), self.timer) {
            (Some(armed), Some((token, at))) if armed.token == token => Some((token, at)),
            (Some(armed), _) => Some((armed.token, now + armed.duration)),
            (None, _) => None,
        };

        self.exit_stall = match (
            scheduler.exiting_surface(),
            self.exit_stall,
            options.exit_stall_timeout,
        ) {
            (Some(surface), Some((tracked, at)), _) if surface == tracked => Some((tracked, at)),
            (Some(surface), _, Some(timeout)) => Some((surface, now + timeout)),
            _ => None,
        };
    }

    fn earliest(&self) -> Option<Instant> {
        let timer = self.timer.map(|(_, at)| at);
        let stall = self.exit_stall.map(|(_, at)| at);
        match (timer, stall) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

async fn drive<O: Overlay, F: Feedback>(
    mut scheduler: Scheduler<O, F>,
    options: RuntimeOptions,
    mut rx: mpsc::UnboundedReceiver<Event>,
) {
    tracing::info!("message bar driver started");
    let mut deadlines = Deadlines::default();

    loop {
        deadlines.sync(&scheduler, &options);

        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                if !apply(&mut scheduler, event) {
                    break;
                }
            }
            () = sleep_until(deadlines.earliest()) => {
                fire_expired(&mut scheduler, &mut deadlines);
            }
        }
    }

    scheduler.cancel_all(true);
    tracing::info!("message bar driver stopped");
}

/// Applies one event. Returns `false` when the driver must stop.
fn apply<O: Overlay, F: Feedback>(scheduler: &mut Scheduler<O, F>, event: Event) -> bool {
    tracing::trace!(?event, "driver event");
    match event {
        Event::Show { id, request } => {
            if let Err(err) = scheduler.show_with_id(id, request) {
                tracing::warn!(%id, error = %err, "message rejected");
            }
        }
        Event::Cancel(id) => scheduler.cancel(id),
        Event::CancelAll { force } => scheduler.cancel_all(force),
        Event::Configure(config) => scheduler.configure(config),
        Event::SetTapHandler(handler) => scheduler.set_tap_handler(handler),
        Event::Tap(surface) => scheduler.tap(surface),
        Event::EnterFinished(surface) => scheduler.enter_finished(surface),
        Event::ExitFinished(surface) => scheduler.exit_finished(surface),
        Event::Snapshot(reply) => {
            // The requester may have given up waiting
            let _ = reply.send(scheduler.snapshot());
        }
        Event::Shutdown => return false,
    }
    true
}

fn fire_expired<O: Overlay, F: Feedback>(scheduler: &mut Scheduler<O, F>, deadlines: &mut Deadlines) {
    let now = Instant::now();

    if let Some((token, at)) = deadlines.timer {
        if at <= now {
            deadlines.timer = None;
            scheduler.timer_elapsed(token);
        }
    }

    if let Some((surface, at)) = deadlines.exit_stall {
        if at <= now {
            deadlines.exit_stall = None;
            scheduler.exit_stalled(surface);
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{DeviceClass, Extent, LayerOptions};
    use crate::application::scheduler::Phase;
    use crate::message::{MessageRecord, MessageType};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Overlay that never reports completions on its own.
    struct SilentOverlay {
        next: u64,
    }

    impl Overlay for SilentOverlay {
        fn attach(&mut self, _options: LayerOptions) {}

        fn measure(&self, _record: &MessageRecord) -> Extent {
            Extent::default()
        }

        fn mount(&mut self, _record: &MessageRecord, _extent: Extent) -> SurfaceHandle {
            self.next += 1;
            SurfaceHandle::new(self.next)
        }

        fn animate_in(&mut self, _surface: SurfaceHandle, _extent: Extent) {}

        fn animate_out(&mut self, _surface: SurfaceHandle, _extent: Extent) {}

        fn unmount(&mut self, _surface: SurfaceHandle) {}

        fn detach(&mut self) {}
    }

    struct NoFeedback;

    impl Feedback for NoFeedback {
        fn device_class(&self) -> DeviceClass {
            DeviceClass::Desktop
        }

        fn notify(&mut self, _kind: MessageType) {}
    }

    fn silent_bar(options: RuntimeOptions) -> MessageBar {
        MessageBar::spawn(
            BarConfig::default(),
            options,
            |_sink| SilentOverlay { next: 0 },
            NoFeedback,
        )
    }

    #[test]
    fn default_options_match_documented_values() {
        let options = RuntimeOptions::default();
        assert_eq!(options.show_hide, Duration::from_millis(250));
        assert_eq!(options.exit_stall_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn stall_timeout_never_undercuts_the_exit_animation() {
        let options = RuntimeOptions {
            show_hide: Duration::from_secs(3),
            exit_stall_timeout: Some(Duration::from_secs(1)),
        }
        .normalized();
        assert_eq!(options.exit_stall_timeout, Some(Duration::from_secs(6)));

        let roomy = RuntimeOptions::default().normalized();
        assert_eq!(roomy, RuntimeOptions::default());

        let unbounded = RuntimeOptions {
            exit_stall_timeout: None,
            ..RuntimeOptions::default()
        };
        assert_eq!(unbounded.normalized().exit_stall_timeout, None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_exit_is_not_cut_short_by_hand_built_options() {
        let bar = silent_bar(RuntimeOptions {
            show_hide: Duration::from_secs(3),
            exit_stall_timeout: Some(Duration::from_secs(1)),
        });
        let first = bar
            .show(ShowRequest::info().duration(Duration::from_secs(1)))
            .unwrap();
        bar.show(ShowRequest::info()).unwrap();

        // Exit started at 1s; the effective watchdog is 6s, not 1s
        tokio::time::sleep(Duration::from_millis(3200)).await;
        assert_eq!(bar.snapshot().await.unwrap().visible, Some(first));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_ne!(bar.snapshot().await.unwrap().visible, Some(first));
    }

    #[tokio::test(start_paused = true)]
    async fn cleared_tap_handler_is_not_called() {
        let bar = silent_bar(RuntimeOptions::default());
        let taps = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&taps);
        bar.set_tap_handler(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        bar.clear_tap_handler().unwrap();

        bar.show(ShowRequest::info().auto_dismiss(false)).unwrap();
        let surface = bar.snapshot().await.unwrap().surface.unwrap();
        bar.tap(surface).unwrap();

        let snapshot = bar.snapshot().await.unwrap();
        assert_eq!(snapshot.phase, Phase::Dismissing);
        assert_eq!(taps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_request_is_rejected_at_the_handle() {
        let bar = silent_bar(RuntimeOptions::default());
        let result = bar.show(ShowRequest::info().duration_secs(-1.0));

        assert!(matches!(result, Err(Error::InvalidDuration(_))));
        assert!(bar.snapshot().await.unwrap().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn watchdog_completes_a_stalled_exit() {
        let bar = silent_bar(RuntimeOptions::default());
        bar.show(ShowRequest::info().duration(Duration::from_secs(1)))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;
        let dismissing = bar.snapshot().await.unwrap();
        assert!(dismissing.visible.is_some());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(bar.snapshot().await.unwrap().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn without_watchdog_a_stalled_exit_waits() {
        let bar = silent_bar(RuntimeOptions {
            exit_stall_timeout: None,
            ..RuntimeOptions::default()
        });
        bar.show(ShowRequest::info().duration(Duration::from_secs(1)))
            .unwrap();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(bar.is_message_visible().await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_closes_the_handle() {
        let bar = silent_bar(RuntimeOptions::default());
        let sink = bar.sink();
        bar.shutdown().unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(!bar.is_running());
        assert!(matches!(bar.show(ShowRequest::info()), Err(Error::Closed)));
        // Reports after shutdown are dropped quietly
        sink.exit_finished(SurfaceHandle::new(1));
    }

    #[tokio::test(start_paused = true)]
    async fn accessory_press_is_returned_not_dismissed() {
        let bar = silent_bar(RuntimeOptions::default());
        let id = bar.show(ShowRequest::info().auto_dismiss(false)).unwrap();

        let action = bar
            .handle_toast(ToastMessage::AccessoryPressed {
                message: id,
                action: "undo".into(),
            })
            .unwrap();

        assert_eq!(action.as_deref(), Some("undo"));
        assert_eq!(bar.snapshot().await.unwrap().visible, Some(id));
    }
}
