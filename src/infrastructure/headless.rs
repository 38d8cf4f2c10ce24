// SPDX-License-Identifier: MPL-2.0
//! Headless overlay.
//!
//! Renders nothing. Each mounted message is logged, and the enter and exit
//! animations are simulated with Tokio timers of `show_hide` length that
//! report completion through the [`OverlaySink`]. Useful for services,
//! command line tools and tests that want real timing without a window.
//!
//! Must be driven from inside a Tokio runtime.

use crate::application::port::{Extent, LayerOptions, Overlay, SurfaceHandle};
use crate::message::MessageRecord;
use crate::runtime::OverlaySink;
use crate::ui::design_tokens::sizing;
use crate::ui::toast;
use std::time::Duration;

/// Overlay that simulates animations with timers.
#[derive(Debug)]
pub struct HeadlessOverlay {
    sink: OverlaySink,
    show_hide: Duration,
    width: f32,
    next_surface: u64,
}

impl HeadlessOverlay {
    pub fn new(sink: OverlaySink, show_hide: Duration) -> Self {
        Self {
            sink,
            show_hide,
            width: sizing::BAR_REFERENCE_WIDTH,
            next_surface: 0,
        }
    }

    /// Sets the layout width used for extent estimates.
    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    fn complete_after(&self, surface: SurfaceHandle, report: fn(&OverlaySink, SurfaceHandle)) {
        let sink = self.sink.clone();
        let delay = self.show_hide;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            report(&sink, surface);
        });
    }
}

impl Overlay for HeadlessOverlay {
    fn attach(&mut self, options: LayerOptions) {
        tracing::debug!(hide_status_bar = options.hide_status_bar, "headless layer attached");
    }

    fn measure(&self, record: &MessageRecord) -> Extent {
        toast::estimate_extent(record, self.width)
    }

    fn mount(&mut self, record: &MessageRecord, extent: Extent) -> SurfaceHandle {
        self.next_surface += 1;
        let surface = SurfaceHandle::new(self.next_surface);

        tracing::info!(
            id = %record.id(),
            kind = ?record.kind(),
            title = record.visible_title().unwrap_or_default(),
            body = record.visible_body().unwrap_or_default(),
            height = extent.height,
            %surface,
            "message shown"
        );
        surface
    }

    fn animate_in(&mut self, surface: SurfaceHandle, _extent: Extent) {
        self.complete_after(surface, OverlaySink::enter_finished);
    }

    fn animate_out(&mut self, surface: SurfaceHandle, _extent: Extent) {
        self.complete_after(surface, OverlaySink::exit_finished);
    }

    fn unmount(&mut self, surface: SurfaceHandle) {
        tracing::info!(%surface, "message hidden");
    }

    fn detach(&mut self) {
        tracing::debug!("headless layer detached");
    }
}
