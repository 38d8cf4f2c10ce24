// SPDX-License-Identifier: MPL-2.0
//! Overlay (render collaborator) port definition.
//!
//! This module defines the [`Overlay`] trait through which the scheduler
//! drives whatever floats messages above normal content: a platform
//! window, an iced layer, a terminal line, or a test double.
//!
//! # Design Notes
//!
//! - The scheduler only sequences calls and never inspects pixels
//! - Animations are fire-and-forget; completion is reported back later
//!   through the scheduler (`enter_finished` / `exit_finished`), usually via
//!   [`crate::runtime::OverlaySink`]
//! - A tap is mapped back to its record through the [`SurfaceHandle`], so
//!   the overlay never holds the record itself
//! - Every completion must be reported at most once per animation

use crate::message::MessageRecord;
use std::fmt;

/// Opaque handle for one mounted message surface.
///
/// Handles are issued by the overlay and compared by the scheduler to
/// discard late reports for surfaces that were already torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Measured size of a message surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Options applied when the presentation layer is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerOptions {
    /// Hide the status bar while the layer exists.
    pub hide_status_bar: bool,
}

/// Port for the presentation surface.
///
/// # Lifecycle
///
/// 1. `attach()` once, before the first message of a busy period
/// 2. Per message: `measure()`, `mount()`, `animate_in()`
/// 3. Per dismissal: `animate_out()`, then `unmount()` after completion
/// 4. `detach()` when the scheduler returns to idle
///
/// A forced cancel skips step 3's animation and calls `unmount()` directly.
pub trait Overlay: Send {
    /// Creates the presentation layer.
    fn attach(&mut self, options: LayerOptions);

    /// Computes the size `record` will occupy.
    fn measure(&self, record: &MessageRecord) -> Extent;

    /// Places `record` on the layer, off-screen, and returns its handle.
    fn mount(&mut self, record: &MessageRecord, extent: Extent) -> SurfaceHandle;

    /// Starts the enter animation. Completion is reported asynchronously.
    fn animate_in(&mut self, surface: SurfaceHandle, extent: Extent);

    /// Starts the exit animation. Completion is reported asynchronously.
    fn animate_out(&mut self, surface: SurfaceHandle, extent: Extent);

    /// Removes the surface immediately, animating nothing.
    fn unmount(&mut self, surface: SurfaceHandle);

    /// Tears the presentation layer down.
    fn detach(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    // The trait must stay object-safe
    fn _assert_object_safe(_: &dyn Overlay) {}

    #[test]
    fn surface_handles_compare_by_value() {
        assert_eq!(SurfaceHandle::new(7), SurfaceHandle::new(7));
        assert_ne!(SurfaceHandle::new(7), SurfaceHandle::new(8));
        assert_eq!(SurfaceHandle::new(3).to_string(), "surface-3");
    }

    #[test]
    fn layer_options_default_keeps_status_bar() {
        assert!(!LayerOptions::default().hide_status_bar);
    }
}
