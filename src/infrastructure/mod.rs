// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`headless`]: Timed overlay without a window (implements [`Overlay`])
//! - [`feedback`]: Tracing and silent feedback (implement [`Feedback`])
//!
//! [`Overlay`]: crate::application::port::Overlay
//! [`Feedback`]: crate::application::port::Feedback

pub mod feedback;
pub mod headless;

pub use feedback::{SilentFeedback, TracingFeedback};
pub use headless::HeadlessOverlay;
