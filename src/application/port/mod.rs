// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for the scheduler's external collaborators.
//!
//! # Available Ports
//!
//! - [`overlay`]: Presentation surface (mount, animate, unmount)
//! - [`feedback`]: Haptic/accessibility pulse when a message appears
//!
//! # Design Notes
//!
//! - Traits take message records and plain value types only
//! - Traits are `Send` so the scheduler can live inside a Tokio task
//! - No `async fn`: completions flow back as events, not futures

pub mod feedback;
pub mod overlay;

pub use feedback::{DeviceClass, Feedback};
pub use overlay::{Extent, LayerOptions, Overlay, SurfaceHandle};
