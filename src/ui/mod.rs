// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`toast`] - iced view of the visible message and its layout estimate

pub mod design_tokens;
pub mod toast;
