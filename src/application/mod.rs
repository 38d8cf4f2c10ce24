// SPDX-License-Identifier: MPL-2.0
//! Application layer: the presentation scheduler and the ports it drives.
//!
//! - [`port`]: Trait definitions for the overlay and feedback collaborators
//! - [`scheduler`]: The single-visible-message state machine
//!
//! # Dependency Rule
//!
//! - The scheduler depends on message types and ports only
//! - Infrastructure implements the ports
//! - The runtime owns a scheduler and feeds it events

pub mod port;
pub mod scheduler;
