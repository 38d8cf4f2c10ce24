// SPDX-License-Identifier: MPL-2.0
//! `message_bar` presents transient toast messages one at a time.
//!
//! Callers enqueue success, error or info messages; a scheduler shows them
//! in arrival order on a single surface, dismisses each after its duration,
//! on a tap or on an explicit cancel, and only then moves on to the next.
//!
//! # Layout
//!
//! - [`message`] - message values, records and the pending queue
//! - [`application`] - the scheduler and the ports it drives
//! - [`infrastructure`] - headless overlay and feedback adapters
//! - [`runtime`] - Tokio driver task and the cloneable [`MessageBar`] handle
//! - [`config`] - in-memory configuration and the on-disk settings file
//! - [`ui`] - iced toast view and design tokens
//!
//! # Example
//!
//! ```no_run
//! use message_bar::message::ShowRequest;
//! use message_bar::MessageBar;
//!
//! # #[tokio::main]
//! # async fn main() -> message_bar::error::Result<()> {
//! let bar = MessageBar::headless(Default::default(), Default::default());
//! let id = bar.show(ShowRequest::success().title("Saved"))?;
//! bar.cancel(id)?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod message;
pub mod runtime;
pub mod ui;

pub use runtime::MessageBar;
