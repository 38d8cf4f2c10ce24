// SPDX-License-Identifier: MPL-2.0
//! Process-wide message bar.
//!
//! Applications that want a single global bar construct it explicitly and
//! [`install`] it once at startup. The free functions below then forward to
//! it, so call sites deep in the code do not need a handle threaded through.
//! [`shared_or_headless`] lazily falls back to a headless bar on the current
//! Tokio runtime when nothing was installed.

use super::{MessageBar, RuntimeOptions};
use crate::config::BarConfig;
use crate::error::{Error, Result};
use crate::message::{MessageId, ShowRequest};
use std::sync::OnceLock;
use tokio::runtime::Handle;

static SHARED: OnceLock<MessageBar> = OnceLock::new();

/// Installs `bar` as the process-wide instance.
///
/// # Errors
///
/// [`Error::AlreadyInstalled`] when an instance already exists.
pub fn install(bar: MessageBar) -> Result<()> {
    SHARED.set(bar).map_err(|_| Error::AlreadyInstalled)?;
    tracing::debug!("shared message bar installed");
    Ok(())
}

/// Returns the installed instance, if any.
#[must_use]
pub fn shared() -> Option<&'static MessageBar> {
    SHARED.get()
}

/// Returns the installed instance, spawning a headless one on the current
/// runtime the first time nothing is installed.
///
/// The fallback lives on whichever runtime first asked for it; once that
/// runtime shuts down, commands fail with [`Error::Closed`].
///
/// # Errors
///
/// [`Error::NoRuntime`] when nothing is installed and no Tokio runtime is
/// current.
pub fn shared_or_headless() -> Result<&'static MessageBar> {
    if let Some(bar) = SHARED.get() {
        return Ok(bar);
    }
    if Handle::try_current().is_err() {
        return Err(Error::NoRuntime);
    }
    Ok(SHARED.get_or_init(|| {
        tracing::debug!("spawning headless shared message bar");
        MessageBar::headless(BarConfig::default(), RuntimeOptions::default())
    }))
}

/// Shows `request` on the shared bar.
pub fn show(request: ShowRequest) -> Result<MessageId> {
    shared_or_headless()?.show(request)
}

/// Cancels `id` on the shared bar.
pub fn cancel(id: MessageId) -> Result<()> {
    shared_or_headless()?.cancel(id)
}

/// Cancels everything on the shared bar.
pub fn cancel_all(force: bool) -> Result<()> {
    shared_or_headless()?.cancel_all(force)
}
