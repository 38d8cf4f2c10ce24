// SPDX-License-Identifier: MPL-2.0
//! Feedback adapters.

use crate::application::port::{DeviceClass, Feedback};
use crate::message::MessageType;

/// Logs each pulse instead of driving a haptic engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback {
    device: DeviceClass,
}

impl TracingFeedback {
    #[must_use]
    pub fn new(device: DeviceClass) -> Self {
        Self { device }
    }
}

impl Feedback for TracingFeedback {
    fn device_class(&self) -> DeviceClass {
        self.device
    }

    fn notify(&mut self, kind: MessageType) {
        let pattern = match kind {
            MessageType::Success => "success",
            MessageType::Error => "error",
            MessageType::Info => "selection",
        };
        tracing::info!(?kind, pattern, "haptic feedback");
    }
}

/// Feedback for devices without any.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn device_class(&self) -> DeviceClass {
        DeviceClass::Unknown
    }

    fn notify(&mut self, _kind: MessageType) {}
}
