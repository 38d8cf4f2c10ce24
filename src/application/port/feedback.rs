// SPDX-License-Identifier: MPL-2.0
//! Feedback (haptics / accessibility) port definition.

use crate::message::MessageType;

/// Kind of device the feedback adapter runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    Phone,
    Tablet,
    Desktop,
    #[default]
    Unknown,
}

impl DeviceClass {
    /// Only phones carry a taptic engine worth pulsing.
    #[must_use]
    pub fn supports_haptics(self) -> bool {
        self == DeviceClass::Phone
    }
}

/// Port for feedback emitted when a message finishes appearing.
///
/// `notify` is fire-and-forget; the scheduler calls it at most once per
/// presented message and only when the configuration and device allow it.
pub trait Feedback: Send {
    fn device_class(&self) -> DeviceClass;

    fn notify(&mut self, kind: MessageType);
}
