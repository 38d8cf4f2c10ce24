// SPDX-License-Identifier: MPL-2.0
//! In-memory bar configuration (the `configure` surface).
//!
//! A [`BarConfig`] is consulted when a message is created: its colors,
//! fonts and icon are copied into a [`MessageStyle`] stored on the record.
//! Reconfiguring therefore never restyles queued or visible messages.

use crate::message::MessageType;
use crate::ui::design_tokens::{palette, typography};
use iced::font::Weight;
use iced::widget::image::Handle;
use iced::{Color, Font};

/// Font face plus point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFont {
    pub font: Font,
    pub size: f32,
}

impl TextFont {
    #[must_use]
    pub const fn new(font: Font, size: f32) -> Self {
        Self { font, size }
    }

    /// Bold system font, the default for titles.
    #[must_use]
    pub const fn bold(size: f32) -> Self {
        Self::new(
            Font {
                weight: Weight::Bold,
                ..Font::DEFAULT
            },
            size,
        )
    }

    /// Regular system font, the default for bodies.
    #[must_use]
    pub const fn regular(size: f32) -> Self {
        Self::new(Font::DEFAULT, size)
    }
}

/// Styling resolved for a single message at creation time.
#[derive(Debug, Clone)]
pub struct MessageStyle {
    pub background: Color,
    pub title_color: Color,
    pub message_color: Color,
    pub title_font: TextFont,
    pub message_font: TextFont,
    pub icon: Option<Handle>,
}

/// Process-wide options applied to every message created afterwards.
#[derive(Debug, Clone)]
pub struct BarConfig {
    pub error_color: Color,
    pub success_color: Color,
    pub info_color: Color,
    pub title_color: Color,
    pub message_color: Color,
    pub hide_status_bar_while_visible: bool,
    pub success_icon: Option<Handle>,
    pub info_icon: Option<Handle>,
    pub error_icon: Option<Handle>,
    pub title_font: TextFont,
    pub message_font: TextFont,
    pub haptic_feedback_enabled: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            error_color: palette::ERROR,
            success_color: palette::SUCCESS,
            info_color: palette::INFO,
            title_color: palette::WHITE,
            message_color: palette::WHITE,
            hide_status_bar_while_visible: false,
            success_icon: None,
            info_icon: None,
            error_icon: None,
            title_font: TextFont::bold(typography::TITLE),
            message_font: TextFont::regular(typography::BODY),
            haptic_feedback_enabled: true,
        }
    }
}

impl BarConfig {
    #[must_use]
    pub fn builder() -> BarConfigBuilder {
        BarConfigBuilder::default()
    }

    /// Background color for a message type.
    #[must_use]
    pub fn background_color(&self, kind: MessageType) -> Color {
        match kind {
            MessageType::Error => self.error_color,
            MessageType::Info => self.info_color,
            MessageType::Success => self.success_color,
        }
    }

    /// Icon for a message type, if one is configured.
    #[must_use]
    pub fn icon(&self, kind: MessageType) -> Option<&Handle> {
        match kind {
            MessageType::Error => self.error_icon.as_ref(),
            MessageType::Info => self.info_icon.as_ref(),
            MessageType::Success => self.success_icon.as_ref(),
        }
    }

    /// Snapshot of everything a message of `kind` needs to render.
    #[must_use]
    pub fn style_for(&self, kind: MessageType) -> MessageStyle {
        MessageStyle {
            background: self.background_color(kind),
            title_color: self.title_color,
            message_color: self.message_color,
            title_font: self.title_font,
            message_font: self.message_font,
            icon: self.icon(kind).cloned(),
        }
    }
}

/// Builder over [`BarConfig`]; unset options keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct BarConfigBuilder {
    config: BarConfig,
}

impl BarConfigBuilder {
    #[must_use]
    pub fn with_error_color(mut self, color: Color) -> Self {
        self.config.error_color = color;
        self
    }

    #[must_use]
    pub fn with_success_color(mut self, color: Color) -> Self {
        self.config.success_color = color;
        self
    }

    #[must_use]
    pub fn with_info_color(mut self, color: Color) -> Self {
        self.config.info_color = color;
        self
    }

    #[must_use]
    pub fn with_title_color(mut self, color: Color) -> Self {
        self.config.title_color = color;
        self
    }

    #[must_use]
    pub fn with_message_color(mut self, color: Color) -> Self {
        self.config.message_color = color;
        self
    }

    #[must_use]
    pub fn with_status_bar_hidden(mut self, hidden: bool) -> Self {
        self.config.hide_status_bar_while_visible = hidden;
        self
    }

    #[must_use]
    pub fn with_success_icon(mut self, icon: Handle) -> Self {
        self.config.success_icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_info_icon(mut self, icon: Handle) -> Self {
        self.config.info_icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_error_icon(mut self, icon: Handle) -> Self {
        self.config.error_icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_title_font(mut self, font: TextFont) -> Self {
        self.config.title_font = font;
        self
    }

    #[must_use]
    pub fn with_message_font(mut self, font: TextFont) -> Self {
        self.config.message_font = font;
        self
    }

    #[must_use]
    pub fn with_haptic_feedback(mut self, enabled: bool) -> Self {
        self.config.haptic_feedback_enabled = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> BarConfig {
        self.config
    }
}
