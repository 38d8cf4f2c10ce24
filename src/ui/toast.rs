// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering the visible message.
//!
//! The whole bar is one tap target reporting [`ToastMessage::Tapped`] with
//! the surface handle it was mounted under; the scheduler maps the handle
//! back to its record. An accessory, when present, is a separate button
//! whose press is reported on its own and does not dismiss.

use crate::application::port::{Extent, SurfaceHandle};
use crate::message::{MessageId, MessageRecord};
use crate::ui::design_tokens::{opacity, radius, shadow, sizing, spacing, typography};
use iced::widget::image::Image;
use iced::widget::{button, container, mouse_area, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Messages emitted by the toast view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastMessage {
    /// The bar was tapped.
    Tapped(SurfaceHandle),
    /// The accessory of `message` was pressed.
    AccessoryPressed { message: MessageId, action: String },
}

/// Renders `record` as a full-width bar.
///
/// Layout is `[icon] [title / body] [accessory]`, mirrored for
/// right-to-left messages.
pub fn view(record: &MessageRecord, surface: SurfaceHandle) -> Element<'_, ToastMessage> {
    let style = record.style();

    let mut text_column = Column::new()
        .spacing(spacing::HAIRLINE)
        .width(Length::Fill);
    if let Some(title) = record.visible_title() {
        text_column = text_column.push(
            Text::new(title)
                .font(style.title_font.font)
                .size(style.title_font.size)
                .color(style.title_color),
        );
    }
    if let Some(body) = record.visible_body() {
        text_column = text_column.push(
            Text::new(body)
                .font(style.message_font.font)
                .size(style.message_font.size)
                .color(style.message_color),
        );
    }

    let mut text_column = Some(text_column);
    let mut items: Vec<Element<'_, ToastMessage>> = Vec::with_capacity(3);

    for slot in layout_slots(record) {
        let item: Option<Element<'_, ToastMessage>> = match slot {
            Slot::Icon => style.icon.as_ref().map(|icon| {
                Image::new(icon.clone())
                    .width(Length::Fixed(sizing::ICON_MD))
                    .height(Length::Fixed(sizing::ICON_MD))
                    .into()
            }),
            Slot::Text => text_column.take().map(Element::from),
            Slot::Accessory => record.accessory().map(|accessory| {
                let text_color = style.title_color;
                button(Text::new(accessory.label.as_str()).size(typography::BODY))
                    .on_press(ToastMessage::AccessoryPressed {
                        message: record.id(),
                        action: accessory.action.clone(),
                    })
                    .padding(spacing::XXS)
                    .style(move |_theme: &Theme, status| {
                        accessory_button_style(status, text_color)
                    })
                    .into()
            }),
        };
        items.extend(item);
    }

    let content = Row::with_children(items)
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

    let background = style.background;
    let bar = Container::new(content)
        .width(Length::Fill)
        .padding([spacing::SM, spacing::MD])
        .style(move |_theme: &Theme| bar_container_style(background));

    mouse_area(bar)
        .on_press(ToastMessage::Tapped(surface))
        .into()
}

/// Parts of the bar, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Icon,
    Text,
    Accessory,
}

/// Left-to-right order of the parts present in `record`, mirrored for
/// right-to-left messages.
fn layout_slots(record: &MessageRecord) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(3);
    if record.style().icon.is_some() {
        slots.push(Slot::Icon);
    }
    slots.push(Slot::Text);
    if record.accessory().is_some() {
        slots.push(Slot::Accessory);
    }
    if record.writing_direction().is_right_to_left() {
        slots.reverse();
    }
    slots
}

/// Estimates the size of `record` laid out at `width`.
///
/// Uses a fixed glyph-width ratio rather than real shaping; good enough to
/// size the slide distance and the minimum bar height.
#[must_use]
pub fn estimate_extent(record: &MessageRecord, width: f32) -> Extent {
    let style = record.style();

    let mut text_width = width - 2.0 * spacing::MD;
    if style.icon.is_some() {
        text_width -= sizing::ICON_MD + spacing::SM;
    }
    if record.accessory().is_some() {
        text_width -= sizing::ACCESSORY_WIDTH + spacing::SM;
    }
    let text_width = text_width.max(sizing::ICON_MD);

    let title = record
        .visible_title()
        .map_or(0.0, |t| text_block_height(t, style.title_font.size, text_width));
    let body = record
        .visible_body()
        .map_or(0.0, |b| text_block_height(b, style.message_font.size, text_width));
    let gap = if title > 0.0 && body > 0.0 {
        spacing::HAIRLINE
    } else {
        0.0
    };

    let height = (title + gap + body + 2.0 * spacing::SM).max(sizing::BAR_MIN_HEIGHT);
    Extent::new(width, height)
}

fn text_block_height(text: &str, size: f32, width: f32) -> f32 {
    let glyph_width = size * typography::GLYPH_WIDTH_RATIO;
    let per_line = ((width / glyph_width).floor() as usize).max(1);
    let lines: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(per_line).max(1))
        .sum();
    lines.max(1) as f32 * size * typography::LINE_HEIGHT
}

/// Style function for the bar container.
fn bar_container_style(background: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(background)),
        border: iced::Border {
            radius: radius::NONE.into(),
            ..Default::default()
        },
        shadow: shadow::BAR,
        ..Default::default()
    }
}

/// Style function for the accessory button.
fn accessory_button_style(status: button::Status, text_color: Color) -> button::Style {
    let overlay = match status {
        button::Status::Active => None,
        button::Status::Hovered => Some(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => Some(opacity::OVERLAY_MEDIUM),
        button::Status::Disabled => {
            return button::Style {
                background: None,
                text_color: Color {
                    a: opacity::OVERLAY_MEDIUM,
                    ..text_color
                },
                ..button::Style::default()
            };
        }
    };

    button::Style {
        background: overlay.map(|a| iced::Background::Color(Color { a, ..text_color })),
        text_color,
        border: iced::Border {
            color: text_color,
            width: spacing::HAIRLINE,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        ..button::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BarConfig;
    use crate::message::{Accessory, ShowRequest, WritingDirection};
    use crate::ui::design_tokens::palette;

    fn record(request: ShowRequest) -> MessageRecord {
        MessageRecord::new(MessageId::new(), request, &BarConfig::default()).unwrap()
    }

    #[test]
    fn bar_container_uses_message_background() {
        let style = bar_container_style(palette::ERROR);
        assert_eq!(
            style.background,
            Some(iced::Background::Color(palette::ERROR))
        );
    }

    #[test]
    fn accessory_button_is_transparent_until_hovered() {
        let active = accessory_button_style(button::Status::Active, palette::WHITE);
        let hovered = accessory_button_style(button::Status::Hovered, palette::WHITE);

        assert!(active.background.is_none());
        assert!(hovered.background.is_some());
        assert_eq!(active.text_color, palette::WHITE);
    }

    #[test]
    fn empty_message_has_minimum_height() {
        let extent = estimate_extent(&record(ShowRequest::info()), sizing::BAR_REFERENCE_WIDTH);
        assert_eq!(extent.height, sizing::BAR_MIN_HEIGHT);
        assert_eq!(extent.width, sizing::BAR_REFERENCE_WIDTH);
    }

    #[test]
    fn long_body_grows_the_bar() {
        let short = estimate_extent(
            &record(ShowRequest::info().body("Saved")),
            sizing::BAR_REFERENCE_WIDTH,
        );
        let long = estimate_extent(
            &record(ShowRequest::info().title("Sync").body("word ".repeat(60))),
            sizing::BAR_REFERENCE_WIDTH,
        );
        assert!(long.height > short.height);
    }

    #[test]
    fn accessory_narrows_the_text_column() {
        let body = "x".repeat(70);
        let plain = estimate_extent(
            &record(ShowRequest::info().body(body.clone())),
            sizing::BAR_REFERENCE_WIDTH,
        );
        let with_accessory = estimate_extent(
            &record(
                ShowRequest::info()
                    .body(body)
                    .accessory(Accessory::new("Undo", "undo")),
            ),
            sizing::BAR_REFERENCE_WIDTH,
        );
        assert!(with_accessory.height >= plain.height);
    }

    #[test]
    fn text_block_counts_wrapped_and_explicit_lines() {
        let size = 10.0;
        let line = size * typography::LINE_HEIGHT;
        // 20 glyphs of width 5 fit on one 100px line
        assert_eq!(text_block_height(&"a".repeat(20), size, 100.0), line);
        assert_eq!(text_block_height(&"a".repeat(21), size, 100.0), 2.0 * line);
        assert_eq!(text_block_height("a\nb", size, 100.0), 2.0 * line);
    }

    #[test]
    fn right_to_left_mirrors_the_layout() {
        let icon = iced::widget::image::Handle::from_rgba(1, 1, vec![0u8; 4]);
        let config = BarConfig::builder().with_success_icon(icon).build();
        let request = |direction| {
            ShowRequest::success()
                .title("Saved")
                .writing_direction(direction)
                .accessory(Accessory::new("Undo", "undo"))
        };

        let ltr = MessageRecord::new(MessageId::new(), request(WritingDirection::Auto), &config)
            .unwrap();
        let rtl =
            MessageRecord::new(MessageId::new(), request(WritingDirection::RightToLeft), &config)
                .unwrap();

        assert_eq!(
            layout_slots(&ltr),
            vec![Slot::Icon, Slot::Text, Slot::Accessory]
        );
        assert_eq!(
            layout_slots(&rtl),
            vec![Slot::Accessory, Slot::Text, Slot::Icon]
        );
    }

    #[test]
    fn plain_message_has_text_only() {
        let r = record(ShowRequest::info().body("Copied"));
        assert_eq!(layout_slots(&r), vec![Slot::Text]);
    }
}
