// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Shared visual constants for the message bar.

## Organization

- **Palette**: Default message colors
- **Opacity**: Overlay and pressed-state opacity levels
- **Spacing**: Spacing scale (4px grid)
- **Sizing**: Bar and icon sizes
- **Typography**: Title and body font sizes
- **Radius**: Corner radii
- **Shadow**: Drop shadow under the bar

## Examples

```
use message_bar::ui::design_tokens::{palette, spacing};

let padding = spacing::SM;
assert!(padding > spacing::XS);
assert_ne!(palette::ERROR, palette::SUCCESS);
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;

    // Message backgrounds
    pub const ERROR: Color = Color::from_rgb(1.0, 0.0, 0.0);
    pub const SUCCESS: Color = Color::from_rgb(0.0, 1.0, 0.0);
    pub const INFO: Color = Color::from_rgb(0.0, 0.0, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const HAIRLINE: f32 = 1.0; // title/body gap
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 10.0; // icon/text gap
    pub const MD: f32 = 16.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_MD: f32 = 24.0;

    /// Smallest height a bar is measured at, even with empty content.
    pub const BAR_MIN_HEIGHT: f32 = 44.0;

    /// Width used when measuring text wrap without a real surface.
    pub const BAR_REFERENCE_WIDTH: f32 = 375.0;

    /// Width reserved for an accessory button.
    pub const ACCESSORY_WIDTH: f32 = 72.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Message title.
    pub const TITLE: f32 = 16.0;

    /// Message body.
    pub const BODY: f32 = 14.0;

    /// Line height multiplier used when estimating text extent.
    pub const LINE_HEIGHT: f32 = 1.3;

    /// Average glyph advance relative to font size.
    pub const GLYPH_WIDTH_RATIO: f32 = 0.5;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::{opacity, palette, Color};
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const BAR: Shadow = Shadow {
        color: Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 6.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);

    assert!(typography::TITLE > typography::BODY);
    assert!(typography::LINE_HEIGHT >= 1.0);

    assert!(sizing::BAR_MIN_HEIGHT >= sizing::ICON_MD);
};
