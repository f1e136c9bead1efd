// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Colors, opacities, spacing, sizes and motion-free geometry shared by the home
page and the overlay gallery.

## Organization

- **Palette**: Base colors
- **Opacity**: Overlay and surface opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes, including the fixed gallery card geometry
- **Typography**: Font size scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use iced_folio::ui::design_tokens::{opacity, palette, sizing};
use iced::Color;

let scrim = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::BLACK
};

// Cards are laid out on a fixed pitch so their position is known without layout.
let pitch = sizing::CARD_HEIGHT + sizing::CARD_GAP;
assert!(pitch > sizing::CARD_HEIGHT);
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
    pub const GRAY_900: Color = Color::from_rgb(0.07, 0.07, 0.09);
    pub const GRAY_800: Color = Color::from_rgb(0.12, 0.12, 0.15);
    pub const GRAY_700: Color = Color::from_rgb(0.2, 0.2, 0.24);
    pub const GRAY_400: Color = Color::from_rgb(0.45, 0.45, 0.5);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.78);

    // Accent (violet scale)
    pub const ACCENT_400: Color = Color::from_rgb(0.66, 0.55, 0.98);
    pub const ACCENT_500: Color = Color::from_rgb(0.55, 0.42, 0.95);
    pub const ACCENT_600: Color = Color::from_rgb(0.45, 0.32, 0.85);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.85;
    pub const OVERLAY_PRESSED: f32 = 0.9;
    pub const OPAQUE: f32 = 1.0;

    /// Card and panel surfaces
    pub const SURFACE: f32 = 0.95;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
    pub const XXL: f32 = 48.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const BUTTON_HEIGHT: f32 = 36.0;

    /// Height of the gallery header (title, tabs, close button).
    pub const GALLERY_HEADER_HEIGHT: f32 = 72.0;

    /// Maximum width of the gallery card column.
    pub const GALLERY_MAX_WIDTH: f32 = 960.0;

    /// Fixed height of a gallery card. Visibility is computed from this.
    pub const CARD_HEIGHT: f32 = 420.0;

    /// Vertical gap between two cards.
    pub const CARD_GAP: f32 = 24.0;

    /// Padding above the first card inside the scrollable.
    pub const LIST_PADDING: f32 = 24.0;

    /// Height of the video surface inside a card.
    pub const VIDEO_SURFACE_HEIGHT: f32 = 260.0;

    /// Horizontal travel of the card list during a tab change.
    pub const SLIDE_DISTANCE: f32 = 160.0;

    pub const PROJECT_CARD_WIDTH: f32 = 280.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Hero heading on the home page
    pub const DISPLAY: f32 = 44.0;

    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::OVERLAY_STRONG > opacity::OVERLAY_MEDIUM);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    // The video surface must fit in a card with room for the caption.
    assert!(sizing::VIDEO_SURFACE_HEIGHT < sizing::CARD_HEIGHT);
    assert!(sizing::CARD_GAP >= 0.0);
    assert!(sizing::SLIDE_DISTANCE < sizing::GALLERY_MAX_WIDTH);

    assert!(typography::DISPLAY > typography::TITLE_LG);
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::BODY > typography::CAPTION);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn card_pitch_matches_list_padding_grid() {
        assert_eq!(sizing::CARD_GAP, sizing::LIST_PADDING);
    }
}
