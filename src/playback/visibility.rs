// SPDX-License-Identifier: MPL-2.0
//! Viewport intersection for gallery cards.
//!
//! A margin of [`VISIBILITY_ROOT_MARGIN`] of the viewport height is trimmed
//! from both the top and the bottom edge before measuring, so a card that
//! only peeks in at an edge does not count as visible.

use crate::app::config::{DEFAULT_VISIBILITY_THRESHOLD, VISIBILITY_ROOT_MARGIN};

/// Minimum visible fraction of a card, clamped to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VisibilityThreshold(f32);

impl VisibilityThreshold {
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// A card is visible when it intersects the observed band and at least
    /// the threshold fraction of it is inside.
    #[must_use]
    pub fn is_visible(self, ratio: f32) -> bool {
        ratio > 0.0 && ratio >= self.0
    }
}

impl Default for VisibilityThreshold {
    fn default() -> Self {
        Self(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

/// Vertical span of the scrollable viewport, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSpan {
    pub top: f32,
    pub height: f32,
}

impl ViewportSpan {
    #[must_use]
    pub fn new(top: f32, height: f32) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    /// Band left after trimming the root margin from both edges.
    #[must_use]
    pub fn observed_band(self) -> (f32, f32) {
        let margin = self.height * VISIBILITY_ROOT_MARGIN;
        (self.top + margin, self.top + self.height - margin)
    }
}

/// Fraction of the item inside the observed band, in `0.0..=1.0`.
#[must_use]
pub fn intersection_ratio(item_top: f32, item_height: f32, viewport: ViewportSpan) -> f32 {
    if item_height <= 0.0 {
        return 0.0;
    }
    let (band_top, band_bottom) = viewport.observed_band();
    if band_bottom <= band_top {
        return 0.0;
    }

    let overlap = (item_top + item_height).min(band_bottom) - item_top.max(band_top);
    (overlap.max(0.0) / item_height).clamp(0.0, 1.0)
}
