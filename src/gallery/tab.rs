// SPDX-License-Identifier: MPL-2.0
//! Gallery tabs and the slide direction derived from their order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog subset shown by the gallery.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryTab {
    #[default]
    Works,
    Videos,
}

/// Direction the outgoing content slides towards during a tab change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    Left,
    #[default]
    Right,
}

impl GalleryTab {
    pub const ALL: [GalleryTab; 2] = [GalleryTab::Works, GalleryTab::Videos];

    /// Left-to-right position of the tab button.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Works => 0,
            Self::Videos => 1,
        }
    }

    /// Prefix used to build media keys (`work-3`, `video-3`).
    #[must_use]
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Works => "work",
            Self::Videos => "video",
        }
    }

    /// i18n key of the tab button label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Works => "gallery-tab-works",
            Self::Videos => "gallery-tab-videos",
        }
    }

    /// Slide direction when moving from `self` to `target`.
    ///
    /// Moving to a tab further right pushes content to the left.
    #[must_use]
    pub fn direction_to(self, target: GalleryTab) -> SlideDirection {
        if target.index() > self.index() {
            SlideDirection::Left
        } else {
            SlideDirection::Right
        }
    }
}

impl fmt::Display for GalleryTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Works => f.write_str("works"),
            Self::Videos => f.write_str("videos"),
        }
    }
}

impl FromStr for GalleryTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "works" => Ok(Self::Works),
            "videos" => Ok(Self::Videos),
            other => Err(format!("unknown gallery tab: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_tab_order() {
        assert_eq!(
            GalleryTab::Works.direction_to(GalleryTab::Videos),
            SlideDirection::Left
        );
        assert_eq!(
            GalleryTab::Videos.direction_to(GalleryTab::Works),
            SlideDirection::Right
        );
    }

    #[test]
    fn ordering_matches_index() {
        assert!(GalleryTab::Works < GalleryTab::Videos);
        assert!(GalleryTab::ALL.windows(2).all(|pair| pair[0].index() < pair[1].index()));
    }

    #[test]
    fn parses_display_form() {
        for tab in GalleryTab::ALL {
            assert_eq!(tab.to_string().parse::<GalleryTab>(), Ok(tab));
        }
        assert!("photos".parse::<GalleryTab>().is_err());
    }
}
