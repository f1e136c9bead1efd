// SPDX-License-Identifier: MPL-2.0
//! Registry keys of the form `<prefix>-<id>` (`work-3`, `video-3`).

use crate::catalog::MediaId;
use crate::gallery::GalleryTab;
use std::fmt;
use std::str::FromStr;

/// Unique identifier of a mounted video unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaKey {
    tab: GalleryTab,
    id: MediaId,
}

impl MediaKey {
    #[must_use]
    pub fn new(tab: GalleryTab, id: MediaId) -> Self {
        Self { tab, id }
    }

    #[must_use]
    pub fn tab(self) -> GalleryTab {
        self.tab
    }

    #[must_use]
    pub fn id(self) -> MediaId {
        self.id
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tab.key_prefix(), self.id)
    }
}

/// Error returned when a string is not a valid media key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMediaKeyError(String);

impl fmt::Display for ParseMediaKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid media key: {}", self.0)
    }
}

impl std::error::Error for ParseMediaKeyError {}

impl FromStr for MediaKey {
    type Err = ParseMediaKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMediaKeyError(s.to_string());
        let (prefix, id) = s.rsplit_once('-').ok_or_else(invalid)?;
        let tab = GalleryTab::ALL
            .into_iter()
            .find(|tab| tab.key_prefix() == prefix)
            .ok_or_else(invalid)?;
        let id = id.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(tab, MediaId(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_tab_prefix() {
        assert_eq!(
            MediaKey::new(GalleryTab::Works, MediaId(3)).to_string(),
            "work-3"
        );
        assert_eq!(
            MediaKey::new(GalleryTab::Videos, MediaId(3)).to_string(),
            "video-3"
        );
    }

    #[test]
    fn same_id_on_different_tabs_is_distinct() {
        assert_ne!(
            MediaKey::new(GalleryTab::Works, MediaId(1)),
            MediaKey::new(GalleryTab::Videos, MediaId(1))
        );
    }

    #[test]
    fn keys_sort_by_tab_order_then_id() {
        let mut keys = vec![
            MediaKey::new(GalleryTab::Videos, MediaId(1)),
            MediaKey::new(GalleryTab::Works, MediaId(5)),
            MediaKey::new(GalleryTab::Works, MediaId(2)),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MediaKey::new(GalleryTab::Works, MediaId(2)),
                MediaKey::new(GalleryTab::Works, MediaId(5)),
                MediaKey::new(GalleryTab::Videos, MediaId(1)),
            ]
        );
    }

    #[test]
    fn parses_display_form() {
        let key: MediaKey = "video-12".parse().expect("valid key");
        assert_eq!(key.tab(), GalleryTab::Videos);
        assert_eq!(key.id(), MediaId(12));
    }

    #[test]
    fn rejects_malformed_keys() {
        for input in ["", "video", "photo-1", "video-", "video-x", "work--1"] {
            assert!(input.parse::<MediaKey>().is_err(), "{input}");
        }
    }
}
