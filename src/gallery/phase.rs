// SPDX-License-Identifier: MPL-2.0
//! Phase state machine for the overlay gallery choreography.
//!
//! The only forward path is:
//! - Idle: nothing on screen
//! - Overlay: dimming layer entering, gallery not mounted yet
//! - Content: gallery mounted, content fading in
//! - Closing: content gone first, then the overlay retracts
//!
//! `Background` is kept as a named step but the controller folds it into
//! `Content`; it is accepted as a source phase wherever `Overlay` is.

use std::fmt;

/// Named step of the gallery open/close choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Overlay,
    Background,
    Content,
    Closing,
}

impl TransitionPhase {
    /// Returns true if `next` is a legal successor of this phase.
    #[must_use]
    pub fn can_advance_to(self, next: TransitionPhase) -> bool {
        use TransitionPhase::{Background, Closing, Content, Idle, Overlay};
        matches!(
            (self, next),
            (Idle, Overlay)
                | (Overlay, Background | Content | Closing)
                | (Background, Content | Closing)
                | (Content, Closing)
                | (Closing, Idle)
        )
    }

    /// Returns true while an open or close sequence is in flight.
    #[must_use]
    pub fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns true for phases in which the dimming overlay is on screen.
    #[must_use]
    pub fn shows_overlay(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns true if `close()` is accepted from this phase.
    #[must_use]
    pub fn is_closable(self) -> bool {
        matches!(self, Self::Overlay | Self::Background | Self::Content)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Overlay => "overlay",
            Self::Background => "background",
            Self::Content => "content",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
