// SPDX-License-Identifier: MPL-2.0
//! Video units and the coordinator that keeps at most one of them playing.

pub mod control;
pub mod coordinator;
pub mod engine;
pub mod key;
pub mod unit;
pub mod visibility;

use crate::app::config::DEFAULT_HANDOFF_MS;
use std::time::Duration;

pub use control::{ControlHandle, MediaSource, PlaybackControl};
pub use coordinator::PlaybackCoordinator;
pub use engine::{PlaybackEngine, TimelineEngine};
pub use key::{MediaKey, ParseMediaKeyError};
pub use unit::{format_time, PlayTicket, VideoUnit};
pub use visibility::{intersection_ratio, ViewportSpan, VisibilityThreshold};

/// Playback behaviour shared by every unit of a gallery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Yield between the pause sweep and the actual play call.
    pub handoff: Duration,
    pub visibility_threshold: VisibilityThreshold,
    pub start_muted: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            handoff: Duration::from_millis(DEFAULT_HANDOFF_MS),
            visibility_threshold: VisibilityThreshold::default(),
            start_muted: false,
        }
    }
}
