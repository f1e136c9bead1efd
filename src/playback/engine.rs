// SPDX-License-Identifier: MPL-2.0
//! Playable resource behind a control handle.
//!
//! [`TimelineEngine`] advances a wall-clock timeline between `play` and
//! `pause` and never decodes frames. Local sources are checked for existence
//! when playback starts; bundled clips need no file.

use super::control::MediaSource;
use crate::error::VideoError;
use std::fmt;
use std::time::Instant;

/// Operations a video unit needs from its media backend.
pub trait PlaybackEngine: Send + fmt::Debug {
    /// Starts or resumes playback.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if the source cannot be played.
    fn play(&mut self) -> Result<(), VideoError>;

    fn pause(&mut self);

    /// Moves the playhead, clamped to the media duration when known.
    fn seek(&mut self, position_secs: f64);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    fn position_secs(&self) -> f64;

    fn duration_secs(&self) -> Option<f64>;

    fn has_ended(&self) -> bool {
        self.duration_secs()
            .is_some_and(|duration| self.position_secs() >= duration)
    }
}

/// Wall-clock timeline engine.
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    source: MediaSource,
    duration_secs: Option<f64>,
    /// Position accumulated before the current run.
    offset_secs: f64,
    /// Start of the current run while playing.
    started_at: Option<Instant>,
    muted: bool,
}

impl TimelineEngine {
    #[must_use]
    pub fn new(source: MediaSource, duration_secs: Option<f64>) -> Self {
        Self {
            source,
            duration_secs: duration_secs.filter(|d| d.is_finite() && *d > 0.0),
            offset_secs: 0.0,
            started_at: None,
            muted: false,
        }
    }

    fn clamp(&self, position: f64) -> f64 {
        let position = position.max(0.0);
        match self.duration_secs {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    fn check_source(&self) -> Result<(), VideoError> {
        match &self.source {
            MediaSource::File(path) if !path.exists() => {
                Err(VideoError::SourceUnavailable(path.display().to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl PlaybackEngine for TimelineEngine {
    fn play(&mut self) -> Result<(), VideoError> {
        if self.started_at.is_some() {
            return Ok(());
        }
        self.check_source()?;
        if self.has_ended() {
            self.offset_secs = 0.0;
        }
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        if self.started_at.is_some() {
            self.offset_secs = self.position_secs();
            self.started_at = None;
        }
    }

    fn seek(&mut self, position_secs: f64) {
        self.offset_secs = self.clamp(position_secs);
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn position_secs(&self) -> f64 {
        let running = self
            .started_at
            .map_or(0.0, |start| start.elapsed().as_secs_f64());
        self.clamp(self.offset_secs + running)
    }

    fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }
}
