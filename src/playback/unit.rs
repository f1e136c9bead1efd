// SPDX-License-Identifier: MPL-2.0
//! A single video card in the gallery.
//!
//! The unit owns its [`ControlHandle`] and the card-local state around it:
//! mute, fullscreen, timeline position, visibility and the pending play
//! ticket. Starting playback is a two-step handoff: `TogglePlayback` only
//! issues a ticket; the owner runs the coordinator sweep, waits for the
//! handoff yield, then calls [`VideoUnit::complete_play`] or
//! [`VideoUnit::abandon_play`]. While a ticket is pending the play button is
//! locked.

use super::control::{ControlHandle, PlaybackControl};
use super::engine::{PlaybackEngine, TimelineEngine};
use super::key::MediaKey;
use super::visibility::VisibilityThreshold;
use super::PlaybackSettings;
use crate::catalog::CatalogEntry;
use crate::error::VideoError;
use std::sync::Arc;

/// Proof that a play request is the unit's latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    TogglePlayback,
    Pause,
    ToggleMute,
    ToggleFullscreen,
    /// Jump to a fraction of the timeline, clamped to `0.0..=1.0`.
    Seek(f32),
    /// New intersection ratio with the observed viewport band.
    VisibilityChanged(f32),
    /// Re-read the engine position.
    Refresh,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Owner must run the handoff for this ticket.
    PlayRequested(PlayTicket),
    /// Playback started after a successful handoff.
    Started,
    /// User paused playback.
    Paused,
    /// Unit paused itself after leaving the viewport.
    AutoPaused,
    /// Playback reached the end of the media.
    Ended,
    PlayFailed(VideoError),
    FullscreenChanged(bool),
}

#[derive(Debug)]
pub struct VideoUnit {
    key: MediaKey,
    title: String,
    description: String,
    category: Option<String>,
    handle: Arc<ControlHandle>,
    muted: bool,
    fullscreen: bool,
    position_secs: f64,
    duration_secs: Option<f64>,
    visibility: Option<f32>,
    threshold: VisibilityThreshold,
    pending: Option<PlayTicket>,
    next_ticket: u64,
    error: Option<VideoError>,
}

impl VideoUnit {
    /// Builds a unit backed by a [`TimelineEngine`].
    #[must_use]
    pub fn new(key: MediaKey, entry: &CatalogEntry, settings: &PlaybackSettings) -> Self {
        let engine = TimelineEngine::new(entry.media_source.clone(), entry.duration_secs);
        Self::with_engine(key, entry, settings, Box::new(engine))
    }

    #[must_use]
    pub fn with_engine(
        key: MediaKey,
        entry: &CatalogEntry,
        settings: &PlaybackSettings,
        mut engine: Box<dyn PlaybackEngine>,
    ) -> Self {
        engine.set_muted(settings.start_muted);
        let duration_secs = engine.duration_secs();
        Self {
            key,
            title: entry.title.trim().to_string(),
            description: entry.description.clone(),
            category: entry.category.clone(),
            handle: Arc::new(ControlHandle::new(entry.media_source.clone(), engine)),
            muted: settings.start_muted,
            fullscreen: false,
            position_secs: 0.0,
            duration_secs,
            visibility: None,
            threshold: settings.visibility_threshold,
            pending: None,
            next_ticket: 0,
            error: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::TogglePlayback => self.toggle_playback(),
            Message::Pause => {
                if self.handle.pause() {
                    self.sync_position();
                    Effect::Paused
                } else {
                    Effect::None
                }
            }
            Message::ToggleMute => {
                self.muted = !self.muted;
                let muted = self.muted;
                self.handle.with_engine(|engine| engine.set_muted(muted));
                Effect::None
            }
            Message::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                Effect::FullscreenChanged(self.fullscreen)
            }
            Message::Seek(ratio) => {
                let ratio = f64::from(ratio.clamp(0.0, 1.0));
                if let Some(duration) = self.duration_secs {
                    self.handle
                        .with_engine(|engine| engine.seek(ratio * duration));
                    self.sync_position();
                }
                Effect::None
            }
            Message::VisibilityChanged(ratio) => self.visibility_changed(ratio),
            Message::Refresh => self.refresh(),
        }
    }

    fn toggle_playback(&mut self) -> Effect {
        if self.handle.is_playing() {
            self.handle.pause();
            self.sync_position();
            return Effect::Paused;
        }
        if self.pending.is_some() {
            log::debug!("{}: play ignored, handoff in progress", self.key);
            return Effect::None;
        }
        if !self.is_visible() {
            log::debug!("{}: play ignored, unit not in view", self.key);
            return Effect::None;
        }

        let ticket = PlayTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        Effect::PlayRequested(ticket)
    }

    /// Finishes a handoff. Stale tickets are ignored.
    pub fn complete_play(&mut self, ticket: PlayTicket) -> Effect {
        if self.pending != Some(ticket) {
            return Effect::None;
        }
        self.pending = None;

        match self.handle.play() {
            Ok(()) => {
                self.error = None;
                self.sync_position();
                Effect::Started
            }
            Err(error) => {
                log::warn!("{}: playback failed: {error}", self.key);
                self.error = Some(error.clone());
                Effect::PlayFailed(error)
            }
        }
    }

    /// Releases the play lock after a newer contender won the handoff.
    pub fn abandon_play(&mut self, ticket: PlayTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn visibility_changed(&mut self, ratio: f32) -> Effect {
        self.visibility = Some(ratio.clamp(0.0, 1.0));
        if self.is_visible() {
            return Effect::None;
        }

        // A card scrolled away must not start once its handoff completes.
        self.pending = None;
        if self.handle.pause() {
            log::debug!("{}: auto-paused, out of view", self.key);
            self.sync_position();
            Effect::AutoPaused
        } else {
            Effect::None
        }
    }

    fn refresh(&mut self) -> Effect {
        self.sync_position();
        if self.handle.is_playing() && self.handle.with_engine(|engine| engine.has_ended()) {
            self.handle.mark_ended();
            return Effect::Ended;
        }
        Effect::None
    }

    fn sync_position(&mut self) {
        self.position_secs = self.handle.with_engine(|engine| engine.position_secs());
    }

    #[must_use]
    pub fn key(&self) -> MediaKey {
        self.key
    }

    #[must_use]
    pub fn handle(&self) -> &Arc<ControlHandle> {
        &self.handle
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.handle.is_playing()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Unmeasured units count as visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility
            .is_none_or(|ratio| self.threshold.is_visible(ratio))
    }

    #[must_use]
    pub fn visibility_ratio(&self) -> Option<f32> {
        self.visibility
    }

    #[must_use]
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_secs
    }

    /// Played fraction of the timeline, 0 when the duration is unknown.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress(&self) -> f32 {
        match self.duration_secs {
            Some(duration) if duration > 0.0 => {
                (self.position_secs / duration).clamp(0.0, 1.0) as f32
            }
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&VideoError> {
        self.error.as_ref()
    }
}

/// Formats seconds as `m:ss` for the timeline label.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaId;
    use crate::gallery::GalleryTab;
    use crate::playback::control::MediaSource;
    use approx::assert_relative_eq;

    fn entry(source: &str) -> CatalogEntry {
        CatalogEntry {
            id: MediaId(3),
            title: "Dr.Pepper ".to_string(),
            description: "Motion design".to_string(),
            media_source: MediaSource::from(source),
            category: None,
            duration_secs: Some(20.0),
        }
    }

    fn unit() -> VideoUnit {
        VideoUnit::new(
            MediaKey::new(GalleryTab::Videos, MediaId(3)),
            &entry("https://example.invalid/drpepper.mp4"),
            &PlaybackSettings::default(),
        )
    }

    fn start(unit: &mut VideoUnit) {
        let Effect::PlayRequested(ticket) = unit.update(Message::TogglePlayback) else {
            panic!("expected a play request");
        };
        assert_eq!(unit.complete_play(ticket), Effect::Started);
    }

    #[test]
    fn toggle_issues_ticket_without_playing() {
        let mut unit = unit();
        assert!(matches!(
            unit.update(Message::TogglePlayback),
            Effect::PlayRequested(_)
        ));
        assert!(!unit.is_playing());
        assert!(unit.is_pending());
    }

    #[test]
    fn toggle_is_locked_while_handoff_pending() {
        let mut unit = unit();
        unit.update(Message::TogglePlayback);
        assert_eq!(unit.update(Message::TogglePlayback), Effect::None);
    }

    #[test]
    fn every_builtin_entry_can_play() {
        let catalog = crate::catalog::Catalog::builtin();
        for tab in GalleryTab::ALL {
            for entry in catalog.entries(tab) {
                let mut unit = VideoUnit::new(
                    MediaKey::new(tab, entry.id),
                    entry,
                    &PlaybackSettings::default(),
                );
                start(&mut unit);
                assert!(unit.is_playing(), "{} did not start", unit.key());
            }
        }
    }

    #[test]
    fn completed_ticket_starts_playback() {
        let mut unit = unit();
        start(&mut unit);
        assert!(unit.is_playing());
        assert!(!unit.is_pending());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut unit = unit();
        let Effect::PlayRequested(first) = unit.update(Message::TogglePlayback) else {
            panic!("expected a play request");
        };
        assert!(unit.abandon_play(first));
        let Effect::PlayRequested(second) = unit.update(Message::TogglePlayback) else {
            panic!("expected a play request");
        };

        assert_eq!(unit.complete_play(first), Effect::None);
        assert!(!unit.is_playing());
        assert_eq!(unit.complete_play(second), Effect::Started);
    }

    #[test]
    fn toggle_while_playing_pauses() {
        let mut unit = unit();
        start(&mut unit);
        assert_eq!(unit.update(Message::TogglePlayback), Effect::Paused);
        assert!(!unit.is_playing());
    }

    #[test]
    fn pause_is_idempotent() {
        let mut unit = unit();
        start(&mut unit);
        assert_eq!(unit.update(Message::Pause), Effect::Paused);
        assert_eq!(unit.update(Message::Pause), Effect::None);
    }

    #[test]
    fn missing_source_reports_failure_and_stays_paused() {
        let mut unit = VideoUnit::new(
            MediaKey::new(GalleryTab::Works, MediaId(1)),
            &entry("/no/such/clip.mp4"),
            &PlaybackSettings::default(),
        );
        let Effect::PlayRequested(ticket) = unit.update(Message::TogglePlayback) else {
            panic!("expected a play request");
        };

        assert!(matches!(
            unit.complete_play(ticket),
            Effect::PlayFailed(VideoError::SourceUnavailable(_))
        ));
        assert!(!unit.is_playing());
        assert!(unit.error().is_some());
        assert!(!unit.is_pending());
    }

    #[test]
    fn leaving_viewport_auto_pauses() {
        let mut unit = unit();
        start(&mut unit);
        assert_eq!(
            unit.update(Message::VisibilityChanged(0.19)),
            Effect::AutoPaused
        );
        assert!(!unit.is_playing());
    }

    #[test]
    fn staying_visible_keeps_playing() {
        let mut unit = unit();
        start(&mut unit);
        assert_eq!(unit.update(Message::VisibilityChanged(0.2)), Effect::None);
        assert!(unit.is_playing());
    }

    #[test]
    fn hidden_unit_ignores_play() {
        let mut unit = unit();
        unit.update(Message::VisibilityChanged(0.0));
        assert_eq!(unit.update(Message::TogglePlayback), Effect::None);

        unit.update(Message::VisibilityChanged(0.6));
        assert!(matches!(
            unit.update(Message::TogglePlayback),
            Effect::PlayRequested(_)
        ));
    }

    #[test]
    fn scrolling_away_cancels_pending_handoff() {
        let mut unit = unit();
        let Effect::PlayRequested(ticket) = unit.update(Message::TogglePlayback) else {
            panic!("expected a play request");
        };
        unit.update(Message::VisibilityChanged(0.0));
        assert_eq!(unit.complete_play(ticket), Effect::None);
        assert!(!unit.is_playing());
    }

    #[test]
    fn seek_is_clamped_to_timeline() {
        let mut unit = unit();
        unit.update(Message::Seek(0.5));
        assert_relative_eq!(unit.position_secs(), 10.0, epsilon = 0.01);

        unit.update(Message::Seek(4.0));
        assert_relative_eq!(unit.progress(), 1.0);
    }

    #[test]
    fn refresh_detects_end_of_media() {
        let mut unit = unit();
        start(&mut unit);
        unit.update(Message::Seek(1.0));
        assert_eq!(unit.update(Message::Refresh), Effect::Ended);
        assert!(!unit.is_playing());
    }

    #[test]
    fn mute_and_fullscreen_toggle() {
        let mut unit = unit();
        unit.update(Message::ToggleMute);
        assert!(unit.is_muted());
        assert!(unit.handle().with_engine(|engine| engine.is_muted()));

        assert_eq!(
            unit.update(Message::ToggleFullscreen),
            Effect::FullscreenChanged(true)
        );
        assert_eq!(
            unit.update(Message::ToggleFullscreen),
            Effect::FullscreenChanged(false)
        );
    }

    #[test]
    fn start_muted_setting_applies() {
        let settings = PlaybackSettings {
            start_muted: true,
            ..PlaybackSettings::default()
        };
        let unit = VideoUnit::new(
            MediaKey::new(GalleryTab::Videos, MediaId(1)),
            &entry("https://example.invalid/a.mp4"),
            &settings,
        );
        assert!(unit.is_muted());
    }

    #[test]
    fn title_is_trimmed() {
        assert_eq!(unit().title(), "Dr.Pepper");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.7), "0:09");
        assert_eq!(format_time(75.0), "1:15");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
