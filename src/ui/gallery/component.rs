// SPDX-License-Identifier: MPL-2.0
//! Overlay gallery state: the composition root of transitions and playback.
//!
//! The [`TransitionController`] decides when the gallery is mounted. Each
//! time it mounts (or a tab swap fires) one [`VideoUnit`] is built per
//! catalog entry and registered with the [`PlaybackCoordinator`]. The
//! registry is cleared before units are dropped, so nothing keeps playing
//! after unmount, tab change or teardown.

use crate::catalog::{Catalog, MediaId};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::gallery::{
    GalleryTab, TimerSet, TransitionController, TransitionEffect, TransitionMessage,
    TransitionPhase, TransitionTiming,
};
use crate::playback::unit::{self, Effect as UnitEffect};
use crate::playback::{
    intersection_ratio, MediaKey, PlayTicket, PlaybackCoordinator, PlaybackSettings, VideoUnit,
    ViewportSpan,
};
use crate::ui::design_tokens::sizing;
use iced::widget::scrollable::{AbsoluteOffset, RelativeOffset};
use iced::widget::{operation, Id};
use iced::{Size, Task};
use std::time::Instant;

/// Id of the scrollable holding the cards.
pub const SCROLLABLE_ID: &str = "gallery-cards";

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Open {
        tab: GalleryTab,
        focus: Option<MediaId>,
    },
    OverlayMountComplete,
    Close,
    ChangeTab(GalleryTab),
    Teardown,
    Unit(MediaKey, unit::Message),
    /// Scroll offset and height of the card viewport.
    Scrolled(ViewportSpan),
    WindowResized(Size),
    Tick(Instant),
}

/// Side effects the application should perform after handling a gallery message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The gallery is fully closed.
    Closed,
    /// A unit asked for (or released) the whole window.
    SetFullscreen(bool),
}

/// A play request waiting for the handoff yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Handoff {
    key: MediaKey,
    ticket: PlayTicket,
}

#[derive(Debug)]
pub struct State {
    controller: TransitionController,
    coordinator: PlaybackCoordinator,
    units: Vec<VideoUnit>,
    handoffs: TimerSet<Handoff>,
    settings: PlaybackSettings,
    catalog: Catalog,
    scroll: Option<ViewportSpan>,
    window: Option<Size>,
    fullscreen: Option<MediaKey>,
    diagnostics: Option<DiagnosticsHandle>,
    /// Time of the last handled message; drives the tab slide.
    clock: Instant,
}

impl Default for State {
    fn default() -> Self {
        Self::new(
            TransitionTiming::default(),
            PlaybackSettings::default(),
            Catalog::builtin(),
        )
    }
}

impl State {
    #[must_use]
    pub fn new(timing: TransitionTiming, settings: PlaybackSettings, catalog: Catalog) -> Self {
        Self {
            controller: TransitionController::new(timing),
            coordinator: PlaybackCoordinator::new(),
            units: Vec::new(),
            handoffs: TimerSet::new(),
            settings,
            catalog,
            scroll: None,
            window: None,
            fullscreen: None,
            diagnostics: None,
            clock: Instant::now(),
        }
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.controller.set_diagnostics(handle.clone());
        self.coordinator.set_diagnostics(handle.clone());
        self.diagnostics = Some(handle);
    }

    /// Replaces the catalog. Mounted units are rebuilt from the new entries.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        if self.controller.is_gallery_visible() {
            self.mount_units(self.controller.active_tab());
            self.refresh_visibility();
        }
    }

    pub fn handle(&mut self, message: Message, now: Instant) -> (Effect, Task<Message>) {
        self.clock = now;
        match message {
            Message::Open { tab, focus } => {
                self.transition(TransitionMessage::Open { tab, focus }, now)
            }
            Message::OverlayMountComplete => {
                self.transition(TransitionMessage::OverlayMountComplete, now)
            }
            Message::Close => self.transition(TransitionMessage::Close, now),
            Message::ChangeTab(tab) => self.transition(TransitionMessage::ChangeTab(tab), now),
            Message::Teardown => self.transition(TransitionMessage::Teardown, now),
            Message::Unit(key, message) => {
                if self.controller.is_tab_swapping() {
                    log::debug!("message for outgoing unit {key} dropped");
                    return (Effect::None, Task::none());
                }
                let Some(unit) = self.unit_mut(key) else {
                    log::debug!("message for unmounted unit {key} dropped");
                    return (Effect::None, Task::none());
                };
                let effect = unit.update(message);
                (self.apply_unit_effect(key, effect, now), Task::none())
            }
            Message::Scrolled(span) => {
                self.scroll = Some(span);
                self.refresh_visibility();
                (Effect::None, Task::none())
            }
            Message::WindowResized(size) => {
                self.window = Some(size);
                if let Some(scroll) = &mut self.scroll {
                    *scroll = ViewportSpan::new(scroll.top, card_viewport_height(size));
                }
                self.refresh_visibility();
                (Effect::None, Task::none())
            }
            Message::Tick(now) => self.tick(now),
        }
    }

    fn transition(&mut self, message: TransitionMessage, now: Instant) -> (Effect, Task<Message>) {
        let effect = self.controller.handle(message, now);
        self.apply_transition_effect(effect)
    }

    fn tick(&mut self, now: Instant) -> (Effect, Task<Message>) {
        let mut effect = Effect::None;
        let mut tasks = Vec::new();

        for transition in self.controller.poll(now) {
            let (next, task) = self.apply_transition_effect(transition);
            if next != Effect::None {
                effect = next;
            }
            tasks.push(task);
        }

        for handoff in self.handoffs.poll(now) {
            let next = self.resolve_handoff(handoff, now);
            if next != Effect::None {
                effect = next;
            }
        }

        let playing: Vec<MediaKey> = self
            .units
            .iter()
            .filter(|unit| unit.is_playing())
            .map(VideoUnit::key)
            .collect();
        for key in playing {
            if let Some(unit) = self.unit_mut(key) {
                let refreshed = unit.update(unit::Message::Refresh);
                self.apply_unit_effect(key, refreshed, now);
            }
        }

        (effect, Task::batch(tasks))
    }

    fn apply_transition_effect(&mut self, effect: TransitionEffect) -> (Effect, Task<Message>) {
        match effect {
            TransitionEffect::GalleryMounted { tab, .. }
            | TransitionEffect::TabSwapped { tab, .. } => {
                self.mount_units(tab);
                self.refresh_visibility();
                (Effect::None, scroll_to_top())
            }
            TransitionEffect::ScrollToMedia(id) => (Effect::None, self.scroll_to_media(id)),
            TransitionEffect::ClosingStarted => {
                self.stop_playback();
                (self.leave_fullscreen(), Task::none())
            }
            TransitionEffect::TabChangeStarted { .. } => {
                // Outgoing cards stay on screen while they slide out, silenced
                // and unregistered.
                self.stop_playback();
                self.coordinator.clear();
                (self.leave_fullscreen(), Task::none())
            }
            TransitionEffect::GalleryUnmounted => {
                self.unmount_units();
                (Effect::None, Task::none())
            }
            TransitionEffect::ReturnedToIdle => (Effect::Closed, Task::none()),
            TransitionEffect::TornDown => {
                let fullscreen = self.leave_fullscreen();
                self.unmount_units();
                self.scroll = None;
                let effect = if fullscreen == Effect::None {
                    Effect::Closed
                } else {
                    fullscreen
                };
                (effect, Task::none())
            }
            TransitionEffect::None
            | TransitionEffect::Rejected(_)
            | TransitionEffect::OverlayShown { .. }
            | TransitionEffect::ContentRevealed
            | TransitionEffect::TabUnlocked => (Effect::None, Task::none()),
        }
    }

    fn apply_unit_effect(&mut self, key: MediaKey, effect: UnitEffect, now: Instant) -> Effect {
        match effect {
            UnitEffect::PlayRequested(ticket) => {
                self.coordinator.notify_play_starting(key);
                self.handoffs
                    .schedule(now, self.settings.handoff, Handoff { key, ticket });
                Effect::None
            }
            UnitEffect::Started => {
                log::info!("{key} playing");
                self.record(DiagnosticEventKind::PlaybackStarted {
                    key: key.to_string(),
                });
                Effect::None
            }
            UnitEffect::Paused | UnitEffect::Ended => {
                self.coordinator.notify_paused(key);
                Effect::None
            }
            UnitEffect::AutoPaused => {
                self.coordinator.notify_paused(key);
                self.record(DiagnosticEventKind::AutoPaused {
                    key: key.to_string(),
                });
                Effect::None
            }
            UnitEffect::PlayFailed(error) => {
                self.coordinator.notify_paused(key);
                self.record(DiagnosticEventKind::PlaybackFailed {
                    key: key.to_string(),
                    message: error.to_string(),
                });
                Effect::None
            }
            UnitEffect::FullscreenChanged(true) => {
                if let Some(previous) = self.fullscreen.replace(key) {
                    if previous != key {
                        if let Some(unit) = self.unit_mut(previous) {
                            unit.update(unit::Message::ToggleFullscreen);
                        }
                    }
                }
                Effect::SetFullscreen(true)
            }
            UnitEffect::FullscreenChanged(false) => {
                if self.fullscreen == Some(key) {
                    self.fullscreen = None;
                    self.refresh_visibility();
                    Effect::SetFullscreen(false)
                } else {
                    Effect::None
                }
            }
            UnitEffect::None => Effect::None,
        }
    }

    /// Second half of a play request: the latest contender plays, others give up.
    fn resolve_handoff(&mut self, handoff: Handoff, now: Instant) -> Effect {
        let Handoff { key, ticket } = handoff;
        let claimed = self.coordinator.claim(key);
        let Some(unit) = self.unit_mut(key) else {
            return Effect::None;
        };

        if claimed {
            let effect = unit.complete_play(ticket);
            if effect == UnitEffect::None {
                // The ticket went stale while waiting (unit left the viewport).
                self.coordinator.notify_paused(key);
            }
            self.apply_unit_effect(key, effect, now)
        } else {
            unit.abandon_play(ticket);
            Effect::None
        }
    }

    fn mount_units(&mut self, tab: GalleryTab) {
        self.unmount_units();
        self.units = self
            .catalog
            .entries(tab)
            .iter()
            .map(|entry| VideoUnit::new(MediaKey::new(tab, entry.id), entry, &self.settings))
            .collect();
        for unit in &self.units {
            self.coordinator.register(unit.key(), unit.handle());
        }
        if let Some(scroll) = &mut self.scroll {
            scroll.top = 0.0;
        }
        log::debug!("mounted {} unit(s) for {tab}", self.units.len());
    }

    fn unmount_units(&mut self) {
        self.handoffs.clear();
        self.coordinator.clear();
        self.units.clear();
        self.fullscreen = None;
    }

    /// Pauses every unit and releases the play lock of pending handoffs.
    fn stop_playback(&mut self) {
        for Handoff { key, ticket } in self.handoffs.drain() {
            if let Some(unit) = self.unit_mut(key) {
                unit.abandon_play(ticket);
            }
        }
        self.coordinator.force_pause_all(None);
    }

    fn leave_fullscreen(&mut self) -> Effect {
        match self.fullscreen.take() {
            Some(key) => {
                if let Some(unit) = self.unit_mut(key) {
                    unit.update(unit::Message::ToggleFullscreen);
                }
                Effect::SetFullscreen(false)
            }
            None => Effect::None,
        }
    }

    /// Feeds every card its intersection ratio with the current viewport.
    fn refresh_visibility(&mut self) {
        let Some(viewport) = self.viewport_span() else {
            return;
        };
        let now = Instant::now();
        let ratios: Vec<(MediaKey, f32)> = self
            .units
            .iter()
            .enumerate()
            .filter(|(_, unit)| Some(unit.key()) != self.fullscreen)
            .map(|(index, unit)| {
                let ratio = intersection_ratio(card_top(index), sizing::CARD_HEIGHT, viewport);
                (unit.key(), ratio)
            })
            .collect();

        for (key, ratio) in ratios {
            if let Some(unit) = self.unit_mut(key) {
                let effect = unit.update(unit::Message::VisibilityChanged(ratio));
                self.apply_unit_effect(key, effect, now);
            }
        }
    }

    fn viewport_span(&self) -> Option<ViewportSpan> {
        self.scroll
            .or_else(|| self.window.map(|size| ViewportSpan::new(0.0, card_viewport_height(size))))
    }

    fn scroll_to_media(&self, id: MediaId) -> Task<Message> {
        let Some(index) = self.units.iter().position(|unit| unit.key().id() == id) else {
            log::debug!("no card for media {id} on {}", self.controller.active_tab());
            return Task::none();
        };
        let height = self.viewport_span().map_or(0.0, |span| span.height);
        // Center the card in the viewport.
        let y = (card_top(index) - (height - sizing::CARD_HEIGHT) / 2.0).max(0.0);
        operation::scroll_to(Id::new(SCROLLABLE_ID), AbsoluteOffset { x: 0.0, y })
    }

    fn unit_mut(&mut self, key: MediaKey) -> Option<&mut VideoUnit> {
        self.units.iter_mut().find(|unit| unit.key() == key)
    }

    fn record(&self, kind: DiagnosticEventKind) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log(kind);
        }
    }

    /// Returns true while timers are pending or a unit plays.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.controller.has_pending_timers()
            || !self.handoffs.is_empty()
            || self.units.iter().any(VideoUnit::is_playing)
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn controller(&self) -> &TransitionController {
        &self.controller
    }

    #[must_use]
    pub fn coordinator(&self) -> &PlaybackCoordinator {
        &self.coordinator
    }

    #[must_use]
    pub fn units(&self) -> &[VideoUnit] {
        &self.units
    }

    #[must_use]
    pub fn unit(&self, key: MediaKey) -> Option<&VideoUnit> {
        self.units.iter().find(|unit| unit.key() == key)
    }

    #[must_use]
    pub fn fullscreen_unit(&self) -> Option<&VideoUnit> {
        self.fullscreen.and_then(|key| self.unit(key))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current horizontal shift of the card list, see
    /// [`TransitionController::slide_offset`].
    #[must_use]
    pub fn slide_offset(&self) -> f32 {
        self.controller.slide_offset(self.clock)
    }

    #[must_use]
    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }
}

/// Top edge of the card at `index`, in scroll content coordinates.
#[must_use]
pub fn card_top(index: usize) -> f32 {
    #[allow(clippy::cast_precision_loss)] // card counts are tiny
    let index = index as f32;
    sizing::LIST_PADDING + index * (sizing::CARD_HEIGHT + sizing::CARD_GAP)
}

fn card_viewport_height(window: Size) -> f32 {
    (window.height - sizing::GALLERY_HEADER_HEIGHT).max(0.0)
}

fn scroll_to_top() -> Task<Message> {
    operation::snap_to(Id::new(SCROLLABLE_ID), RelativeOffset { x: 0.0, y: 0.0 })
}
