// SPDX-License-Identifier: MPL-2.0
//! Transition controller for the overlay gallery.
//!
//! Sequences the visual layers so that exactly one layer change happens per
//! timer event: the dimming overlay enters, the gallery mounts, the content
//! fades in; on close the content leaves first and the overlay retracts after
//! it. Every delay is a named [`TimerEvent`] in a single [`TimerSet`] that is
//! cleared as a group on close and teardown.
//!
//! All operations take the current [`Instant`] so the choreography can be
//! driven deterministically from tests.

use super::phase::TransitionPhase;
use super::tab::{GalleryTab, SlideDirection};
use super::timers::TimerSet;
use crate::app::config::{
    DEFAULT_CONTENT_FADE_OUT_MS, DEFAULT_CONTENT_REVEAL_MS, DEFAULT_OVERLAY_ENTER_MS,
    DEFAULT_OVERLAY_SLIDE_OUT_MS, DEFAULT_SCROLL_TO_MEDIA_MS, DEFAULT_TAB_SETTLE_MS,
    DEFAULT_TAB_SWAP_MS,
};
use crate::catalog::MediaId;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use std::time::{Duration, Instant};

/// Delays of the open/close choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Overlay entrance animation; the gallery mounts when it ends.
    pub overlay_enter: Duration,
    /// Gap between the background panel and the content fade-in.
    pub content_reveal: Duration,
    /// Gap before scrolling to a requested media card.
    pub scroll_to_media: Duration,
    /// Content fade-out; the gallery unmounts when it ends.
    pub content_fade_out: Duration,
    /// Overlay slide-out; the phase returns to idle when it ends.
    pub overlay_slide_out: Duration,
    /// Lock before a tab change swaps the content.
    pub tab_swap: Duration,
    /// Slide animation after a swap; the tab lock is released when it ends.
    pub tab_settle: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            overlay_enter: Duration::from_millis(DEFAULT_OVERLAY_ENTER_MS),
            content_reveal: Duration::from_millis(DEFAULT_CONTENT_REVEAL_MS),
            scroll_to_media: Duration::from_millis(DEFAULT_SCROLL_TO_MEDIA_MS),
            content_fade_out: Duration::from_millis(DEFAULT_CONTENT_FADE_OUT_MS),
            overlay_slide_out: Duration::from_millis(DEFAULT_OVERLAY_SLIDE_OUT_MS),
            tab_swap: Duration::from_millis(DEFAULT_TAB_SWAP_MS),
            tab_settle: Duration::from_millis(DEFAULT_TAB_SETTLE_MS),
        }
    }
}

impl TransitionTiming {
    /// Window during which further tab changes are ignored.
    #[must_use]
    pub fn tab_lock_window(&self) -> Duration {
        self.tab_swap + self.tab_settle
    }

    /// Total time from `close()` until the phase is idle again.
    #[cfg(test)]
    #[must_use]
    pub fn close_duration(&self) -> Duration {
        self.content_fade_out + self.overlay_slide_out
    }
}

/// Named timer events driving the choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    OverlayEntered,
    RevealContent,
    ScrollToMedia(MediaId),
    UnmountGallery,
    ReturnToIdle,
    SwapTab,
    ReleaseTabLock,
}

/// Why a request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `open()` while another sequence is in flight.
    Busy(TransitionPhase),
    /// Tab change while the gallery is not mounted.
    GalleryHidden,
    /// Tab change while the gallery is mounted but not in `Content`.
    NotInContent(TransitionPhase),
    /// Tab change inside the lock window of the previous one.
    TabLocked,
}

/// Requests accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Open the gallery on `tab`, optionally focusing a media card.
    Open {
        tab: GalleryTab,
        focus: Option<MediaId>,
    },
    /// The overlay entrance animation finished.
    OverlayMountComplete,
    /// Start the closing sequence.
    Close,
    /// Switch the displayed catalog subset.
    ChangeTab(GalleryTab),
    /// The hosting view is going away; cancel everything.
    Teardown,
}

/// Effects the owner must apply after a request or a fired timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Rejected(Rejection),
    /// Phase is now `Overlay`.
    OverlayShown { tab: GalleryTab },
    /// Phase is now `Content` and the gallery is visible.
    GalleryMounted {
        tab: GalleryTab,
        focus: Option<MediaId>,
    },
    /// Content layer faded in.
    ContentRevealed,
    /// Scroll the gallery to the focused card.
    ScrollToMedia(MediaId),
    /// Phase is now `Closing`; playback must stop.
    ClosingStarted,
    /// Gallery is no longer visible; mounted units must be dropped.
    GalleryUnmounted,
    /// Phase is back to `Idle`.
    ReturnedToIdle,
    /// A tab change was accepted; playback must stop.
    TabChangeStarted {
        from: GalleryTab,
        to: GalleryTab,
        direction: SlideDirection,
    },
    /// The active tab changed; units must be rebuilt and scroll reset to top.
    TabSwapped {
        tab: GalleryTab,
        direction: SlideDirection,
    },
    /// Tab changes are accepted again.
    TabUnlocked,
    /// All timers were cancelled and the state reset.
    TornDown,
}

/// Phase state machine for the overlay gallery.
#[derive(Debug, Clone)]
pub struct TransitionController {
    phase: TransitionPhase,
    gallery_visible: bool,
    content_revealed: bool,
    active_tab: GalleryTab,
    pending_tab: Option<GalleryTab>,
    tab_locked: bool,
    direction: SlideDirection,
    /// Start of the current slide stage (swap-out, then settle-in).
    slide_started: Option<Instant>,
    focus: Option<MediaId>,
    timers: TimerSet<TimerEvent>,
    timing: TransitionTiming,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(TransitionTiming::default())
    }
}

impl TransitionController {
    #[must_use]
    pub fn new(timing: TransitionTiming) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            gallery_visible: false,
            content_revealed: false,
            active_tab: GalleryTab::default(),
            pending_tab: None,
            tab_locked: false,
            direction: SlideDirection::default(),
            slide_started: None,
            focus: None,
            timers: TimerSet::new(),
            timing,
            diagnostics: None,
        }
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Handle a request at `now`.
    pub fn handle(&mut self, msg: Message, now: Instant) -> Effect {
        match msg {
            Message::Open { tab, focus } => self.open(tab, focus, now),
            Message::OverlayMountComplete => self.mount(now),
            Message::Close => self.close(now),
            Message::ChangeTab(tab) => self.change_tab(tab, now),
            Message::Teardown => self.teardown(),
        }
    }

    /// Fire every timer due at `now`, in deadline order.
    ///
    /// Follow-up timers are scheduled from the deadline of the event that
    /// fired, so a late poll catches up on the whole chain.
    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some((deadline, event)) = self.timers.pop_due(now) {
            let effect = self.fire(event, deadline);
            if effect != Effect::None {
                effects.push(effect);
            }
        }
        effects
    }

    fn open(&mut self, tab: GalleryTab, focus: Option<MediaId>, now: Instant) -> Effect {
        if self.phase.is_busy() {
            return self.reject("open", Rejection::Busy(self.phase));
        }

        self.active_tab = tab;
        self.focus = focus;
        self.pending_tab = None;
        self.tab_locked = false;
        self.direction = SlideDirection::default();
        self.slide_started = None;
        self.set_phase(TransitionPhase::Overlay);
        self.timers
            .schedule(now, self.timing.overlay_enter, TimerEvent::OverlayEntered);
        Effect::OverlayShown { tab }
    }

    fn mount(&mut self, now: Instant) -> Effect {
        if !matches!(
            self.phase,
            TransitionPhase::Overlay | TransitionPhase::Background
        ) {
            log::debug!("overlay completion ignored in phase {}", self.phase);
            return Effect::None;
        }

        self.timers
            .cancel_where(|e| matches!(e, TimerEvent::OverlayEntered));
        self.gallery_visible = true;
        self.set_phase(TransitionPhase::Content);
        self.timers
            .schedule(now, self.timing.content_reveal, TimerEvent::RevealContent);
        if let (GalleryTab::Videos, Some(id)) = (self.active_tab, self.focus) {
            self.timers.schedule(
                now,
                self.timing.scroll_to_media,
                TimerEvent::ScrollToMedia(id),
            );
        }

        Effect::GalleryMounted {
            tab: self.active_tab,
            focus: self.focus,
        }
    }

    fn close(&mut self, now: Instant) -> Effect {
        if !self.phase.is_closable() {
            log::debug!("close ignored in phase {}", self.phase);
            return Effect::None;
        }

        self.timers.clear();
        self.content_revealed = false;
        self.pending_tab = None;
        self.tab_locked = false;
        self.slide_started = None;
        self.set_phase(TransitionPhase::Closing);
        self.timers
            .schedule(now, self.timing.content_fade_out, TimerEvent::UnmountGallery);
        Effect::ClosingStarted
    }

    fn change_tab(&mut self, tab: GalleryTab, now: Instant) -> Effect {
        if !self.gallery_visible {
            return self.reject("change_tab", Rejection::GalleryHidden);
        }
        if self.phase != TransitionPhase::Content {
            return self.reject("change_tab", Rejection::NotInContent(self.phase));
        }
        if self.tab_locked {
            return self.reject("change_tab", Rejection::TabLocked);
        }
        if tab == self.active_tab {
            return Effect::None;
        }

        let from = self.active_tab;
        self.direction = from.direction_to(tab);
        self.tab_locked = true;
        self.pending_tab = Some(tab);
        self.slide_started = Some(now);
        self.timers
            .cancel_where(|e| matches!(e, TimerEvent::ScrollToMedia(_)));
        self.timers
            .schedule(now, self.timing.tab_swap, TimerEvent::SwapTab);

        Effect::TabChangeStarted {
            from,
            to: tab,
            direction: self.direction,
        }
    }

    fn teardown(&mut self) -> Effect {
        let cancelled = self.timers.clear();
        if cancelled > 0 || self.phase.is_busy() {
            log::debug!(
                "gallery torn down in phase {} ({cancelled} timers cancelled)",
                self.phase
            );
        }
        self.phase = TransitionPhase::Idle;
        self.gallery_visible = false;
        self.content_revealed = false;
        self.pending_tab = None;
        self.tab_locked = false;
        self.slide_started = None;
        self.focus = None;
        Effect::TornDown
    }

    fn fire(&mut self, event: TimerEvent, now: Instant) -> Effect {
        match event {
            TimerEvent::OverlayEntered => self.mount(now),
            TimerEvent::RevealContent => {
                if self.phase != TransitionPhase::Content {
                    return Effect::None;
                }
                self.content_revealed = true;
                Effect::ContentRevealed
            }
            TimerEvent::ScrollToMedia(id) => {
                if self.phase != TransitionPhase::Content || !self.gallery_visible {
                    return Effect::None;
                }
                Effect::ScrollToMedia(id)
            }
            TimerEvent::UnmountGallery => {
                if self.phase != TransitionPhase::Closing {
                    return Effect::None;
                }
                self.gallery_visible = false;
                self.focus = None;
                self.timers
                    .schedule(now, self.timing.overlay_slide_out, TimerEvent::ReturnToIdle);
                Effect::GalleryUnmounted
            }
            TimerEvent::ReturnToIdle => {
                if self.phase != TransitionPhase::Closing {
                    return Effect::None;
                }
                self.set_phase(TransitionPhase::Idle);
                Effect::ReturnedToIdle
            }
            TimerEvent::SwapTab => {
                let Some(tab) = self.pending_tab.take() else {
                    return Effect::None;
                };
                if self.phase != TransitionPhase::Content {
                    return Effect::None;
                }
                self.active_tab = tab;
                self.slide_started = Some(now);
                self.timers
                    .schedule(now, self.timing.tab_settle, TimerEvent::ReleaseTabLock);
                Effect::TabSwapped {
                    tab,
                    direction: self.direction,
                }
            }
            TimerEvent::ReleaseTabLock => {
                self.tab_locked = false;
                self.slide_started = None;
                Effect::TabUnlocked
            }
        }
    }

    fn set_phase(&mut self, next: TransitionPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal phase transition {} -> {}",
            self.phase,
            next
        );
        log::debug!("gallery phase {} -> {}", self.phase, next);
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log(DiagnosticEventKind::PhaseChanged {
                from: self.phase.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.phase = next;
    }

    fn reject(&self, request: &str, rejection: Rejection) -> Effect {
        log::debug!("{request} rejected: {rejection:?}");
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log(DiagnosticEventKind::TransitionRejected {
                request: request.to_string(),
                phase: self.phase.as_str().to_string(),
            });
        }
        Effect::Rejected(rejection)
    }

    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_gallery_visible(&self) -> bool {
        self.gallery_visible
    }

    #[must_use]
    pub fn is_content_revealed(&self) -> bool {
        self.content_revealed
    }

    #[must_use]
    pub fn active_tab(&self) -> GalleryTab {
        self.active_tab
    }

    /// Horizontal shift of the gallery content at `now`, as a fraction of the
    /// slide distance. Negative values move the content left.
    ///
    /// The outgoing list leaves towards the slide direction during the swap
    /// delay; the incoming list enters from the opposite side while the tab
    /// settles. Zero outside a tab change.
    #[must_use]
    pub fn slide_offset(&self, now: Instant) -> f32 {
        let Some(started) = self.slide_started else {
            return 0.0;
        };
        let sign = match self.direction {
            SlideDirection::Left => -1.0,
            SlideDirection::Right => 1.0,
        };
        let progress = |duration: Duration| {
            if duration.is_zero() {
                1.0
            } else {
                (now.saturating_duration_since(started).as_secs_f32() / duration.as_secs_f32())
                    .min(1.0)
            }
        };

        if self.pending_tab.is_some() {
            sign * progress(self.timing.tab_swap)
        } else {
            -sign * (1.0 - progress(self.timing.tab_settle))
        }
    }

    #[must_use]
    pub fn focus(&self) -> Option<MediaId> {
        self.focus
    }

    #[must_use]
    pub fn is_tab_locked(&self) -> bool {
        self.tab_locked
    }

    /// Returns true while a tab change has been accepted but not yet swapped.
    #[must_use]
    pub fn is_tab_swapping(&self) -> bool {
        self.pending_tab.is_some()
    }

    #[must_use]
    pub fn timing(&self) -> &TransitionTiming {
        &self.timing
    }

    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}
