// SPDX-License-Identifier: MPL-2.0
//! End-to-end flows across the transition controller, the playback
//! coordinator and the gallery composition root.

use iced_folio::catalog::{Catalog, CatalogEntry, MediaId};
use iced_folio::gallery::{
    GalleryTab, Rejection, TransitionController, TransitionEffect, TransitionMessage,
    TransitionPhase, TransitionTiming,
};
use iced_folio::playback::unit::Message as UnitMessage;
use iced_folio::playback::{
    ControlHandle, MediaKey, MediaSource, PlaybackControl, PlaybackCoordinator, PlaybackSettings,
    TimelineEngine, ViewportSpan,
};
use iced_folio::ui::gallery::{self, Message};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn video(id: u32) -> MediaKey {
    MediaKey::new(GalleryTab::Videos, MediaId(id))
}

fn playing_handle(file: &NamedTempFile) -> Arc<ControlHandle> {
    let source = MediaSource::File(file.path().to_path_buf());
    let engine = TimelineEngine::new(source.clone(), Some(60.0));
    let handle = Arc::new(ControlHandle::new(source, Box::new(engine)));
    handle.play().expect("temp file is playable");
    handle
}

#[test]
fn open_focus_close_round_trip() {
    let file = NamedTempFile::new().unwrap();
    let start = Instant::now();
    let mut controller = TransitionController::new(TransitionTiming::default());
    let mut coordinator = PlaybackCoordinator::new();

    let effect = controller.handle(
        TransitionMessage::Open {
            tab: GalleryTab::Videos,
            focus: Some(MediaId(3)),
        },
        start,
    );
    assert_eq!(
        effect,
        TransitionEffect::OverlayShown {
            tab: GalleryTab::Videos
        }
    );
    assert_eq!(controller.phase(), TransitionPhase::Overlay);

    let effect = controller.handle(TransitionMessage::OverlayMountComplete, start + ms(10));
    assert!(matches!(effect, TransitionEffect::GalleryMounted { .. }));
    assert_eq!(controller.phase(), TransitionPhase::Content);
    assert!(controller.is_gallery_visible());

    let first = playing_handle(&file);
    let third = playing_handle(&file);
    third.pause();
    coordinator.register(video(1), &first);
    coordinator.register(video(3), &third);
    assert!(coordinator.is_playing(video(1)));

    assert_eq!(coordinator.notify_play_starting(video(3)), 1);
    assert!(!first.is_playing());
    assert!(coordinator.playing_keys().is_empty());

    let closed_at = start + ms(1000);
    assert_eq!(
        controller.handle(TransitionMessage::Close, closed_at),
        TransitionEffect::ClosingStarted
    );
    assert_eq!(controller.phase(), TransitionPhase::Closing);
    assert!(controller.is_gallery_visible());

    let effects = controller.poll(closed_at + ms(149));
    assert!(effects.is_empty());
    assert!(controller.is_gallery_visible());

    let effects = controller.poll(closed_at + ms(150));
    assert_eq!(effects, vec![TransitionEffect::GalleryUnmounted]);
    assert!(!controller.is_gallery_visible());
    assert_eq!(controller.phase(), TransitionPhase::Closing);

    let effects = controller.poll(closed_at + ms(550));
    assert_eq!(effects, vec![TransitionEffect::ReturnedToIdle]);
    assert_eq!(controller.phase(), TransitionPhase::Idle);
    assert!(!controller.has_pending_timers());
}

#[test]
fn second_close_is_a_no_op() {
    let start = Instant::now();
    let mut controller = TransitionController::new(TransitionTiming::default());
    controller.handle(
        TransitionMessage::Open {
            tab: GalleryTab::Works,
            focus: None,
        },
        start,
    );
    controller.handle(TransitionMessage::OverlayMountComplete, start);

    controller.handle(TransitionMessage::Close, start);
    let deadline = controller.next_deadline();
    assert_eq!(
        controller.handle(TransitionMessage::Close, start + ms(50)),
        TransitionEffect::None
    );
    assert_eq!(controller.next_deadline(), deadline);
}

#[test]
fn tab_change_is_debounced_for_the_lock_window() {
    let start = Instant::now();
    let timing = TransitionTiming::default();
    let mut controller = TransitionController::new(timing);
    controller.handle(
        TransitionMessage::Open {
            tab: GalleryTab::Works,
            focus: None,
        },
        start,
    );
    controller.handle(TransitionMessage::OverlayMountComplete, start);

    let changed = start + ms(1000);
    assert!(matches!(
        controller.handle(TransitionMessage::ChangeTab(GalleryTab::Videos), changed),
        TransitionEffect::TabChangeStarted { .. }
    ));

    let inside = changed + timing.tab_lock_window() - ms(1);
    controller.poll(inside);
    assert_eq!(
        controller.handle(TransitionMessage::ChangeTab(GalleryTab::Works), inside),
        TransitionEffect::Rejected(Rejection::TabLocked)
    );
    assert_eq!(controller.active_tab(), GalleryTab::Videos);

    let after = changed + timing.tab_lock_window();
    controller.poll(after);
    assert!(matches!(
        controller.handle(TransitionMessage::ChangeTab(GalleryTab::Works), after),
        TransitionEffect::TabChangeStarted { .. }
    ));
}

/// Catalog with three videos backed by real files, so playback succeeds.
fn playable_catalog(files: &[NamedTempFile]) -> Catalog {
    let videos = files
        .iter()
        .zip(1..)
        .map(|(file, id)| CatalogEntry {
            id: MediaId(id),
            title: format!("Video {id}"),
            description: String::new(),
            media_source: MediaSource::File(file.path().to_path_buf()),
            category: None,
            duration_secs: Some(45.0),
        })
        .collect();
    Catalog {
        works: Vec::new(),
        videos,
        projects: Vec::new(),
    }
}

#[test]
fn gallery_keeps_a_single_unit_playing_while_scrolling() {
    let files: Vec<_> = (0..3).map(|_| NamedTempFile::new().unwrap()).collect();
    let mut state = gallery::State::new(
        TransitionTiming::default(),
        PlaybackSettings::default(),
        playable_catalog(&files),
    );
    let handoff = state.settings().handoff;
    let start = Instant::now();

    state.handle(
        Message::Open {
            tab: GalleryTab::Videos,
            focus: Some(MediaId(2)),
        },
        start,
    );
    state.handle(Message::OverlayMountComplete, start);
    state.handle(Message::Scrolled(ViewportSpan::new(0.0, 900.0)), start);
    assert_eq!(state.coordinator().len(), 3);

    state.handle(Message::Unit(video(1), UnitMessage::TogglePlayback), start);
    state.handle(Message::Tick(start + handoff), start + handoff);
    assert_eq!(state.coordinator().playing_keys(), vec![video(1)]);

    // Card 2 spans 468..888; the observed band of this viewport is 580..1300.
    let scrolled = start + ms(100);
    state.handle(Message::Scrolled(ViewportSpan::new(400.0, 900.0)), scrolled);
    assert!(state.coordinator().playing_keys().is_empty());

    state.handle(Message::Unit(video(2), UnitMessage::TogglePlayback), scrolled);
    let started = scrolled + handoff;
    state.handle(Message::Tick(started), started);
    assert_eq!(state.coordinator().playing_keys(), vec![video(2)]);

    state.handle(Message::Unit(video(2), UnitMessage::Pause), started);
    assert!(state.coordinator().playing_keys().is_empty());
    assert_eq!(state.coordinator().current(), None);
}

#[test]
fn teardown_mid_open_leaves_nothing_scheduled() {
    let mut state = gallery::State::default();
    let start = Instant::now();
    state.handle(
        Message::Open {
            tab: GalleryTab::Works,
            focus: None,
        },
        start,
    );
    assert!(state.needs_tick());

    state.handle(Message::Teardown, start + ms(100));
    assert_eq!(state.phase(), TransitionPhase::Idle);
    assert!(!state.needs_tick());

    // A late tick must not mount anything.
    state.handle(Message::Tick(start + ms(5000)), start + ms(5000));
    assert!(state.units().is_empty());
    assert_eq!(state.phase(), TransitionPhase::Idle);
}
