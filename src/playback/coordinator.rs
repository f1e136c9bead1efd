// SPDX-License-Identifier: MPL-2.0
//! Registry of mounted video units enforcing single playback.
//!
//! Units register their control handle under a [`MediaKey`]. Before a unit
//! starts playing it announces itself with
//! [`notify_play_starting`](PlaybackCoordinator::notify_play_starting), which
//! pauses every other unit. The unit then yields briefly and calls
//! [`claim`](PlaybackCoordinator::claim); only the latest contender wins, so
//! overlapping requests cannot both start.
//!
//! Entries are weak references. A dropped unit's entry is a no-op and is
//! pruned on the next mutating call.

use super::control::PlaybackControl;
use super::key::MediaKey;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

#[derive(Debug, Default)]
pub struct PlaybackCoordinator {
    registry: HashMap<MediaKey, Weak<dyn PlaybackControl>>,
    contender: Option<MediaKey>,
    current: Option<MediaKey>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl PlaybackCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Registers `handle` under `key`. Last write wins.
    ///
    /// A different, still-alive handle previously stored under the same key
    /// is paused so it cannot keep playing unregistered.
    pub fn register<H>(&mut self, key: MediaKey, handle: &Arc<H>)
    where
        H: PlaybackControl + 'static,
    {
        self.prune();
        let shared: Arc<dyn PlaybackControl> = handle.clone();
        let weak = Arc::downgrade(&shared);

        if let Some(previous) = self.registry.insert(key, weak.clone()) {
            if !Weak::ptr_eq(&previous, &weak) {
                if let Some(previous) = previous.upgrade() {
                    if previous.pause() {
                        log::debug!("paused replaced handle for {key}");
                    }
                }
                if self.current == Some(key) {
                    self.current = None;
                }
            }
        }
    }

    /// Removes `key` without pausing it. Returns whether it was registered.
    pub fn unregister(&mut self, key: MediaKey) -> bool {
        if self.contender == Some(key) {
            self.contender = None;
        }
        if self.current == Some(key) {
            self.current = None;
        }
        self.registry.remove(&key).is_some()
    }

    /// Pauses every other playing unit and records `key` as the contender
    /// for the next [`claim`](Self::claim). Returns the number paused.
    pub fn notify_play_starting(&mut self, key: MediaKey) -> usize {
        self.prune();
        let paused = self.pause_others(Some(key));
        if self.current != Some(key) {
            self.current = None;
        }
        self.contender = Some(key);

        log::debug!("{key} is starting playback, paused {paused} other unit(s)");
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log(DiagnosticEventKind::PlaybackHandoff {
                key: key.to_string(),
                paused,
            });
        }
        paused
    }

    /// Completes a handoff. Succeeds only if `key` is still the latest
    /// contender and still registered; it then becomes the current unit.
    pub fn claim(&mut self, key: MediaKey) -> bool {
        self.prune();
        if self.contender != Some(key) || !self.registry.contains_key(&key) {
            log::debug!("handoff for {key} superseded");
            return false;
        }
        self.contender = None;
        self.pause_others(Some(key));
        self.current = Some(key);
        true
    }

    /// Bookkeeping for a unit that paused itself.
    pub fn notify_paused(&mut self, key: MediaKey) {
        if self.current == Some(key) {
            self.current = None;
        }
    }

    /// Pauses every registered unit except `except`. Returns the number paused.
    ///
    /// Without an exception, any outstanding handoff is cancelled as well.
    pub fn force_pause_all(&mut self, except: Option<MediaKey>) -> usize {
        self.prune();
        let paused = self.pause_others(except);
        if self.current != except {
            self.current = None;
        }
        if except.is_none() {
            self.contender = None;
        }
        paused
    }

    /// Pauses everything, then drops every entry.
    pub fn clear(&mut self) -> usize {
        let paused = self.force_pause_all(None);
        self.registry.clear();
        paused
    }

    #[must_use]
    pub fn is_playing(&self, key: MediaKey) -> bool {
        self.registry
            .get(&key)
            .and_then(Weak::upgrade)
            .is_some_and(|handle| handle.is_playing())
    }

    /// Keys of every live unit currently playing, sorted.
    #[must_use]
    pub fn playing_keys(&self) -> Vec<MediaKey> {
        let mut keys: Vec<MediaKey> = self
            .registry
            .iter()
            .filter(|(_, weak)| weak.upgrade().is_some_and(|handle| handle.is_playing()))
            .map(|(key, _)| *key)
            .collect();
        keys.sort();
        keys
    }

    #[must_use]
    pub fn current(&self) -> Option<MediaKey> {
        self.current
    }

    #[must_use]
    pub fn contender(&self) -> Option<MediaKey> {
        self.contender
    }

    #[must_use]
    pub fn contains(&self, key: MediaKey) -> bool {
        self.registry
            .get(&key)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pause_others(&self, except: Option<MediaKey>) -> usize {
        self.registry
            .iter()
            .filter(|(key, _)| Some(**key) != except)
            .filter_map(|(_, weak)| weak.upgrade())
            .filter(|handle| handle.pause())
            .count()
    }

    fn prune(&mut self) {
        let before = self.registry.len();
        self.registry.retain(|_, weak| weak.strong_count() > 0);
        let pruned = before - self.registry.len();
        if pruned > 0 {
            log::trace!("pruned {pruned} dropped playback handle(s)");
        }
        if self.contender.is_some_and(|key| !self.registry.contains_key(&key)) {
            self.contender = None;
        }
        if self.current.is_some_and(|key| !self.registry.contains_key(&key)) {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaId;
    use crate::gallery::GalleryTab;
    use crate::playback::control::MediaSource;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug)]
    struct FakeHandle {
        playing: AtomicBool,
        source: MediaSource,
    }

    impl FakeHandle {
        fn new(playing: bool) -> Arc<Self> {
            Arc::new(Self {
                playing: AtomicBool::new(playing),
                source: MediaSource::from("https://example.invalid/clip.mp4"),
            })
        }

        fn start(&self) {
            self.playing.store(true, Ordering::SeqCst);
        }
    }

    impl PlaybackControl for FakeHandle {
        fn pause(&self) -> bool {
            self.playing.swap(false, Ordering::SeqCst)
        }

        fn is_playing(&self) -> bool {
            self.playing.load(Ordering::SeqCst)
        }

        fn source(&self) -> &MediaSource {
            &self.source
        }
    }

    fn video(id: u32) -> MediaKey {
        MediaKey::new(GalleryTab::Videos, MediaId(id))
    }

    #[test]
    fn play_starting_pauses_every_other_unit() {
        let mut coordinator = PlaybackCoordinator::new();
        let first = FakeHandle::new(true);
        let second = FakeHandle::new(true);
        let third = FakeHandle::new(false);
        coordinator.register(video(1), &first);
        coordinator.register(video(2), &second);
        coordinator.register(video(3), &third);

        assert_eq!(coordinator.notify_play_starting(video(3)), 2);
        assert!(!first.is_playing());
        assert!(!second.is_playing());
        assert_eq!(coordinator.contender(), Some(video(3)));
    }

    #[test]
    fn requester_is_not_paused_by_its_own_sweep() {
        let mut coordinator = PlaybackCoordinator::new();
        let handle = FakeHandle::new(true);
        coordinator.register(video(1), &handle);

        assert_eq!(coordinator.notify_play_starting(video(1)), 0);
        assert!(handle.is_playing());
    }

    #[test]
    fn only_latest_contender_can_claim() {
        let mut coordinator = PlaybackCoordinator::new();
        let first = FakeHandle::new(false);
        let second = FakeHandle::new(false);
        coordinator.register(video(1), &first);
        coordinator.register(video(2), &second);

        coordinator.notify_play_starting(video(1));
        coordinator.notify_play_starting(video(2));

        assert!(!coordinator.claim(video(1)));
        assert!(coordinator.claim(video(2)));
        assert_eq!(coordinator.current(), Some(video(2)));
        assert!(!coordinator.claim(video(2)), "claims are single use");
    }

    #[test]
    fn dropped_units_are_no_ops() {
        let mut coordinator = PlaybackCoordinator::new();
        let survivor = FakeHandle::new(false);
        coordinator.register(video(2), &survivor);
        {
            let dropped = FakeHandle::new(true);
            coordinator.register(video(1), &dropped);
        }

        assert_eq!(coordinator.len(), 1);
        assert!(!coordinator.is_playing(video(1)));
        assert_eq!(coordinator.notify_play_starting(video(2)), 0);
        assert!(!coordinator.contains(video(1)));
    }

    #[test]
    fn dropped_contender_cannot_claim() {
        let mut coordinator = PlaybackCoordinator::new();
        let handle = FakeHandle::new(false);
        coordinator.register(video(1), &handle);
        coordinator.notify_play_starting(video(1));
        drop(handle);

        assert!(!coordinator.claim(video(1)));
        assert_eq!(coordinator.contender(), None);
    }

    #[test]
    fn unknown_keys_are_no_ops() {
        let mut coordinator = PlaybackCoordinator::new();
        assert!(!coordinator.is_playing(video(9)));
        assert!(!coordinator.unregister(video(9)));
        coordinator.notify_paused(video(9));
        assert!(!coordinator.claim(video(9)));
    }

    #[test]
    fn register_replacing_live_handle_pauses_it() {
        let mut coordinator = PlaybackCoordinator::new();
        let old = FakeHandle::new(true);
        let new = FakeHandle::new(false);
        coordinator.register(video(1), &old);
        coordinator.register(video(1), &new);

        assert!(!old.is_playing());
        assert_eq!(coordinator.len(), 1);
        new.start();
        assert!(coordinator.is_playing(video(1)));
    }

    #[test]
    fn registering_same_handle_twice_keeps_it_playing() {
        let mut coordinator = PlaybackCoordinator::new();
        let handle = FakeHandle::new(true);
        coordinator.register(video(1), &handle);
        coordinator.register(video(1), &handle);
        assert!(handle.is_playing());
    }

    #[test]
    fn unregister_does_not_pause() {
        let mut coordinator = PlaybackCoordinator::new();
        let handle = FakeHandle::new(true);
        coordinator.register(video(1), &handle);

        assert!(coordinator.unregister(video(1)));
        assert!(handle.is_playing());
        assert!(coordinator.is_empty());
    }

    #[test]
    fn force_pause_all_respects_exception() {
        let mut coordinator = PlaybackCoordinator::new();
        let keep = FakeHandle::new(true);
        let stop = FakeHandle::new(true);
        coordinator.register(video(1), &keep);
        coordinator.register(video(2), &stop);

        assert_eq!(coordinator.force_pause_all(Some(video(1))), 1);
        assert_eq!(coordinator.playing_keys(), vec![video(1)]);

        assert_eq!(coordinator.force_pause_all(None), 1);
        assert!(coordinator.playing_keys().is_empty());
    }

    #[test]
    fn force_pause_all_without_exception_cancels_handoff() {
        let mut coordinator = PlaybackCoordinator::new();
        let handle = FakeHandle::new(false);
        coordinator.register(video(1), &handle);
        coordinator.notify_play_starting(video(1));

        coordinator.force_pause_all(None);
        assert!(!coordinator.claim(video(1)));
    }

    #[test]
    fn clear_pauses_then_empties() {
        let mut coordinator = PlaybackCoordinator::new();
        let handle = FakeHandle::new(true);
        coordinator.register(video(1), &handle);

        assert_eq!(coordinator.clear(), 1);
        assert!(!handle.is_playing());
        assert!(coordinator.is_empty());
        assert_eq!(coordinator.current(), None);
    }

    #[test]
    fn notify_paused_clears_current() {
        let mut coordinator = PlaybackCoordinator::new();
        let handle = FakeHandle::new(false);
        coordinator.register(video(1), &handle);
        coordinator.notify_play_starting(video(1));
        coordinator.claim(video(1));

        coordinator.notify_paused(video(1));
        assert_eq!(coordinator.current(), None);
    }

    #[test]
    fn at_most_one_unit_plays_after_each_handoff() {
        let mut coordinator = PlaybackCoordinator::new();
        let handles: Vec<_> = (1..=6).map(|_| FakeHandle::new(false)).collect();
        for (index, handle) in handles.iter().enumerate() {
            coordinator.register(video(index as u32 + 1), handle);
        }

        let mut seed: u32 = 17;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let index = (seed >> 16) as usize % handles.len();
            let key = video(index as u32 + 1);

            coordinator.notify_play_starting(key);
            if coordinator.claim(key) {
                handles[index].start();
            }
            assert!(coordinator.playing_keys().len() <= 1);
        }
    }

    #[test]
    fn handoff_is_recorded_in_diagnostics() {
        let mut collector = crate::diagnostics::DiagnosticsCollector::default();
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.set_diagnostics(collector.handle());
        let playing = FakeHandle::new(true);
        coordinator.register(video(1), &playing);

        coordinator.notify_play_starting(video(3));
        collector.process_pending();

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticEventKind::PlaybackHandoff {
                key: "video-3".to_string(),
                paused: 1,
            }]
        );
    }
}
