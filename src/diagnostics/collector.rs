// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Gallery and playback code log through a cheap [`DiagnosticsHandle`]; the
//! application drains the channel into the collector's buffer on each tick.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::{
    BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, DiagnosticReport,
    ReportMetadata, SerializableEvent,
};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Sends never block: events are dropped when the channel
/// is full or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.try_log(kind);
    }

    /// Attempts to send an event, returning an error if it was dropped.
    ///
    /// # Errors
    ///
    /// Returns `TrySendError::Full` if the channel is full, or
    /// `TrySendError::Disconnected` if the collector has been dropped.
    pub fn try_log(&self, kind: DiagnosticEventKind) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every pending event from the channel into the buffer.
    ///
    /// Returns the number of events drained.
    pub fn process_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            log::trace!("diagnostics: {}", event.kind.name());
            self.buffer.push(event);
            drained += 1;
        }
        drained
    }

    /// Logs directly to the buffer, bypassing the channel.
    pub fn log(&mut self, kind: DiagnosticEventKind) {
        self.buffer.push(DiagnosticEvent::new(kind));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports the buffer as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    #[allow(clippy::cast_possible_truncation)] // Durations in ms fit in u64
    fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis() as u64,
                kind: event.kind.clone(),
            })
            .collect();

        DiagnosticReport {
            metadata: ReportMetadata::new(
                self.collection_started_at_utc,
                self.collection_started_at.elapsed().as_millis() as u64,
                events.len(),
            ),
            events,
        }
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(key: &str) -> DiagnosticEventKind {
        DiagnosticEventKind::PlaybackStarted {
            key: key.to_string(),
        }
    }

    #[test]
    fn handle_events_wait_in_channel_until_processed() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log(started("video-1"));
        assert!(collector.is_empty());

        assert_eq!(collector.process_pending(), 1);
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn handle_is_clone() {
        let mut collector = DiagnosticsCollector::default();
        let first = collector.handle();
        let second = first.clone();

        first.log(started("video-1"));
        second.log(started("video-2"));
        collector.process_pending();

        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn full_channel_drops_events() {
        let collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        for _ in 0..DEFAULT_CHANNEL_CAPACITY {
            handle.try_log(started("video-1")).expect("channel has room");
        }
        assert!(matches!(
            handle.try_log(started("video-1")),
            Err(TrySendError::Full(_))
        ));
    }

    #[test]
    fn buffer_evicts_beyond_capacity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(0));
        let capacity = collector.capacity();
        for index in 0..capacity + 10 {
            collector.log(started(&format!("video-{index}")));
        }
        assert_eq!(collector.len(), capacity);
    }

    #[test]
    fn events_are_kept_in_order() {
        let mut collector = DiagnosticsCollector::default();
        collector.log(started("video-1"));
        collector.log(DiagnosticEventKind::AutoPaused {
            key: "video-1".to_string(),
        });

        let names: Vec<_> = collector.iter().map(|e| e.kind.name()).collect();
        assert_eq!(names, vec!["playback_started", "auto_paused"]);

        collector.clear();
        assert!(collector.is_empty());
    }

    #[test]
    fn export_json_contains_metadata_and_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.log(DiagnosticEventKind::PhaseChanged {
            from: "idle".to_string(),
            to: "overlay".to_string(),
        });

        let json = collector.export_json().expect("export should succeed");
        let report: DiagnosticReport = serde_json::from_str(&json).expect("valid report");

        assert_eq!(report.metadata.event_count, 1);
        assert_eq!(report.metadata.app_version, env!("CARGO_PKG_VERSION"));
        assert!(json.contains("\"type\": \"phase_changed\""));
        assert_eq!(
            report.events[0].kind,
            DiagnosticEventKind::PhaseChanged {
                from: "idle".to_string(),
                to: "overlay".to_string(),
            }
        );
    }
}
