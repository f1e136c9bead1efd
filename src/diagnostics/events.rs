// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for gallery and playback activity.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock).
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new event stamped with the current instant.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// The gallery moved to a new transition phase.
    PhaseChanged { from: String, to: String },

    /// A gallery request was ignored in the current phase.
    TransitionRejected { request: String, phase: String },

    /// A unit asked to play; `paused` other units were stopped.
    PlaybackHandoff { key: String, paused: usize },

    /// A unit won its handoff and started playing.
    PlaybackStarted { key: String },

    /// A unit paused itself after scrolling out of view.
    AutoPaused { key: String },

    /// The playback engine refused to start.
    PlaybackFailed { key: String, message: String },
}

impl DiagnosticEventKind {
    /// Short name used in log lines.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PhaseChanged { .. } => "phase_changed",
            Self::TransitionRejected { .. } => "transition_rejected",
            Self::PlaybackHandoff { .. } => "playback_handoff",
            Self::PlaybackStarted { .. } => "playback_started",
            Self::AutoPaused { .. } => "auto_paused",
            Self::PlaybackFailed { .. } => "playback_failed",
        }
    }
}
