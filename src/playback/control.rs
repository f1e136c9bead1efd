// SPDX-License-Identifier: MPL-2.0
//! Control handle shared between a video unit and the coordinator.
//!
//! The unit owns the handle through an `Arc`; the coordinator keeps only a
//! `Weak<dyn PlaybackControl>`, so a handle never outlives its unit.

use super::engine::PlaybackEngine;
use crate::error::VideoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Prefix of clips shipped inside the application, e.g. `bundled:nike`.
pub const BUNDLED_PREFIX: &str = "bundled:";

/// Location of a playable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaSource {
    File(PathBuf),
    Url(String),
    /// Clip shipped with the application; always available.
    Bundled(String),
}

impl MediaSource {
    /// Anchors a relative file path at `base`. Other sources are unchanged.
    #[must_use]
    pub fn resolved_against(self, base: &Path) -> Self {
        match self {
            Self::File(path) if path.is_relative() => Self::File(base.join(path)),
            other => other,
        }
    }
}

impl From<String> for MediaSource {
    fn from(value: String) -> Self {
        if let Some(name) = value.strip_prefix(BUNDLED_PREFIX) {
            Self::Bundled(name.to_string())
        } else if value.contains("://") {
            Self::Url(value)
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl From<&str> for MediaSource {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<MediaSource> for String {
    fn from(source: MediaSource) -> Self {
        source.to_string()
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Bundled(name) => write!(f, "{BUNDLED_PREFIX}{name}"),
        }
    }
}

/// Capability the coordinator uses to stop a unit.
pub trait PlaybackControl: Send + Sync + fmt::Debug {
    /// Pauses playback. Returns whether the unit was playing.
    ///
    /// Calling this on a paused unit is a no-op.
    fn pause(&self) -> bool;

    fn is_playing(&self) -> bool;

    fn source(&self) -> &MediaSource;
}

/// Playing flag plus the engine that actually plays the source.
pub struct ControlHandle {
    source: MediaSource,
    playing: AtomicBool,
    engine: Mutex<Box<dyn PlaybackEngine>>,
}

impl fmt::Debug for ControlHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlHandle")
            .field("source", &self.source)
            .field("playing", &self.is_playing())
            .finish_non_exhaustive()
    }
}

impl ControlHandle {
    #[must_use]
    pub fn new(source: MediaSource, engine: Box<dyn PlaybackEngine>) -> Self {
        Self {
            source,
            playing: AtomicBool::new(false),
            engine: Mutex::new(engine),
        }
    }

    /// Starts the engine. The playing flag is only set on success.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`VideoError`] if playback could not start.
    pub fn play(&self) -> Result<(), VideoError> {
        let mut engine = self.engine();
        engine.play()?;
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Clears the playing flag after the media reached its end.
    pub fn mark_ended(&self) {
        if self.playing.swap(false, Ordering::SeqCst) {
            self.engine().pause();
        }
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut dyn PlaybackEngine) -> R) -> R {
        let mut engine = self.engine();
        f(engine.as_mut())
    }

    // A panic while holding the lock leaves the engine usable.
    fn engine(&self) -> MutexGuard<'_, Box<dyn PlaybackEngine>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlaybackControl for ControlHandle {
    fn pause(&self) -> bool {
        let was_playing = self.playing.swap(false, Ordering::SeqCst);
        if was_playing {
            self.engine().pause();
        }
        was_playing
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn source(&self) -> &MediaSource {
        &self.source
    }
}
