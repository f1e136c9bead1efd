// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, read from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[transitions]` - Gallery open/close choreography delays
//! - `[playback]` - Handoff yield, visibility threshold, initial mute
//! - `[catalog]` - Optional external catalog file
//! - `[diagnostics]` - Event buffer capacity
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. Set `ICED_FOLIO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_folio::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("{key}");
//! }
//!
//! let timing = config.transition_timing();
//! assert!(timing.tab_lock_window() > timing.tab_swap);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::diagnostics::BufferCapacity;
use crate::error::{Error, Result};
use crate::gallery::TransitionTiming;
use crate::playback::{PlaybackSettings, VisibilityThreshold};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Gallery transition delays, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitionsConfig {
    #[serde(default = "default_overlay_enter_ms")]
    pub overlay_enter_ms: u64,
    #[serde(default = "default_content_reveal_ms")]
    pub content_reveal_ms: u64,
    #[serde(default = "default_scroll_to_media_ms")]
    pub scroll_to_media_ms: u64,
    #[serde(default = "default_content_fade_out_ms")]
    pub content_fade_out_ms: u64,
    #[serde(default = "default_overlay_slide_out_ms")]
    pub overlay_slide_out_ms: u64,
    #[serde(default = "default_tab_swap_ms")]
    pub tab_swap_ms: u64,
    #[serde(default = "default_tab_settle_ms")]
    pub tab_settle_ms: u64,
}

impl Default for TransitionsConfig {
    fn default() -> Self {
        Self {
            overlay_enter_ms: DEFAULT_OVERLAY_ENTER_MS,
            content_reveal_ms: DEFAULT_CONTENT_REVEAL_MS,
            scroll_to_media_ms: DEFAULT_SCROLL_TO_MEDIA_MS,
            content_fade_out_ms: DEFAULT_CONTENT_FADE_OUT_MS,
            overlay_slide_out_ms: DEFAULT_OVERLAY_SLIDE_OUT_MS,
            tab_swap_ms: DEFAULT_TAB_SWAP_MS,
            tab_settle_ms: DEFAULT_TAB_SETTLE_MS,
        }
    }
}

/// Video playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Yield between pausing other units and starting playback.
    #[serde(default = "default_handoff_ms")]
    pub handoff_ms: u64,

    /// Visible fraction below which a playing unit pauses itself.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,

    /// Whether units start muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_muted: Option<bool>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            handoff_ms: DEFAULT_HANDOFF_MS,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            start_muted: Some(false),
        }
    }
}

/// External catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogConfig {
    /// TOML file describing works and videos. The built-in catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Diagnostics buffer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub transitions: TransitionsConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Converts the `[transitions]` section into controller timing,
    /// clamping each delay to `MAX_TRANSITION_MS`.
    #[must_use]
    pub fn transition_timing(&self) -> TransitionTiming {
        let ms = |value: u64| Duration::from_millis(value.min(MAX_TRANSITION_MS));
        let t = &self.transitions;
        TransitionTiming {
            overlay_enter: ms(t.overlay_enter_ms),
            content_reveal: ms(t.content_reveal_ms),
            scroll_to_media: ms(t.scroll_to_media_ms),
            content_fade_out: ms(t.content_fade_out_ms),
            overlay_slide_out: ms(t.overlay_slide_out_ms),
            tab_swap: ms(t.tab_swap_ms),
            tab_settle: ms(t.tab_settle_ms),
        }
    }

    /// Converts the `[playback]` section into coordinator settings.
    #[must_use]
    pub fn playback_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            handoff: Duration::from_millis(self.playback.handoff_ms.min(MAX_HANDOFF_MS)),
            visibility_threshold: VisibilityThreshold::new(self.playback.visibility_threshold),
            start_muted: self.playback.start_muted.unwrap_or(false),
        }
    }

    #[must_use]
    pub fn buffer_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(self.diagnostics.buffer_capacity)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_overlay_enter_ms() -> u64 {
    DEFAULT_OVERLAY_ENTER_MS
}

fn default_content_reveal_ms() -> u64 {
    DEFAULT_CONTENT_REVEAL_MS
}

fn default_scroll_to_media_ms() -> u64 {
    DEFAULT_SCROLL_TO_MEDIA_MS
}

fn default_content_fade_out_ms() -> u64 {
    DEFAULT_CONTENT_FADE_OUT_MS
}

fn default_overlay_slide_out_ms() -> u64 {
    DEFAULT_OVERLAY_SLIDE_OUT_MS
}

fn default_tab_swap_ms() -> u64 {
    DEFAULT_TAB_SWAP_MS
}

fn default_tab_settle_ms() -> u64 {
    DEFAULT_TAB_SETTLE_MS
}

fn default_handoff_ms() -> u64 {
    DEFAULT_HANDOFF_MS
}

fn default_visibility_threshold() -> f32 {
    DEFAULT_VISIBILITY_THRESHOLD
}

fn default_buffer_capacity() -> usize {
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring unreadable config {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        config.transitions.overlay_slide_out_ms = 320;
        config.playback.start_muted = Some(true);
        config.catalog.path = Some(PathBuf::from("/srv/folio/catalog.toml"));

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        assert!(matches!(load_from_path(&config_path), Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[transitions]\ntab_swap_ms = \"soon\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[transitions]\ncontent_fade_out_ms = 90\n")
            .expect("partial config should parse");
        assert_eq!(config.transitions.content_fade_out_ms, 90);
        assert_eq!(config.transitions.overlay_slide_out_ms, DEFAULT_OVERLAY_SLIDE_OUT_MS);
        assert_eq!(config.playback.handoff_ms, DEFAULT_HANDOFF_MS);
    }

    #[test]
    fn transition_timing_clamps_long_delays() {
        let mut config = Config::default();
        config.transitions.overlay_slide_out_ms = 60_000;
        let timing = config.transition_timing();
        assert_eq!(timing.overlay_slide_out, Duration::from_millis(MAX_TRANSITION_MS));
        assert_eq!(
            timing.content_fade_out,
            Duration::from_millis(DEFAULT_CONTENT_FADE_OUT_MS)
        );
    }

    #[test]
    fn playback_settings_clamp_threshold_and_handoff() {
        let mut config = Config::default();
        config.playback.visibility_threshold = 3.0;
        config.playback.handoff_ms = 10_000;
        let settings = config.playback_settings();
        assert_eq!(settings.visibility_threshold.value(), 1.0);
        assert_eq!(settings.handoff, Duration::from_millis(MAX_HANDOFF_MS));
    }
}
