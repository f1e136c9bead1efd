// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Transitions**: Gallery open/close choreography delays
//! - **Playback**: Handoff yield and viewport visibility threshold
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Transition Defaults (milliseconds)
// ==========================================================================

/// Duration of the dimming overlay entrance before the gallery mounts.
pub const DEFAULT_OVERLAY_ENTER_MS: u64 = 600;

/// Delay between the background panel and the content fade-in.
pub const DEFAULT_CONTENT_REVEAL_MS: u64 = 150;

/// Delay before scrolling to a requested media card after mount.
pub const DEFAULT_SCROLL_TO_MEDIA_MS: u64 = 700;

/// Content fade-out duration when closing the gallery.
pub const DEFAULT_CONTENT_FADE_OUT_MS: u64 = 150;

/// Overlay slide-out duration, runs after the content is gone.
pub const DEFAULT_OVERLAY_SLIDE_OUT_MS: u64 = 400;

/// Lock window before a requested tab change swaps the content.
pub const DEFAULT_TAB_SWAP_MS: u64 = 100;

/// Slide animation duration after a tab swap; the tab lock is held until it ends.
pub const DEFAULT_TAB_SETTLE_MS: u64 = 450;

/// Upper bound accepted for any configured transition delay.
pub const MAX_TRANSITION_MS: u64 = 5_000;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Yield between the pause sweep and the actual play call.
pub const DEFAULT_HANDOFF_MS: u64 = 50;

/// Upper bound for the handoff yield.
pub const MAX_HANDOFF_MS: u64 = 500;

/// Minimum visible fraction of a video card before it must pause.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.2;

/// Fraction of the viewport height trimmed from the top and bottom edges
/// when computing visibility.
pub const VISIBILITY_ROOT_MARGIN: f32 = 0.2;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostic buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostic buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;
