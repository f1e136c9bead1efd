// SPDX-License-Identifier: MPL-2.0
//! `iced_folio` is a portfolio showcase built with the Iced GUI framework.
//!
//! Its core is the overlay gallery: a phase-driven open/close choreography
//! ([`gallery`]) and a playback coordinator that keeps at most one video
//! card playing ([`playback`]).

#![doc(html_root_url = "https://docs.rs/iced_folio/0.1.0")]

pub mod app;
pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod playback;
pub mod ui;
