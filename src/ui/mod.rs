// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! exposes a `Message`, a way to handle it that returns an effect for the
//! parent, and a `view` taking a `ViewContext`.
//!
//! - [`home`] - Hero, gallery entry buttons and project list
//! - [`gallery`] - Overlay gallery with coordinated video cards
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod gallery;
pub mod home;
pub mod styles;
