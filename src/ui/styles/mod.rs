// SPDX-License-Identifier: MPL-2.0
//! Shared widget styles.

pub mod button;
pub mod container;

pub use button::{overlay as button_overlay, primary as button_primary};
