// SPDX-License-Identifier: MPL-2.0
//! Overlay gallery: choreographed open/close, tabs and coordinated video cards.

pub mod component;
pub mod view;

pub use component::{card_top, Effect, Message, State, SCROLLABLE_ID};
pub use view::{view, ViewContext};
