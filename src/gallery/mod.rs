// SPDX-License-Identifier: MPL-2.0
//! Overlay gallery choreography: phases, tabs and the timers that drive them.

pub mod phase;
pub mod tab;
pub mod timers;
pub mod transition;

pub use phase::TransitionPhase;
pub use tab::{GalleryTab, SlideDirection};
pub use timers::TimerSet;
pub use transition::{
    Effect as TransitionEffect, Message as TransitionMessage, Rejection, TimerEvent,
    TransitionController, TransitionTiming,
};
