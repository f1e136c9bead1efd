// SPDX-License-Identifier: MPL-2.0
//! Subscription management for the application.

use super::Message;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval of the animation tick (one frame at 60 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Window lifecycle and keyboard events.
///
/// Close requests are intercepted so the gallery can be torn down before the
/// window goes away.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match &event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Window(
            window::Event::Opened { size, .. } | window::Event::Resized(size),
        ) => Some(Message::WindowResized {
            window: window_id,
            size: *size,
        }),
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            ..
        }) if status == event::Status::Ignored => Some(Message::EscapePressed),
        _ => None,
    })
}

/// Periodic tick driving gallery timers and playback position.
pub fn create_tick_subscription(needs_tick: bool) -> Subscription<Message> {
    if needs_tick {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
