// SPDX-License-Identifier: MPL-2.0
//! Message handlers of the application.
//!
//! Each handler receives an [`UpdateContext`] borrowing the parts of the
//! application state it may touch, and returns the follow-up task.

use super::Message;
use crate::catalog::Catalog;
use crate::diagnostics::DiagnosticsCollector;
use crate::error::Error;
use crate::ui::gallery::{self, Effect as GalleryEffect};
use crate::ui::home::{self, Event as HomeEvent};
use iced::{window, Size, Task};
use std::time::Instant;

/// Mutable view on the application state used by handlers.
pub struct UpdateContext<'a> {
    pub gallery: &'a mut gallery::State,
    pub diagnostics: &'a mut DiagnosticsCollector,
    pub fullscreen: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
}

pub fn handle_home_message(ctx: &mut UpdateContext<'_>, message: &home::Message) -> Task<Message> {
    match home::update(message) {
        HomeEvent::None => Task::none(),
        HomeEvent::OpenGallery { tab, focus } => handle_gallery_message(
            ctx,
            gallery::Message::Open { tab, focus },
            Instant::now(),
        ),
    }
}

pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
    now: Instant,
) -> Task<Message> {
    let (effect, task) = ctx.gallery.handle(message, now);
    let task = task.map(Message::Gallery);
    match effect {
        GalleryEffect::None => task,
        GalleryEffect::Closed => {
            log::info!("gallery closed");
            Task::batch([task, update_fullscreen_mode(ctx, false)])
        }
        GalleryEffect::SetFullscreen(desired) => {
            Task::batch([task, update_fullscreen_mode(ctx, desired)])
        }
    }
}

/// Drains diagnostics, then advances gallery timers and playback.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.diagnostics.process_pending();
    handle_gallery_message(ctx, gallery::Message::Tick(now), now)
}

pub fn handle_catalog_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<Catalog, Error>,
) -> Task<Message> {
    match result {
        Ok(catalog) => ctx.gallery.set_catalog(catalog),
        Err(error) => log::warn!("{error}; using the built-in catalog"),
    }
    Task::none()
}

pub fn handle_window_resized(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
    size: Size,
) -> Task<Message> {
    *ctx.window_id = Some(window);
    handle_gallery_message(ctx, gallery::Message::WindowResized(size), Instant::now())
}

/// Escape leaves video fullscreen first, then closes the gallery.
pub fn handle_escape(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let message = match ctx.gallery.fullscreen_unit() {
        Some(unit) => gallery::Message::Unit(
            unit.key(),
            crate::playback::unit::Message::ToggleFullscreen,
        ),
        None => gallery::Message::Close,
    };
    handle_gallery_message(ctx, message, Instant::now())
}

/// Tears the gallery down (cancelling timers, pausing every unit) and closes the window.
pub fn handle_close_requested(ctx: &mut UpdateContext<'_>, window: window::Id) -> Task<Message> {
    let teardown = handle_gallery_message(ctx, gallery::Message::Teardown, Instant::now());
    ctx.diagnostics.process_pending();

    if log::log_enabled!(log::Level::Debug) {
        match ctx.diagnostics.export_json() {
            Ok(report) => log::debug!("diagnostics report:\n{report}"),
            Err(error) => log::warn!("could not serialize diagnostics: {error}"),
        }
    }
    teardown.chain(window::close(window))
}

fn update_fullscreen_mode(ctx: &mut UpdateContext<'_>, desired: bool) -> Task<Message> {
    if *ctx.fullscreen == desired {
        return Task::none();
    }

    let Some(window_id) = ctx.window_id.as_ref() else {
        return Task::none();
    };

    *ctx.fullscreen = desired;
    let mode = if desired {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(*window_id, mode)
}
