// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the home page and the
//! overlay gallery.
//!
//! The `App` struct wires together configuration, localization, the catalog,
//! diagnostics and the gallery composition root, and translates messages into
//! side effects such as window mode changes or the asynchronous catalog load.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use subscription::TICK_INTERVAL;

use crate::catalog::Catalog;
use crate::diagnostics::DiagnosticsCollector;
use crate::gallery::TransitionPhase;
use crate::i18n::fluent::I18n;
use crate::ui::gallery;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    gallery: gallery::State,
    diagnostics: DiagnosticsCollector,
    fullscreen: bool,
    window_id: Option<window::Id>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("phase", &self.gallery.phase())
            .field("fullscreen", &self.fullscreen)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1200;
pub const MIN_WINDOW_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 720;

/// Builds the window settings.
///
/// Close requests are not honoured directly: the gallery is torn down first.
#[allow(clippy::cast_precision_loss)]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration and translations, then starts the catalog load
    /// when a catalog file is configured.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        if let Some(key) = config_warning {
            log::warn!("{}", i18n.tr(&key));
        }

        let diagnostics = DiagnosticsCollector::new(config.buffer_capacity());
        let mut gallery = gallery::State::new(
            config.transition_timing(),
            config.playback_settings(),
            Catalog::builtin(),
        );
        gallery.set_diagnostics(diagnostics.handle());

        let task = match flags.catalog.or_else(|| config.catalog.path.clone()) {
            Some(path) => {
                log::info!("loading catalog from {}", path.display());
                Task::perform(Catalog::load(path), Message::CatalogLoaded)
            }
            None => Task::none(),
        };

        let app = App {
            i18n,
            gallery,
            diagnostics,
            fullscreen: false,
            window_id: None,
        };
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        if self.gallery.phase() == TransitionPhase::Idle {
            return app_name;
        }
        let tab = self
            .i18n
            .tr(self.gallery.controller().active_tab().label_key());
        format!("{tab} - {app_name}")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(self.gallery.needs_tick());
        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            gallery: &mut self.gallery,
            diagnostics: &mut self.diagnostics,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
        };

        match message {
            Message::Home(home_message) => update::handle_home_message(&mut ctx, &home_message),
            Message::Gallery(gallery::Message::Tick(now)) | Message::Tick(now) => {
                update::handle_tick(&mut ctx, now)
            }
            Message::Gallery(gallery_message) => update::handle_gallery_message(
                &mut ctx,
                gallery_message,
                std::time::Instant::now(),
            ),
            Message::CatalogLoaded(result) => update::handle_catalog_loaded(&mut ctx, result),
            Message::EscapePressed => update::handle_escape(&mut ctx),
            Message::WindowResized { window, size } => {
                update::handle_window_resized(&mut ctx, window, size)
            }
            Message::WindowCloseRequested(window) => {
                update::handle_close_requested(&mut ctx, window)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            gallery: &self.gallery,
        })
    }
}
