// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::catalog::Catalog;
use crate::error::Error;
use crate::ui::{gallery, home};
use iced::{window, Size};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    Gallery(gallery::Message),
    CatalogLoaded(Result<Catalog, Error>),
    /// Animation and playback tick, only subscribed while the gallery needs it.
    Tick(Instant),
    EscapePressed,
    WindowResized {
        window: window::Id,
        size: Size,
    },
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override (`--lang`).
    pub lang: Option<String>,
    /// Optional config directory override (`--config-dir`).
    pub config_dir: Option<String>,
    /// Optional catalog file (`--catalog`), takes precedence over `[catalog] path`.
    pub catalog: Option<PathBuf>,
}
