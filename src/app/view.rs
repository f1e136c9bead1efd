// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The home page is always rendered; the gallery overlay is stacked on top
//! of it whenever the transition controller is not idle.

use super::Message;
use crate::gallery::TransitionPhase;
use crate::i18n::fluent::I18n;
use crate::ui::{gallery, home};
use iced::{
    widget::{Container, Stack},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub gallery: &'a gallery::State,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let home = home::view(home::ViewContext {
        i18n: ctx.i18n,
        projects: &ctx.gallery.catalog().projects,
        interactive: ctx.gallery.phase() == TransitionPhase::Idle,
    })
    .map(Message::Home);

    let mut layers = Stack::new().push(
        Container::new(home)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    if let Some(overlay) = gallery::view(gallery::ViewContext {
        state: ctx.gallery,
        i18n: ctx.i18n,
    }) {
        layers = layers.push(overlay.map(Message::Gallery));
    }

    layers.width(Length::Fill).height(Length::Fill).into()
}
