// SPDX-License-Identifier: MPL-2.0
//! Rendering of the overlay gallery: scrim, header, cards and controls.

use super::component::{Message, State, SCROLLABLE_ID};
use crate::gallery::{GalleryTab, TransitionPhase};
use crate::i18n::fluent::I18n;
use crate::playback::{format_time, unit, VideoUnit, ViewportSpan};
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{
        button, opaque, scrollable::Viewport, slider, text, Column, Container, Row,
        Scrollable, Space, Stack, Text,
    },
    widget::Id,
    Element, Length, Padding,
};

pub struct ViewContext<'a> {
    pub state: &'a State,
    pub i18n: &'a I18n,
}

/// Renders the overlay, or nothing while the gallery is idle.
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Option<Element<'_, Message>> {
    let controller = ctx.state.controller();
    let phase = controller.phase();
    if !phase.shows_overlay() {
        return None;
    }

    let scrim = Container::new(Space::new().width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::scrim(scrim_alpha(
            phase,
            controller.is_gallery_visible(),
        )));

    let mut layers = Stack::new().push(scrim);
    if controller.is_gallery_visible() {
        let body = match ctx.state.fullscreen_unit() {
            Some(unit) => fullscreen_card(unit, ctx.i18n),
            None if controller.is_content_revealed() => card_list(ctx.state, ctx.i18n),
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
        };

        let mut content = Column::new().width(Length::Fill).height(Length::Fill);
        if ctx.state.fullscreen_unit().is_none() {
            content = content.push(header(&ctx));
        }
        layers = layers.push(content.push(body));
    }

    Some(opaque(layers))
}

/// Offsets the card list by leaving empty space on the side it moves away from.
fn slide_padding(offset: f32) -> Padding {
    let shift = offset.clamp(-1.0, 1.0) * sizing::SLIDE_DISTANCE;
    Padding {
        left: shift.max(0.0),
        right: (-shift).max(0.0),
        ..Padding::ZERO
    }
}

/// The scrim darkens fully while open and lightens as the overlay retracts.
fn scrim_alpha(phase: TransitionPhase, gallery_visible: bool) -> f32 {
    match phase {
        TransitionPhase::Idle => opacity::TRANSPARENT,
        TransitionPhase::Closing if !gallery_visible => opacity::OVERLAY_MEDIUM,
        _ => opacity::OVERLAY_STRONG,
    }
}

fn header<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let controller = ctx.state.controller();
    let active = controller.active_tab();
    let locked = controller.is_tab_locked();

    let tabs = GalleryTab::ALL
        .into_iter()
        .fold(Row::new().spacing(spacing::XS), |row, tab| {
            let style = if tab == active {
                styles::button::selected
            } else {
                styles::button::unselected
            };
            row.push(
                button(text(ctx.i18n.tr(tab.label_key())).size(typography::BODY))
                    .style(style)
                    .on_press_maybe((!locked && tab != active).then_some(Message::ChangeTab(tab))),
            )
        });

    let count = ctx.state.catalog().entries(active).len().to_string();
    let close = button(text(ctx.i18n.tr("gallery-close")).size(typography::BODY))
        .style(styles::button::overlay(palette::WHITE, opacity::OVERLAY_MEDIUM, 0.8))
        .padding([spacing::XXS, spacing::SM])
        .on_press_maybe((controller.phase() == TransitionPhase::Content).then_some(Message::Close));

    Container::new(
        Row::new()
            .spacing(spacing::LG)
            .align_y(Vertical::Center)
            .push(Text::new(ctx.i18n.tr("gallery-title")).size(typography::TITLE_MD))
            .push(tabs)
            .push(
                Text::new(ctx.i18n.tr_with_args("gallery-count", &[("count", count.as_str())]))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_200),
            )
            .push(Space::new().width(Length::Fill))
            .push(close),
    )
    .padding([0.0, spacing::LG])
    .height(sizing::GALLERY_HEADER_HEIGHT)
    .width(Length::Fill)
    .align_y(Vertical::Center)
    .into()
}

fn card_list<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    if state.units().is_empty() {
        return Container::new(Text::new(i18n.tr("gallery-empty")).size(typography::BODY_LG))
            .center(Length::Fill)
            .into();
    }

    // Cards of the outgoing tab are shown but inert until the swap.
    let interactive = !state.controller().is_tab_swapping();
    let cards = state
        .units()
        .iter()
        .fold(Column::new().spacing(sizing::CARD_GAP), |column, unit| {
            column.push(card(unit, i18n, interactive))
        })
        .max_width(sizing::GALLERY_MAX_WIDTH)
        .padding([sizing::LIST_PADDING, spacing::MD]);

    Scrollable::new(
        Container::new(cards)
            .center_x(Length::Fill)
            .padding(slide_padding(state.slide_offset())),
    )
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| {
            Message::Scrolled(ViewportSpan::new(
                viewport.absolute_offset().y,
                viewport.bounds().height,
            ))
        })
        .into()
}

fn card<'a>(unit: &'a VideoUnit, i18n: &'a I18n, interactive: bool) -> Element<'a, Message> {
    let mut caption = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(unit.title()).size(typography::TITLE_SM));
    if let Some(category) = unit.category() {
        caption = caption.push(
            Text::new(category)
                .size(typography::CAPTION)
                .color(palette::ACCENT_400),
        );
    }
    caption = caption.push(Text::new(unit.description()).size(typography::BODY));

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(video_surface(unit, i18n, Length::Fixed(sizing::VIDEO_SURFACE_HEIGHT)))
            .push(controls(unit, i18n, interactive))
            .push(caption),
    )
    .width(Length::Fill)
    .height(sizing::CARD_HEIGHT)
    .padding(spacing::MD)
    .style(styles::container::card)
    .into()
}

fn fullscreen_card<'a>(unit: &'a VideoUnit, i18n: &'a I18n) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .push(video_surface(unit, i18n, Length::Fill))
        .push(controls(unit, i18n, true))
        .into()
}

/// Stand-in for the video frame: status text centred on black.
fn video_surface<'a>(unit: &'a VideoUnit, i18n: &'a I18n, height: Length) -> Element<'a, Message> {
    let status: Element<'a, Message> = if let Some(error) = unit.error() {
        Text::new(i18n.tr(error.i18n_key()))
            .size(typography::BODY)
            .color(palette::ERROR_500)
            .into()
    } else if unit.is_pending() {
        Text::new(i18n.tr("video-loading"))
            .size(typography::BODY)
            .into()
    } else if unit.is_playing() {
        Text::new(format!("▶ {}", format_time(unit.position_secs())))
            .size(typography::TITLE_LG)
            .into()
    } else {
        Text::new(i18n.tr("video-paused"))
            .size(typography::BODY)
            .color(palette::GRAY_200)
            .into()
    };

    Container::new(status)
        .width(Length::Fill)
        .height(height)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(styles::container::video_surface)
        .into()
}

fn controls<'a>(unit: &'a VideoUnit, i18n: &'a I18n, interactive: bool) -> Element<'a, Message> {
    let key = unit.key();
    let control = |label: String, message: Option<unit::Message>| {
        button(text(label).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::SM])
            .style(styles::button::overlay(palette::WHITE, opacity::OVERLAY_MEDIUM, 0.8))
            .on_press_maybe(
                message
                    .filter(|_| interactive)
                    .map(|message| Message::Unit(key, message)),
            )
    };

    let play_label = if unit.is_playing() { "video-pause" } else { "video-play" };
    let mute_label = if unit.is_muted() { "video-unmute" } else { "video-mute" };
    let fullscreen_label = if unit.is_fullscreen() {
        "video-exit-fullscreen"
    } else {
        "video-fullscreen"
    };
    let duration = unit
        .duration_secs()
        .map_or_else(|| "--:--".to_string(), format_time);

    Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(control(
            i18n.tr(play_label),
            (!unit.is_pending()).then_some(unit::Message::TogglePlayback),
        ))
        .push(control(i18n.tr(mute_label), Some(unit::Message::ToggleMute)))
        .push(
            slider(0.0..=1.0, unit.progress(), move |ratio| {
                Message::Unit(key, unit::Message::Seek(ratio))
            })
            .step(0.001)
            .width(Length::Fill),
        )
        .push(
            Text::new(format!("{} / {duration}", format_time(unit.position_secs())))
                .size(typography::CAPTION),
        )
        .push(control(
            i18n.tr(fullscreen_label),
            Some(unit::Message::ToggleFullscreen),
        ))
        .into()
}
