// SPDX-License-Identifier: MPL-2.0
//! Home page: hero, gallery entry buttons and the project list.
//!
//! Every project with a linked video can open the gallery on the videos tab,
//! scrolled to that video.

use crate::catalog::{MediaId, ProjectEntry};
use crate::gallery::GalleryTab;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Horizontal,
    widget::{button, container, scrollable, text, Column, Row, Text},
    Element, Length,
};

/// Contextual data needed to render the home page.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub projects: &'a [ProjectEntry],
    /// False while the gallery is open or animating; entry buttons are disabled.
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OpenGallery {
        tab: GalleryTab,
        focus: Option<MediaId>,
    },
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    OpenGallery {
        tab: GalleryTab,
        focus: Option<MediaId>,
    },
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match *message {
        Message::OpenGallery { tab, focus } => Event::OpenGallery { tab, focus },
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let hero = Column::new()
        .spacing(spacing::SM)
        .align_x(Horizontal::Center)
        .push(Text::new(ctx.i18n.tr("home-hero-title")).size(typography::DISPLAY))
        .push(
            Text::new(ctx.i18n.tr("home-hero-subtitle"))
                .size(typography::BODY_LG)
                .color(palette::GRAY_200),
        );

    let tabs = GalleryTab::ALL
        .into_iter()
        .fold(Row::new().spacing(spacing::MD), |row, tab| {
            row.push(entry_button(
                ctx.i18n.tr(tab.label_key()),
                Message::OpenGallery { tab, focus: None },
                ctx.interactive,
            ))
        });

    let projects = ctx
        .projects
        .iter()
        .fold(Row::new().spacing(spacing::LG), |row, project| {
            row.push(project_card(&ctx, project))
        })
        .wrap();

    let content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::XXL)
        .padding(spacing::XL)
        .align_x(Horizontal::Center)
        .push(hero)
        .push(tabs)
        .push(Text::new(ctx.i18n.tr("home-projects-title")).size(typography::TITLE_LG))
        .push(projects);

    scrollable(content).into()
}

fn entry_button<'a>(label: String, message: Message, enabled: bool) -> Element<'a, Message> {
    button(text(label).size(typography::BODY_LG))
        .padding([spacing::XS, spacing::LG])
        .height(sizing::BUTTON_HEIGHT)
        .style(styles::button::primary)
        .on_press_maybe(enabled.then_some(message))
        .into()
}

fn project_card<'a>(ctx: &ViewContext<'a>, project: &'a ProjectEntry) -> Element<'a, Message> {
    let mut body = Column::new()
        .spacing(spacing::XS)
        .push(
            Text::new(project.tag.as_str())
                .size(typography::CAPTION)
                .color(palette::ACCENT_400),
        )
        .push(Text::new(project.title.as_str()).size(typography::TITLE_SM))
        .push(Text::new(project.description.as_str()).size(typography::BODY));

    if !project.technologies.is_empty() {
        body = body.push(
            Text::new(project.technologies.join(" · "))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }

    if let Some(id) = project.video_id {
        body = body.push(
            button(text(ctx.i18n.tr("home-watch-video")).size(typography::BODY))
                .style(styles::button::unselected)
                .on_press_maybe(ctx.interactive.then_some(Message::OpenGallery {
                    tab: GalleryTab::Videos,
                    focus: Some(id),
                })),
        );
    }

    container(body)
        .width(sizing::PROJECT_CARD_WIDTH)
        .padding(spacing::MD)
        .style(styles::container::card)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_video_opens_the_videos_tab_focused() {
        let event = update(&Message::OpenGallery {
            tab: GalleryTab::Videos,
            focus: Some(MediaId(3)),
        });
        assert_eq!(
            event,
            Event::OpenGallery {
                tab: GalleryTab::Videos,
                focus: Some(MediaId(3)),
            }
        );
    }
}
