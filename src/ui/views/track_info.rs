//! Center panel: album art and tags for audio, a plain surface for
//! video.

use iced::widget::{column, container, image, text, Space};
use iced::{Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::WindowState;

static PLACEHOLDER_ART: &[u8] = include_bytes!("../../../assets/art-placeholder.png");

/// The engine paints video straight onto the native window, so this
/// widget only reserves a black rectangle under it.
pub fn video_surface<'a>() -> Element<'a, Message> {
    container(Space::new(Length::Fill, Length::Fill))
        .style(|_| container::Style {
            background: Some(iced::Background::Color([0.0, 0.0, 0.0].into())),
            ..Default::default()
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Metadata panel for audio playback.
pub fn track_panel(state: &WindowState) -> Element<'_, Message> {
    let Some(path) = state.playlist.current() else {
        return container(
            column![
                text("No media loaded").size(24).color([0.4, 0.4, 0.4]),
                text("Open a file or folder to start playing")
                    .size(14)
                    .color([0.4, 0.4, 0.4]),
            ]
            .spacing(8)
            .align_x(iced::Alignment::Center),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into();
    };

    let record = state.cached_tag(path).cloned().unwrap_or_default();

    let art_handle = match &record.artwork {
        Some(bytes) => image::Handle::from_bytes(bytes.clone()),
        None => image::Handle::from_bytes(PLACEHOLDER_ART),
    };
    let art = image(art_handle)
        .width(Length::Fixed(240.0))
        .height(Length::Fixed(240.0));

    let mut info = column![
        text(record.display_title(path)).size(26),
        text(record.display_artist().to_string())
            .size(18)
            .color([0.7, 0.7, 0.7]),
        text(record.display_album().to_string())
            .size(15)
            .color([0.6, 0.6, 0.6]),
    ]
    .spacing(5)
    .align_x(iced::Alignment::Center);

    if let Some(year) = &record.year {
        info = info.push(text(year.clone()).size(13).color([0.5, 0.5, 0.5]));
    }
    if let Some(track) = record.track_number {
        info = info.push(
            text(format!("Track {}", track))
                .size(13)
                .color([0.5, 0.5, 0.5]),
        );
    }

    container(
        column![art, Space::with_height(15), info]
            .spacing(5)
            .align_x(iced::Alignment::Center),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
