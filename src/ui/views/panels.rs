//! Side panels: file browser, playlist, and the About overlay.

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::WindowState;

/// File browser: directories first, then media files of the current
/// directory.
pub fn browser_panel(state: &WindowState) -> Element<'_, Message> {
    let header = row![
        button(text("..").size(12))
            .padding([4, 10])
            .on_press(Message::BrowserUp),
        text(shortened(&state.browser_dir.display().to_string(), 28)).size(11),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);

    let mut entries = column![].spacing(2);
    for dir in &state.browser_dirs {
        let name = entry_name(dir);
        entries = entries.push(
            button(text(format!("[{}]", name)).size(12))
                .padding([4, 8])
                .width(Length::Fill)
                .style(button::secondary)
                .on_press(Message::BrowserNavigate(dir.clone())),
        );
    }
    for file in &state.browser_files {
        entries = entries.push(
            button(text(entry_name(file)).size(12))
                .padding([4, 8])
                .width(Length::Fill)
                .style(button::text)
                .on_press(Message::BrowserActivate(file.clone())),
        );
    }

    panel(
        column![
            text("Files").size(14),
            header,
            scrollable(entries).height(Length::Fill),
        ]
        .spacing(8),
    )
}

/// Playlist with the current entry highlighted.
pub fn playlist_panel(state: &WindowState) -> Element<'_, Message> {
    let current = state.playlist.index();

    let rows: Vec<Element<Message>> = state
        .playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let is_current = i == current && !state.playlist.is_empty();
            let label = state
                .cached_tag(path)
                .map(|record| record.display_title(path))
                .unwrap_or_else(|| entry_name(path));
            let fg = if is_current {
                [0.4, 0.8, 1.0]
            } else {
                [0.75, 0.75, 0.75]
            };

            button(
                row![
                    text(if is_current { ">" } else { " " }).size(12).color(fg),
                    Space::with_width(6),
                    text(label).size(12).color(fg),
                ]
                .align_y(iced::Alignment::Center),
            )
            .padding([4, 8])
            .width(Length::Fill)
            .style(button::text)
            .on_press(Message::PlaylistActivate(i))
            .into()
        })
        .collect();

    let list: Element<Message> = if rows.is_empty() {
        text("Playlist is empty")
            .size(12)
            .color([0.4, 0.4, 0.4])
            .into()
    } else {
        scrollable(column(rows).spacing(2)).height(Length::Fill).into()
    };

    panel(column![text("Playlist").size(14), list].spacing(8))
}

/// Centered About card, drawn on top of the main layout.
pub fn about_overlay<'a>() -> Element<'a, Message> {
    let card = container(
        column![
            text("Satsuma").size(24),
            text(format!("Version {}", env!("CARGO_PKG_VERSION"))).size(13),
            text("A small desktop media player.")
                .size(13)
                .color([0.7, 0.7, 0.7]),
            Space::with_height(10),
            button(text("Close").size(12))
                .padding([6, 14])
                .on_press(Message::ToggleAbout),
        ]
        .spacing(6)
        .align_x(iced::Alignment::Center),
    )
    .padding(25)
    .style(|_| container::Style {
        background: Some(iced::Background::Color([0.17, 0.17, 0.21].into())),
        border: iced::Border {
            radius: 6.0.into(),
            width: 1.0,
            color: [0.35, 0.35, 0.4].into(),
        },
        ..Default::default()
    });

    container(card)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn panel<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(10)
        .width(Length::Fixed(230.0))
        .height(Length::Fill)
        .style(|_| container::Style {
            background: Some(iced::Background::Color([0.15, 0.15, 0.18].into())),
            ..Default::default()
        })
        .into()
}

fn entry_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn shortened(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let tail: String = s
            .chars()
            .rev()
            .take(max.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("...{}", tail)
    }
}
