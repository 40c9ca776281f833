//! View composition.

mod panels;
mod player;
mod track_info;

use iced::widget::{column, container, row, stack, Space};
use iced::{Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::WindowState;

/// Top-level view.
pub fn root(state: &WindowState) -> Element<'_, Message> {
    // Fullscreen video: nothing but the surface
    if state.fullscreen {
        return track_info::video_surface();
    }

    let center: Element<Message> = if state.current_is_video() {
        track_info::video_surface()
    } else {
        track_info::track_panel(state)
    };

    let mut middle = row![].spacing(10).height(Length::Fill);
    if state.show_browser {
        middle = middle.push(panels::browser_panel(state));
    }
    middle = middle.push(
        container(center)
            .width(Length::Fill)
            .height(Length::Fill),
    );
    if state.show_playlist {
        middle = middle.push(panels::playlist_panel(state));
    }

    let main = column![
        menu_bar(state),
        middle,
        player::transport_bar(state),
        status_bar(state),
    ]
    .spacing(10)
    .padding(10);

    if state.about_open {
        stack![main, panels::about_overlay()].into()
    } else {
        main.into()
    }
}

fn menu_bar(state: &WindowState) -> Element<'_, Message> {
    use iced::widget::{button, checkbox, text};

    let panel_style = |open: bool| {
        if open {
            button::primary
        } else {
            button::secondary
        }
    };

    row![
        button(text("Open File").size(12))
            .padding([6, 10])
            .on_press(Message::OpenFilePressed),
        button(text("Open Folder").size(12))
            .padding([6, 10])
            .on_press(Message::OpenFolderPressed),
        button(text("Browser").size(12))
            .padding([6, 10])
            .style(panel_style(state.show_browser))
            .on_press(Message::ToggleBrowser),
        button(text("Playlist").size(12))
            .padding([6, 10])
            .style(panel_style(state.show_playlist))
            .on_press(Message::TogglePlaylist),
        button(text("Fullscreen").size(12))
            .padding([6, 10])
            .on_press(Message::ToggleFullscreen),
        Space::with_width(Length::Fill),
        checkbox("Close to tray", state.config.behavior.close_to_tray)
            .size(14)
            .text_size(12)
            .on_toggle(Message::CloseToTrayToggled),
        button(text("Tray").size(12))
            .padding([6, 10])
            .on_press(Message::MinimizeToTray),
        button(text("About").size(12))
            .padding([6, 10])
            .on_press(Message::ToggleAbout),
    ]
    .spacing(5)
    .align_y(iced::Alignment::Center)
    .into()
}

fn status_bar(state: &WindowState) -> Element<'_, Message> {
    use iced::widget::text;

    container(text(&state.status_line).size(11).color([0.6, 0.6, 0.6]))
        .padding([4, 8])
        .width(Length::Fill)
        .style(|_| container::Style {
            background: Some(iced::Background::Color([0.12, 0.12, 0.15].into())),
            ..Default::default()
        })
        .into()
}
