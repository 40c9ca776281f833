//! Transport bar: playback buttons, seek and volume sliders.

use iced::widget::{button, container, row, slider, text, Space};
use iced::{Element, Length};

use crate::player::format_ms;
use crate::playlist::PlayStatus;
use crate::ui::messages::Message;
use crate::ui::state::WindowState;

/// Player controls bar (always visible at bottom)
pub fn transport_bar(state: &WindowState) -> Element<'_, Message> {
    // Fixed width so the bar doesn't shift between |> and ||
    let play_label = match state.playlist.status() {
        PlayStatus::Playing => "||",
        _ => "|>",
    };

    // Slider needs a non-empty range even before a duration is known
    let duration = (state.duration_ms.max(0) as f64).max(1.0);
    let position = state.displayed_position().clamp(0.0, duration);

    // on_change latches the preview; the single real seek happens on
    // release
    let seek_slider = slider(0.0..=duration, position, Message::SeekPreview)
        .on_release(Message::SeekRelease)
        .step(500.0)
        .width(Length::FillPortion(3));

    let time_display = text(format!(
        "{} / {}",
        format_ms(position as i64),
        format_ms(state.duration_ms)
    ))
    .size(12);

    let volume = state.config.audio.volume;
    let volume_slider = slider(0.0..=100.0, volume as f64, |v| {
        Message::VolumeChanged(v as i64)
    })
    .on_release(Message::VolumeReleased)
    .step(1.0)
    .width(Length::Fixed(90.0));

    container(
        row![
            button(text("|<").size(14))
                .padding([8, 10])
                .width(Length::Fixed(40.0))
                .on_press(Message::PreviousTrack),
            button(text(play_label).size(14))
                .padding([8, 10])
                .width(Length::Fixed(40.0))
                .on_press(Message::PlayPause),
            button(text(">|").size(14))
                .padding([8, 10])
                .width(Length::Fixed(40.0))
                .on_press(Message::NextTrack),
            button(text(format!("Loop: {}", state.playlist.loop_mode().label())).size(11))
                .padding([6, 8])
                .on_press(Message::ToggleLoop),
            Space::with_width(10),
            seek_slider,
            Space::with_width(10),
            time_display,
            Space::with_width(15),
            text(format!("{}", volume)).size(11),
            volume_slider,
        ]
        .spacing(5)
        .align_y(iced::Alignment::Center)
        .padding(10),
    )
    .style(|_| container::Style {
        background: Some(iced::Background::Color([0.2, 0.2, 0.25].into())),
        ..Default::default()
    })
    .width(Length::Fill)
    .into()
}
