use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::state::data::{ImageRecord, Source};
use crate::Message;

/// Gap between thumbnails, both directions
const GRID_SPACING: f32 = 12.0;

/// Build the grid screen: header, thumbnails (or the empty state), status line
pub fn view<'a>(
    images: &'a [ImageRecord],
    thumbnail_size: f32,
    status: &'a str,
    pending: Option<Source>,
) -> Element<'a, Message> {
    // Adding is disabled while the picker or camera is open
    let add_label = match pending {
        Some(Source::Library) => "Picking...",
        Some(Source::Camera) => "Capturing...",
        None => "Add Photos",
    };
    let add = button(text(add_label))
        .padding(10)
        .style(button::primary)
        .on_press_maybe(pending.is_none().then_some(Message::AddPressed));

    let header = row![
        text("Photo Gallery").size(28),
        Space::with_width(Length::Fill),
        add,
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let body: Element<'a, Message> = if images.is_empty() {
        empty_state()
    } else {
        let tiles = images
            .iter()
            .map(|record| tile(record, thumbnail_size))
            .collect();

        scrollable(
            Wrap::with_elements(tiles)
                .spacing(Pixels(GRID_SPACING))
                .line_spacing(Pixels(GRID_SPACING)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    };

    column![header, body, text(status).size(14)]
        .spacing(16)
        .padding(20)
        .into()
}

/// One thumbnail with its name and a remove button
fn tile(record: &ImageRecord, size: f32) -> Element<'_, Message> {
    let thumbnail = button(
        image(image::Handle::from_path(&record.uri))
            .width(size)
            .height(size)
            .content_fit(ContentFit::Cover),
    )
    .padding(0)
    .style(button::text)
    .on_press(Message::ThumbnailPressed(record.id));

    let remove = button(text("Remove").size(12))
        .padding([2, 8])
        .style(button::danger)
        .on_press(Message::RemovePressed(record.id));

    column![
        thumbnail,
        row![text(&record.name).size(12).width(Length::Fill), remove]
            .spacing(4)
            .align_y(Alignment::Center),
    ]
    .spacing(4)
    .width(size)
    .into()
}

fn empty_state<'a>() -> Element<'a, Message> {
    let content = column![
        text("No photos yet").size(22),
        text("Use Add Photos to pick from your library or take a new one.").size(14),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
