use iced::widget::{button, column, container, image, row, text, Space};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::state::data::ImageRecord;
use crate::Message;

/// Full-screen view of one record with its name and size
pub fn view(record: &ImageRecord) -> Element<'_, Message> {
    let toolbar = row![
        button(text("Close"))
            .padding(10)
            .style(button::secondary)
            .on_press(Message::ViewerClosed),
        Space::with_width(Length::Fill),
        button(text("Remove"))
            .padding(10)
            .style(button::danger)
            .on_press(Message::RemovePressed(record.id)),
    ]
    .align_y(Alignment::Center);

    let picture = container(
        image(image::Handle::from_path(&record.uri))
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill);

    let details = column![
        text(&record.name).size(18),
        text(record.size_label()).size(14),
    ]
    .spacing(4);

    container(column![toolbar, picture, details].spacing(16).padding(20))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::BLACK.into()),
            ..container::Style::default()
        })
        .into()
}
