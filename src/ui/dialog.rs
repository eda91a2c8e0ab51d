use iced::widget::{button, center, column, container, mouse_area, opaque, row, stack, text, Row};
use iced::{Color, Element, Length};

use crate::platform::Capability;
use crate::state::data::Source;
use crate::state::session::{Confirmation, Prompt, Session};
use crate::Message;

/// Layer the active prompt over `base`
pub fn view<'a>(base: Element<'a, Message>, prompt: Prompt, session: &'a Session) -> Element<'a, Message> {
    match prompt {
        Prompt::ChooseSource => modal(
            base,
            card(
                "Add Photo",
                "Take a new photo or pick from your library.".to_string(),
                row![
                    action("Cancel", Message::PromptDismissed, button::secondary),
                    action("Camera", Message::SourceChosen(Source::Camera), button::primary),
                    action("Library", Message::SourceChosen(Source::Library), button::primary),
                ],
            ),
            Message::PromptDismissed,
        ),
        Prompt::ConfirmRemove(id) => {
            let name = session
                .image(id)
                .map(|record| record.name.as_str())
                .unwrap_or("this photo");

            modal(
                base,
                card(
                    "Remove Photo",
                    format!("Remove {} from the gallery?", name),
                    row![
                        action("Cancel", Message::RemovalAnswered(Confirmation::Cancel), button::secondary),
                        action("Remove", Message::RemovalAnswered(Confirmation::Remove), button::danger),
                    ],
                ),
                Message::RemovalAnswered(Confirmation::Cancel),
            )
        }
        Prompt::PermissionDenied(capability) => modal(
            base,
            card(
                "Permission needed",
                denial_message(capability).to_string(),
                row![action("OK", Message::PromptDismissed, button::primary)],
            ),
            Message::PromptDismissed,
        ),
    }
}

fn denial_message(capability: Capability) -> &'static str {
    match capability {
        Capability::Library => {
            "Photo library access is needed to add photos. Check that your pictures folder is readable."
        }
        Capability::Camera => {
            "Camera access is needed to take photos. Set camera_command in settings.json to enable capture."
        }
    }
}

fn action<'a>(
    label: &'a str,
    message: Message,
    style: fn(&iced::Theme, button::Status) -> button::Style,
) -> Element<'a, Message> {
    button(text(label)).padding([6, 16]).style(style).on_press(message).into()
}

fn card<'a>(title: &'a str, body: String, actions: Row<'a, Message>) -> Element<'a, Message> {
    container(
        column![text(title).size(20), text(body).size(14), actions.spacing(8)]
            .spacing(16),
    )
    .width(Length::Fixed(360.0))
    .padding(20)
    .style(container::rounded_box)
    .into()
}

/// Dim `base` and center `content` on top; clicking outside sends `on_blur`
fn modal<'a>(base: Element<'a, Message>, content: Element<'a, Message>, on_blur: Message) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
