use iced::keyboard::{self, key};
use iced::{Element, Subscription, Task, Theme};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod platform;
mod state;
mod ui;

use config::Config;
use platform::desktop::DesktopPlatform;
use platform::{Acquisition, LibraryRequest};
use state::data::{ImageId, Source};
use state::session::{AcquisitionResult, Confirmation, Prompt, Session};

/// Main application state
struct PhotoGallery {
    /// Records, viewer and prompts
    session: Session,
    /// Picker, camera and permission services
    services: DesktopPlatform,
    config: Arc<Config>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Add Photos"
    AddPressed,
    /// User picked Camera or Library in the add prompt
    SourceChosen(Source),
    /// Choice or notice prompt closed without acting
    PromptDismissed,
    /// Platform request finished
    Acquired(Source, Acquisition),
    ThumbnailPressed(ImageId),
    ViewerClosed,
    RemovePressed(ImageId),
    RemovalAnswered(Confirmation),
    EscapePressed,
}

impl PhotoGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_else(|err| {
            warn!(%err, "could not load settings, using defaults");
            Config::default()
        });
        // Write the file back so every option is visible for editing
        if let Err(err) = config::save(&config) {
            warn!(%err, "could not write settings");
        }

        info!(camera = config.has_camera(), "photo gallery initialized");

        let config = Arc::new(config);
        let gallery = PhotoGallery {
            session: Session::default(),
            services: DesktopPlatform::new(Arc::clone(&config)),
            config,
            status: "No photos yet.".to_string(),
        };

        (gallery, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::AddPressed => {
                self.session.choose_source();
                Task::none()
            }
            Message::SourceChosen(source) => self.start_request(source),
            Message::PromptDismissed => {
                self.session.dismiss_prompt();
                Task::none()
            }
            Message::Acquired(source, acquisition) => {
                match self.session.complete_request(source, acquisition) {
                    AcquisitionResult::Added(count) => {
                        self.status = format!(
                            "Added {} photo(s). {} in gallery.",
                            count,
                            self.session.images().len()
                        );
                    }
                    AcquisitionResult::Cancelled => {
                        self.status = "Nothing added.".to_string();
                    }
                    AcquisitionResult::Denied(_) => {
                        self.status = "Permission denied.".to_string();
                    }
                }
                Task::none()
            }
            Message::ThumbnailPressed(id) => {
                self.session.open_viewer(id);
                Task::none()
            }
            Message::ViewerClosed => {
                self.session.close_viewer();
                Task::none()
            }
            Message::RemovePressed(id) => {
                self.session.request_remove(id);
                Task::none()
            }
            Message::RemovalAnswered(answer) => {
                self.answer_removal(answer);
                Task::none()
            }
            Message::EscapePressed => {
                match self.session.prompt() {
                    Some(Prompt::ConfirmRemove(_)) => self.answer_removal(Confirmation::Cancel),
                    Some(_) => self.session.dismiss_prompt(),
                    None if self.session.is_viewer_open() => self.session.close_viewer(),
                    None => {}
                }
                Task::none()
            }
        }
    }

    /// Launch the library picker or the camera in the background
    fn start_request(&mut self, source: Source) -> Task<Message> {
        if !self.session.begin_request(source) {
            return Task::none();
        }

        let services = self.services.clone();
        match source {
            Source::Library => {
                let request = LibraryRequest {
                    selection_limit: self.config.selection_limit(),
                };
                Task::perform(
                    async move { platform::import_from_library(&services, &services, request).await },
                    |acquisition| Message::Acquired(Source::Library, acquisition),
                )
            }
            Source::Camera => Task::perform(
                async move { platform::capture_from_camera(&services, &services).await },
                |acquisition| Message::Acquired(Source::Camera, acquisition),
            ),
        }
    }

    fn answer_removal(&mut self, answer: Confirmation) {
        if let Some(removed) = self.session.resolve_removal(answer) {
            self.status = format!(
                "Removed {}. {} in gallery.",
                removed.name,
                self.session.images().len()
            );
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let base = match self.session.selected() {
            Some(record) => ui::viewer::view(record),
            None => ui::gallery::view(
                self.session.images(),
                self.config.thumbnail_size,
                &self.status,
                self.session.pending(),
            ),
        };

        match self.session.prompt() {
            Some(prompt) => ui::dialog::view(base, prompt, &self.session),
            None => base,
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(key::Named::Escape) => Some(Message::EscapePressed),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photo_gallery=info")),
        )
        .init();

    iced::application(
        "Photo Gallery",
        PhotoGallery::update,
        PhotoGallery::view,
    )
    .theme(PhotoGallery::theme)
    .subscription(PhotoGallery::subscription)
    .centered()
    .run_with(PhotoGallery::new)
}
