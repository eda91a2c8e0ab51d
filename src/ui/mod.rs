/// Views for the single gallery screen
///
/// - Thumbnail grid with the add button (gallery.rs)
/// - Full-screen viewer (viewer.rs)
/// - Modal prompts layered over either (dialog.rs)

pub mod dialog;
pub mod gallery;
pub mod viewer;
