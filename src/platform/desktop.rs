use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use rfd::AsyncFileDialog;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{CameraCapture, Capability, LibraryPicker, LibraryRequest, Permission, PermissionService};
use crate::config::{Config, OUTPUT_PLACEHOLDER};
use crate::error::{GalleryError, Result};
use crate::state::data::PickedAsset;

/// Extensions offered by the library picker
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic",
];

/// Native services backing the gallery on desktop:
/// rfd for the library picker, an external command for the camera.
#[derive(Debug, Clone)]
pub struct DesktopPlatform {
    config: Arc<Config>,
}

impl DesktopPlatform {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl PermissionService for DesktopPlatform {
    async fn request(&self, capability: Capability) -> Permission {
        match capability {
            Capability::Library => {
                // Only an explicitly configured directory is checked; the picker can browse anywhere
                let Some(dir) = self.config.library_dir.as_ref() else {
                    return Permission::Granted;
                };
                match tokio::fs::read_dir(dir).await {
                    Ok(_) => Permission::Granted,
                    Err(err) => {
                        warn!(dir = %dir.display(), %err, "library directory is not readable");
                        Permission::Denied
                    }
                }
            }
            Capability::Camera => {
                if self.config.has_camera() {
                    Permission::Granted
                } else {
                    Permission::Denied
                }
            }
        }
    }
}

impl LibraryPicker for DesktopPlatform {
    async fn pick_images(&self, request: LibraryRequest) -> Option<Vec<PickedAsset>> {
        let title = format!("Select up to {} photos", request.selection_limit);
        let mut dialog = AsyncFileDialog::new()
            .set_title(title.as_str())
            .add_filter("Images", IMAGE_EXTENSIONS);

        if let Some(dir) = self.config.picker_start_dir() {
            if dir.exists() {
                dialog = dialog.set_directory(&dir);
            }
        }

        let handles = dialog.pick_files().await?;

        let mut assets = Vec::with_capacity(handles.len());
        for handle in handles {
            let file_name = handle.file_name();
            assets.push(asset_from_path(handle.path().to_path_buf(), Some(file_name)).await);
        }
        Some(assets)
    }
}

impl CameraCapture for DesktopPlatform {
    async fn capture(&self) -> Result<Option<PickedAsset>> {
        let argv = self
            .config
            .camera_command
            .as_deref()
            .ok_or(GalleryError::CaptureUnavailable)?;

        let dir = self.config.capture_dir();
        tokio::fs::create_dir_all(&dir).await?;
        let output = dir.join(format!("capture_{}.jpg", Utc::now().timestamp_millis()));

        let (program, args) = capture_command(argv, &output).ok_or(GalleryError::CaptureUnavailable)?;
        debug!(%program, ?args, "running capture command");

        let status = Command::new(&program)
            .args(&args)
            .status()
            .await
            .map_err(|err| GalleryError::CaptureFailed {
                program: program.clone(),
                reason: err.to_string(),
            })?;

        if !status.success() {
            info!(%status, "capture command exited without a photo");
            discard_partial_capture(&output).await;
            return Ok(None);
        }

        match tokio::fs::metadata(&output).await {
            Ok(meta) if meta.is_file() => Ok(Some(PickedAsset {
                uri: output.to_string_lossy().into_owned(),
                // Captures have no user-facing name; the session synthesizes one
                file_name: None,
                file_size: Some(meta.len()),
            })),
            _ => {
                info!(output = %output.display(), "capture command wrote no file");
                Ok(None)
            }
        }
    }
}

/// Remove whatever a failed capture left at `output`
async fn discard_partial_capture(output: &Path) {
    match tokio::fs::remove_file(output).await {
        Ok(()) => debug!(output = %output.display(), "removed partial capture"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(output = %output.display(), %err, "could not remove partial capture"),
    }
}

/// Build an asset for a local file, reading its size from metadata
async fn asset_from_path(path: PathBuf, file_name: Option<String>) -> PickedAsset {
    let file_size = match tokio::fs::metadata(&path).await {
        Ok(meta) => Some(meta.len()),
        Err(err) => {
            debug!(path = %path.display(), %err, "could not read file size");
            None
        }
    };

    PickedAsset {
        uri: path.to_string_lossy().into_owned(),
        file_name,
        file_size,
    }
}

/// Resolve the capture argv against an output path.
///
/// Every `{output}` in the arguments is replaced with the path; when no
/// argument mentions it the path is appended. Returns `None` for an empty
/// program.
fn capture_command(argv: &[String], output: &Path) -> Option<(String, Vec<String>)> {
    let (program, rest) = argv.split_first()?;
    if program.trim().is_empty() {
        return None;
    }

    let output = output.to_string_lossy();
    let mut args: Vec<String> = rest
        .iter()
        .map(|arg| arg.replace(OUTPUT_PLACEHOLDER, &output))
        .collect();

    if !rest.iter().any(|arg| arg.contains(OUTPUT_PLACEHOLDER)) {
        args.push(output.into_owned());
    }

    Some((program.clone(), args))
}
