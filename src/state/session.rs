use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::data::{ImageId, ImageRecord, PickedAsset, Source};
use crate::platform::{Acquisition, Capability};

/// Full-screen viewer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Closed,
    /// Showing the record with this id
    Open(ImageId),
}

/// Modal prompt currently waiting on the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Camera / Library / Cancel
    ChooseSource,
    /// Cancel / Remove for the given record
    ConfirmRemove(ImageId),
    /// One-shot notice after a refused permission
    PermissionDenied(Capability),
}

/// Answer to the remove confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Cancel,
    Remove,
}

/// What applying an acquisition did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionResult {
    Added(usize),
    Cancelled,
    Denied(Capability),
}

/// The gallery's in-memory state for one screen instance.
///
/// Invariants:
/// - `images` keeps insertion order and never holds two records with the same id
/// - an open viewer always points at a record present in `images`
#[derive(Debug)]
pub struct Session {
    images: Vec<ImageRecord>,
    viewer: Viewer,
    prompt: Option<Prompt>,
    /// Library or camera request awaiting the platform
    pending: Option<Source>,
    next_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            viewer: Viewer::Closed,
            prompt: None,
            pending: None,
            next_id: 1,
        }
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn image(&self, id: ImageId) -> Option<&ImageRecord> {
        self.images.iter().find(|image| image.id == id)
    }

    #[cfg(test)]
    pub fn viewer(&self) -> Viewer {
        self.viewer
    }

    pub fn is_viewer_open(&self) -> bool {
        matches!(self.viewer, Viewer::Open(_))
    }

    /// The record shown in the viewer, if it is open
    pub fn selected(&self) -> Option<&ImageRecord> {
        match self.viewer {
            Viewer::Open(id) => self.image(id),
            Viewer::Closed => None,
        }
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn pending(&self) -> Option<Source> {
        self.pending
    }

    // ========== Adding ==========

    /// Show the Camera / Library / Cancel choice
    pub fn choose_source(&mut self) {
        if self.pending.is_none() {
            self.prompt = Some(Prompt::ChooseSource);
        }
    }

    /// Close a choice or notice prompt without acting on it
    pub fn dismiss_prompt(&mut self) {
        self.prompt = None;
    }

    /// Mark a platform request as in flight.
    ///
    /// Returns `false` (and changes nothing) while another request is pending.
    pub fn begin_request(&mut self, source: Source) -> bool {
        if let Some(pending) = self.pending {
            warn!(?pending, requested = ?source, "request already in flight, ignoring");
            return false;
        }
        if self.prompt == Some(Prompt::ChooseSource) {
            self.prompt = None;
        }
        self.pending = Some(source);
        true
    }

    /// Apply the platform's answer to the pending request
    pub fn complete_request(&mut self, source: Source, acquisition: Acquisition) -> AcquisitionResult {
        self.complete_request_at(source, acquisition, Utc::now())
    }

    /// Same as [`Session::complete_request`] with an explicit clock for fallback names
    pub fn complete_request_at(
        &mut self,
        source: Source,
        acquisition: Acquisition,
        now: DateTime<Utc>,
    ) -> AcquisitionResult {
        if self.pending != Some(source) {
            debug!(?source, pending = ?self.pending, "completing a request that was not pending");
        }
        self.pending = None;

        match acquisition {
            Acquisition::Picked(assets) => AcquisitionResult::Added(self.append(assets, source, now)),
            Acquisition::Cancelled => AcquisitionResult::Cancelled,
            Acquisition::Denied(capability) => {
                // Never replace a pending remove confirmation
                match self.prompt {
                    None | Some(Prompt::ChooseSource) => {
                        self.prompt = Some(Prompt::PermissionDenied(capability));
                    }
                    Some(prompt) => {
                        warn!(?capability, ?prompt, "permission notice suppressed by open prompt");
                    }
                }
                AcquisitionResult::Denied(capability)
            }
        }
    }

    /// Append one record per asset, in order. Returns how many were added.
    pub fn append(&mut self, assets: Vec<PickedAsset>, source: Source, now: DateTime<Utc>) -> usize {
        let count = assets.len();
        for asset in assets {
            let id = self.allocate_id();
            let record = ImageRecord::from_asset(id, asset, source, now);
            debug!(%id, name = %record.name, "added image");
            self.images.push(record);
        }
        if count > 0 {
            info!(added = count, total = self.images.len(), ?source, "images added");
        }
        count
    }

    fn allocate_id(&mut self) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;
        id
    }

    // ========== Removing ==========

    /// Ask the user to confirm removal. Unknown ids are ignored.
    pub fn request_remove(&mut self, id: ImageId) -> bool {
        if self.image(id).is_none() {
            debug!(%id, "remove requested for unknown image");
            return false;
        }
        self.prompt = Some(Prompt::ConfirmRemove(id));
        true
    }

    /// Act on the confirmation prompt. Returns the removed record, if any.
    pub fn resolve_removal(&mut self, answer: Confirmation) -> Option<ImageRecord> {
        let Some(Prompt::ConfirmRemove(id)) = self.prompt else {
            return None;
        };
        self.prompt = None;

        match answer {
            Confirmation::Cancel => None,
            Confirmation::Remove => self.remove(id),
        }
    }

    /// Delete a record. Closes the viewer if it was showing it.
    /// Removing an id that is already gone is a no-op.
    pub fn remove(&mut self, id: ImageId) -> Option<ImageRecord> {
        let index = self.images.iter().position(|image| image.id == id)?;
        let removed = self.images.remove(index);

        if self.viewer == Viewer::Open(id) {
            self.close_viewer();
        }
        info!(%id, name = %removed.name, remaining = self.images.len(), "image removed");
        Some(removed)
    }

    // ========== Viewer ==========

    /// Show a record full-screen. Ignored if the id is not in the gallery.
    pub fn open_viewer(&mut self, id: ImageId) -> bool {
        if self.image(id).is_none() {
            warn!(%id, "cannot open viewer on unknown image");
            return false;
        }
        self.viewer = Viewer::Open(id);
        true
    }

    pub fn close_viewer(&mut self) {
        self.viewer = Viewer::Closed;
    }
}
