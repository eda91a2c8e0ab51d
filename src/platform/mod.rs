/// Platform services module
///
/// The gallery never touches files or cameras itself. It asks these
/// services for permissions and assets:
/// - Permission prompts (library / camera)
/// - The multi-select library picker
/// - Single-shot camera capture
///
/// `desktop.rs` provides the native implementations used by the app.

pub mod desktop;

use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::state::data::PickedAsset;

/// Maximum number of assets taken from one library pick
pub const DEFAULT_SELECTION_LIMIT: usize = 10;

/// A device capability guarded by a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Library,
    Camera,
}

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Parameters for a library pick (images only, originals)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryRequest {
    pub selection_limit: usize,
}

/// Final result of an import or capture request
#[derive(Debug, Clone, PartialEq)]
pub enum Acquisition {
    /// Assets in the order the platform returned them
    Picked(Vec<PickedAsset>),
    /// The user backed out; not an error
    Cancelled,
    /// Permission was refused
    Denied(Capability),
}

pub trait PermissionService {
    fn request(&self, capability: Capability) -> impl Future<Output = Permission> + Send;
}

pub trait LibraryPicker {
    /// Returns `None` when the user cancels the picker.
    fn pick_images(&self, request: LibraryRequest) -> impl Future<Output = Option<Vec<PickedAsset>>> + Send;
}

pub trait CameraCapture {
    /// Returns `Ok(None)` when the user backs out of the capture.
    fn capture(&self) -> impl Future<Output = Result<Option<PickedAsset>>> + Send;
}

/// Ask for library access, then run the multi-select picker.
pub async fn import_from_library<P, L>(permissions: &P, picker: &L, request: LibraryRequest) -> Acquisition
where
    P: PermissionService + Sync,
    L: LibraryPicker + Sync,
{
    if permissions.request(Capability::Library).await == Permission::Denied {
        warn!("library access denied");
        return Acquisition::Denied(Capability::Library);
    }

    let Some(mut assets) = picker.pick_images(request).await else {
        debug!("library pick cancelled");
        return Acquisition::Cancelled;
    };

    if assets.len() > request.selection_limit {
        warn!(
            picked = assets.len(),
            limit = request.selection_limit,
            "selection exceeds limit, dropping extra assets"
        );
        assets.truncate(request.selection_limit);
    }

    info!(count = assets.len(), "picked images from library");
    Acquisition::Picked(assets)
}

/// Ask for camera access, then capture a single image.
///
/// Capture failures are logged and reported as a cancellation.
pub async fn capture_from_camera<P, C>(permissions: &P, camera: &C) -> Acquisition
where
    P: PermissionService + Sync,
    C: CameraCapture + Sync,
{
    if permissions.request(Capability::Camera).await == Permission::Denied {
        warn!("camera access denied");
        return Acquisition::Denied(Capability::Camera);
    }

    match camera.capture().await {
        Ok(Some(asset)) => {
            info!(uri = %asset.uri, "captured photo");
            Acquisition::Picked(vec![asset])
        }
        Ok(None) => {
            debug!("camera capture cancelled");
            Acquisition::Cancelled
        }
        Err(err) => {
            error!(%err, "camera capture failed");
            Acquisition::Cancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakePermissions {
        library: Permission,
        camera: Permission,
    }

    impl PermissionService for FakePermissions {
        async fn request(&self, capability: Capability) -> Permission {
            match capability {
                Capability::Library => self.library,
                Capability::Camera => self.camera,
            }
        }
    }

    fn granted() -> FakePermissions {
        FakePermissions {
            library: Permission::Granted,
            camera: Permission::Granted,
        }
    }

    /// Picker that records how often it was opened
    struct FakePicker {
        result: Option<Vec<PickedAsset>>,
        opened: AtomicUsize,
    }

    impl FakePicker {
        fn returning(result: Option<Vec<PickedAsset>>) -> Self {
            Self {
                result,
                opened: AtomicUsize::new(0),
            }
        }
    }

    impl LibraryPicker for FakePicker {
        async fn pick_images(&self, _request: LibraryRequest) -> Option<Vec<PickedAsset>> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    enum FakeCamera {
        Shot(PickedAsset),
        BackedOut,
        Broken,
    }

    impl CameraCapture for FakeCamera {
        async fn capture(&self) -> Result<Option<PickedAsset>> {
            match self {
                FakeCamera::Shot(asset) => Ok(Some(asset.clone())),
                FakeCamera::BackedOut => Ok(None),
                FakeCamera::Broken => Err(GalleryError::CaptureUnavailable),
            }
        }
    }

    fn request() -> LibraryRequest {
        LibraryRequest {
            selection_limit: DEFAULT_SELECTION_LIMIT,
        }
    }

    fn asset(name: &str) -> PickedAsset {
        PickedAsset {
            uri: format!("/pictures/{}", name),
            file_name: Some(name.to_string()),
            file_size: None,
        }
    }

    #[tokio::test]
    async fn test_library_import_returns_assets_in_order() {
        let picker = FakePicker::returning(Some(vec![asset("a.jpg"), asset("b.jpg")]));

        let result = import_from_library(&granted(), &picker, request()).await;

        assert_eq!(result, Acquisition::Picked(vec![asset("a.jpg"), asset("b.jpg")]));
    }

    #[tokio::test]
    async fn test_library_import_caps_selection() {
        let many: Vec<_> = (0..12).map(|i| asset(&format!("{}.jpg", i))).collect();
        let picker = FakePicker::returning(Some(many.clone()));

        let result = import_from_library(&granted(), &picker, request()).await;

        assert_eq!(result, Acquisition::Picked(many[..10].to_vec()));
    }

    #[tokio::test]
    async fn test_library_denial_skips_picker() {
        let permissions = FakePermissions {
            library: Permission::Denied,
            camera: Permission::Granted,
        };
        let picker = FakePicker::returning(Some(vec![asset("a.jpg")]));

        let result = import_from_library(&permissions, &picker, request()).await;

        assert_eq!(result, Acquisition::Denied(Capability::Library));
        assert_eq!(picker.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_library_cancel() {
        let picker = FakePicker::returning(None);
        let result = import_from_library(&granted(), &picker, request()).await;
        assert_eq!(result, Acquisition::Cancelled);
    }

    #[tokio::test]
    async fn test_camera_capture_outcomes() {
        let shot = asset("shot.jpg");

        let captured = capture_from_camera(&granted(), &FakeCamera::Shot(shot.clone())).await;
        assert_eq!(captured, Acquisition::Picked(vec![shot]));

        let backed_out = capture_from_camera(&granted(), &FakeCamera::BackedOut).await;
        assert_eq!(backed_out, Acquisition::Cancelled);

        // Errors never escape the flow
        let broken = capture_from_camera(&granted(), &FakeCamera::Broken).await;
        assert_eq!(broken, Acquisition::Cancelled);
    }

    #[tokio::test]
    async fn test_camera_denial() {
        let permissions = FakePermissions {
            library: Permission::Granted,
            camera: Permission::Denied,
        };

        let result = capture_from_camera(&permissions, &FakeCamera::Shot(asset("x.jpg"))).await;
        assert_eq!(result, Acquisition::Denied(Capability::Camera));
    }
}
