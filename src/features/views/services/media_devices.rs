use async_trait::async_trait;

use crate::features::views::models::{FacingMode, MediaDevices, MediaError, MediaStream};

/// Device access for a server without cameras; every request is denied
///
/// Live frames reach the server through the capture endpoint instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessMediaDevices;

#[async_trait]
impl MediaDevices for HeadlessMediaDevices {
    async fn open_camera(&self, _facing: FacingMode) -> Result<Box<dyn MediaStream>, MediaError> {
        Err(MediaError::PermissionDenied)
    }
}
