use async_trait::async_trait;
use thiserror::Error;

/// Which camera to open; inspections always ask for the rear one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    Environment,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MediaError {
    #[error("Camera permission denied")]
    PermissionDenied,
}

/// An open camera stream made of one or more tracks
pub trait MediaStream: Send + Sync {
    /// Stop every track; the stream is unusable afterwards
    fn stop_all_tracks(&mut self);

    fn is_active(&self) -> bool;
}

/// Access to the device cameras
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn open_camera(&self, facing: FacingMode) -> Result<Box<dyn MediaStream>, MediaError>;
}
