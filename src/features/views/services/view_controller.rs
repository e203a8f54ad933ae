use std::sync::Arc;

use crate::features::views::models::{FacingMode, MediaDevices, MediaError, MediaStream, View};

/// Active view plus the exclusively held camera stream
///
/// At most one stream exists, and only while the view is `Live`.
pub struct ViewController {
    current: View,
    stream: Option<Box<dyn MediaStream>>,
    devices: Arc<dyn MediaDevices>,
}

impl ViewController {
    pub fn new(devices: Arc<dyn MediaDevices>) -> Self {
        Self {
            current: View::default(),
            stream: None,
            devices,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn camera_active(&self) -> bool {
        self.stream.as_ref().is_some_and(|s| s.is_active())
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all_tracks();
            tracing::debug!("Camera stream released");
        }
    }

    /// Switch to `view`
    ///
    /// Any held stream is stopped first, even when navigating to the same view.
    /// For `Live` a new rear-camera stream is requested; if that fails the view
    /// is still switched and the error returned.
    pub async fn navigate(&mut self, view: View) -> Result<(), MediaError> {
        self.release_stream();
        self.current = view;
        tracing::info!("View changed to {}", view);

        if !view.needs_camera() {
            return Ok(());
        }

        match self.devices.open_camera(FacingMode::Environment).await {
            Ok(stream) => {
                self.stream = Some(stream);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Live view without camera: {}", e);
                Err(e)
            }
        }
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        self.release_stream();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::FakeCamera;

    #[tokio::test]
    async fn test_live_opens_rear_camera() {
        let camera = Arc::new(FakeCamera::default());
        let mut controller = ViewController::new(camera.clone());

        controller.navigate(View::Live).await.unwrap();

        assert_eq!(controller.current(), View::Live);
        assert!(controller.camera_active());
        assert_eq!(camera.requested_facing(), vec![FacingMode::Environment]);
    }

    #[tokio::test]
    async fn test_leaving_live_stops_tracks() {
        let camera = Arc::new(FakeCamera::default());
        let mut controller = ViewController::new(camera.clone());

        controller.navigate(View::Live).await.unwrap();
        controller.navigate(View::Admin).await.unwrap();

        assert_eq!(controller.current(), View::Admin);
        assert!(!controller.camera_active());
        assert_eq!(camera.stopped(), 1);
    }

    #[tokio::test]
    async fn test_reentering_live_replaces_stream() {
        let camera = Arc::new(FakeCamera::default());
        let mut controller = ViewController::new(camera.clone());

        controller.navigate(View::Live).await.unwrap();
        controller.navigate(View::Live).await.unwrap();

        assert_eq!(camera.opened(), 2);
        assert_eq!(camera.stopped(), 1);
        assert!(controller.camera_active());
    }

    #[tokio::test]
    async fn test_denied_camera_still_switches_view() {
        let camera = Arc::new(FakeCamera::denying());
        let mut controller = ViewController::new(camera);

        let result = controller.navigate(View::Live).await;

        assert_eq!(result, Err(MediaError::PermissionDenied));
        assert_eq!(controller.current(), View::Live);
        assert!(!controller.camera_active());
    }

    #[tokio::test]
    async fn test_drop_releases_stream() {
        let camera = Arc::new(FakeCamera::default());
        let mut controller = ViewController::new(camera.clone());
        controller.navigate(View::Live).await.unwrap();

        drop(controller);
        assert_eq!(camera.stopped(), 1);
    }
}
