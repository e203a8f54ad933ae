use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::views::dtos::ViewStateDto;
use crate::features::views::models::{MediaDevices, MediaError, View};
use crate::features::views::services::ViewController;

/// Serializes navigation requests against the single view controller
pub struct ViewService {
    controller: Mutex<ViewController>,
}

impl ViewService {
    pub fn new(devices: Arc<dyn MediaDevices>) -> Self {
        Self {
            controller: Mutex::new(ViewController::new(devices)),
        }
    }

    pub async fn state(&self) -> ViewStateDto {
        let controller = self.controller.lock().await;
        ViewStateDto {
            view: controller.current(),
            camera_active: controller.camera_active(),
        }
    }

    pub async fn navigate(&self, view: View) -> Result<ViewStateDto> {
        let mut controller = self.controller.lock().await;
        controller.navigate(view).await.map_err(|e| match e {
            MediaError::PermissionDenied => AppError::CameraPermissionDenied(
                "Camera access denied. Please ensure you have given permissions.".to_string(),
            ),
        })?;

        Ok(ViewStateDto {
            view: controller.current(),
            camera_active: controller.camera_active(),
        })
    }
}
