use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::features::tickets::models::Coordinates;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeolocationError {
    #[error("Location unavailable")]
    Unavailable,

    #[error("Location lookup timed out")]
    Timeout,
}

/// Source of the reporter's current position
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position attached to the request by the client, if any
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientReportedLocation(pub Option<Coordinates>);

impl ClientReportedLocation {
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Self(Some(Coordinates::new(lat, lng))),
            _ => Self(None),
        }
    }
}

#[async_trait]
impl GeolocationProvider for ClientReportedLocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}

/// Resolve the current position, falling back to (0, 0) on any failure
pub async fn locate_or_default(provider: &dyn GeolocationProvider, limit: Duration) -> Coordinates {
    let result = match tokio::time::timeout(limit, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(GeolocationError::Timeout),
    };

    result.unwrap_or_else(|e| {
        tracing::warn!("Geolocation failed, using (0, 0): {}", e);
        Coordinates::UNAVAILABLE
    })
}
