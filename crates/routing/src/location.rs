use std::env;

use async_trait::async_trait;
use model::Coordinate;

use crate::RequestResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Seam for the device geolocation collaborator. The actual provider lives
/// in the rendering frontend; nothing in the core requires a position, it
/// only feeds an optional "show my location" layer.
#[async_trait]
pub trait LocationProvider {
    async fn request_permission(&self) -> Permission;

    /// The current device position. Fails when permission was denied.
    async fn current_position(&self) -> RequestResult<Coordinate>;
}

/// Fixed position read from `TOUR_DEVICE_LAT` / `TOUR_DEVICE_LON`. Stands
/// in for a device location service; permission counts as denied when the
/// variables are unset.
#[derive(Debug, Clone, Default)]
pub struct StaticLocation {
    position: Option<Coordinate>,
}

impl StaticLocation {
    pub fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }

    pub fn from_env() -> Self {
        let latitude = env::var("TOUR_DEVICE_LAT")
            .ok()
            .and_then(|raw| raw.parse().ok());
        let longitude = env::var("TOUR_DEVICE_LON")
            .ok()
            .and_then(|raw| raw.parse().ok());
        let position = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => {
                Some(Coordinate::new(latitude, longitude))
            }
            _ => None,
        };
        Self::new(position)
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn request_permission(&self) -> Permission {
        if self.position.is_some() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    async fn current_position(&self) -> RequestResult<Coordinate> {
        self.position
            .ok_or_else(|| "location permission denied".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unset_position_denies_permission() {
        let provider = StaticLocation::new(None);
        assert_eq!(provider.request_permission().await, Permission::Denied);
        assert!(provider.current_position().await.is_err());
    }

    #[tokio::test]
    async fn fixed_position_is_granted_and_returned() {
        let provider =
            StaticLocation::new(Some(Coordinate::new(-21.5539, -45.4370)));
        assert_eq!(provider.request_permission().await, Permission::Granted);
        let position = provider.current_position().await.unwrap();
        assert_eq!(position.latitude, -21.5539);
    }
}
