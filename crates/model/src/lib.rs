use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use serde_with;

pub mod poi;

/// Implementors can produce a realistic sample value, used by the web
/// surface to attach example data to published schemas.
pub trait ExampleData {
    fn example_data() -> Self;
}

/// A geographic position in degrees. Value type without identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        utility::geo::haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.latitude, coordinate.longitude)
    }
}

impl ExampleData for Coordinate {
    fn example_data() -> Self {
        Self::new(-21.5539, -45.4370)
    }
}
