use std::error::Error;

use async_trait::async_trait;
use model::Coordinate;

pub mod cycle;
pub mod location;
pub mod route;

pub use cycle::TourCycle;
pub use location::{LocationProvider, Permission, StaticLocation};
pub use route::{FetchOutcome, RouteState, RouteTracker};

/// Failures escaping the routing core. Collaborator-specific errors are
/// boxed; callers at the surface convert them, nothing in here panics.
pub type RequestError = Box<dyn Error + Send + Sync>;

pub type RequestResult<O> = Result<O, RequestError>;

/// One driving leg between two tour stations, as produced by a routing
/// service.
#[derive(Debug, Clone)]
pub struct RouteLeg {
    /// Continuous path with at least two coordinates.
    pub points: Vec<Coordinate>,
    pub distance_m: Option<f64>,
    pub duration_s: Option<f64>,
}

/// Seam for the external driving-routing collaborator.
#[async_trait]
pub trait RouteService {
    /// Requests a driving route between two coordinates. `Ok(None)` means
    /// the service answered with zero candidate routes, which is not an
    /// error.
    async fn driving_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> RequestResult<Option<RouteLeg>>;
}
