use axum::{
    extract::State,
    routing::{get, on},
    Json, Router,
};
use model::Coordinate;
use routing::RouteState;
use serde::Serialize;

use crate::{
    common::{route_not_found, schema_no_example, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema_no_example::<RouteState>))
        .route("/", get(get_route))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Bounds {
    south_west: Coordinate,
    north_east: Coordinate,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteStateResponse {
    #[serde(flatten)]
    route: RouteState,
    /// Fitting region for the current path, absent while no path is set.
    bounds: Option<Bounds>,
}

async fn get_route(
    State(WebState { tracker, .. }): State<WebState>,
) -> Json<RouteStateResponse> {
    let route = tracker.state().await;
    let bounds = utility::geo::bounding_box(
        &route
            .points
            .iter()
            .map(|point| (point.latitude, point.longitude))
            .collect::<Vec<_>>(),
    )
    .map(|((min_lat, min_lon), (max_lat, max_lon))| Bounds {
        south_west: Coordinate::new(min_lat, min_lon),
        north_east: Coordinate::new(max_lat, max_lon),
    });

    Json(RouteStateResponse { route, bounds })
}
