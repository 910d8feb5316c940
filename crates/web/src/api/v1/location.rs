use axum::{
    http::StatusCode,
    extract::State,
    routing::{get, on},
    Json, Router,
};
use model::Coordinate;
use routing::Permission;

use crate::{
    common::{
        route_not_found, schema, RouteErrorResponse, RouteResult,
        METHOD_FILTER_ALL,
    },
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<Coordinate>))
        .route("/", get(get_location))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// Device position via the geolocation collaborator. Denied permission is
/// an expected answer, not a server fault.
async fn get_location(
    State(WebState { location, .. }): State<WebState>,
) -> RouteResult<Coordinate> {
    match location.request_permission().await {
        Permission::Granted => location
            .current_position()
            .await
            .map(Json)
            .map_err(RouteErrorResponse::from),
        Permission::Denied => Err(RouteErrorResponse::new(StatusCode::FORBIDDEN)
            .with_message("location permission denied")),
    }
}
