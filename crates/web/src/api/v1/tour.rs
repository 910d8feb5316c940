use axum::{
    extract::State,
    routing::{get, on, post},
    Json, Router,
};
use log::error;
use model::poi::PointOfInterest;
use routing::FetchOutcome;
use serde::Serialize;

use crate::{
    common::{route_not_found, schema, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<PointOfInterest>))
        .route("/current", get(get_current))
        .route("/advance", post(advance))
        .route("/", get(get_tour))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TourResponse {
    points: Vec<PointOfInterest>,
    active_index: usize,
    total_length_km: f64,
}

async fn get_tour(
    State(WebState { tour, .. }): State<WebState>,
) -> Json<TourResponse> {
    let tour = tour.read().await;
    Json(TourResponse {
        points: tour.catalog().points().to_vec(),
        active_index: tour.active_index(),
        total_length_km: tour.catalog().total_length_km(),
    })
}

async fn get_current(
    State(WebState { tour, .. }): State<WebState>,
) -> Json<PointOfInterest> {
    Json(tour.read().await.current().clone())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvanceResponse {
    current: PointOfInterest,
    next: PointOfInterest,
    /// `updated`, `noRoute`, `stale` or `failed`. The tour pointer has
    /// moved regardless; a failed fetch only leaves the route overlay
    /// stale.
    route: &'static str,
}

/// The single user action: move the tour pointer one station ahead and
/// fetch the driving route from the station just left to the new one.
async fn advance(
    State(WebState { tour, tracker, .. }): State<WebState>,
) -> Json<AdvanceResponse> {
    let (current, next) = tour.write().await.advance();

    let route = match tracker
        .fetch_route(&current.coordinate(), &next.coordinate())
        .await
    {
        Ok(FetchOutcome::Updated) => "updated",
        Ok(FetchOutcome::NoRoute) => "noRoute",
        Ok(FetchOutcome::Stale) => "stale",
        Err(why) => {
            error!("route fetch for tour advance failed: {why}");
            "failed"
        }
    };

    Json(AdvanceResponse {
        current,
        next,
        route,
    })
}
