use axum::{routing::on, Router};

pub mod location;
pub mod route;
pub mod tour;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes(state: WebState) -> Router {
    Router::new()
        .nest_service("/tour", tour::routes(state.clone()))
        .nest_service("/route", route::routes(state.clone()))
        .nest_service("/location", location::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}
