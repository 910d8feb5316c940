use std::sync::Arc;

use axum::{extract::FromRef, routing::get_service, Router};
use osrm::OsrmClient;
use routing::{LocationProvider, RouteTracker, TourCycle};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::services::{ServeDir, ServeFile};

pub mod api;
pub mod common;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub tour: Arc<RwLock<TourCycle>>,
    pub tracker: Arc<RouteTracker<OsrmClient>>,
    pub location: Arc<dyn LocationProvider + Send + Sync>,
}

pub async fn start_web_server(
    state: WebState,
    bind_addr: &str,
) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(static_content_router());

    let listener = TcpListener::bind(bind_addr).await?;
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}

fn static_content_router() -> Router {
    Router::new().nest_service(
        "/",
        get_service(
            ServeDir::new("./resources/www/")
                .not_found_service(ServeFile::new("./resources/www/error404.html")),
        ),
    )
}
