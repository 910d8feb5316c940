use std::env;
use std::sync::Arc;

use log::info;
use model::poi::Catalog;
use osrm::{OsrmClient, OsrmConfig};
use routing::{
    LocationProvider, Permission, RouteTracker, StaticLocation, TourCycle,
};
use tokio::sync::RwLock;
use web::{start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // catalog
    let catalog = match env::var("TOUR_CATALOG_FILE") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .expect("could not read catalog file.");
            Catalog::from_json_str(&json)
                .expect("could not parse catalog file.")
        }
        Err(_) => Catalog::et_tour(),
    };
    info!(
        "catalog with {} stations, {:.1} km tour",
        catalog.len(),
        catalog.total_length_km()
    );

    // routing service
    let osrm = OsrmClient::new(OsrmConfig::from_env());

    // device location (optional)
    let location = StaticLocation::from_env();
    if location.request_permission().await == Permission::Denied {
        info!("no device location configured, serving without a position");
    }

    // web server
    let bind_addr = env::var("TOUR_BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    let state = WebState {
        tour: Arc::new(RwLock::new(TourCycle::new(catalog))),
        tracker: Arc::new(RouteTracker::new(osrm)),
        location: Arc::new(location),
    };

    let _ = start_web_server(state, &bind_addr).await;
}
