use std::env;

use async_trait::async_trait;
use log::debug;
use model::Coordinate;
use routing::{RequestResult, RouteLeg, RouteService};
use serde::{Deserialize, Serialize};

use crate::model::RouteResponse;
use crate::ApiError;

pub const OSRM_API_URL: &str = "http://router.project-osrm.org/route/v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsrmConfig {
    pub base_url: String,
    pub proxy: Option<String>,
}

impl OsrmConfig {
    /// Reads `OSRM_BASE_URL` and `OSRM_PROXY`, falling back to the public
    /// demo server without a proxy.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| OSRM_API_URL.to_owned()),
            proxy: env::var("OSRM_PROXY").ok(),
        }
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: OSRM_API_URL.to_owned(),
            proxy: None,
        }
    }
}

pub struct OsrmClient {
    config: OsrmConfig,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Self {
        Self { config }
    }

    fn http_client(&self) -> Result<reqwest::Client, ApiError> {
        /* build a new http client with optional proxy */
        if let Some(proxy_url) = &self.config.proxy {
            Ok(reqwest::Client::builder()
                .proxy(reqwest::Proxy::all(proxy_url)?)
                .build()?)
        } else {
            Ok(reqwest::Client::new())
        }
    }

    /// Fetch data from an endpoint using this client.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let client = self.http_client()?;

        /* perform get-request */
        let url = format!("{}/{}", self.config.base_url, endpoint);
        debug!("requesting endpoint '{url}'");
        let response = client.get(&url).send().await?;

        /* parse response */
        match response.status() {
            reqwest::StatusCode::OK => Ok(response.json().await?),
            other => match response.text().await {
                Ok(val) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: Some(val),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    url,
                    response: None,
                }),
            },
        }
    }

    /// Endpoint path for a driving route. OSRM expects each coordinate as
    /// a `longitude,latitude` pair, in that order.
    fn driving_endpoint(
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> String {
        format!(
            "driving/{},{};{},{}?overview=full&geometries=polyline",
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }

    /// Requests a driving route and decodes the first candidate. `None`
    /// when the service found no route between the two coordinates.
    pub async fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<RouteLeg>, ApiError> {
        let endpoint = Self::driving_endpoint(origin, destination);
        let response: RouteResponse = self.get(&endpoint).await?;
        response.into_leg()
    }
}

#[async_trait]
impl RouteService for OsrmClient {
    async fn driving_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> RequestResult<Option<RouteLeg>> {
        Ok(self.route(origin, destination).await?)
    }
}
