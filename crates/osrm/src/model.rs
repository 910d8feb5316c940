use model::Coordinate;
use routing::RouteLeg;
use serde::Deserialize;
use utility::polyline;

use crate::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    /// Compact polyline at precision 1e5.
    pub geometry: String,
    /// Meters.
    pub distance: Option<f64>,
    /// Seconds.
    pub duration: Option<f64>,
}

impl RouteResponse {
    /// Decodes the first candidate route into a leg. `None` when the
    /// service returned zero candidates. A geometry with fewer than two
    /// points is an error, never a partial result.
    pub fn into_leg(self) -> Result<Option<RouteLeg>, ApiError> {
        let route = match self.routes.into_iter().next() {
            Some(route) => route,
            None => return Ok(None),
        };

        let points = polyline::decode(&route.geometry)?
            .into_iter()
            .map(|(latitude, longitude)| Coordinate::new(latitude, longitude))
            .collect::<Vec<_>>();
        if points.len() < 2 {
            return Err(ApiError::InvalidGeometry {
                point_count: points.len(),
            });
        }

        Ok(Some(RouteLeg {
            points,
            distance_m: route.distance,
            duration_s: route.duration,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_decodes_a_route_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [
                {
                    "geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
                    "distance": 1234.5,
                    "duration": 98.7,
                    "legs": []
                }
            ],
            "waypoints": []
        }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.code.as_deref(), Some("Ok"));

        let leg = response.into_leg().unwrap().unwrap();
        assert_eq!(leg.points.len(), 3);
        assert!((leg.points[0].latitude - 38.5).abs() < 1e-5);
        assert!((leg.points[0].longitude - -120.2).abs() < 1e-5);
        assert_eq!(leg.distance_m, Some(1234.5));
        assert_eq!(leg.duration_s, Some(98.7));
    }

    #[test]
    fn zero_candidates_is_no_route() {
        let json = r#"{ "code": "NoRoute", "routes": [] }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_leg().unwrap().is_none());
    }

    #[test]
    fn missing_routes_field_is_no_route() {
        let response: RouteResponse =
            serde_json::from_str(r#"{ "code": "Ok" }"#).unwrap();
        assert!(response.into_leg().unwrap().is_none());
    }

    #[test]
    fn malformed_geometry_is_an_error() {
        let json = r#"{ "code": "Ok", "routes": [ { "geometry": "_" } ] }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            response.into_leg(),
            Err(ApiError::DecodeError(_))
        ));
    }

    #[test]
    fn single_point_geometry_is_an_error() {
        // one coordinate pair only
        let json = r#"{ "code": "Ok", "routes": [ { "geometry": "_p~iF~ps|U" } ] }"#;
        let response: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            response.into_leg(),
            Err(ApiError::InvalidGeometry { point_count: 1 })
        ));
    }
}
