pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Smallest box `((min_lat, min_lon), (max_lat, max_lon))` containing all
/// given `(latitude, longitude)` points. `None` for an empty sequence.
pub fn bounding_box(points: &[(f64, f64)]) -> Option<((f64, f64), (f64, f64))> {
    let (&first, rest) = points.split_first()?;

    let mut min_lat = first.0;
    let mut max_lat = first.0;
    let mut min_lon = first.1;
    let mut max_lon = first.1;

    for &(latitude, longitude) in rest {
        min_lat = min_lat.min(latitude);
        max_lat = max_lat.max(latitude);
        min_lon = min_lon.min(longitude);
        max_lon = max_lon.max(longitude);
    }

    Some(((min_lat, min_lon), (max_lat, max_lon)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_between_known_cities() {
        // Varginha to Três Corações, roughly 26 km apart.
        let distance =
            haversine_distance(-21.5539, -45.4370, -21.6953, -45.2525);
        assert!(distance > 20.0 && distance < 30.0, "distance: {distance}");
    }

    #[test]
    fn haversine_of_identical_points_is_zero() {
        let distance = haversine_distance(38.5, -120.2, 38.5, -120.2);
        assert!(distance.abs() < 1e-9);
    }

    #[test]
    fn bounding_box_spans_all_points() {
        let points = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        let ((min_lat, min_lon), (max_lat, max_lon)) =
            bounding_box(&points).unwrap();
        assert_eq!(min_lat, 38.5);
        assert_eq!(max_lat, 43.252);
        assert_eq!(min_lon, -126.453);
        assert_eq!(max_lon, -120.2);
    }

    #[test]
    fn bounding_box_of_empty_sequence_is_none() {
        assert!(bounding_box(&[]).is_none());
    }
}
