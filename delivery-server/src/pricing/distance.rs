//! Great-circle distance

use shared::models::Coordinates;

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers
///
/// Pure and total; symmetric within floating-point tolerance.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_zero() {
        let p = Coordinates::new(40.4168, -3.7038);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let madrid = Coordinates::new(40.4168, -3.7038);
        let barcelona = Coordinates::new(41.3874, 2.1686);
        let d1 = distance_km(madrid, barcelona);
        let d2 = distance_km(barcelona, madrid);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance_madrid_barcelona() {
        // Great-circle distance is ~505 km
        let madrid = Coordinates::new(40.4168, -3.7038);
        let barcelona = Coordinates::new(41.3874, 2.1686);
        let d = distance_km(madrid, barcelona);
        assert!((d - 505.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn test_short_distance() {
        // ~1.11 km per 0.01 degree of latitude
        let a = Coordinates::new(40.0, -3.0);
        let b = Coordinates::new(40.01, -3.0);
        let d = distance_km(a, b);
        assert!((d - 1.11).abs() < 0.02, "got {d}");
    }
}
