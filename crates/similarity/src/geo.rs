use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Build a point without range checks; callers validate coordinates upstream.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether `lat` is within `[-90, 90]` and `lon` within `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Great-circle distance in kilometers between two points (Haversine).
///
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
/// `c = 2·atan2(√a, √(1−a))`, distance `= R·c`.
pub fn haversine_km(p: GeoPoint, q: GeoPoint) -> f64 {
    let lat1 = p.lat.to_radians();
    let lon1 = p.lon.to_radians();
    let lat2 = q.lat.to_radians();
    let lon2 = q.lon.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    // Rounding can push `a` just past 1.0 for near-antipodal points.
    let a = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
