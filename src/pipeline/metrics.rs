use crate::types::track::Point;

/// Sum of positive elevation deltas between consecutive points.
pub fn elevation_gain_m(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].elevation_m - pair[0].elevation_m).max(0.0))
        .sum()
}

pub fn total_distance_km(points: &[Point]) -> f64 {
    points.last().map(|p| p.distance_km).unwrap_or(0.0)
}
