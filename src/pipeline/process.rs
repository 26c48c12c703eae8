use crate::pipeline::{geo, metrics};
use crate::types::track::{Point, Sample, Track};

/// Builds a track from the raw samples of one file.
///
/// Samples without a usable elevation are dropped, and distance is measured
/// between consecutive retained samples only. Returns `None` when nothing
/// survives.
pub fn build_track(name: &str, samples: &[Sample], color: String) -> Option<Track> {
    let mut points: Vec<Point> = Vec::with_capacity(samples.len());
    let mut running_km = 0.0;
    let mut prev: Option<(f64, f64)> = None;

    for sample in samples {
        let Some(elevation_m) = sample.elevation else {
            continue;
        };
        if !(sample.lat.is_finite() && sample.lon.is_finite() && elevation_m.is_finite()) {
            continue;
        }

        if let Some((prev_lat, prev_lon)) = prev {
            running_km += geo::distance_km(prev_lat, prev_lon, sample.lat, sample.lon);
        }
        prev = Some((sample.lat, sample.lon));

        points.push(Point {
            distance_km: running_km,
            elevation_m,
            lat: sample.lat,
            lon: sample.lon,
        });
    }

    if points.is_empty() {
        return None;
    }

    Some(Track {
        name: name.to_string(),
        color,
        distance_km: metrics::total_distance_km(&points),
        elevation_gain_m: metrics::elevation_gain_m(&points),
        points,
    })
}
