use crate::types::track::Track;
use crate::types::unit::{self, UnitSystem};

pub const CSV_FILENAME: &str = "gpx_summary.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";

/// Renders the per-track summary as CSV text.
///
/// Names are written as-is; a comma inside a track name shifts that row's
/// columns.
pub fn to_csv(tracks: &[Track], unit: UnitSystem) -> String {
    let header = format!(
        "Track Name,Distance ({}),Elevation Gain ({})",
        unit.distance_label(),
        unit.elevation_label()
    );

    std::iter::once(header)
        .chain(tracks.iter().map(|track| {
            format!(
                "{},{},{}",
                track.name,
                unit::format_distance(track.distance_km, unit),
                unit::format_elevation(track.elevation_gain_m, unit)
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}
