use crate::types::track::Track;
use crate::types::unit::{self, UnitSystem};
use crate::types::view::{
    Bounds, ChartPoint, ChartSeries, ChartView, LatLon, MapPath, MapView, SummaryRow, SummaryView,
};

pub fn chart_view(tracks: &[Track], unit: UnitSystem) -> ChartView {
    let series = tracks
        .iter()
        .map(|track| ChartSeries {
            label: track.name.clone(),
            color: track.color.clone(),
            show_markers: false,
            points: track
                .points
                .iter()
                .map(|p| ChartPoint {
                    x: unit::display_distance(p.distance_km, unit),
                    y: unit::display_elevation(p.elevation_m, unit),
                })
                .collect(),
        })
        .collect();

    ChartView {
        unit,
        x_label: format!("Distance ({})", unit.distance_label()),
        y_label: format!("Elevation ({})", unit.elevation_label()),
        series,
    }
}

/// Coordinates are unit independent, so the map view takes no unit.
pub fn map_view(tracks: &[Track]) -> MapView {
    let mut bounds: Option<Bounds> = None;
    let paths = tracks
        .iter()
        .map(|track| {
            let path: Vec<LatLon> = track
                .points
                .iter()
                .map(|p| LatLon { lat: p.lat, lon: p.lon })
                .collect();
            for point in &path {
                bounds = Some(match bounds {
                    Some(mut b) => {
                        b.extend(*point);
                        b
                    }
                    None => Bounds::around(*point),
                });
            }
            MapPath {
                name: track.name.clone(),
                color: track.color.clone(),
                path,
            }
        })
        .collect();

    MapView { paths, bounds }
}

pub fn summary_view(tracks: &[Track], unit: UnitSystem) -> SummaryView {
    let rows = tracks
        .iter()
        .map(|track| SummaryRow {
            name: track.name.clone(),
            color: track.color.clone(),
            distance: format!(
                "{} {}",
                unit::format_distance(track.distance_km, unit),
                unit.distance_label()
            ),
            elevation_gain: format!(
                "{} {}",
                unit::format_elevation(track.elevation_gain_m, unit),
                unit.elevation_label()
            ),
        })
        .collect();

    SummaryView { unit, rows }
}
