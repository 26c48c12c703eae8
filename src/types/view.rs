use serde::{Deserialize, Serialize};

use crate::types::unit::UnitSystem;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Distance from track start in display units.
    pub x: f64,
    /// Elevation in display units.
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub show_markers: bool,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartView {
    pub unit: UnitSystem,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl Bounds {
    pub fn around(point: LatLon) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn extend(&mut self, point: LatLon) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lon = self.south_west.lon.min(point.lon);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lon = self.north_east.lon.max(point.lon);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapPath {
    pub name: String,
    pub color: String,
    pub path: Vec<LatLon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
    pub paths: Vec<MapPath>,
    /// Union of all track bounds; `None` when nothing is loaded.
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub color: String,
    pub distance: String,
    pub elevation_gain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryView {
    pub unit: UnitSystem,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub stroke_width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            padding: 64,
            stroke_width: 2.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub background: Option<(u8, u8, u8, u8)>,
}
