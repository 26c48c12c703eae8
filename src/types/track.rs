/// One raw `trkpt` observation as read from the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
}

impl Sample {
    pub fn new(lat: f64, lon: f64, elevation: Option<f64>) -> Self {
        Self { lat, lon, elevation }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Cumulative distance from the first point of the track.
    pub distance_km: f64,
    pub elevation_m: f64,
    pub lat: f64,
    pub lon: f64,
}

/// A parsed file: its retained points plus metrics derived from them.
///
/// Always holds at least one point. Values are stored in metric units
/// regardless of the unit system a session displays.
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub color: String,
    pub points: Vec<Point>,
    pub distance_km: f64,
    pub elevation_gain_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Gpx,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "gpx" => Some(FileFormat::Gpx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Gpx => "gpx",
        }
    }
}

/// A file as received from a client, before parsing.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}
