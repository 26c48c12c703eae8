mod gpx;

use crate::error::ParseError;
use crate::types::track::{FileFormat, Sample};

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Sample>, ParseError>;
}

/// Reads the ordered track-point samples of a file.
pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Vec<Sample>, ParseError> {
    match format {
        FileFormat::Gpx => gpx::GpxParser.parse(bytes),
    }
}
