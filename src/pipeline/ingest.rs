use crate::error::ParseError;
use crate::pipeline::{parse, process};
use crate::types::palette;
use crate::types::track::{FileFormat, RawFile, Track};

/// Parses a batch of files in upload order.
///
/// The result has one entry per input file at the same index. Colors are
/// handed out in order to the files that produce a track.
pub fn ingest(files: &[RawFile]) -> Vec<Result<Track, ParseError>> {
    let mut next_color = 0;
    files
        .iter()
        .map(|file| {
            let track = ingest_file(file, next_color)?;
            next_color += 1;
            Ok(track)
        })
        .collect()
}

fn ingest_file(file: &RawFile, color_index: usize) -> Result<Track, ParseError> {
    let format = FileFormat::from_filename(&file.name)
        .ok_or_else(|| ParseError::UnsupportedFormat(file.name.clone()))?;

    let samples = parse::parse(&file.bytes, format)?;
    tracing::debug!(
        "Read {} samples from {} file {}",
        samples.len(),
        format.as_str(),
        file.name
    );

    process::build_track(&file.name, &samples, palette::track_color(color_index))
        .ok_or(ParseError::EmptyFile)
}
