use crate::error::ParseError;
use crate::pipeline::parse::Parser;
use crate::types::track::Sample;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub struct GpxParser;

impl Parser for GpxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Sample>, ParseError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut samples = Vec::new();
        let mut in_trkpt = false;
        let mut current_sample: Option<Sample> = None;
        let mut current_element = String::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = local_name(&e)?;
                    if name == "trkpt" {
                        in_trkpt = true;
                        current_sample = read_coordinates(&e)?;
                    } else if in_trkpt {
                        current_element = name;
                    }
                }
                Ok(Event::Empty(e)) => {
                    // `<trkpt lat=".." lon=".."/>` carries no elevation but is
                    // still a record of the file.
                    if local_name(&e)? == "trkpt" {
                        if let Some(sample) = read_coordinates(&e)? {
                            samples.push(sample);
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    if in_trkpt && current_element == "ele" {
                        if let Some(sample) = current_sample.as_mut() {
                            let text = e
                                .unescape()
                                .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                            sample.elevation = text.trim().parse().ok();
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if in_trkpt && current_element == "ele" {
                        if let Some(sample) = current_sample.as_mut() {
                            let raw = e.into_inner();
                            let text = std::str::from_utf8(&raw)
                                .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                            sample.elevation = text.trim().parse().ok();
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    let name_str = std::str::from_utf8(name.as_ref())
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

                    if name_str == "trkpt" {
                        if let Some(sample) = current_sample.take() {
                            samples.push(sample);
                        }
                        in_trkpt = false;
                    }
                    current_element.clear();
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::InvalidGpx(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if samples.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        Ok(samples)
    }
}

fn local_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|e| ParseError::InvalidGpx(e.to_string()))
}

/// A `trkpt` whose `lat` or `lon` is missing or not a number yields `None`
/// and is skipped.
fn read_coordinates(e: &BytesStart<'_>) -> Result<Option<Sample>, ParseError> {
    let mut lat = None;
    let mut lon = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
        let key = attr.key.local_name();
        let key = std::str::from_utf8(key.as_ref())
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
        let value = std::str::from_utf8(&attr.value)
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

        match key {
            "lat" => lat = value.trim().parse::<f64>().ok(),
            "lon" => lon = value.trim().parse::<f64>().ok(),
            _ => {}
        }
    }

    Ok(match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Sample::new(lat, lon, None)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Result<Vec<Sample>, ParseError> {
        GpxParser.parse(xml.as_bytes())
    }

    #[test]
    fn reads_coordinates_and_elevation() {
        let samples = parse(
            r#"<gpx><trk><trkseg>
                <trkpt lat="46.5" lon="7.25"><ele>1200.5</ele></trkpt>
                <trkpt lat="46.6" lon="7.30"><time>2024-01-01T00:00:00Z</time></trkpt>
            </trkseg></trk></gpx>"#,
        )
        .expect("samples");

        assert_eq!(
            samples,
            vec![
                Sample::new(46.5, 7.25, Some(1200.5)),
                Sample::new(46.6, 7.30, None),
            ]
        );
    }

    #[test]
    fn non_numeric_elevation_counts_as_missing() {
        let samples = parse(r#"<gpx><trkpt lat="1" lon="2"><ele>high</ele></trkpt></gpx>"#)
            .expect("samples");
        assert_eq!(samples, vec![Sample::new(1.0, 2.0, None)]);
    }

    #[test]
    fn skips_points_with_bad_coordinates() {
        let samples = parse(
            r#"<gpx>
                <trkpt lat="north" lon="2"><ele>5</ele></trkpt>
                <trkpt lon="2"><ele>5</ele></trkpt>
                <trkpt lat="1" lon="2"><ele>6</ele></trkpt>
            </gpx>"#,
        )
        .expect("samples");
        assert_eq!(samples, vec![Sample::new(1.0, 2.0, Some(6.0))]);
    }

    #[test]
    fn accepts_namespaced_and_self_closing_points() {
        let samples = parse(
            r#"<g:gpx xmlns:g="http://www.topografix.com/GPX/1/1">
                <g:trkpt lat="1" lon="2"><g:ele>3</g:ele></g:trkpt>
                <g:trkpt lat="4" lon="5"/>
            </g:gpx>"#,
        )
        .expect("samples");
        assert_eq!(
            samples,
            vec![Sample::new(1.0, 2.0, Some(3.0)), Sample::new(4.0, 5.0, None)]
        );
    }

    #[test]
    fn reads_elevation_from_cdata() {
        let samples = parse(
            r#"<gpx><trkpt lat="1" lon="2"><ele><![CDATA[ 100 ]]></ele></trkpt></gpx>"#,
        )
        .expect("samples");
        assert_eq!(samples, vec![Sample::new(1.0, 2.0, Some(100.0))]);
    }

    #[test]
    fn file_without_track_points_is_empty() {
        let err = parse(r#"<gpx><trk><name>nothing</name></trk></gpx>"#).unwrap_err();
        assert!(matches!(err, ParseError::EmptyFile));
    }

    #[test]
    fn mismatched_tags_are_invalid() {
        let err = parse(r#"<gpx><trkpt lat="1" lon="2"><ele>3</trkpt></gpx>"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidGpx(_)));
    }
}
