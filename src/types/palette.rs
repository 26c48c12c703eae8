/// Hue step between consecutive tracks. Successive golden-angle steps keep
/// the spread roughly even however many tracks are loaded.
const GOLDEN_ANGLE_DEG: f64 = 137.508;
const SATURATION: f64 = 0.70;
const LIGHTNESS: f64 = 0.45;
const BASE_HUE_DEG: f64 = 210.0;

/// Deterministic color for the `index`-th track of a batch, as `#RRGGBB`.
pub fn track_color(index: usize) -> String {
    let hue = (BASE_HUE_DEG + index as f64 * GOLDEN_ANGLE_DEG).rem_euclid(360.0);
    let (r, g, b) = hsl_to_rgb(hue, SATURATION, LIGHTNESS);
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let value = hex.trim_start_matches('#');
    if value.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&value[0..2], 16).ok()?;
    let g = u8::from_str_radix(&value[2..4], 16).ok()?;
    let b = u8::from_str_radix(&value[4..6], 16).ok()?;
    Some((r, g, b))
}

fn hsl_to_rgb(hue_deg: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue_deg / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    (to_u8(r1 + m), to_u8(g1 + m), to_u8(b1 + m))
}

fn to_u8(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}
