use crate::error::RenderError;
use crate::types::palette;
use crate::types::view::{ChartSeries, ChartView, RenderOptions};

const TICK_COUNT: usize = 5;
const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";
const AXIS_COLOR: &str = "#555555";
const GRID_COLOR: &str = "#E4E4E4";
const FALLBACK_SERIES_COLOR: &str = "#3366CC";
const LEGEND_ROW_HEIGHT: f64 = 18.0;

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.left + (x / self.x_max) * self.width;
        let py = self.top + (1.0 - (y - self.y_min) / (self.y_max - self.y_min)) * self.height;
        (px, py)
    }
}

/// Draws the elevation profile of every series as an SVG line chart.
pub fn render_chart_svg(chart: &ChartView, options: &RenderOptions) -> Result<String, RenderError> {
    let width = options.width as f64;
    let height = options.height as f64;
    let padding = options.padding as f64;
    let view_width = width - 2.0 * padding;
    let view_height = height - 2.0 * padding;
    if view_width <= 0.0 || view_height <= 0.0 {
        return Err(RenderError::SvgError("Invalid viewport size".to_string()));
    }

    let (x_max, y_min, y_max) = data_bounds(&chart.series);
    let frame = Frame {
        left: padding,
        top: padding,
        width: view_width,
        height: view_height,
        x_max,
        y_min,
        y_max,
    };

    let grid = build_grid(&frame);
    let lines: String = chart
        .series
        .iter()
        .map(|series| build_series_line(series, &frame, options.stroke_width))
        .collect();
    let legend = build_legend(&chart.series, &frame);
    let axis_labels = format!(
        r#"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="14" fill="{AXIS_COLOR}" text-anchor="middle">{}</text>
  <text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="14" fill="{AXIS_COLOR}" text-anchor="middle" transform="rotate(-90 {:.1} {:.1})">{}</text>"#,
        frame.left + frame.width / 2.0,
        height - padding / 4.0,
        escape_xml(&chart.x_label),
        padding / 3.0,
        frame.top + frame.height / 2.0,
        padding / 3.0,
        frame.top + frame.height / 2.0,
        escape_xml(&chart.y_label),
    );

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  {}
  {}
  {}
  {}
</svg>"#,
        width, height, width, height, grid, lines, legend, axis_labels
    ))
}

/// Returns `(x_max, y_min, y_max)` with non-degenerate ranges.
fn data_bounds(series: &[ChartSeries]) -> (f64, f64, f64) {
    let mut x_max = 0.0_f64;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for point in series.iter().flat_map(|s| s.points.iter()) {
        x_max = x_max.max(point.x);
        y_min = y_min.min(point.y);
        y_max = y_max.max(point.y);
    }

    if !y_min.is_finite() || !y_max.is_finite() {
        return (1.0, 0.0, 1.0);
    }
    if x_max <= f64::EPSILON {
        x_max = 1.0;
    }
    if y_max - y_min <= f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }
    (x_max, y_min, y_max)
}

fn build_grid(frame: &Frame) -> String {
    let mut nodes = String::new();
    for i in 0..=TICK_COUNT {
        let t = i as f64 / TICK_COUNT as f64;

        let y_value = frame.y_min + t * (frame.y_max - frame.y_min);
        let (_, py) = frame.project(0.0, y_value);
        nodes.push_str(&format!(
            r#"<line x1="{:.1}" y1="{py:.1}" x2="{:.1}" y2="{py:.1}" stroke="{GRID_COLOR}" stroke-width="1"/>"#,
            frame.left,
            frame.left + frame.width,
        ));
        nodes.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="12" fill="{AXIS_COLOR}" text-anchor="end">{:.0}</text>"#,
            frame.left - 6.0,
            py + 4.0,
            y_value
        ));

        let x_value = t * frame.x_max;
        let (px, _) = frame.project(x_value, frame.y_min);
        nodes.push_str(&format!(
            r#"<text x="{px:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="12" fill="{AXIS_COLOR}" text-anchor="middle">{:.2}</text>"#,
            frame.top + frame.height + 16.0,
            x_value
        ));
    }

    nodes.push_str(&format!(
        r#"<path d="M{:.1},{:.1} L{:.1},{:.1} L{:.1},{:.1}" fill="none" stroke="{AXIS_COLOR}" stroke-width="1.5"/>"#,
        frame.left,
        frame.top,
        frame.left,
        frame.top + frame.height,
        frame.left + frame.width,
        frame.top + frame.height,
    ));
    nodes
}

fn build_series_line(series: &ChartSeries, frame: &Frame, stroke_width: f32) -> String {
    if series.points.is_empty() {
        return String::new();
    }

    let coords = series
        .points
        .iter()
        .map(|p| {
            let (x, y) = frame.project(p.x, p.y);
            format!("{:.2},{:.2}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-linecap="round" stroke-linejoin="round"/>"#,
        coords,
        series_color(series),
        stroke_width
    )
}

fn build_legend(series: &[ChartSeries], frame: &Frame) -> String {
    let x = frame.left + frame.width - 12.0;
    series
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let y = frame.top + 16.0 + idx as f64 * LEGEND_ROW_HEIGHT;
            format!(
                r#"<rect x="{:.1}" y="{:.1}" width="12" height="4" fill="{}"/><text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="13" fill="{AXIS_COLOR}" text-anchor="end">{}</text>"#,
                x,
                y - 6.0,
                series_color(s),
                x - 6.0,
                y,
                escape_xml(&s.label)
            )
        })
        .collect()
}

/// Only well-formed `#RRGGBB` colors reach the SVG.
fn series_color(series: &ChartSeries) -> String {
    match palette::parse_hex_color(&series.color) {
        Some((r, g, b)) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        None => FALLBACK_SERIES_COLOR.to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
