// 🎨 SVG Renderer - draws a ChartLayout
//
// Pure string building: the layout already holds every coordinate, this
// module only decides drawing order, class names and path syntax.
//
// Arc angles follow the usual arc-generator convention: 0 at 12 o'clock,
// growing clockwise, point = (r·sin a, −r·cos a).

use crate::layout::{BubbleLayout, ChartLayout};
use crate::partition::CategorySector;
use crate::text::LineKind;
use std::f64::consts::PI;
use std::fmt::Write;

const EPSILON: f64 = 1e-9;

/// Compact number formatting: at most 3 decimals, no trailing zeros
pub fn num(x: f64) -> String {
    let s = format!("{:.3}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape text content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Category name as a CSS class suffix
pub fn class_suffix(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

fn arc_point(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Path data for a ring segment centered on the origin.
/// `inner` may be 0 for a pie wedge; `end` may be smaller than `start`.
pub fn arc_path(inner: f64, outer: f64, start: f64, end: f64) -> Option<String> {
    let delta = end - start;
    if delta.abs() < EPSILON || outer <= 0.0 {
        return None;
    }

    // A full turn cannot be one SVG arc; split it at the half
    if delta.abs() >= 2.0 * PI - EPSILON {
        let mid = start + delta / 2.0;
        let first = arc_path(inner, outer, start, mid)?;
        let second = arc_path(inner, outer, mid, start + delta.signum() * 2.0 * PI)?;
        return Some(format!("{}{}", first, second));
    }

    let sweep = if delta > 0.0 { 1 } else { 0 };
    let large = if delta.abs() > PI { 1 } else { 0 };

    let (x0, y0) = arc_point(outer, start);
    let (x1, y1) = arc_point(outer, end);
    let mut d = format!(
        "M{},{}A{},{},0,{},{},{},{}",
        num(x0), num(y0), num(outer), num(outer), large, sweep, num(x1), num(y1)
    );

    if inner > 0.0 {
        let (x2, y2) = arc_point(inner, end);
        let (x3, y3) = arc_point(inner, start);
        let _ = write!(
            d,
            "L{},{}A{},{},0,{},{},{},{}Z",
            num(x2), num(y2), num(inner), num(inner), large, 1 - sweep, num(x3), num(y3)
        );
    } else {
        d.push_str("L0,0Z");
    }

    Some(d)
}

fn render_sector(out: &mut String, sector: &CategorySector, layout: &ChartLayout) {
    // Chart angles grow counter-clockwise from 3 o'clock
    let start = PI / 2.0 - sector.start_angle;
    let end = PI / 2.0 - sector.end_angle;
    if let Some(d) = arc_path(0.0, layout.sector_radius, start, end) {
        let _ = writeln!(
            out,
            r#"  <path d="{}" transform="translate({} {})" class="category category-{}"/>"#,
            d,
            num(layout.center_x),
            num(layout.center_y),
            escape(&class_suffix(&sector.category))
        );
    }
}

fn render_years(out: &mut String, layout: &ChartLayout) {
    for ring in &layout.rings {
        let _ = writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" class="year-ring"/>"#,
            num(layout.center_x),
            num(layout.center_y),
            num(ring.radius)
        );
    }

    let c = &layout.clearance;
    let _ = writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" class="year-clearance"/>"#,
        num(c.x),
        num(c.y),
        num(c.width),
        num(c.height)
    );

    for label in &layout.year_labels {
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}" class="year-label">{}</text>"#,
            num(label.x),
            num(label.y),
            escape(&label.text)
        );
    }

    let _ = writeln!(
        out,
        r#"  <text x="{}" y="{}" class="year-caption">{}</text>"#,
        num(layout.caption.x),
        num(layout.caption.y),
        escape(&layout.caption.text)
    );
}

fn render_bubble(out: &mut String, bubble: &BubbleLayout) {
    let g = &bubble.geometry;
    let (cx, cy, r) = (num(g.center_x), num(g.center_y), num(g.radius));

    let _ = writeln!(out, r#"  <g class="currency" data-code="{}">"#, escape(bubble.code()));
    let _ = writeln!(out, r#"    <circle cx="{}" cy="{}" r="{}" class="c-background"/>"#, cx, cy, r);

    for (arc, class) in [(&g.cap_arc, "c-cap-arc"), (&g.vol_arc, "c-vol-arc")] {
        if let Some(d) = arc_path(arc.inner_radius, arc.outer_radius, arc.start_angle, arc.end_angle) {
            let _ = writeln!(
                out,
                r#"    <path d="{}" transform="translate({} {})" class="{}"/>"#,
                d, cx, cy, class
            );
        }
    }

    let _ = writeln!(out, r#"    <circle cx="{}" cy="{}" r="{}" class="c-outline"/>"#, cx, cy, r);

    for line in &bubble.text.lines {
        let class = match line.kind {
            LineKind::Code => "c-code",
            LineKind::Name => "c-name",
        };
        let _ = writeln!(
            out,
            r#"    <text x="{}" y="{}" style="font-size: {}px" class="{}">{}</text>"#,
            cx,
            num(line.y),
            num(line.font_size),
            class,
            escape(&line.text)
        );
    }
    out.push_str("  </g>\n");
}

/// Standalone SVG document for the chart
pub fn render_svg(layout: &ChartLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        num(layout.width),
        num(layout.height),
        num(layout.width),
        num(layout.height)
    );

    for sector in &layout.sectors {
        render_sector(&mut out, sector, layout);
    }
    render_years(&mut out, layout);
    for bubble in &layout.bubbles {
        render_bubble(&mut out, bubble);
    }

    out.push_str("</svg>\n");
    out
}

pub const DEFAULT_STYLE: &str = r#"
  body { margin: 0; background: #fafafa; font-family: sans-serif; }
  .category { fill: #eef3f8; stroke: #ffffff; stroke-width: 2; }
  .category:nth-of-type(even) { fill: #f6f1ea; }
  .year-ring { fill: none; stroke: #c8ccd2; stroke-dasharray: 2 3; }
  .year-clearance { fill: #fafafa; }
  .year-label, .year-caption { font-size: 11px; fill: #777; dominant-baseline: middle; }
  .year-caption { font-style: italic; }
  .c-background { fill: #ffffff; }
  .c-cap-arc { fill: #3b82f6; }
  .c-vol-arc { fill: #f59e0b; }
  .c-outline { fill: none; stroke: #334155; stroke-width: 1; }
  .c-code, .c-name { text-anchor: middle; dominant-baseline: middle; fill: #1e293b; }
  .c-code { font-weight: bold; }
"#;

/// HTML page embedding the SVG with the default stylesheet
pub fn render_html(layout: &ChartLayout, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        DEFAULT_STYLE,
        render_svg(layout)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::currency::CurrencyRecord;
    use crate::layout::compute_layout;

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(600.0), "600");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("A&B <C>"), "A&amp;B &lt;C&gt;");
        assert_eq!(class_suffix("Smart Contracts"), "smart-contracts");
    }

    #[test]
    fn test_arc_path_wedge_and_ring() {
        // Quarter wedge from 12 to 3 o'clock
        let d = arc_path(0.0, 10.0, 0.0, PI / 2.0).unwrap();
        assert_eq!(d, "M0,-10A10,10,0,0,1,10,0L0,0Z");

        // Ring segment going counter-clockwise
        let d = arc_path(5.0, 10.0, PI, PI / 2.0).unwrap();
        assert_eq!(d, "M0,10A10,10,0,0,0,10,0L5,0A5,5,0,0,1,0,5Z");

        assert!(arc_path(5.0, 10.0, PI, PI).is_none());
    }

    #[test]
    fn test_full_turn_is_split() {
        let d = arc_path(0.0, 10.0, 0.0, 2.0 * PI).unwrap();
        assert_eq!(d.matches('A').count(), 2);
    }

    #[test]
    fn test_render_svg_contents() {
        let records = vec![
            CurrencyRecord::new("BTC", "Bitcoin", 2009, "", 100.0, 50.0),
            CurrencyRecord::new("ETH", "Ethereum", 2015, "Smart Contracts", 80.0, 50.0),
            CurrencyRecord::new("XMR", "Monero", 2014, "Privacy & Anonymity", 10.0, 5.0),
        ];
        let layout = compute_layout(records, &ChartConfig::default()).unwrap();
        let svg = render_svg(&layout);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"class="category category-smart-contracts""#));
        assert_eq!(svg.matches(r#"class="year-ring""#).count(), 2);
        assert!(svg.contains(">Inception</text>"));
        assert_eq!(svg.matches(r#"class="c-outline""#).count(), 3);
        assert!(svg.contains(r#"<circle cx="600" cy="450" r="50" class="c-background"/>"#));
        assert!(svg.contains(">BTC</text>"));
    }

    #[test]
    fn test_render_html_wraps_svg() {
        let records = vec![
            CurrencyRecord::new("BTC", "Bitcoin", 2009, "", 100.0, 50.0),
            CurrencyRecord::new("ETH", "Ethereum", 2015, "Platform", 80.0, 50.0),
        ];
        let layout = compute_layout(records, &ChartConfig::default()).unwrap();
        let html = render_html(&layout, "Crypto <Bubbles>");

        assert!(html.contains("<title>Crypto &lt;Bubbles&gt;</title>"));
        assert!(html.contains("<svg"));
    }
}
