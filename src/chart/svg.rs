//! SVG drawing adapter for [`Scene`]. Each call produces a complete document; the
//! previous frame is replaced wholesale, never patched.

use std::fmt::Write as _;

use crate::chart::scene::{Axis, AxisOrientation, Scene, AXIS_TICK_SIZE};

pub fn render_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(4096 + scene.points.len() * 160);
    let _ = write_svg(&mut out, scene);
    out
}

fn write_svg(out: &mut String, scene: &Scene) -> std::fmt::Result {
    let width = scene.container.width.max(0.0);
    let height = scene.container.height.max(0.0);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="scatterplot" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    )?;
    if scene.is_empty_frame() {
        return out.write_str("</svg>\n");
    }

    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        scene.margins.left, scene.margins.top
    )?;
    if let Some(axis) = &scene.x_axis {
        write_axis(out, axis)?;
    }
    if let Some(axis) = &scene.y_axis {
        write_axis(out, axis)?;
    }

    out.write_str("<g class=\"points\">\n")?;
    for (index, point) in scene.points.iter().enumerate() {
        writeln!(
            out,
            r#"<circle data-point="{index}" cx="{}" cy="{}" r="{}" style="fill: {}; fill-opacity: {}"/>"#,
            point.cx, point.cy, point.r, point.fill, point.fill_opacity
        )?;
    }
    out.write_str("</g>\n")?;

    out.write_str("<g class=\"legend\">\n")?;
    for entry in &scene.legend {
        writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" style="fill: {}"/>"#,
            entry.marker_cx, entry.marker_cy, entry.marker_r, entry.color
        )?;
        writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="left" style="fill: {}; alignment-baseline: middle">{}</text>"#,
            entry.label_x,
            entry.label_y,
            entry.color,
            escape(&entry.region)
        )?;
    }
    out.write_str("</g>\n</g>\n</svg>\n")
}

fn write_axis(out: &mut String, axis: &Axis) -> std::fmt::Result {
    let k = AXIS_TICK_SIZE;
    let (class, domain_path) = match axis.orientation {
        AxisOrientation::Bottom => ("axis axis-x", format!("M0,{k}V0H{}V{k}", axis.length)),
        AxisOrientation::Left => ("axis axis-y", format!("M-{k},{}H0V0H-{k}", axis.length)),
    };
    writeln!(
        out,
        r#"<g class="{class}" transform="translate({},{})" fill="none" font-size="10" font-family="sans-serif">"#,
        axis.translate.0, axis.translate.1
    )?;
    writeln!(out, r#"<path class="domain" stroke="currentColor" d="{domain_path}"/>"#)?;
    for tick in &axis.ticks {
        let label = escape(&tick.label);
        match axis.orientation {
            AxisOrientation::Bottom => writeln!(
                out,
                r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="{k}"/><text fill="currentColor" y="{}" dy="0.71em" text-anchor="middle">{label}</text></g>"#,
                tick.offset,
                k + 3.0
            )?,
            AxisOrientation::Left => writeln!(
                out,
                r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="-{k}"/><text fill="currentColor" x="-{}" dy="0.32em" text-anchor="end">{label}</text></g>"#,
                tick.offset,
                k + 3.0
            )?,
        }
    }
    out.write_str("</g>\n")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
