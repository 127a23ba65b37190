//! SVG snapshot of a [`Canvas`].

use std::fmt::Write;

use crate::surface::{Anchor, Canvas, ShapeKind, Surface};

/// Convert a color name such as `"light blue"` into its SVG keyword.
fn svg_color(name: &str) -> String {
    name.split_whitespace().collect::<String>().to_ascii_lowercase()
}

/// Escape text content for XML.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render every shape on `canvas` into a standalone SVG document.
///
/// Shapes are emitted in stacking order, so later shapes paint over earlier ones.
#[must_use]
pub fn render_svg(canvas: &Canvas) -> String {
    let mut output = String::new();
    writeln!(
        &mut output,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width(),
        h = canvas.height()
    )
    .expect("writing to string cannot fail");

    for (_, shape) in canvas.shapes() {
        let fill = svg_color(&shape.fill);
        let bounds = shape.bounds;
        let written = match &shape.kind {
            ShapeKind::Oval => writeln!(
                &mut output,
                r#"  <ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{fill}"/>"#,
                bounds.min.x + bounds.width() / 2.0,
                bounds.min.y + bounds.height() / 2.0,
                bounds.width() / 2.0,
                bounds.height() / 2.0,
            ),
            ShapeKind::Rectangle => writeln!(
                &mut output,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"/>"#,
                bounds.min.x,
                bounds.min.y,
                bounds.width(),
                bounds.height(),
            ),
            ShapeKind::Polygon(vertices) => {
                let points = vertices
                    .iter()
                    .map(|vertex| format!("{},{}", vertex.x, vertex.y))
                    .collect::<Vec<_>>()
                    .join(" ");
                let stroke = shape.outline.as_deref().map_or_else(|| fill.clone(), svg_color);
                writeln!(
                    &mut output,
                    r#"  <polygon points="{points}" fill="{fill}" stroke="{stroke}" stroke-width="0.5"/>"#,
                )
            }
            ShapeKind::Text {
                text,
                position,
                style,
            } => {
                let family = style.font.split_whitespace().next().unwrap_or("sans-serif");
                let (anchor, baseline) = match style.anchor {
                    Anchor::Center => ("middle", "central"),
                    Anchor::NorthWest => ("start", "hanging"),
                };
                writeln!(
                    &mut output,
                    r#"  <text x="{}" y="{}" fill="{fill}" font-family="{family}" font-size="{}" text-anchor="{anchor}" dominant-baseline="{baseline}">{}</text>"#,
                    position.x,
                    position.y,
                    style.font_size(),
                    escape(text),
                )
            }
        };
        written.expect("writing to string cannot fail");
    }

    output.push_str("</svg>\n");
    output
}
