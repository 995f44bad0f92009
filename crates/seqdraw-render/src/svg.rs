//! SVG serialization of a [`Canvas`].

use crate::Result;
use crate::canvas::{Canvas, Primitive, SvgStyle};
use seqdraw_core::geom::{Point, Size};
use std::fmt::Write as _;

const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Omit the XML prolog so the document can be inlined into HTML.
    pub embedded: bool,
    /// Optional `id` attribute on the root `<svg>` element.
    pub diagram_id: Option<String>,
}

pub fn render_svg(canvas: &Canvas, size: Size, options: &SvgRenderOptions) -> String {
    let mut out = String::new();
    if !options.embedded {
        out.push_str(XML_PROLOG);
        out.push('\n');
    }

    let w = size.width.max(0);
    let h = size.height.max(0);
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}""#
    );
    if let Some(id) = options.diagram_id.as_deref() {
        out.push_str(r#" id=""#);
        escape_xml_into(&mut out, id);
        out.push('"');
    }
    out.push_str(">\n");

    for primitive in canvas.primitives() {
        push_primitive(&mut out, primitive);
        out.push('\n');
    }

    out.push_str("</svg>\n");
    out
}

/// Serializes the canvas into `writer`. I/O failures are returned as [`crate::Error::Io`].
pub fn write_svg<W: std::io::Write>(
    writer: &mut W,
    canvas: &Canvas,
    size: Size,
    options: &SvgRenderOptions,
) -> Result<()> {
    let svg = render_svg(canvas, size, options);
    writer.write_all(svg.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn push_primitive(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Rect { x, y, w, h, style } => {
            let _ = write!(
                out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}""#
            );
            push_style(out, style);
            out.push_str("/>");
        }
        Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            style,
        } => {
            let _ = write!(out, r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}""#);
            push_style(out, style);
            out.push_str("/>");
        }
        Primitive::Polyline { points, style } => {
            out.push_str(r#"<polyline points=""#);
            push_points(out, points);
            out.push('"');
            push_style(out, style);
            out.push_str("/>");
        }
        Primitive::Polygon { points, style } => {
            out.push_str(r#"<polygon points=""#);
            push_points(out, points);
            out.push('"');
            push_style(out, style);
            out.push_str("/>");
        }
        Primitive::Path { d, style } => {
            out.push_str(r#"<path d=""#);
            escape_xml_into(out, d);
            out.push('"');
            push_style(out, style);
            out.push_str("/>");
        }
        Primitive::Text { x, y, text, style } => {
            let _ = write!(out, r#"<text x="{x}" y="{y}""#);
            push_style(out, style);
            out.push('>');
            escape_xml_into(out, text);
            out.push_str("</text>");
        }
    }
}

fn push_points(out: &mut String, points: &[Point]) {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
}

fn push_style(out: &mut String, style: &SvgStyle) {
    if style.is_empty() {
        return;
    }
    out.push_str(r#" style=""#);
    escape_xml_into(out, &style.to_string());
    out.push('"');
}

fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}
