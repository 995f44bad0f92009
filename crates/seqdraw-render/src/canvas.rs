//! Append-only sink of drawing primitives.
//!
//! Paint order is append order; nothing is merged, sorted or dropped.

use seqdraw_core::geom::Point;
use serde::Serialize;
use std::fmt;

/// An ordered list of CSS declarations rendered into a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SvgStyle {
    decls: Vec<(String, String)>,
}

impl SvgStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a declaration, replacing an earlier value for the same property in place.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.decls.iter_mut().find(|(k, _)| k == property) {
            slot.1 = value;
        } else {
            self.decls.push((property.to_string(), value));
        }
    }

    /// Parses `"k:v;k:v;"` declarations. Malformed entries are skipped.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for decl in text.split(';') {
            if let Some((k, v)) = decl.split_once(':') {
                let (k, v) = (k.trim(), v.trim());
                if !k.is_empty() {
                    style.set(k, v);
                }
            }
        }
        style
    }

    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl fmt::Display for SvgStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.decls {
            write!(f, "{k}:{v};")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        style: SvgStyle,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        style: SvgStyle,
    },
    Polyline {
        points: Vec<Point>,
        style: SvgStyle,
    },
    Polygon {
        points: Vec<Point>,
        style: SvgStyle,
    },
    Path {
        d: String,
        style: SvgStyle,
    },
    /// `y` is the baseline of the text.
    Text {
        x: i32,
        y: i32,
        text: String,
        style: SvgStyle,
    },
}

impl Primitive {
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Rect { .. } => "rect",
            Primitive::Line { .. } => "line",
            Primitive::Polyline { .. } => "polyline",
            Primitive::Polygon { .. } => "polygon",
            Primitive::Path { .. } => "path",
            Primitive::Text { .. } => "text",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Canvas {
    primitives: Vec<Primitive>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, style: SvgStyle) {
        self.primitives.push(Primitive::Rect { x, y, w, h, style });
    }

    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, style: SvgStyle) {
        self.primitives.push(Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            style,
        });
    }

    pub fn polyline(&mut self, points: Vec<Point>, style: SvgStyle) {
        self.primitives.push(Primitive::Polyline { points, style });
    }

    pub fn polygon(&mut self, points: Vec<Point>, style: SvgStyle) {
        self.primitives.push(Primitive::Polygon { points, style });
    }

    pub fn path(&mut self, d: impl Into<String>, style: SvgStyle) {
        self.primitives.push(Primitive::Path { d: d.into(), style });
    }

    pub fn text(&mut self, x: i32, y: i32, text: impl Into<String>, style: SvgStyle) {
        self.primitives.push(Primitive::Text {
            x,
            y,
            text: text.into(),
            style,
        });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of primitives of the given kind (`"rect"`, `"line"`, ...).
    pub fn count(&self, kind: &str) -> usize {
        self.primitives.iter().filter(|p| p.kind() == kind).count()
    }
}
