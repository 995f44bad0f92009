use crate::canvas::{Canvas, SvgStyle};
use seqdraw_core::geom::point;
use std::str::FromStr;

/// Built-in actor icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// A stick figure.
    Human,
    /// A database drum.
    Cylinder,
}

impl Icon {
    pub const ALL: [Icon; 2] = [Icon::Human, Icon::Cylinder];

    pub fn as_str(self) -> &'static str {
        match self {
            Icon::Human => "human",
            Icon::Cylinder => "cylinder",
        }
    }

    /// Width and height of the icon's drawing area.
    pub fn size(self) -> (i32, i32) {
        match self {
            Icon::Human => (20, 36),
            Icon::Cylinder => (24, 32),
        }
    }

    /// Draws the icon centered on `(cx, cy)`.
    pub fn draw(self, canvas: &mut Canvas, cx: i32, cy: i32, style: &SvgStyle) {
        let (w, h) = self.size();
        let left = cx - w / 2;
        let top = cy - h / 2;
        match self {
            Icon::Human => {
                let r = 5;
                canvas.path(
                    format!(
                        "M{} {} a{r} {r} 0 1 0 {} 0 a{r} {r} 0 1 0 {} 0 Z",
                        cx - r,
                        top + r,
                        2 * r,
                        -2 * r
                    ),
                    style.clone(),
                );
                canvas.line(cx, top + 2 * r, cx, top + 24, style.clone());
                canvas.line(left, top + 15, left + w, top + 15, style.clone());
                canvas.polyline(
                    vec![
                        point(left + 2, top + h),
                        point(cx, top + 24),
                        point(left + w - 2, top + h),
                    ],
                    style.clone().with("fill", "none"),
                );
            }
            Icon::Cylinder => {
                let rx = w / 2;
                let ry = 4;
                canvas.path(
                    format!(
                        "M{left} {} v{} a{rx} {ry} 0 0 0 {w} 0 v{}",
                        top + ry,
                        h - 2 * ry,
                        -(h - 2 * ry)
                    ),
                    style.clone(),
                );
                canvas.path(
                    format!(
                        "M{left} {} a{rx} {ry} 0 1 0 {w} 0 a{rx} {ry} 0 1 0 {} 0 Z",
                        top + ry,
                        -w
                    ),
                    style.clone(),
                );
            }
        }
    }
}

impl FromStr for Icon {
    type Err = seqdraw_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Icon::ALL
            .into_iter()
            .find(|icon| icon.as_str() == name)
            .ok_or_else(|| seqdraw_core::Error::unknown("icon", name))
    }
}
