#![forbid(unsafe_code)]

//! `seqdraw` lays out sequence diagrams on a constraint grid and renders them as SVG, headless.
//!
//! The input is a [`Diagram`] model (actors, events, processing instructions). Writing a parser
//! for a textual notation is left to the caller; the model deserializes from JSON.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`seqdraw::render`)

pub use seqdraw_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use seqdraw_render::canvas::{Canvas, Primitive, SvgStyle};
    pub use seqdraw_render::sequence::{RowMap, SequenceDiagramLayout};
    pub use seqdraw_render::styles::{DiagramStyles, StyleName};
    pub use seqdraw_render::svg::SvgRenderOptions;
    pub use seqdraw_render::text::{
        DeterministicTextMeasurer, MemoizedTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
    };
    pub use seqdraw_render::{LayoutOptions, layout_diagram};

    use seqdraw_core::Diagram;

    #[derive(Debug, thiserror::Error)]
    pub enum RenderError {
        #[error(transparent)]
        Model(#[from] seqdraw_core::Error),
        #[error(transparent)]
        Render(#[from] seqdraw_render::Error),
        #[error("invalid diagram id `{0}`")]
        InvalidDiagramId(String),
    }

    pub type Result<T> = std::result::Result<T, RenderError>;

    /// Checks that `id` can be used as the root element's `id`, including when several diagrams
    /// are inlined into one HTML page: an ASCII letter or `_` first, then ASCII letters, digits,
    /// `-`, `_` or `.`.
    fn check_diagram_id(id: &str) -> Result<()> {
        let mut chars = id.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(())
        } else {
            Err(RenderError::InvalidDiagramId(id.to_string()))
        }
    }

    /// Bundles a style table with layout and SVG options, so one-shot renders take a single
    /// argument. Every call re-runs the whole pipeline; nothing is cached between calls.
    #[derive(Debug, Clone, Default)]
    pub struct Renderer {
        pub styles: DiagramStyles,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Renderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_style(mut self, name: StyleName) -> Self {
            self.styles = DiagramStyles::named(name);
            self
        }

        pub fn with_styles(mut self, styles: DiagramStyles) -> Self {
            self.styles = styles;
            self
        }

        pub fn with_embedded(mut self, embedded: bool) -> Self {
            self.svg.embedded = embedded;
            self
        }

        pub fn with_mirror_actors(mut self, mirror: bool) -> Self {
            self.layout.mirror_actors = mirror;
            self
        }

        /// Sets the root element id. Ids that would not survive inlining are rejected.
        pub fn with_diagram_id(mut self, diagram_id: &str) -> Result<Self> {
            check_diagram_id(diagram_id)?;
            self.svg.diagram_id = Some(diagram_id.to_string());
            Ok(self)
        }

        pub fn layout(&self, diagram: &Diagram) -> Result<SequenceDiagramLayout> {
            Ok(layout_diagram(diagram, &self.styles, &self.layout)?)
        }

        pub fn render_svg(&self, diagram: &Diagram) -> Result<String> {
            Ok(self.layout(diagram)?.render_svg(&self.svg))
        }

        /// Parses a JSON diagram model and renders it.
        pub fn render_json_svg(&self, text: &str) -> Result<String> {
            let diagram = Diagram::from_json_str(text)?;
            self.render_svg(&diagram)
        }

        pub fn write_svg<W: std::io::Write>(&self, diagram: &Diagram, writer: &mut W) -> Result<()> {
            Ok(self.layout(diagram)?.write_svg(writer, &self.svg)?)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn diagram_ids_must_be_inlinable() {
            for id in ["login-flow", "_draft", "v1.2_final"] {
                let renderer = Renderer::new().with_diagram_id(id).unwrap();
                assert_eq!(renderer.svg.diagram_id.as_deref(), Some(id));
            }
            for id in ["", "1st", "my diagram", "a:b", "-x", "caf\u{e9}"] {
                let err = Renderer::new().with_diagram_id(id).unwrap_err();
                assert!(matches!(&err, RenderError::InvalidDiagramId(bad) if bad == id), "{id}");
            }
        }

        #[test]
        fn renderer_renders_json_models() {
            let svg = Renderer::new()
                .with_embedded(true)
                .with_diagram_id("my-diagram")
                .unwrap()
                .render_json_svg(
                    r#"{"actors":[{"name":"A"},{"name":"B"}],
                        "events":[{"type":"message","from":0,"to":1,"label":"hi"}]}"#,
                )
                .unwrap();
            assert!(svg.starts_with("<svg"));
            assert!(svg.contains(r#"id="my-diagram""#));
            assert!(svg.contains(">hi</text>"));
        }

        #[test]
        fn renderer_reports_model_errors() {
            let err = Renderer::new().render_json_svg("{\"actors\": 3}").unwrap_err();
            assert!(matches!(err, RenderError::Model(seqdraw_core::Error::Json(_))));

            let err = Renderer::new()
                .render_json_svg(
                    r#"{"events":[{"type":"message","from":0,"to":1,"arrow":{"head":"spear"}}]}"#,
                )
                .unwrap_err();
            assert!(err.to_string().contains("unknown arrow head `spear`"));
        }

        #[test]
        fn renderer_write_svg_matches_render_svg() {
            let diagram = Diagram::from_json_str(r#"{"actors":[{"name":"A"}]}"#).unwrap();
            let renderer = Renderer::new().with_style(StyleName::Tight);
            let mut out = Vec::new();
            renderer.write_svg(&diagram, &mut out).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), renderer.render_svg(&diagram).unwrap());
        }
    }
}
