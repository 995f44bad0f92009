use seqdraw_core::Diagram;
use seqdraw_render::styles::DiagramStyles;
use seqdraw_render::svg::SvgRenderOptions;
use seqdraw_render::{LayoutOptions, layout_diagram};
use serde_json::json;

fn extract_self_closing_tags<'a>(s: &'a str, tag_name: &str) -> Vec<&'a str> {
    let needle = format!("<{tag_name} ");
    let mut out = Vec::new();
    let mut i = 0;
    while let Some(pos) = s[i..].find(&needle) {
        let start = i + pos;
        let Some(end_rel) = s[start..].find("/>") else {
            break;
        };
        let end = start + end_rel + 2;
        out.push(&s[start..end]);
        i = end;
    }
    out
}

fn attr_i32(tag: &str, name: &str) -> Option<i32> {
    let needle = format!(r#" {name}=""#);
    let i = tag.find(&needle)? + needle.len();
    let rest = &tag[i..];
    let end = rest.find('"')?;
    rest[..end].parse::<i32>().ok()
}

fn render(value: serde_json::Value, options: &SvgRenderOptions) -> String {
    let diagram = Diagram::from_value(value).expect("diagram model");
    layout_diagram(
        &diagram,
        &DiagramStyles::default_style(),
        &LayoutOptions::default(),
    )
    .expect("layout ok")
    .render_svg(options)
}

fn login() -> serde_json::Value {
    json!({
        "title": "Login",
        "actors": [{ "name": "Client" }, { "name": "Server" }],
        "events": [
            { "type": "message", "from": 0, "to": 1, "label": "POST /login" },
            { "type": "note", "actor": 1, "position": "right_of", "text": "check <password>" },
            {
                "type": "message", "from": 1, "to": 0, "label": "200 OK",
                "arrow": { "stem": "dashed", "head": "open" }
            }
        ]
    })
}

#[test]
fn svg_root_matches_layout_size() {
    let diagram = Diagram::from_value(login()).unwrap();
    let layout = layout_diagram(
        &diagram,
        &DiagramStyles::default_style(),
        &LayoutOptions::default(),
    )
    .unwrap();
    let svg = layout.render_svg(&SvgRenderOptions::default());
    let size = layout.size();

    assert!(svg.starts_with("<?xml"));
    let root_start = svg.find("<svg").unwrap();
    let root_end = root_start + svg[root_start..].find('>').unwrap();
    let root = &svg[root_start..root_end];
    assert_eq!(attr_i32(root, "width"), Some(size.width));
    assert_eq!(attr_i32(root, "height"), Some(size.height));
}

#[test]
fn text_is_escaped() {
    let svg = render(login(), &SvgRenderOptions::default());
    assert!(svg.contains("check &lt;password&gt;"));
    assert!(!svg.contains("<password>"));
}

#[test]
fn dashed_reply_uses_a_dash_array() {
    let svg = render(login(), &SvgRenderOptions::default());
    let lines = extract_self_closing_tags(&svg, "line");
    assert!(
        lines
            .iter()
            .any(|l| l.contains("stroke-dasharray:4,2;") && attr_i32(l, "y1") == attr_i32(l, "y2"))
    );
}

#[test]
fn every_rect_fits_inside_the_document() {
    let svg = render(login(), &SvgRenderOptions::default());
    let root_start = svg.find("<svg").unwrap();
    let root = &svg[root_start..root_start + svg[root_start..].find('>').unwrap()];
    let width = attr_i32(root, "width").unwrap();
    let height = attr_i32(root, "height").unwrap();

    for rect in extract_self_closing_tags(&svg, "rect") {
        let x = attr_i32(rect, "x").unwrap();
        let y = attr_i32(rect, "y").unwrap();
        let w = attr_i32(rect, "width").unwrap();
        let h = attr_i32(rect, "height").unwrap();
        assert!(x >= 0 && y >= 0, "{rect}");
        assert!(x + w <= width && y + h <= height, "{rect}");
    }
}

#[test]
fn embedded_svg_has_no_prolog() {
    let svg = render(
        login(),
        &SvgRenderOptions {
            embedded: true,
            diagram_id: Some("login".to_string()),
        },
    );
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
    assert!(svg.contains(r#" id="login""#));
}
