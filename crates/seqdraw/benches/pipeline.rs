use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use seqdraw::Diagram;
use seqdraw::render::{
    DeterministicTextMeasurer, DiagramStyles, LayoutOptions, MemoizedTextMeasurer, Renderer,
    SvgRenderOptions, layout_diagram,
};
use serde_json::json;
use std::sync::Arc;

fn fixtures() -> Vec<(&'static str, Diagram)> {
    let hello = json!({
        "actors": [{ "name": "Alice" }, { "name": "Bob" }],
        "events": [
            { "type": "message", "from": 0, "to": 1, "label": "Hello" },
            { "type": "message", "from": 1, "to": 0, "label": "Reply", "arrow": { "stem": "dashed" } }
        ]
    });
    let blocks = json!({
        "title": "Checkout",
        "actors": [
            { "name": "User", "icon": "human" },
            { "name": "Shop" },
            { "name": "Payments" },
            { "name": "DB", "icon": "cylinder" }
        ],
        "events": [
            { "type": "message", "from": 0, "to": 1, "label": "checkout" },
            { "type": "block_start", "kind": "loop", "condition": "until paid" },
            { "type": "message", "from": 1, "to": 2, "label": "charge" },
            { "type": "block_start", "kind": "alt", "condition": "declined" },
            { "type": "message", "from": 2, "to": 1, "label": "retry", "arrow": { "head": "open" } },
            { "type": "block_end" },
            { "type": "block_end" },
            { "type": "note", "actor": 1, "spanTo": 3, "position": "over", "text": "persist order" },
            { "type": "message", "from": 1, "to": 3, "label": "INSERT" },
            { "type": "divider", "dividerType": "line", "label": "later" },
            { "type": "message", "from": 3, "to": 3, "label": "vacuum" }
        ]
    });

    let mut long = json!({ "actors": [], "events": [] });
    for i in 0..12 {
        long["actors"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "name": format!("actor {i}") }));
    }
    for i in 0..200 {
        long["events"].as_array_mut().unwrap().push(json!({
            "type": "message",
            "from": i % 12,
            "to": (i * 5 + 1) % 12,
            "label": format!("message number {i}")
        }));
    }

    vec![
        ("hello", Diagram::from_value(hello).unwrap()),
        ("blocks", Diagram::from_value(blocks).unwrap()),
        ("long", Diagram::from_value(long).unwrap()),
    ]
}

fn bench_render_svg(c: &mut Criterion) {
    let renderer = Renderer::new();

    let mut group = c.benchmark_group("render_svg");
    for (name, diagram) in fixtures() {
        let diagram_id = format!("bench-{name}");
        group.bench_function(name, |b| {
            b.iter_batched(
                || &diagram,
                |diagram| {
                    let layout = renderer.layout(diagram).unwrap();
                    let svg_opts = SvgRenderOptions {
                        diagram_id: Some(diagram_id.clone()),
                        ..SvgRenderOptions::default()
                    };
                    let _svg = layout.render_svg(&svg_opts);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_layout_only(c: &mut Criterion) {
    let styles = DiagramStyles::default_style();
    let plain = LayoutOptions::default();
    let memoized = LayoutOptions {
        text_measurer: Arc::new(MemoizedTextMeasurer::new(DeterministicTextMeasurer::default())),
        ..LayoutOptions::default()
    };

    let mut group = c.benchmark_group("layout_only");
    for (name, diagram) in fixtures() {
        group.bench_function(format!("{name}/deterministic"), |b| {
            b.iter(|| {
                let _ = layout_diagram(&diagram, &styles, &plain).unwrap();
            });
        });
        group.bench_function(format!("{name}/memoized"), |b| {
            b.iter(|| {
                let _ = layout_diagram(&diagram, &styles, &memoized).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_svg, bench_layout_only);
criterion_main!(benches);
