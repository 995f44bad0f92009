use assert_cmd::Command;
use std::fs;
use std::path::Path;

const HELLO: &str = r#"{
  "actors": [{ "name": "Alice" }, { "name": "Bob" }],
  "events": [{ "type": "message", "from": 0, "to": 1, "label": "Hello" }]
}"#;

fn write_model(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).expect("write model");
    path.to_string_lossy().to_string()
}

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("seqdraw-cli"))
}

#[test]
fn cli_renders_svg_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_model(tmp.path(), "hello.json", HELLO);
    let out = tmp.path().join("hello.svg");

    cli()
        .args(["-o", out.to_string_lossy().as_ref(), input.as_str()])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<?xml"), "standalone SVG has a prolog");
    assert!(svg.contains(">Hello</text>"));
}

#[test]
fn cli_embedded_svg_goes_to_stdout_without_prolog() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_model(tmp.path(), "hello.json", HELLO);

    let output = cli()
        .args(["render", "-e", input.as_str()])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert!(svg.starts_with("<svg"));
}

#[test]
fn cli_reads_stdin() {
    let output = cli()
        .args(["-s", "small"])
        .write_stdin(HELLO)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("<svg"));
}

#[test]
fn cli_png_output_is_not_available() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_model(tmp.path(), "hello.json", HELLO);
    let out = tmp.path().join("hello.png");

    let output = cli()
        .args(["-o", out.to_string_lossy().as_ref(), input.as_str()])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("seqdraw: PNG renderer not available"), "{stderr}");
    assert!(!out.exists());
}

#[test]
fn cli_rejects_unknown_output_extensions() {
    let output = cli()
        .args(["-o", "diagram.gif"])
        .write_stdin(HELLO)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported extension: diagram.gif"));
}

#[test]
fn cli_rejects_unknown_styles() {
    let output = cli()
        .args(["-s", "huge"])
        .write_stdin(HELLO)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("seqdraw: unknown style `huge`"));
}

#[test]
fn cli_labels_model_errors_with_the_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_model(
        tmp.path(),
        "bad.json",
        r#"{ "actors": [{ "name": "A" }], "events": [{ "type": "message", "from": 0, "to": 9 }] }"#,
    );

    let output = cli().arg(input.as_str()).output().expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("seqdraw: {input} - ")), "{stderr}");
}

#[test]
fn cli_processing_instruction_selects_the_target() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let target = tmp.path().join("from-pi.svg");
    let model = model_with_target(&target.to_string_lossy());
    let input = write_model(tmp.path(), "pi.json", &model);

    let output = cli().arg(input.as_str()).output().expect("run cli");
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "nothing goes to stdout");
    let svg = fs::read_to_string(&target).expect("read svg");
    assert!(svg.contains(">Hello</text>"));
}

#[test]
fn cli_layout_prints_json() {
    let output = cli()
        .args(["layout", "--pretty"])
        .write_stdin(HELLO)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["input"], "stdin");
    assert_eq!(value["rows"]["actors"], 0);
    assert_eq!(value["grid"]["cols"]["anchors"].as_array().map(Vec::len), Some(2));
    assert!(value["width"].as_i64().unwrap() > 16);
}

fn model_with_target(target: &str) -> String {
    let mut value: serde_json::Value = serde_json::from_str(HELLO).expect("fixture");
    value["processingInstructions"] = serde_json::json!([{ "prefix": "seqdraw", "value": target }]);
    value.to_string()
}
