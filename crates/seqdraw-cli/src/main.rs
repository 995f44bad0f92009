use seqdraw::Diagram;
use seqdraw::render::{DiagramStyles, LayoutOptions, Renderer, RowMap, StyleName};
use seqdraw_render::grid::GridLayout;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Model(seqdraw::Error),
    Render(seqdraw::render::RenderError),
    Json(serde_json::Error),
    PngUnavailable,
    UnsupportedExtension(String),
    /// A failure while processing one input, labelled with that input.
    Input { input: String, source: Box<CliError> },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Model(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::PngUnavailable => write!(f, "PNG renderer not available"),
            CliError::UnsupportedExtension(path) => write!(f, "unsupported extension: {path}"),
            CliError::Input { input, source } => write!(f, "{input} - {source}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<seqdraw::Error> for CliError {
    fn from(value: seqdraw::Error) -> Self {
        Self::Model(value)
    }
}

impl From<seqdraw::render::RenderError> for CliError {
    fn from(value: seqdraw::render::RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    inputs: Vec<String>,
    out: Option<String>,
    style: Option<String>,
    style_file: Option<String>,
    embedded: bool,
    mirror_actors: bool,
    pretty: bool,
    verbose: bool,
}

/// Where a rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputTarget {
    Stdout,
    SvgFile(String),
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    input: &'a str,
    width: i32,
    height: i32,
    rows: &'a RowMap,
    grid: &'a GridLayout,
}

fn usage() -> &'static str {
    "seqdraw-cli\n\
\n\
USAGE:\n\
  seqdraw-cli [render] [-o|--out <path>] [-s|--style default|tight|small] [--style-file <json>] [-e|--embedded] [--mirror-actors] [--verbose] [<path>|-]...\n\
  seqdraw-cli layout [--pretty] [-s|--style <name>] [--style-file <json>] [--mirror-actors] [--verbose] [<path>|-]...\n\
\n\
NOTES:\n\
  - Inputs are JSON diagram models. With no input, or '-', the model is read from stdin.\n\
  - render prints SVG to stdout unless --out names a .svg file.\n\
  - A `seqdraw` processing instruction in the model overrides --out for that diagram.\n\
  - layout prints the resolved grid lines, row map and document size as JSON.\n\
  - Logging goes to stderr; RUST_LOG overrides the level, --verbose enables debug.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" if args.inputs.is_empty() => args.command = Command::Render,
            "layout" if args.inputs.is_empty() => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--embedded" | "-e" => args.embedded = true,
            "--mirror-actors" => args.mirror_actors = true,
            "--out" | "-o" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--style" | "-s" => {
                let Some(style) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.style = Some(style.clone());
            }
            "--style-file" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.style_file = Some(path.clone());
            }
            "--" => args.inputs.extend(it.by_ref().cloned()),
            "-" => args.inputs.push("-".to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => args.inputs.push(path.to_string()),
        }
    }

    Ok(args)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = subscriber.try_init();
}

fn read_input(input: &str) -> Result<String, CliError> {
    match input {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        path => Ok(std::fs::read_to_string(path)?),
    }
}

fn input_label(input: &str) -> &str {
    if input == "-" { "stdin" } else { input }
}

/// Picks the output from a target path's extension.
fn choose_output(target: Option<&str>) -> Result<OutputTarget, CliError> {
    let Some(path) = target.filter(|t| !t.trim().is_empty()) else {
        return Ok(OutputTarget::Stdout);
    };
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("svg") => Ok(OutputTarget::SvgFile(path.to_string())),
        Some("png") => Err(CliError::PngUnavailable),
        _ => Err(CliError::UnsupportedExtension(path.to_string())),
    }
}

fn build_renderer(args: &Args) -> Result<Renderer, CliError> {
    let styles = match (&args.style_file, &args.style) {
        (Some(path), _) => DiagramStyles::from_json_str(&std::fs::read_to_string(path)?)?,
        (None, Some(name)) => DiagramStyles::named(name.parse::<StyleName>()?),
        (None, None) => DiagramStyles::default(),
    };
    Ok(Renderer {
        styles,
        layout: LayoutOptions {
            mirror_actors: args.mirror_actors,
            ..LayoutOptions::default()
        },
        ..Renderer::default()
    }
    .with_embedded(args.embedded))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn process_input(
    input: &str,
    args: &Args,
    renderer: &Renderer,
    default_out: &OutputTarget,
) -> Result<(), CliError> {
    let text = read_input(input)?;
    let diagram = Diagram::from_json_str(&text)?;
    let layout = renderer.layout(&diagram)?;

    match args.command {
        Command::Layout => {
            let size = layout.size();
            let out = LayoutOut {
                input: input_label(input),
                width: size.width,
                height: size.height,
                rows: layout.rows(),
                grid: layout.resolved(),
            };
            write_json(&out, args.pretty)
        }
        Command::Render => {
            let target = match layout.directives().output_target.as_deref() {
                Some(target) => choose_output(Some(target))?,
                None => default_out.clone(),
            };
            match target {
                OutputTarget::Stdout => {
                    let mut stdout = std::io::stdout().lock();
                    layout
                        .write_svg(&mut stdout, &renderer.svg)
                        .map_err(seqdraw::render::RenderError::from)?;
                    stdout.flush()?;
                }
                OutputTarget::SvgFile(path) => {
                    let file = std::fs::File::create(&path)?;
                    let mut writer = std::io::BufWriter::new(file);
                    layout
                        .write_svg(&mut writer, &renderer.svg)
                        .map_err(seqdraw::render::RenderError::from)?;
                    writer.flush()?;
                    tracing::debug!(input = input_label(input), out = %path, "wrote SVG");
                }
            }
            Ok(())
        }
    }
}

fn run(mut args: Args) -> Result<(), CliError> {
    let renderer = build_renderer(&args)?;
    let default_out = choose_output(args.out.as_deref())?;
    if args.inputs.is_empty() {
        args.inputs.push("-".to_string());
    }

    for input in &args.inputs {
        process_input(input, &args, &renderer, &default_out).map_err(|err| CliError::Input {
            input: input_label(input).to_string(),
            source: Box::new(err),
        })?;
    }
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("seqdraw: {err}");
            std::process::exit(1);
        }
    };
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("seqdraw: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("seqdraw-cli")
            .chain(items.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parses_flags_and_multiple_inputs() {
        let args = parse_args(&argv(&["-s", "small", "-e", "-o", "x.svg", "a.json", "b.json"]))
            .unwrap();
        assert!(matches!(args.command, Command::Render));
        assert_eq!(args.style.as_deref(), Some("small"));
        assert!(args.embedded);
        assert_eq!(args.out.as_deref(), Some("x.svg"));
        assert_eq!(args.inputs, ["a.json", "b.json"]);
    }

    #[test]
    fn layout_command_and_stdin_marker() {
        let args = parse_args(&argv(&["layout", "--pretty", "-"])).unwrap();
        assert!(matches!(args.command, Command::Layout));
        assert!(args.pretty);
        assert_eq!(args.inputs, ["-"]);
    }

    #[test]
    fn rejects_unknown_flags_and_missing_values() {
        assert!(matches!(parse_args(&argv(&["--frobnicate"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(&argv(&["--out"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn output_is_chosen_by_extension() {
        assert_eq!(choose_output(None).unwrap(), OutputTarget::Stdout);
        assert_eq!(
            choose_output(Some("out/diagram.SVG")).unwrap(),
            OutputTarget::SvgFile("out/diagram.SVG".to_string())
        );
        assert!(matches!(choose_output(Some("d.png")), Err(CliError::PngUnavailable)));
        let err = choose_output(Some("d.pdf")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported extension: d.pdf");
    }

    #[test]
    fn unknown_style_names_fail() {
        let args = Args {
            style: Some("huge".to_string()),
            ..Args::default()
        };
        let err = build_renderer(&args).unwrap_err();
        assert_eq!(err.to_string(), "unknown style `huge`");
    }
}
