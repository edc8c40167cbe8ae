use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use graph_rs::api::{GraphConfig, GraphEngine, Theme};
use graph_rs::core::{DatasetRegistry, ElementId, Viewport};
use graph_rs::render::SvgRenderer;

const DEFAULT_WIDTH: u32 = 600;
const DEFAULT_HEIGHT: u32 = 300;
/// Far enough past every hover transition for a settled snapshot.
const SETTLED_AT: Duration = Duration::from_secs(1);

#[derive(Debug)]
enum Selection {
    Dataset(String),
    Query(String),
}

#[derive(Debug)]
struct CliArgs {
    registry_path: PathBuf,
    selection: Selection,
    config_path: Option<PathBuf>,
    theme: Option<Theme>,
    viewport: Viewport,
    hover: Vec<ElementId>,
    out: Option<PathBuf>,
}

fn main() {
    let _ = graph_rs::telemetry::init_tracing("warn");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let raw = fs::read_to_string(&args.registry_path).map_err(|err| {
        format!(
            "failed to read registry `{}`: {err}",
            args.registry_path.display()
        )
    })?;
    let registry = DatasetRegistry::from_json_str(&raw).map_err(|err| err.to_string())?;
    let dataset = match &args.selection {
        Selection::Dataset(name) => registry.resolve(name),
        Selection::Query(query) => registry.resolve_query(query),
    }
    .map_err(|err| err.to_string())?
    .clone();

    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            GraphConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => GraphConfig::default(),
    };
    if let Some(theme) = args.theme {
        config = config.with_theme(theme);
    }

    let wants_png = args
        .out
        .as_ref()
        .and_then(|path| path.extension())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if wants_png {
        return render_png(&args, dataset, config);
    }

    let mut engine = GraphEngine::new(SvgRenderer::new(), dataset, args.viewport, config)
        .map_err(|err| err.to_string())?;
    for element in &args.hover {
        engine.hover(*element, Duration::ZERO);
    }
    engine.render(SETTLED_AT).map_err(|err| err.to_string())?;
    let document = engine.into_renderer().into_document();

    match &args.out {
        Some(path) => fs::write(path, document)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            print!("{document}");
            Ok(())
        }
    }
}

#[cfg(feature = "cairo-backend")]
fn render_png(
    args: &CliArgs,
    dataset: graph_rs::core::Dataset,
    config: GraphConfig,
) -> Result<(), String> {
    use graph_rs::render::{CairoRenderer, PangoTextMeasurer};

    let width = i32::try_from(args.viewport.width).map_err(|err| err.to_string())?;
    let height = i32::try_from(args.viewport.height).map_err(|err| err.to_string())?;
    let renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    let measurer = PangoTextMeasurer::new().map_err(|err| err.to_string())?;
    let mut engine =
        GraphEngine::with_measurer(renderer, dataset, args.viewport, config, measurer)
            .map_err(|err| err.to_string())?;
    for element in &args.hover {
        engine.hover(*element, Duration::ZERO);
    }
    engine.render(SETTLED_AT).map_err(|err| err.to_string())?;

    let Some(path) = &args.out else {
        return Err("png output needs --out <path>".to_owned());
    };
    let mut file = fs::File::create(path)
        .map_err(|err| format!("failed to create `{}`: {err}", path.display()))?;
    engine
        .renderer()
        .write_png(&mut file)
        .map_err(|err| err.to_string())
}

#[cfg(not(feature = "cairo-backend"))]
fn render_png(
    _args: &CliArgs,
    _dataset: graph_rs::core::Dataset,
    _config: GraphConfig,
) -> Result<(), String> {
    Err("png output requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut registry_path: Option<PathBuf> = None;
    let mut selection: Option<Selection> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut theme: Option<Theme> = None;
    let mut width = DEFAULT_WIDTH;
    let mut height = DEFAULT_HEIGHT;
    let mut hover = Vec::new();
    let mut out: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--registry" => registry_path = Some(PathBuf::from(value("--registry")?)),
            "--dataset" => selection = Some(Selection::Dataset(value("--dataset")?)),
            "--query" => selection = Some(Selection::Query(value("--query")?)),
            "--config" => config_path = Some(PathBuf::from(value("--config")?)),
            "--theme" => theme = Some(value("--theme")?.parse()?),
            "--width" => width = parse_dimension("--width", &value("--width")?)?,
            "--height" => height = parse_dimension("--height", &value("--height")?)?,
            "--hover-point" => hover.push(ElementId::DataPoint(parse_index(
                "--hover-point",
                &value("--hover-point")?,
            )?)),
            "--hover-note" => hover.push(ElementId::Annotation(parse_index(
                "--hover-note",
                &value("--hover-note")?,
            )?)),
            "--out" => out = Some(PathBuf::from(value("--out")?)),
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    let registry_path =
        registry_path.ok_or_else(|| format!("missing --registry\n\n{}", usage_message()))?;
    let selection = selection
        .ok_or_else(|| format!("missing --dataset or --query\n\n{}", usage_message()))?;

    Ok(CliArgs {
        registry_path,
        selection,
        config_path,
        theme,
        viewport: Viewport::new(width, height),
        hover,
        out,
    })
}

fn parse_dimension(flag: &str, raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(format!("{flag} expects a positive integer, got `{raw}`")),
    }
}

fn parse_index(flag: &str, raw: &str) -> Result<usize, String> {
    raw.parse::<usize>()
        .map_err(|_| format!("{flag} expects an element index, got `{raw}`"))
}

fn print_usage() {
    println!("{}", usage_message());
}

fn usage_message() -> String {
    format!(
        "Usage: graph-render --registry <path> (--dataset <name> | --query <?name>) [options]\n\nOptions:\n  --config <path>        Graph config JSON\n  --theme <light|dark>   Colour theme (overrides config)\n  --width <px>           Surface width (default: {DEFAULT_WIDTH})\n  --height <px>          Surface height (default: {DEFAULT_HEIGHT})\n  --hover-point <index>  Render with a data point hovered (repeatable)\n  --hover-note <index>   Render with an annotation hovered (repeatable)\n  --out <path>           Output file; `.png` needs feature `cairo-backend` (default: SVG on stdout)\n  -h, --help             Show this message"
    )
}
