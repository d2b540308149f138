#[cfg(feature = "cairo-backend")]
use curve_rs::api::{PlotEngine, PlotEngineConfig};
#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "curve.png";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    config_path: Option<PathBuf>,
    output_path: PathBuf,
    seed: Option<u64>,
    history: Vec<(i32, i32)>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use curve_rs::render::CairoRenderer;

    let _ = curve_rs::telemetry::init_default_tracing();

    let args = parse_args()?;
    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            PlotEngineConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => PlotEngineConfig::default(),
    };

    let viewport = config.viewport;
    let width = i32::try_from(viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;
    let renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    let mut engine = PlotEngine::new(renderer, config).map_err(|err| err.to_string())?;

    if let Some(seed) = args.seed {
        engine.reseed_random(seed);
    }

    let live = engine.selection();
    for &(index_x, index_y) in &args.history {
        engine.set_selection_indices(index_x, index_y);
        engine.record_history();
    }
    engine.set_selection_indices(live.index_x, live.index_y);

    engine.render().map_err(|err| err.to_string())?;

    let mut file = File::create(&args.output_path).map_err(|err| {
        format!(
            "failed to create output `{}`: {err}",
            args.output_path.display()
        )
    })?;
    engine
        .renderer()
        .write_png(&mut file)
        .map_err(|err| err.to_string())?;

    let stats = engine.renderer().last_stats();
    println!(
        "wrote {} ({} layers, {} lines)",
        args.output_path.display(),
        stats.layers_drawn,
        stats.lines_drawn
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut seed: Option<u64> = None;
    let mut history = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --seed".to_owned())?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|err| format!("invalid --seed `{value}`: {err}"))?,
                );
            }
            "--history" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --history".to_owned())?;
                history.push(parse_index_pair(&value)?);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        config_path,
        output_path,
        seed,
        history,
    })
}

#[cfg(feature = "cairo-backend")]
fn parse_index_pair(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y` registry indices, got `{value}`"))?;
    let parse = |raw: &str| {
        raw.trim()
            .parse::<i32>()
            .map_err(|err| format!("invalid registry index `{raw}`: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: render_curve_png [--config PATH] [--output PATH] [--seed N] [--history X,Y]...\n\
         \n\
         Options:\n\
         \x20 --config PATH   engine config json (defaults when omitted)\n\
         \x20 --output PATH   png destination (default: {DEFAULT_OUTPUT_PATH})\n\
         \x20 --seed N        reseed the random stream before rendering\n\
         \x20 --history X,Y   record a history entry for the given registry indices\n\
         \x20 -h, --help      print this message"
    )
}
