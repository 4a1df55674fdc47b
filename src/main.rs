use anyhow::{bail, Context, Result};
use closest_point::coords::{Point, Rect, Transform};
use closest_point::curves::concat_curve::ConcatCurve;
use closest_point::finder::{ClosestPointFinder, ClosestPointResult, FinderConfig};
use closest_point::finder_config_parser;
use closest_point::path_description;
use closest_point::point_parser::{parse_point, parse_points};
use closest_point::sampler::PathSampler;
use closest_point::snap::{Placement, SnapHandler};
use getopts::{Matches, Options};
use serde::Serialize;
use std::env;
use std::io::{self, BufRead, Write};
use std::process;

fn usage(prg: &str, opts: &Options)
{
    let brief = format!("Usage: {} [options] [X,Y ...]", prg);
    print!("{}", opts.usage(&brief));
}

fn opt_f64(matches: &Matches, name: &str) -> Result<Option<f64>>
{
    match matches.opt_str(name) {
        Some(arg) => {
            let value = arg.parse::<f64>()
                .with_context(|| format!("Invalid {}: {}", name, arg))?;
            Ok(Some(value))
        },
        None => Ok(None)
    }
}

fn finder_config(matches: &Matches) -> Result<FinderConfig>
{
    let mut config = match matches.opt_str("config") {
        Some(file_name) => finder_config_parser::read_config(&file_name)
            .with_context(|| format!("Failed to read config {}", file_name))?,
        None => FinderConfig::default()
    };
    if let Some(step) = opt_f64(matches, "coarse-step")? {
        config = config.with_coarse_step(step)?;
    }
    if let Some(step) = opt_f64(matches, "min-step")? {
        config = config.with_min_step(step)?;
    }
    Ok(config)
}

fn load_path(matches: &Matches) -> Result<ConcatCurve>
{
    match (matches.opt_str("path"), matches.opt_str("polyline")) {
        (Some(file_name), None) => path_description::read_path(&file_name)
            .with_context(|| format!("Failed to load path {}", file_name)),
        (None, Some(points)) => {
            let points = parse_points(&points).context("Invalid polyline")?;
            if points.is_empty() {
                bail!("Polyline has no points");
            }
            Ok(ConcatCurve::polyline(&points))
        },
        (Some(_), Some(_)) => bail!("Only one of --path and --polyline may be given"),
        (None, None) => bail!("No path, use --path or --polyline")
    }
}

fn find_points(matches: &Matches, path: &ConcatCurve, finder: &ClosestPointFinder) -> Result<()>
{
    if matches.free.is_empty() {
        bail!("No query points");
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for arg in &matches.free {
        let query = parse_point(arg)
            .with_context(|| format!("Invalid query point {}", arg))?;
        let result = finder.find_checked(path, query)?;
        writeln!(out, "{}", serde_json::to_string(&result)?)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct DragOutput<'a>
{
    marker: Point,
    closest: Option<&'a ClosestPointResult>
}

fn drag(matches: &Matches, path: ConcatCurve, finder: ClosestPointFinder) -> Result<()>
{
    let mut handler = match matches.opt_str("viewbox") {
        Some(size) => {
            let size = parse_point(&size)
                .with_context(|| format!("Invalid view box size {}", size))?;
            let placement = match matches.opt_str("placement") {
                Some(p) => p.parse::<Placement>().map_err(anyhow::Error::msg)?,
                None => Placement::Square
            };
            SnapHandler::centered(path, finder,
                                  &Rect::new(0.0, 0.0, size.x, size.y),
                                  placement)?
        },
        None => {
            let start = path.point_at(0.0);
            SnapHandler::new(path, finder, Transform::identity(), start)?
        }
    };
    log::info!("Marker starts at {}", handler.marker());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let pointer = match parse_point(&line) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Ignoring pointer position {:?}: {}", line, e);
                continue;
            }
        };
        let marker = handler.on_pointer_move(pointer);
        let output = DragOutput{marker, closest: handler.last_result()};
        writeln!(out, "{}", serde_json::to_string(&output)?)?;
    }
    Ok(())
}

fn run(matches: &Matches) -> Result<()>
{
    let finder = ClosestPointFinder::new(finder_config(matches)?);
    let path = load_path(matches)?;
    log::debug!("Path length {}, {:?}", path.length(), finder.config());
    if matches.opt_present("drag") {
        drag(matches, path, finder)
    } else {
        find_points(matches, &path, &finder)
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "closest_point".to_string());
    let mut opts = Options::new();
    opts.optopt("p", "path", "JSON path description", "FILE");
    opts.optopt("l", "polyline", "path through the given points", "\"X,Y X,Y ...\"");
    opts.optopt("c", "config", "JSON finder configuration", "FILE");
    opts.optopt("", "coarse-step", "sampling interval of the coarse scan", "STEP");
    opts.optopt("", "min-step", "refinement stops at this step", "STEP");
    opts.optflag("", "drag", "snap pointer positions read from stdin, one X,Y per line");
    opts.optopt("", "viewbox", "center the path in a view box of this size when dragging", "W,H");
    opts.optopt("", "placement", "initial marker placement with --viewbox, square or circle", "SHAPE");
    opts.optflag("v", "verbose", "debug logging");
    opts.optflag("h", "help", "print this help menu");

    let matches = match opts.parse(args.iter().skip(1)) {
        Ok(m) => { m }
        Err(f) => {
            eprintln!("{}", f);
            usage(&program, &opts);
            process::exit(2);
        }
    };
    if matches.opt_present("h") {
        usage(&program, &opts);
        return;
    }

    let level = if matches.opt_present("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
