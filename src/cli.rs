use std::fs;
use std::io;

use tracing_subscriber::EnvFilter;

use crate::chart::ContainerSize;
use crate::config::Config;
use crate::data::loader::load_or_empty;
use crate::pipeline::{apply_selection, Selection};
use crate::server;
use crate::session::{render_view, selector_options};

const USAGE: &str = "usage: popdash <serve|years|kpi [year]|render [year] [out.svg] [width] [height]>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Years,
    Kpi,
    Render,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        None | Some("serve") => Some(Command::Serve),
        Some("years") => Some(Command::Years),
        Some("kpi") => Some(Command::Kpi),
        Some("render") => Some(Command::Render),
        _ => None,
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    match command {
        Command::Serve => handle_serve(config),
        Command::Years => handle_years(&config),
        Command::Kpi => handle_kpi(&config, args),
        Command::Render => handle_render(&config, args),
    }
}

fn handle_serve(config: Config) -> i32 {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };
    match runtime.block_on(server::run_server(config)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_years(config: &Config) -> i32 {
    let dataset = load_or_empty(&config.data_path);
    print_json(&serde_json::json!({ "options": selector_options(dataset.years()) }))
}

fn handle_kpi(config: &Config, args: &[String]) -> i32 {
    let Some(selection) = parse_selection_arg(args.get(2)) else {
        return 2;
    };
    let dataset = load_or_empty(&config.data_path);
    let view = apply_selection(dataset.records(), selection);
    print_json(&serde_json::json!({
        "selection": selection,
        "kpis": view.kpis,
        "display": view.kpis.display(),
    }))
}

fn handle_render(config: &Config, args: &[String]) -> i32 {
    let Some(selection) = parse_selection_arg(args.get(2)) else {
        return 2;
    };
    let out_path = args.get(3).map(String::as_str).unwrap_or("chart.svg");
    let container = ContainerSize {
        width: parse_f64_arg(args.get(4), "width", config.container.width),
        height: parse_f64_arg(args.get(5), "height", config.container.height),
    };

    let dataset = load_or_empty(&config.data_path);
    let view = render_view(&dataset, selection, container);
    if let Err(err) = fs::write(out_path, view.svg()) {
        eprintln!("failed to write {out_path}: {err}");
        return 1;
    }
    println!(
        "wrote {} points for {} to {}",
        view.scene.points.len(),
        selection,
        out_path
    );
    0
}

fn parse_selection_arg(value: Option<&String>) -> Option<Selection> {
    match value {
        None => Some(Selection::All),
        Some(raw) => match raw.parse() {
            Ok(selection) => Some(selection),
            Err(err) => {
                eprintln!("{err}");
                eprintln!("{USAGE}");
                None
            }
        },
    }
}

fn parse_f64_arg(value: Option<&String>, name: &str, default: f64) -> f64 {
    match value {
        Some(raw) => match raw.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => parsed,
            _ => {
                eprintln!("invalid {name} '{raw}', using default {default}");
                default
            }
        },
        None => default,
    }
}

fn print_json(value: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}
