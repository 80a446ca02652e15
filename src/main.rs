mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::RealtyLensApp;
use realty_lens::config::AppConfig;
use realty_lens::data::filter::CriteriaPatch;
use realty_lens::data::source::DataSource;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "realty-lens", version, about = "Explore real-estate price observations")]
struct Args {
    /// Dataset path or http(s) URL (overrides the config file)
    source: Option<String>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the filtered summary as JSON instead of opening a window
    #[arg(long)]
    summary: bool,

    /// Period filter for --summary
    #[arg(long)]
    period: Option<String>,

    /// District filter for --summary
    #[arg(long)]
    district: Option<String>,

    /// Property type filter for --summary
    #[arg(long = "property-type")]
    property_type: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if args.source.is_some() {
        config.source = args.source.clone();
    }

    if args.summary {
        return print_summary(&args, config);
    }

    let mut state = AppState::new(config);
    state.load_initial();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Realty Lens – Price Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(RealtyLensApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Headless mode: load once, apply the CLI filters, dump the view as JSON.
fn print_summary(args: &Args, config: AppConfig) -> Result<()> {
    let location = config
        .source
        .clone()
        .context("no dataset source given (pass a path/URL or set `source` in the config)")?;
    let source = DataSource::parse(&location);

    let text = source
        .fetch_text(config.fetch_timeout())
        .with_context(|| format!("loading {source}"))?;

    let mut coordinator = realty_lens::engine::Coordinator::new(config.missing_price);
    coordinator.subscribe(|view| {
        log::debug!("view #{} has {} records", view.generation, view.subset.len())
    });
    let report = coordinator
        .load_text(&text, &config.parse_options())
        .with_context(|| format!("parsing {source}"))?;

    coordinator.set_criteria(CriteriaPatch {
        period: args.period.clone(),
        district: args.district.clone(),
        property_type: args.property_type.clone(),
    });

    let view = coordinator.view();
    let output = serde_json::json!({
        "source": source.to_string(),
        "report": report,
        "criteria": view.criteria,
        "matching": view.subset.len(),
        "stats": view.stats,
        "stats_formatted": {
            "min": realty_lens::format::format_price(view.stats.min, &config.currency),
            "max": realty_lens::format::format_price(view.stats.max, &config.currency),
            "mean": realty_lens::format::format_price(view.stats.mean, &config.currency),
        },
        "by_period": view.by_period,
        "by_property_type": view.by_property_type,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
