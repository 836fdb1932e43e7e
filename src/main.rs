//! PoU Explorer - Prevalence of Undernourishment dashboard
//!
//! Opens the interactive explorer, or with `--headless` runs the pipeline
//! once and writes the series and charts to a folder.

use anyhow::{bail, Context, Result};
use clap::Parser;
use eframe::egui;
use pou_explorer::config::DashboardConfig;
use pou_explorer::data::{DataLoader, DataProcessor};
use pou_explorer::export::DashboardExporter;
use pou_explorer::gui::ExplorerApp;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pou_explorer", version, about = "Prevalence of Undernourishment explorer")]
struct Cli {
    /// FAOSTAT CSV export to load
    #[arg(env = "POU_DATA")]
    data: Option<PathBuf>,

    /// JSON config file (indicator, default countries, extra regions)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Indicator (Item) to chart; overrides the config file
    #[arg(long)]
    indicator: Option<String>,

    /// Country to select; repeat for several. Defaults to the configured list
    #[arg(long = "country", value_name = "NAME")]
    countries: Vec<String>,

    /// Run the pipeline once and write results instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Output folder for headless runs
    #[arg(short, long, default_value = "pou_export")]
    out: PathBuf,

    /// Skip PNG chart rendering in headless runs
    #[arg(long)]
    no_charts: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(indicator) = &cli.indicator {
        config.indicator = indicator.clone();
    }
    if !cli.countries.is_empty() {
        config.default_countries = cli.countries.clone();
    }
    info!(
        indicator = %config.indicator,
        countries = config.default_countries.len(),
        regions = config.regions.len(),
        "configuration ready"
    );
    if config.regions.is_empty() {
        warn!("region table is empty; no regional means will be produced");
    }

    if cli.headless {
        run_headless(&cli, &config)
    } else {
        run_gui(&cli, config)
    }
}

fn run_headless(cli: &Cli, config: &DashboardConfig) -> Result<()> {
    let Some(path) = &cli.data else {
        bail!("no input file: pass a CSV path or set POU_DATA");
    };

    let dataset = DataLoader::read_dataset(path, &config.regions)?;
    let missing = dataset.missing_countries(&config.default_countries);
    if !missing.is_empty() {
        warn!(countries = ?missing, "default countries not present in data");
    }
    let selection: BTreeSet<String> = config.default_countries.iter().cloned().collect();
    let view = DataProcessor::build_view(dataset.records(), &selection, &config.indicator);

    let report = DashboardExporter::export(&view, &cli.out, !cli.no_charts)
        .with_context(|| format!("exporting to {}", cli.out.display()))?;

    println!(
        "{} country rows, {} regional means",
        report.country_rows, report.regional_rows
    );
    for file in &report.files {
        println!("wrote {}", file.display());
    }
    Ok(())
}

fn run_gui(cli: &Cli, config: DashboardConfig) -> Result<()> {
    // A path given at startup must exist; without one the user browses.
    let initial = match &cli.data {
        Some(path) => {
            let dataset = DataLoader::read_dataset(path, &config.regions)?;
            Some((dataset, path.clone()))
        }
        None => None,
    };
    info!(preloaded = initial.is_some(), "starting GUI");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("PoU Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "PoU Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, config, initial)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
