//! # Garden Roof CLI
//!
//! Builds the timber frame and roofing layers for one parameter set and
//! prints a carpenter's summary, or the whole model as JSON with `--json`.
//!
//! ```text
//! roof_cli --width 3 --length 4 --pitch 25 --lamberia --prices prices.json
//! RUST_LOG=debug roof_cli --json > model.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::info;
use serde::Serialize;

use roof_core::metrics::{compute_metrics, Metrics};
use roof_core::pricing::{estimate_cost, CostEstimate, PriceTable, Quote};
use roof_core::roofing::{
    build_roofing_with, counter_batten_total_length, flashing_total_surface, roof_batten_total_length,
    FlashingKind, RoofingModel, RoofingOptions,
};
use roof_core::settings::RoofingSettings;
use roof_core::structure::{build_structure, StructureModel};
use roof_core::{InputParams, RoofError, RoofResult};

#[derive(Parser, Debug)]
#[command(name = "roof_cli")]
#[command(about = "Timber frame and roofing model for a gable garden roof")]
#[command(version)]
struct Args {
    /// Outer width across the span (m)
    #[arg(long, default_value_t = 3.0)]
    width: f64,

    /// Outer length along the ridge (m)
    #[arg(long, default_value_t = 4.0)]
    length: f64,

    /// Roof pitch (degrees)
    #[arg(long, default_value_t = 25.0)]
    pitch: f64,

    /// Eaves overhang (m)
    #[arg(long, default_value_t = 0.5)]
    eaves_overhang: f64,

    /// Gable overhang (m)
    #[arg(long, default_value_t = 0.3)]
    gable_overhang: f64,

    /// Leave out the membrane and counter battens
    #[arg(long)]
    no_membrane: bool,

    /// Leave out roof battens and flashings
    #[arg(long)]
    no_roofing: bool,

    /// Add lamberia cladding
    #[arg(long)]
    lamberia: bool,

    /// Roofing settings (JSON)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Resolved price table (JSON); adds a cost estimate
    #[arg(long, value_name = "FILE")]
    prices: Option<PathBuf>,

    /// Print the full model as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn params(&self) -> InputParams {
        InputParams {
            width: self.width,
            length: self.length,
            pitch: self.pitch,
            eaves_overhang: self.eaves_overhang,
            gable_overhang: self.gable_overhang,
        }
    }

    fn options(&self) -> RoofingOptions {
        RoofingOptions {
            membrane: !self.no_membrane,
            roofing: !self.no_roofing,
            lamberia: self.lamberia,
        }
    }
}

/// Everything computed for one run, as emitted by `--json`.
#[derive(Serialize)]
struct Report {
    structure: StructureModel,
    metrics: Metrics,
    roofing: RoofingModel,
    quote: Option<Quote>,
}

fn read_file(path: &Path, field: &str) -> RoofResult<String> {
    fs::read_to_string(path)
        .map_err(|e| RoofError::invalid_input(field, path.display().to_string(), e.to_string()))
}

fn run(args: &Args) -> RoofResult<Report> {
    let params = args.params();
    let options = args.options();

    let settings = match &args.settings {
        Some(path) => RoofingSettings::from_json(&read_file(path, "settings")?)?,
        None => RoofingSettings::default(),
    };

    let structure = build_structure(&params)?;
    let metrics = compute_metrics(&structure);
    let roofing = build_roofing_with(&structure, &options, &settings)?;
    info!(
        "built {} rafters, {} pillars, {} knee braces",
        structure.rafters.len(),
        structure.pillars.len(),
        structure.knee_braces.len()
    );

    let quote = match &args.prices {
        Some(path) => {
            let prices = PriceTable::from_json(&read_file(path, "prices")?)?;
            let estimate = estimate_cost(&structure, &roofing, &options, &prices)?;
            Some(Quote::new(params, options, estimate))
        }
        None => None,
    };

    Ok(Report {
        structure,
        metrics,
        roofing,
        quote,
    })
}

fn print_summary(report: &Report) {
    let s = &report.structure;
    let p = &s.params;
    let m = &report.metrics;
    let r = &report.roofing;

    println!("═══════════════════════════════════════");
    println!("  GARDEN ROOF FRAME");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Footprint:  {:.2} x {:.2} m", p.width, p.length);
    println!("  Pitch:      {:.1}°", p.pitch);
    println!("  Overhangs:  eaves {:.2} m, gable {:.2} m", p.eaves_overhang, p.gable_overhang);
    println!();
    println!("Frame:");
    println!("  Pillars:     {} ({} rows)", s.pillars.len(), s.tie_beams.len());
    println!("  Ridge rise:  {:.3} m above base purlin top", s.ridge_height);
    println!(
        "  Rafters:     {} x {:.3} m @ {:.3} m",
        s.rafters.len(),
        s.rafter_length(),
        s.rafter_spacing
    );
    if let Some(rafter) = s.rafters.first() {
        println!(
            "  Birdmouth:   base seat {:.3} / plumb {:.3}, ridge seat {:.3} / plumb {:.3}",
            rafter.bird_mouth_base.seat_depth,
            rafter.bird_mouth_base.plumb_height,
            rafter.bird_mouth_ridge.seat_depth,
            rafter.bird_mouth_ridge.plumb_height
        );
    }
    println!("  Ridge ties:  {}", s.ridge_ties.len());
    println!("  Knee braces: {}", s.knee_braces.len());
    println!();
    println!("Quantities:");
    println!("  Timber volume:  {:.3} m³", m.timber_volume);
    println!("  Timber surface: {:.2} m²", m.timber_surface);
    println!("  Roof surface:   {:.2} m²", m.roof_surface);
    println!();
    println!("Roofing:");
    println!("  Counter battens: {:.2} m", counter_batten_total_length(r));
    println!("  Roof battens:    {:.2} m", roof_batten_total_length(r));
    if let Some(flashings) = &r.flashings {
        for kind in FlashingKind::ALL {
            let group = flashings.group(kind);
            println!("  {:<16} {} pcs, {:.2} m²", format!("{}:", kind.display_name()), group.count, group.surface);
        }
        println!("  Flashing total:  {:.2} m²", flashing_total_surface(r));
    }
    if let Some(lamberia) = &r.lamberia {
        println!(
            "  Lamberia:        {} planks x {:.2} m",
            lamberia.total_planks, lamberia.plank_length
        );
    }

    if let Some(quote) = &report.quote {
        print_estimate(&quote.estimate);
    }
    println!("═══════════════════════════════════════");
}

fn print_estimate(estimate: &CostEstimate) {
    println!();
    println!("Estimate:");
    for item in &estimate.items {
        println!(
            "  {:<18} {:>10.2} {:<2} x {:>10.0} = {:>12.0}",
            item.description,
            item.quantity,
            item.unit.symbol(),
            item.unit_price,
            item.total
        );
    }
    for (category, total) in &estimate.totals_by_category {
        println!("  {:<18} {:>12.0}", category, total);
    }
    println!("  TOTAL              {:>12.0}", estimate.total);
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_summary(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
