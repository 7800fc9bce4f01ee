use clap::{Parser, Subcommand};
use pf_core::convert::{Quantity, UnitError, convert_text};
use pf_fittings::{FittingCatalog, FittingError};
use pf_project::{
    Case, CaseReport, ProjectError, analyze_case, load_case, resolve_catalog, validate_fittings,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PipeFlow CLI - Liquid pipe-network pressure drop and pump selection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax, structure and fitting ids
    Validate {
        /// Path to the case file (.yaml, .yml or .json)
        case_path: PathBuf,
        /// Additional fitting catalog merged over the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Compute segment and system losses, the operating point and NPSH
    Run {
        /// Path to the case file (.yaml, .yml or .json)
        case_path: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Additional fitting catalog merged over the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Convert a value between units of one quantity
    Convert {
        /// Value with its unit, e.g. "10 m3/h"; a bare number is read in the base unit
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Target unit symbol, e.g. gpm
        to: String,
        /// pressure, flow_rate, length or temperature
        #[arg(short, long)]
        quantity: Quantity,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Fittings(#[from] FittingError),

    #[error(transparent)]
    Units(#[from] UnitError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path, catalog } => cmd_validate(&case_path, catalog.as_deref()),
        Commands::Run {
            case_path,
            json,
            catalog,
        } => cmd_run(&case_path, json, catalog.as_deref()),
        Commands::Convert {
            value,
            to,
            quantity,
        } => cmd_convert(&value, &to, quantity),
    }
}

fn load_with_catalog(case_path: &Path, extra: Option<&Path>) -> CliResult<(Case, FittingCatalog)> {
    let case = load_case(case_path)?;
    let mut catalog = resolve_catalog(&case, case_path.parent())?;
    if let Some(path) = extra {
        info!(catalog = %path.display(), "loading fitting catalog");
        catalog = catalog.merged_with(&FittingCatalog::load(path)?);
    }
    Ok((case, catalog))
}

fn cmd_validate(case_path: &Path, catalog: Option<&Path>) -> CliResult<()> {
    println!("Validating case: {}", case_path.display());
    let (case, catalog) = load_with_catalog(case_path, catalog)?;
    validate_fittings(&case, &catalog).map_err(ProjectError::from)?;
    println!(
        "✓ Case is valid ({} segments, {} fittings catalogued)",
        case.segments.len(),
        catalog.len()
    );
    Ok(())
}

fn cmd_run(case_path: &Path, json: bool, catalog: Option<&Path>) -> CliResult<()> {
    let (case, catalog) = load_with_catalog(case_path, catalog)?;
    let report = analyze_case(&case, &catalog)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &CaseReport) {
    println!("Case: {}", report.name);
    for seg in &report.system.segments {
        println!();
        println!("Segment {}", seg.id);
        println!(
            "  V = {:.3} m/s, Re = {:.0} ({:?})",
            seg.velocity.value, seg.reynolds, seg.regime
        );
        if let Some(ff) = &seg.friction {
            println!("  f = {:.5} [{}]", ff.f, ff.method.tag());
        }
        for fitting in &seg.fittings {
            println!(
                "  {:<32} x{:<3} K = {:<8.4} dP = {:>10.1} Pa",
                fitting.fitting_id, fitting.quantity, fitting.k, fitting.dp.value
            );
        }
        let l = &seg.losses;
        println!(
            "  friction {:.1} Pa | fittings {:.1} Pa | elevation {:.1} Pa | total {:.1} Pa ({:.3} m)",
            l.friction.dp.value,
            l.fittings.dp.value,
            l.elevation.dp.value,
            l.total.dp.value,
            l.total.head.value
        );
    }

    let l = &report.system.losses;
    println!();
    println!("System totals");
    println!("  friction  {:>12.1} Pa {:>9.3} m", l.friction.dp.value, l.friction.head.value);
    println!("  fittings  {:>12.1} Pa {:>9.3} m", l.fittings.dp.value, l.fittings.head.value);
    println!("  elevation {:>12.1} Pa {:>9.3} m", l.elevation.dp.value, l.elevation.head.value);
    println!("  total     {:>12.1} Pa {:>9.3} m", l.total.dp.value, l.total.head.value);

    if let Some(pump) = &report.pump {
        println!();
        println!("Pump {}", pump.name);
        match &pump.operating_point {
            Some(op) => {
                println!(
                    "  Operating point: Q = {:.2} m3/h, H = {:.2} m, eta = {:.1} %, NPSHr = {:.2} m",
                    op.flow.value * 3600.0,
                    op.head.value,
                    op.efficiency_pct,
                    op.npsh_required.value
                );
                if let Some(p) = pump.hydraulic_power_w {
                    println!("  Hydraulic power: {:.0} W", p);
                }
                if let Some(p) = pump.shaft_power_w {
                    println!("  Shaft power: {:.0} W", p);
                }
            }
            None => println!("  No operating point: pump and system curves do not cross"),
        }
    }

    if let Some(npsh) = &report.npsh {
        println!();
        println!(
            "NPSHa = {:.2} m, NPSHr = {:.2} m, margin = {:.2} m{}",
            npsh.available.value,
            npsh.required.value,
            npsh.margin.value,
            if npsh.cavitation_risk { "  ⚠ cavitation risk" } else { "" }
        );
    }

    println!();
    println!("References");
    for reference in &report.system.references {
        println!("  - {reference}");
    }
}

fn cmd_convert(value: &str, to: &str, quantity: Quantity) -> CliResult<()> {
    let converted = convert_text(value, to, quantity)?;
    println!("{} = {converted} {to}", value.trim());
    Ok(())
}
