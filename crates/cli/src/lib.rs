use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use takeoff_core::csv_export::{export_measurements_csv, CsvExportConfig};
use takeoff_core::geometry::{PlanPoint, Scale, DEFAULT_METERS_PER_PIXEL};
use takeoff_core::measurement::{Measurement, MeasurementDraft, MeasurementKind, PlanId};
use takeoff_core::store::MeasurementStore;
use takeoff_storage::SidecarStore;

#[derive(Debug, Parser)]
#[command(name = "takeoff")]
#[command(about = "Takeoff measurement CLI")]
pub struct Cli {
    /// Directory holding measurement sidecar files
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a length measurement between two points.
    AddLength {
        #[arg(long, value_name = "PLAN_ID")]
        plan: PlanId,
        #[arg(long)]
        label: String,
        /// Plan-pixel coordinates as `x,y`
        #[arg(value_name = "POINT", num_args = 2, value_parser = parse_point)]
        points: Vec<PlanPoint>,
        /// Meters represented by one plan pixel
        #[arg(long, default_value_t = DEFAULT_METERS_PER_PIXEL)]
        meters_per_pixel: f32,
    },
    /// Record an area measurement over a polygon.
    AddArea {
        #[arg(long, value_name = "PLAN_ID")]
        plan: PlanId,
        #[arg(long)]
        label: String,
        /// Polygon vertices as `x,y`, in drawing order
        #[arg(value_name = "POINT", num_args = 3.., value_parser = parse_point)]
        points: Vec<PlanPoint>,
        /// Meters represented by one plan pixel
        #[arg(long, default_value_t = DEFAULT_METERS_PER_PIXEL)]
        meters_per_pixel: f32,
    },
    /// Print a plan's measurements as JSON.
    List {
        #[arg(long, value_name = "PLAN_ID")]
        plan: PlanId,
    },
    /// Export a plan's measurements to CSV.
    ExportCsv {
        #[arg(long, value_name = "PLAN_ID")]
        plan: PlanId,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print CLI version.
    Version,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::AddLength { plan, label, points, meters_per_pixel } => {
            let store = open_store(cli.data_dir.as_deref())?;
            run_add(store, plan, MeasurementKind::Length, label, points, meters_per_pixel)
        }
        Commands::AddArea { plan, label, points, meters_per_pixel } => {
            let store = open_store(cli.data_dir.as_deref())?;
            run_add(store, plan, MeasurementKind::Area, label, points, meters_per_pixel)
        }
        Commands::List { plan } => {
            let store = open_store(cli.data_dir.as_deref())?;
            run_list(store, plan)
        }
        Commands::ExportCsv { plan, output } => {
            let store = open_store(cli.data_dir.as_deref())?;
            run_export_csv(store, plan, output.as_deref())
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn open_store(data_dir: Option<&Path>) -> Result<SidecarStore> {
    if let Some(dir) = data_dir {
        return Ok(SidecarStore::with_root(dir));
    }

    if let Some(dir) = std::env::var_os("TAKEOFF_DATA_DIR") {
        return Ok(SidecarStore::with_root(PathBuf::from(dir)));
    }

    SidecarStore::from_default_project().context("failed to resolve data directory")
}

fn run_add(
    mut store: SidecarStore,
    plan: PlanId,
    kind: MeasurementKind,
    label: String,
    points: Vec<PlanPoint>,
    meters_per_pixel: f32,
) -> Result<()> {
    let scale = Scale::new(meters_per_pixel);
    let draft = MeasurementDraft::measured(plan, kind, label, points, scale);

    let stored = store.append(draft).context("failed to save measurement")?;

    let json = serde_json::to_string_pretty(&stored)?;
    println!("{json}");

    Ok(())
}

fn run_list(store: SidecarStore, plan: PlanId) -> Result<()> {
    let measurements = store.list_by_plan(plan).context("failed to load measurements")?;

    let json = serde_json::to_string_pretty(&measurements)?;
    println!("{json}");

    Ok(())
}

fn run_export_csv(store: SidecarStore, plan: PlanId, output: Option<&Path>) -> Result<()> {
    let measurements = store.list_by_plan(plan).context("failed to load measurements")?;
    let refs: Vec<&Measurement> = measurements.iter().collect();
    let config = CsvExportConfig::default();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            export_measurements_csv(file, &refs, &config)
                .context("failed to export measurements")?;
            println!("{}", path.display());
        }
        None => {
            export_measurements_csv(io::stdout().lock(), &refs, &config)
                .context("failed to export measurements")?;
        }
    }

    Ok(())
}

/// Parse an `x,y` coordinate pair
fn parse_point(raw: &str) -> std::result::Result<PlanPoint, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{raw}`"))?;

    let x: f32 = x.trim().parse().map_err(|_| format!("invalid x coordinate `{x}`"))?;
    let y: f32 = y.trim().parse().map_err(|_| format!("invalid y coordinate `{y}`"))?;

    Ok(PlanPoint::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4").unwrap(), PlanPoint::new(3.0, 4.0));
        assert_eq!(parse_point("1.5, -2.25").unwrap(), PlanPoint::new(1.5, -2.25));

        assert!(parse_point("3;4").is_err());
        assert!(parse_point("a,4").is_err());
    }
}
