use anyhow::Context;
use clap::Parser;
use generator::profile::{build_footprint_script, FootprintConfig};
use gui_bridge::bridge::GuiBridge;
use solarcore::geometry::GeoPoint;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::{Runner, WorkflowResult};
use workflow::script::SessionScript;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Solar footprint planner session driver")]
struct Args {
    /// Generate a synthetic footprint, replay it and print the nominal power
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Replay a scripted session from YAML
    #[arg(long)]
    script: Option<PathBuf>,
    #[arg(long, default_value_t = 14)]
    zoom: u8,
    #[arg(long, allow_hyphen_values = true)]
    center_lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    center_lng: Option<f64>,
    /// Corner count of the synthetic footprint
    #[arg(long, default_value_t = 6)]
    vertices: usize,
    /// Radius of the synthetic footprint in metres
    #[arg(long, default_value_t = 250.0)]
    radius: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Append a one-line summary of each run to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Keep the HTTP bridge alive for the visualizer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

impl Args {
    fn center(&self) -> Option<GeoPoint> {
        match (self.center_lat, self.center_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

fn summarize(label: &str, result: &WorkflowResult) -> String {
    format!(
        "{}: vertices={} area_m2={:.1} power={} MW center={:?} clicks={} warnings={}",
        label,
        result.snapshot.vertices.len(),
        result.snapshot.area_square_meters,
        result.snapshot.nominal_power,
        result.snapshot.map.center,
        result.metrics.clicks,
        result.warnings.len()
    )
}

fn append_report(path: &Path, line: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report {}", path.display()))?;
    writeln!(file, "{}", line)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = &args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.zoom, args.center())
    };

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating driver runtime")?;
    let runner = Runner::new(workflow_config.clone());
    let mut summaries = Vec::new();

    if args.offline {
        let footprint = FootprintConfig {
            center: workflow_config
                .initial_center
                .unwrap_or_else(|| FootprintConfig::default().center),
            vertices: args.vertices,
            radius_m: args.radius,
            seed: args.seed,
            ..Default::default()
        };
        let script = build_footprint_script(&footprint)?;
        let result = runtime
            .block_on(runner.execute(&script))
            .context("replaying synthetic footprint")?;
        summaries.push(summarize("offline", &result));
    }

    if let Some(path) = &args.script {
        let script = SessionScript::load(path)?;
        let label = script.name.clone().unwrap_or_else(|| "script".into());
        let result = runtime
            .block_on(runner.execute(&script))
            .with_context(|| format!("replaying {}", path.display()))?;
        for warning in &result.warnings {
            eprintln!("warning: {}", warning);
        }
        summaries.push(summarize(&label, &result));
    }

    for line in &summaries {
        println!("{}", line);
        if let Some(path) = &args.report {
            append_report(path, line)?;
        }
    }

    if args.serve {
        let bridge = GuiBridge::new(
            runner.controller(),
            runner.geocoder().clone(),
            runner.config().suggestion_limit,
        );
        bridge.serve(workflow_config.bind_address);
        bridge.publish_status(&format!(
            "HTTP bridge on {} (Ctrl+C to stop)...",
            workflow_config.bind_address
        ));
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
