use orbitsim::{play, Scenario, ScenarioConfig, SchemeConfig, TracingRenderer};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SchemeArg {
    Heun,
    SecondOrder,
}

impl From<SchemeArg> for SchemeConfig {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Heun => SchemeConfig::Heun,
            SchemeArg::SecondOrder => SchemeConfig::SecondOrder,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Integrate an N-body scenario and replay its trajectories")]
struct Args {
    /// Scenario file; bare names are looked up in `scenarios/`
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Override the scenario's stepping scheme
    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,

    /// Override the scenario's step count
    #[arg(long)]
    steps: Option<usize>,

    /// Pixels per length unit for the segment log
    #[arg(long, default_value_t = orbitsim::visualization::playback::SCALE)]
    scale: f64,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(scheme) = args.scheme {
        scenario_cfg.engine.scheme = scheme.into();
    }
    if let Some(steps) = args.steps {
        scenario_cfg.parameters.num_points = steps;
    }

    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    if let Some(central) = &scenario.central {
        info!(mass = central.mass, position = %central.position, radius = central.radius, "central body");
    }
    let points_inter = scenario.parameters.points_inter;
    let names: Vec<String> = (0..scenario.system.len()).map(|i| scenario.system.label(i)).collect();

    let run = scenario.run()?;

    match run.status {
        orbitsim::RunStatus::Completed { steps_run } => info!(steps_run, "simulation completed"),
        orbitsim::RunStatus::Collided { .. } => warn!(status = %run.status, "simulation stopped early"),
    }

    let drift = run.final_momentum.sub(&run.initial_momentum).magnitude();
    info!(
        initial_energy = run.initial_energy,
        final_energy = run.final_energy,
        momentum_drift = drift,
        "conservation"
    );
    for (i, name) in names.iter().enumerate() {
        if let Some(trajectory) = run.recorder.trajectory(i) {
            if let (Some(start), Some(end)) = (trajectory.initial(), trajectory.last()) {
                info!(body = %name, from = %start, to = %end, points = trajectory.len(), "trajectory");
            }
        }
    }

    let mut renderer = TracingRenderer::new(args.scale);
    let drawn = play(&run.recorder, points_inter, &run.status, &mut renderer)?;
    info!(segments = drawn, points_inter, "playback done");

    Ok(())
}
