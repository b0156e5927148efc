use orbsim::{bench_euler_curve, bench_gravity};
use orbsim::{EngineConfig, ForceModel, LogProgress, ParametersConfig, ParentRule, Preset, RunState, Scenario, ScenarioConfig, TimeUnit, G_SI};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "orbsim", about = "Star system orbit simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a YAML scenario or a CSV preset and write the position history as CSV
    Run(RunArgs),
    /// Time sequential vs parallel direct gravity
    Bench {
        /// Print per-step CSV timings instead of single force evaluations
        #[arg(long)]
        curve: bool,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// YAML scenario, looked up as given and then under `scenarios/`
    #[arg(short, long, conflicts_with = "preset")]
    file_name: Option<String>,

    /// CSV preset (type,name,mass,radius,sma,vel,inc); run settings come from the flags below
    #[arg(short, long)]
    preset: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Model::FullNbody)]
    model: Model,

    #[arg(long)]
    parallel: bool,

    #[arg(long, default_value_t = 1000)]
    steps: i64,

    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    #[arg(long, value_enum, default_value_t = Unit::Hours)]
    time_unit: Unit,

    #[arg(long, default_value_t = 1)]
    report_interval: i64,

    /// Wall-clock limit in seconds; the run stops after the current step and the partial history is written
    #[arg(long)]
    time_limit: Option<f64>,

    /// Output CSV path, stdout if omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Model {
    FullNbody,
    PatchedConic,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Years,
}

impl From<Unit> for TimeUnit {
    fn from(u: Unit) -> Self {
        match u {
            Unit::Seconds => TimeUnit::Seconds,
            Unit::Minutes => TimeUnit::Minutes,
            Unit::Hours => TimeUnit::Hours,
            Unit::Days => TimeUnit::Days,
            Unit::Years => TimeUnit::Years,
        }
    }
}

// load here to keep main clean
fn load_scenario(args: &RunArgs) -> Result<ScenarioConfig> {
    if let Some(file_name) = &args.file_name {
        let direct = PathBuf::from(file_name);
        let config_path = if direct.exists() {
            direct
        } else {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
        };
        return Ok(ScenarioConfig::load(&config_path)?);
    }

    let Some(preset_path) = &args.preset else {
        bail!("either --file-name or --preset is required");
    };

    let engine = EngineConfig {
        force_model: match args.model {
            Model::FullNbody => ForceModel::FullNBody,
            Model::PatchedConic => ForceModel::PatchedConic,
        },
        parallel: args.parallel,
        parent_rule: ParentRule::default(),
        primary_recoil: false,
    };
    let parameters = ParametersConfig {
        steps: args.steps,
        dt: args.dt,
        time_unit: args.time_unit.into(),
        report_interval: args.report_interval,
        G: G_SI,
    };

    Ok(Preset::load(preset_path)?.into_scenario(engine, parameters))
}

fn run(args: RunArgs) -> Result<()> {
    let scenario_cfg = load_scenario(&args)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    let steps = scenario.parameters.steps;
    let mut progress = LogProgress::new(steps, (steps / 10).max(1));

    if let Some(secs) = args.time_limit {
        if !(secs.is_finite() && secs >= 0.0) {
            bail!("time limit must be a non-negative number of seconds, got {secs}");
        }
        let cancel = progress.cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs_f64(secs));
            cancel.cancel();
        });
    }

    let outcome = scenario.run(&mut progress)?;
    if outcome.state == RunState::Cancelled {
        tracing::warn!(steps = outcome.steps_taken, "writing partial history");
    }

    let sink: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);
    for row in outcome.history.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args)?,
        Command::Bench { curve } => {
            if curve {
                bench_euler_curve()?;
            } else {
                bench_gravity()?;
            }
        }
    }

    Ok(())
}
