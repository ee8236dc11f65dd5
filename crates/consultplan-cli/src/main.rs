//! consultplan CLI - Consultant Assignment Engine
//!
//! Command-line interface for solving, comparing and inspecting assignment
//! instances.

mod input;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use consultplan_core::{
    same_makespan, CompatibilityRow, CompatibilityTable, Instance, ProcessingTimes, ScheduleError,
    StrategyKind,
};
use consultplan_solver::{
    default_exact_model, CostReport, ExactOptions, ExhaustiveOptions, ExhaustiveSearch,
    GreedyScheduler, LogObserver,
};
use render::{CompareRow, RunOutput};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "consultplan")]
#[command(author, version, about = "Assign tasks to consultants minimising makespan", long_about = None)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance with one strategy
    Solve {
        /// Instance file (.toml or .json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = StrategyArg::Exhaustive)]
        strategy: StrategyArg,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Run every strategy and check that the exact ones agree
    Compare {
        /// Instance file (.toml or .json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Print the compatibility table generated from skills
    Factors {
        /// Instance file (.toml or .json)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Greedy,
    Exhaustive,
    Exact,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => StrategyKind::Greedy,
            StrategyArg::Exhaustive => StrategyKind::Exhaustive,
            StrategyArg::Exact => StrategyKind::Exact,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Clone, Debug)]
struct LimitArgs {
    /// Largest search space the exhaustive strategy will enumerate
    #[arg(long, env = "CONSULTPLAN_MAX_CANDIDATES", default_value_t = 50_000_000)]
    max_candidates: u64,

    /// Time budget for the exact strategy
    #[arg(long, env = "CONSULTPLAN_TIME_LIMIT", value_name = "SECONDS", default_value_t = 60)]
    time_limit: u64,

    /// Enumerate on the current thread only
    #[arg(long)]
    sequential: bool,
}

impl LimitArgs {
    fn exhaustive(&self) -> ExhaustiveOptions {
        ExhaustiveOptions {
            max_candidates: self.max_candidates,
            parallel: !self.sequential,
            ..ExhaustiveOptions::default()
        }
    }

    fn exact(&self) -> ExactOptions {
        ExactOptions {
            time_limit: Duration::from_secs(self.time_limit),
            ..ExactOptions::default()
        }
    }
}

#[derive(Serialize)]
struct FactorsFile<'a> {
    compatibility: &'a [CompatibilityRow],
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve {
            file,
            strategy,
            format,
            limits,
        } => cmd_solve(&file, strategy.into(), format, &limits),
        Commands::Compare { file, limits } => cmd_compare(&file, &limits),
        Commands::Factors { file } => cmd_factors(&file),
    }
}

/// Solve with one strategy and build its report
fn run_strategy(
    kind: StrategyKind,
    instance: &Instance,
    times: &ProcessingTimes,
    limits: &LimitArgs,
) -> Result<RunOutput, ScheduleError> {
    let (solution, certified, lower_bound, timelines) = match kind {
        StrategyKind::Greedy => {
            let schedule = GreedyScheduler::new().schedule(times)?;
            (
                schedule.solution,
                false,
                Some(times.lower_bound()),
                Some(schedule.timelines),
            )
        }
        StrategyKind::Exhaustive => {
            let solution = ExhaustiveSearch::with_options(limits.exhaustive())
                .observer(Arc::new(LogObserver))
                .search(times)?;
            (solution, true, None, None)
        }
        StrategyKind::Exact => match default_exact_model(limits.exact())?.optimise(times) {
            Ok(outcome) => (outcome.solution, true, None, None),
            Err(ScheduleError::Suboptimal {
                incumbent,
                lower_bound,
            }) => (*incumbent, false, Some(lower_bound), None),
            Err(err) => return Err(err),
        },
    };

    let report = CostReport::for_solution(&solution, times, instance.consultants())?;
    Ok(RunOutput {
        strategy: kind,
        certified,
        lower_bound,
        report,
        timelines,
    })
}

fn cmd_solve(file: &Path, kind: StrategyKind, format: OutputFormat, limits: &LimitArgs) -> Result<()> {
    let instance = input::load_instance(file)?;
    let times = instance
        .processing_times()
        .context("failed to build the processing-time matrix")?;

    let output = match run_strategy(kind, &instance, &times, limits) {
        Ok(output) => output,
        Err(err @ ScheduleError::InstanceTooLarge { .. }) => {
            return Err(anyhow::Error::new(err)
                .context("exhaustive search refused; rerun with --strategy greedy or --strategy exact"));
        }
        Err(err) => return Err(anyhow::Error::new(err).context(format!("{kind} strategy failed"))),
    };

    match format {
        OutputFormat::Text => print!("{}", render::text(&output)),
        OutputFormat::Json => println!("{}", render::json(&output)?),
    }
    Ok(())
}

fn cmd_compare(file: &Path, limits: &LimitArgs) -> Result<()> {
    let instance = input::load_instance(file)?;
    let times = instance
        .processing_times()
        .context("failed to build the processing-time matrix")?;

    let mut rows = Vec::new();
    for kind in [StrategyKind::Greedy, StrategyKind::Exhaustive, StrategyKind::Exact] {
        match run_strategy(kind, &instance, &times, limits) {
            Ok(output) => rows.push(CompareRow::Solved(output)),
            Err(
                err @ (ScheduleError::InstanceTooLarge { .. }
                | ScheduleError::SolverTimeout { .. }
                | ScheduleError::SolverUnavailable(_)),
            ) => {
                tracing::warn!("{kind} skipped: {err}");
                rows.push(CompareRow::Skipped {
                    strategy: kind,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(anyhow::Error::new(err).context(format!("{kind} strategy failed"))),
        }
    }

    print!("{}", render::compare_table(&rows));

    let certified = |kind: StrategyKind| {
        rows.iter().find_map(|row| match row {
            CompareRow::Solved(run) if run.strategy == kind && run.certified => Some(run.report.makespan),
            _ => None,
        })
    };
    if let (Some(exhaustive), Some(exact)) = (certified(StrategyKind::Exhaustive), certified(StrategyKind::Exact)) {
        if !same_makespan(exhaustive, exact) {
            bail!("exhaustive makespan {exhaustive:.4} h and exact makespan {exact:.4} h disagree");
        }
    }
    Ok(())
}

fn cmd_factors(file: &Path) -> Result<()> {
    let mut parsed = input::InstanceFile::read(file)?;
    parsed.tasks.sort_by_key(|t| t.id);
    parsed.consultants.sort_by_key(|c| c.id);

    let table = CompatibilityTable::from_skills(&parsed.tasks, &parsed.consultants);
    let out = toml::to_string(&FactorsFile {
        compatibility: table.rows(),
    })
    .context("failed to serialise compatibility table")?;
    print!("{out}");
    Ok(())
}
