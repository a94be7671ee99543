use std::{error::Error, path::PathBuf};

use clap::{Parser, ValueEnum};
use dirtyset::{
    tracker::{DirtyFieldTracker, OverflowClearPolicy, UncountedFieldTracker},
    workload::{ConfigLoadError, WorkloadConfig, WorkloadStats, run_rounds},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    /// Tracker with a running dirty count
    Counted,
    /// Tracker without a count, overflow clears erase
    Uncounted,
    /// Tracker without a count, overflow clears insert (historical behaviour)
    Legacy,
}

/// Replays synthetic field mutation workloads against a dirty field tracker
#[derive(Parser, Debug)]
#[command(name = "dirtyset")]
#[command(about = "Runs synthetic workloads against dirty field trackers", long_about = None)]
struct Args {
    /// JSON file with a workload configuration. Flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which tracker to run
    #[arg(short, long, value_enum, default_value_t = Variant::Counted)]
    variant: Variant,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Operations per round
    #[arg(short, long)]
    operations: Option<usize>,

    #[arg(short, long)]
    rounds: Option<usize>,

    /// Probability that a single-field operation clears instead of sets
    #[arg(long)]
    clear_probability: Option<f64>,

    /// Insert a clear-all every N operations (0 disables)
    #[arg(long)]
    clear_all_every: Option<usize>,

    /// Share of operations targeting fields >= 128
    #[arg(long)]
    overflow_ratio: Option<f64>,

    /// Geometric parameter for base-range indices, higher favours low fields
    #[arg(long)]
    skew: Option<f64>,

    /// Exclusive upper bound on overflow field indices
    #[arg(long)]
    max_field: Option<u16>,

    /// Print the statistics as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl Args {
    fn workload_config(&self) -> Result<WorkloadConfig, ConfigLoadError> {
        let mut config = match &self.config {
            Some(path) => WorkloadConfig::from_json_file(path)?,
            None => WorkloadConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(operations) = self.operations {
            config.operations = operations;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(p) = self.clear_probability {
            config.clear_probability = p;
        }
        if let Some(every) = self.clear_all_every {
            config.clear_all_every = every;
        }
        if let Some(ratio) = self.overflow_ratio {
            config.overflow_ratio = ratio;
        }
        if let Some(skew) = self.skew {
            config.skew = skew;
        }
        if let Some(max_field) = self.max_field {
            config.max_field = max_field;
        }

        config.validate()?;
        Ok(config)
    }
}

fn report_error(err: &dyn Error) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn print_summary(variant: Variant, stats: &WorkloadStats, elapsed_secs: f64) {
    let ops = stats.get_operations();
    let transition_pct = if ops > 0 {
        (stats.get_transitions() as f64 / ops as f64) * 100.0
    } else {
        0.0
    };

    println!("\n==========");
    println!("Variant: {variant:?}");
    println!("==========");
    println!(
        "{} operations: {} transitions ({:.2}%), {} no-ops, {} clear-alls",
        ops,
        stats.get_transitions(),
        transition_pct,
        stats.get_no_ops(),
        stats.get_clear_alls()
    );
    println!("Dirty fields after last round: {}", stats.get_dirty_at_end());
    println!(
        "Completed in {:.4}s ({:.2} Mops/s)",
        elapsed_secs,
        if elapsed_secs > 0.0 {
            ops as f64 / elapsed_secs / 1e6
        } else {
            0.0
        }
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match args.workload_config() {
        Ok(config) => config,
        Err(e) => {
            report_error(&e);
            std::process::exit(2);
        }
    };

    info!(
        variant = ?args.variant,
        seed = config.seed,
        operations = config.operations,
        rounds = config.rounds,
        "starting workload"
    );

    let (stats, elapsed) = match args.variant {
        Variant::Counted => run_rounds(&config, DirtyFieldTracker::new),
        Variant::Uncounted => run_rounds(&config, UncountedFieldTracker::new),
        Variant::Legacy => run_rounds(&config, || {
            UncountedFieldTracker::with_policy(OverflowClearPolicy::InsertOnly)
        }),
    };

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                report_error(&e);
                std::process::exit(1);
            }
        }
    } else {
        print_summary(args.variant, &stats, elapsed.as_secs_f64());
    }
}
