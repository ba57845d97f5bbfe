use clap::{Args, Parser, Subcommand};
use piblocks_core::batch::{sweep, verify_sweep};
use piblocks_core::exact::format_rational;
use piblocks_core::{
    compute, enumerate, parse_rational, pi, CancellationToken, Limits, Rational,
    SimulationConfig, Strategy,
};
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

const DEFAULT_DIGITS: i64 = 2;

#[derive(Parser)]
#[command(name = "piblocks")]
#[command(about = "Count colliding-block collisions exactly to get the digits of pi", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the collision count for one scenario
    Count {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// event-driven, fast-path or auto
        #[arg(long, default_value = "auto")]
        strategy: Strategy,
    },
    /// Enumerate and print every collision
    Events {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Print the log as JSON with exact rationals
        #[arg(long)]
        json: bool,
        /// Cancel the enumeration after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Count every N from 0 to --max-digits in parallel
    Sweep {
        #[arg(long)]
        max_digits: u32,
        /// Also enumerate and require both strategies to agree
        #[arg(long)]
        verify: bool,
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Print the leading digits of pi without any collisions
    Pi {
        #[arg(long)]
        digits: usize,
    },
}

#[derive(Args)]
struct ScenarioArgs {
    /// N: the heavy block weighs 100^N light blocks [default: 2]
    #[arg(long, allow_negative_numbers = true)]
    digits: Option<i64>,
    /// JSON configuration file; flags given explicitly override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, allow_hyphen_values = true)]
    heavy_velocity: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    light_velocity: Option<String>,
    #[arg(long)]
    light_position: Option<String>,
    #[arg(long)]
    heavy_position: Option<String>,
    #[arg(long)]
    max_enumerated_digits: Option<u32>,
    #[arg(long)]
    precision_budget_bits: Option<u32>,
}

impl ScenarioArgs {
    fn config(&self) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_str(&fs::read_to_string(path)?)?,
            None => SimulationConfig::canonical(DEFAULT_DIGITS),
        };
        if let Some(digits) = self.digits {
            config.digits = digits;
        }
        if let Some(v) = &self.heavy_velocity {
            config.heavy_velocity = parse_rational(v)?;
        }
        if let Some(v) = &self.light_velocity {
            config.light_velocity = parse_rational(v)?;
        }
        if let Some(x) = &self.light_position {
            config.light_position = parse_rational(x)?;
        }
        if let Some(x) = &self.heavy_position {
            config.heavy_position = parse_rational(x)?;
        }
        Ok(config)
    }

    fn limits(&self) -> Limits {
        let mut limits = Limits::default();
        if let Some(max) = self.max_enumerated_digits {
            limits.max_enumerated_digits = max;
        }
        if let Some(bits) = self.precision_budget_bits {
            limits.precision_budget_bits = bits;
        }
        limits
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Count { scenario, strategy } => run_count(&scenario, strategy),
        Commands::Events {
            scenario,
            json,
            timeout_secs,
        } => run_events(&scenario, json, timeout_secs),
        Commands::Sweep {
            max_digits,
            verify,
            scenario,
        } => run_sweep(&scenario, max_digits, verify),
        Commands::Pi { digits } => run_pi(digits),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_count(args: &ScenarioArgs, strategy: Strategy) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = args.config()?.validate()?;
    let report = compute(&scenario, strategy, &args.limits())?;

    println!("N = {}", report.digits);
    println!("strategy = {}", report.strategy);
    println!("collisions = {}", report.collision_count);
    println!("digits = {}", report.digit_string);
    Ok(())
}

fn run_events(
    args: &ScenarioArgs,
    json: bool,
    timeout_secs: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = args.config()?.validate()?;

    let token = timeout_secs.map(|secs| {
        let token = CancellationToken::new();
        let watchdog = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            watchdog.cancel();
        });
        token
    });

    let report = enumerate(&scenario, &args.limits(), true, token)?;
    let Some(log) = report.events else {
        return Ok(());
    };

    if json {
        println!("{}", log.to_json()?);
        return Ok(());
    }

    for event in &log {
        let state = &event.state;
        println!(
            "#{} {} t = {} light = ({}, {}) heavy = ({}, {})",
            event.index,
            event.kind,
            format_rational(&event.time),
            format_rational(&state.light.position),
            short(&state.light.velocity),
            format_rational(&state.heavy.position),
            short(&state.heavy.velocity),
        );
    }
    println!("collisions = {}", report.collision_count);
    Ok(())
}

fn run_sweep(
    args: &ScenarioArgs,
    max_digits: u32,
    verify: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let template = args.config()?;
    let limits = args.limits();
    let digits: Vec<u32> = (0..=max_digits).collect();

    let results = if verify {
        verify_sweep(&digits, &template, &limits)
    } else {
        sweep(&digits, &template, Strategy::Auto, &limits)
    };

    for (n, result) in results {
        let report = result?;
        println!("N = {} ({}): {}", n, report.strategy, report.digit_string);
    }
    Ok(())
}

fn run_pi(digits: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", pi::leading_digits(digits)?);
    Ok(())
}

/// Velocities grow long quickly; show an approximation past a few digits
fn short(value: &Rational) -> String {
    let exact = format_rational(value);
    if exact.len() <= 24 {
        exact
    } else {
        format!("~{:.6e}", piblocks_core::exact::to_f64_lossy(value))
    }
}
