use std::fs;
use std::io::{self, Read};
use std::num::NonZero;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use cranes::{Algorithm, Dimension, Grid, Path, RandomGridOptions, MAX_EXHAUSTIVE_STEPS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Paths longer than this make the exhaustive search take noticeably long.
const SLOW_EXHAUSTIVE_STEPS: usize = 24;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Choice {
    Exhaustive,
    Dynamic,
    Both,
}

impl Choice {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Self::Exhaustive => &[Algorithm::Exhaustive],
            Self::Dynamic => &[Algorithm::DynamicProgramming],
            Self::Both => &[Algorithm::Exhaustive, Algorithm::DynamicProgramming],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cranes-solver", version, about = "Find the South/East path collecting the most cranes on a grid")]
struct Cli {
    /// Read the grid from this file, or from stdin if `-`.
    #[arg(short, long, conflicts_with = "random", required_unless_present = "random")]
    grid: Option<PathBuf>,

    /// Generate a random grid of the given size, e.g. `8x12` (rows x columns).
    #[arg(short, long, value_parser = parse_dims)]
    random: Option<(Dimension, Dimension)>,

    /// Seed for `--random`; a fresh one is drawn if omitted.
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Chance that a random cell is a building.
    #[arg(long, default_value_t = RandomGridOptions::default().building_probability)]
    building_probability: f64,

    /// Chance that a random open cell holds cranes.
    #[arg(long, default_value_t = RandomGridOptions::default().crane_probability)]
    crane_probability: f64,

    /// Most cranes a random cell can hold.
    #[arg(long, default_value_t = RandomGridOptions::default().max_cranes)]
    max_cranes: u32,

    /// Which algorithm to run.
    #[arg(short, long, value_enum, default_value_t = Choice::Dynamic)]
    algorithm: Choice,

    /// Log progress; `RUST_LOG` takes precedence.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dims(s: &str) -> Result<(Dimension, Dimension), String> {
    let (rows, columns) = s.split_once(['x', 'X']).ok_or_else(|| format!("expected ROWSxCOLUMNS, got {s:?}"))?;
    let parse = |part: &str| part.trim().parse::<NonZero<usize>>().map_err(|e| format!("bad dimension {part:?}: {e}"));
    Ok((parse(rows)?, parse(columns)?))
}

fn load_grid(cli: &Cli) -> Result<Grid> {
    if let Some(dims) = cli.random {
        let seed = cli.seed.unwrap_or_else(rand::random);
        info!(seed, "generating random grid");
        let options = RandomGridOptions {
            building_probability: cli.building_probability,
            crane_probability: cli.crane_probability,
            max_cranes: cli.max_cranes,
        };
        return Ok(Grid::random(dims, &options, &mut StdRng::seed_from_u64(seed)));
    }

    let source = cli.grid.as_ref().context("no grid given")?;
    let text = if source.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("reading grid from stdin")?;
        text
    } else {
        fs::read_to_string(source).with_context(|| format!("reading grid from {}", source.display()))?
    };

    text.parse().with_context(|| format!("parsing grid from {}", source.display()))
}

fn report(algorithm: Algorithm, path: &Path<'_>, elapsed: std::time::Duration) {
    println!("{algorithm}: {} cranes in {} steps ({:.3} ms)", path.total_cranes(), path.steps().len(), elapsed.as_secs_f64() * 1000.0);
    println!("steps: {}", if path.steps().is_empty() { "(none)".to_owned() } else { path.step_string() });
    print!("{path}");
}

fn run(cli: &Cli) -> Result<bool> {
    let grid = load_grid(cli)?;
    println!("{}x{} grid, {} cranes in total:", grid.rows(), grid.columns(), grid.total_cranes());
    print!("{grid}");

    let mut totals = Vec::with_capacity(2);
    for algorithm in cli.algorithm.algorithms() {
        if !algorithm.supports(&grid) {
            bail!(
                "{algorithm} cannot solve a {}x{} grid; it handles paths of at most {MAX_EXHAUSTIVE_STEPS} steps",
                grid.rows(),
                grid.columns(),
            );
        }
        if *algorithm == Algorithm::Exhaustive && grid.rows() + grid.columns() - 2 > SLOW_EXHAUSTIVE_STEPS {
            warn!("exhaustive search over {}x{} grid may take a long time", grid.rows(), grid.columns());
        }

        let start = Instant::now();
        let path = algorithm.solve(&grid);
        let elapsed = start.elapsed();

        println!();
        report(*algorithm, &path, elapsed);
        totals.push(path.total_cranes());
    }

    let agree = totals.windows(2).all(|w| w[0] == w[1]);
    if totals.len() > 1 {
        println!();
        println!("totals {}", if agree { "agree" } else { "DISAGREE" });
    }

    Ok(agree)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
