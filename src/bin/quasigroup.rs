//! Build or load a Cayley table and look for subquasigroups.
//!
//! Usage:
//!   quasigroup generate replacement --order 8 --seed 42 --analyze
//!   quasigroup generate affine --order 7 --alpha 3 --beta 2 --constant 1
//!   quasigroup analyze table.txt --output results.txt
//!   quasigroup analyze -          (type the table, end with Ctrl-D)
//!   quasigroup check table.txt

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand, ValueEnum};
use latin_quasigroup::io::{read_table, read_table_from, write_report, write_table};
use latin_quasigroup::simple::{self, AffineParams};
use latin_quasigroup::{CayleyTable, GeneratorParams, Quasigroup, SubquasigroupReport, generate};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quasigroup")]
#[command(version)]
#[command(about = "Generate Latin squares and detect subquasigroups", long_about = None)]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a Cayley table of the given order
    Generate(GenerateArgs),

    /// Read a table from a file and run both subquasigroup detections
    Analyze {
        /// Table file: the order, then order² entries ("-" reads standard input)
        file: PathBuf,

        /// Write the table and the results to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a table file holds a Latin square (exit code 1 if not)
    Check {
        /// Table file ("-" reads standard input)
        file: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// x * y = (x + y) mod n
    Cyclic,
    /// x * y = (alpha x + beta f(y) + c) mod n with a random permutation f
    Affine,
    /// Random Latin square by the sequential replacement-graph method
    Replacement,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[arg(value_enum)]
    method: Method,

    /// Number of elements
    #[arg(short = 'n', long)]
    order: usize,

    /// RNG seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Affine coefficient of x, coprime to the order
    #[arg(long, default_value_t = 1)]
    alpha: usize,

    /// Affine coefficient of f(y), coprime to the order
    #[arg(long, default_value_t = 1)]
    beta: usize,

    /// Affine additive constant, below the order
    #[arg(long, default_value_t = 0)]
    constant: usize,

    /// Displacement steps per row before a row is restarted (default 8n²)
    #[arg(long)]
    repair_budget: Option<usize>,

    /// Run both subquasigroup detections on the result
    #[arg(short, long)]
    analyze: bool,

    /// Write the table (and results, with --analyze) to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Generate(args) => generate_command(args)?,
        Commands::Analyze { file, output } => {
            let table = load(&file)?;
            if !table.is_latin() {
                warn!(file = %file.display(), "table is not a Latin square");
            }
            print!("{table}");
            let report = Quasigroup::new(table.clone()).report();
            println!("{report}");
            if let Some(path) = output {
                save(&path, &table, Some(&report))?;
            }
        }
        Commands::Check { file } => {
            let table = load(&file)?;
            if table.is_latin() {
                println!("{} is a Latin square of order {}", file.display(), table.n());
            } else {
                println!("{} is not a Latin square", file.display());
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn generate_command(args: GenerateArgs) -> Result<()> {
    ensure!(args.order >= 1, "order must be at least 1");
    ensure!(
        args.repair_budget != Some(0),
        "repair budget must be positive"
    );

    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_os_rng(),
    };

    let table = match args.method {
        Method::Cyclic => simple::cyclic(args.order),
        Method::Affine => {
            let params = AffineParams {
                alpha: args.alpha,
                beta: args.beta,
                constant: args.constant,
            };
            let affine = simple::affine(args.order, params, &mut rng)
                .context("invalid affine coefficients")?;
            let f: Vec<String> = affine.permutation.iter().map(|v| v.to_string()).collect();
            println!("f = {}", f.join(" "));
            affine.table
        }
        Method::Replacement => {
            let params = GeneratorParams {
                repair_budget: args.repair_budget,
            };
            let table = generate(args.order, &mut rng, &params);
            info!(order = args.order, latin = table.is_latin(), "generated table");
            table
        }
    };

    print!("{table}");
    let report = args.analyze.then(|| {
        let report = Quasigroup::new(table.clone()).report();
        println!("{report}");
        report
    });
    if let Some(path) = args.output {
        save(&path, &table, report.as_ref())?;
    }
    Ok(())
}

fn load(path: &Path) -> Result<CayleyTable> {
    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            eprintln!("Enter the order, then the table row by row. End with Ctrl-D.");
        }
        return read_table_from(stdin.lock())
            .context("failed to read table from standard input");
    }
    read_table(path).with_context(|| format!("failed to read table from {}", path.display()))
}

fn save(path: &Path, table: &CayleyTable, report: Option<&SubquasigroupReport>) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match report {
        Some(report) => write_report(&mut writer, table, report)?,
        None => write_table(&mut writer, table)?,
    }
    writer.flush()?;
    info!(path = %path.display(), "results saved");
    Ok(())
}
