mod commands;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use section_matcher_config::get_config;
use section_matcher_optimizer::error::ValidationError;
use section_matcher_optimizer::Matcher;
use section_matcher_telemetry::setup_telemetry;

#[derive(Parser, Debug)]
#[command(name = "section-matcher", about = "Assign mentors to section slots", version)]
struct Args {
    /// Configuration file, defaults to section-matcher.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match mentors from a JSON input file
    Solve {
        #[arg(long, short, value_name = "FILE")]
        input: PathBuf,
        /// Defaults to stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write random matcher input
    Generate {
        #[arg(long, default_value_t = 20)]
        mentors: u32,
        #[arg(long, default_value_t = 5)]
        slots: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Defaults to stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

const EXIT_FAILURE: u8 = 1;
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ValidationError>() {
                Some(validation) => eprintln!("rejected: {validation}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::from(exit_status(&err))
        }
    }
}

/// Rejected input is told apart from everything else that can go wrong.
fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ValidationError>()
        .map_or(EXIT_FAILURE, |_| EXIT_REJECTED)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = get_config(args.config.as_deref()).context("failed to load configuration")?;
    setup_telemetry(&config.log_filter);

    match args.command {
        Command::Solve { input, output } => {
            let reader = BufReader::new(
                File::open(&input).with_context(|| format!("failed to open {}", input.display()))?,
            );
            let matcher = Matcher::new(config.matcher.cost);
            commands::solve(reader, open_output(output.as_deref())?, matcher, &config.section)
        }
        Command::Generate {
            mentors,
            slots,
            seed,
            output,
        } => {
            let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
            commands::generate(open_output(output.as_deref())?, mentors, slots, &mut rng)
        }
    }
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}
