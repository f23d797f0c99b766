//! Writes a procedurally generated map in the `<lane> <timestamp>` format.

use clap::Parser;
use harmon::models::engine::{MapGenerator, format_notes};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "generate_map",
    about = "Generate a random four-lane map"
)]
struct Args {
    /// Spacing between regular notes in milliseconds
    #[arg(long, default_value = "180")]
    delay: i64,

    /// Timestamp of the first note in milliseconds
    #[arg(long, default_value = "3000")]
    start: i64,

    /// No note is placed at or after this timestamp
    #[arg(long, default_value = "21000")]
    end: i64,

    /// Seed for reproducible maps
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the off-beat notes
    #[arg(long)]
    no_syncopation: bool,

    /// Output file; stdout when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut generator = MapGenerator::new(args.delay, args.start, args.end);
    generator.syncopation = !args.no_syncopation;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let notes = generator.generate(&mut rng);
    if notes.is_empty() {
        log::error!(
            "GENERATOR: No notes generated for delay {} ms in [{}, {})",
            args.delay,
            args.start,
            args.end
        );
        return ExitCode::FAILURE;
    }

    let content = format_notes(&notes);
    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, content) {
                log::error!("GENERATOR: Failed to write {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
            log::info!("GENERATOR: Wrote {} notes to {:?}", notes.len(), path);
        }
        None => print!("{}", content),
    }

    ExitCode::SUCCESS
}
