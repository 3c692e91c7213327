//! Tulle CLI — run cloth scenarios and export frame data.

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod export;
mod scenario;

#[derive(Parser)]
#[command(name = "tulle")]
#[command(version, about = "Tulle — position-based cloth simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Pbd,
    Xpbd,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a cloth scenario and export frame data as JSON.
    Simulate {
        /// Which scenario to run.
        #[arg(short, long, default_value = "hanging")]
        scenario: String,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 300)]
        frames: u32,

        /// Cloth grid resolution (quads per side).
        #[arg(short, long, default_value_t = 50)]
        resolution: u32,

        /// Projection algorithm.
        #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Xpbd)]
        algorithm: AlgorithmArg,

        /// Output JSON file path.
        #[arg(short, long, default_value = "animation.json")]
        output: String,
    },

    /// Validate a mesh file.
    Validate {
        /// Path to a mesh file (JSON).
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scenario,
            frames,
            resolution,
            algorithm,
            output,
        } => {
            let algorithm = match algorithm {
                AlgorithmArg::Pbd => tulle_solver::Algorithm::Pbd,
                AlgorithmArg::Xpbd => tulle_solver::Algorithm::Xpbd,
            };
            commands::simulate(&scenario, frames, resolution, algorithm, &output)
        }
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
