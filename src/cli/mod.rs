pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phirbo",
    version,
    about = "Predict virus hosts from ranked BLAST hit lists",
    long_about = "Phirbo compares the ranked list of reference genomes hit by each virus with the \
                  ranked list hit by each candidate host, scoring every pair with tie-aware \
                  rank-biased overlap and reporting the best scoring host(s) per virus."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of worker threads (default: all available cores)
    #[arg(short = 'j', long, global = true, env = "PHIRBO_THREADS")]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score viruses against hosts and report the best host per virus
    Predict(commands::predict::PredictArgs),

    /// Turn BLAST tabular output into ranked lists
    Rank(commands::rank::RankArgs),

    /// Show how much RBO weight the top ranks carry for a given p
    Weight(commands::weight::WeightArgs),
}
