use crate::bio::blast::{parse_group_map, rank_directory};
use crate::cli::output::*;
use crate::utils::parallel::{build_pool, resolve_threads};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Directory of BLAST tabular result files (outfmt 6 or 7), one per genome
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory for the ranked list files (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// CSV mapping genome id to group id (e.g. species or taxid)
    #[arg(short, long, value_name = "FILE")]
    pub group: Option<PathBuf>,

    /// Number of threads (passed from global)
    #[arg(skip)]
    pub threads: Option<usize>,
}

pub fn run(args: RankArgs) -> anyhow::Result<()> {
    let groups = match &args.group {
        Some(path) => {
            let groups = parse_group_map(&std::fs::read_to_string(path)?)?;
            info(&format!("Loaded {} group assignments", format_number(groups.len())));
            Some(groups)
        }
        None => None,
    };

    let pool = build_pool(resolve_threads(args.threads))?;
    let written = pool.install(|| rank_directory(&args.input, &args.output, groups.as_ref()))?;

    tracing::info!("Ranked {} BLAST result files", written.len());
    success(&format!(
        "Wrote {} ranked lists to {}",
        format_number(written.len()),
        args.output.display()
    ));
    Ok(())
}
