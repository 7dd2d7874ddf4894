use crate::bio::rank_file::read_collection;
use crate::cli::output::*;
use crate::core::config::{default_config, load_config, Config};
use crate::core::predictor::HostPredictor;
use crate::report::{text, Format, ReportGenerator, ReportOptions};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Directory with one ranked list file per virus
    #[arg(value_name = "VIRUS_DIR")]
    pub virus_dir: PathBuf,

    /// Directory with one ranked list file per host
    #[arg(value_name = "HOST_DIR")]
    pub host_dir: PathBuf,

    /// Top-match output file; the score matrix is written next to it
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// RBO weighting parameter in (0, 1) [default: 0.75]
    #[arg(long)]
    pub p: Option<f64>,

    /// Truncate every ranked list to its first K ranks (0 disables truncation)
    /// [default: 30]
    #[arg(long)]
    pub k: Option<usize>,

    /// Configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output format (csv, json)
    #[arg(long)]
    pub format: Option<Format>,

    /// Show a progress bar while scoring
    #[arg(long)]
    pub progress: bool,

    /// Number of viruses listed in the terminal summary
    #[arg(long, default_value = "10")]
    pub summary: usize,

    /// Number of threads (passed from global)
    #[arg(skip)]
    pub threads: Option<usize>,
}

/// Merge command line overrides into the file (or default) configuration.
pub fn resolve_config(args: &PredictArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };

    if let Some(p) = args.p {
        config.scoring.p = p;
    }
    if let Some(k) = args.k {
        config.scoring.k = k;
    }
    if args.threads.is_some() {
        config.performance.threads = args.threads;
    }
    if let Some(format) = args.format {
        config.output.format = match format {
            Format::Csv => "csv".to_string(),
            Format::Json => "json".to_string(),
        };
    }
    if args.progress {
        config.performance.show_progress = true;
    }

    Ok(config)
}

pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let params = config.scoring_params()?;
    let format: Format = config
        .output
        .format
        .parse()
        .map_err(|e: String| crate::PhirboError::Config(e))?;

    section_header_with_line("Host Prediction");
    tree_item(false, "p", Some(&params.p.to_string()));
    tree_item(
        false,
        "k",
        Some(&if params.k == 0 { "untruncated".to_string() } else { params.k.to_string() }),
    );
    tree_item(true, "Threads", Some(&params.threads.to_string()));

    let viruses = read_collection(&args.virus_dir, params.k)?;
    let hosts = read_collection(&args.host_dir, params.k)?;
    info(&format!(
        "Loaded {} viruses and {} hosts",
        format_number(viruses.len()),
        format_number(hosts.len())
    ));

    let prediction = HostPredictor::new(params)
        .with_progress(config.performance.show_progress)
        .predict(&viruses, &hosts)?;

    let generator = ReportGenerator::new(ReportOptions {
        format,
        matrix_suffix: config.output.matrix_suffix.clone(),
    });
    let matrix_path = generator.write(&prediction, &args.output)?;

    print!("{}", text::generate_summary(&prediction, args.summary)?);
    success(&format!("Top matches written to {}", args.output.display()));
    success(&format!("Score matrix written to {}", matrix_path.display()));

    let tied = prediction.top_matches.iter().filter(|m| m.is_tied()).count();
    if tied > 0 {
        warning(&format!("{} viruses have more than one top host", tied));
    }

    Ok(())
}
