use crate::cli::output::*;
use crate::core::rbo::{depth_for_weight, validate_p, weight};
use clap::Args;
use comfy_table::Cell;

#[derive(Args, Debug)]
pub struct WeightArgs {
    /// RBO weighting parameter in (0, 1)
    #[arg(long, default_value = "0.75")]
    pub p: f64,

    /// Depths to report (default: 1, 5, 10, 20, 30, 50)
    #[arg(short, long, value_delimiter = ',')]
    pub depth: Vec<usize>,

    /// Also report the smallest depth carrying at least this share of the weight
    #[arg(short, long)]
    pub target: Option<f64>,
}

const DEFAULT_DEPTHS: [usize; 6] = [1, 5, 10, 20, 30, 50];

/// `(depth, weight)` rows for the requested depths.
pub fn weight_table(p: f64, depths: &[usize]) -> Vec<(usize, f64)> {
    depths.iter().map(|&d| (d, weight(d, p))).collect()
}

pub fn run(args: WeightArgs) -> anyhow::Result<()> {
    let p = validate_p(args.p)?;
    let depths = if args.depth.is_empty() {
        DEFAULT_DEPTHS.to_vec()
    } else {
        args.depth.clone()
    };

    section_header_with_line(&format!("RBO weight of the top ranks (p = {})", p));

    let mut table = create_standard_table();
    table.set_header(vec![header_cell("Depth"), header_cell("Weight")]);
    for (d, w) in weight_table(p, &depths) {
        table.add_row(vec![Cell::new(d), Cell::new(format!("{:.4}", w))]);
    }
    println!("{}", table);

    if let Some(target) = args.target {
        let depth = depth_for_weight(target, p)?;
        success(&format!(
            "The first {} ranks carry {:.1}% of the weight; use --k {} to keep them",
            depth,
            weight(depth, p) * 100.0,
            depth
        ));
    }

    Ok(())
}
