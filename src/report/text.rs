use crate::core::predictor::Prediction;
use anyhow::Result;
use std::fmt::Write;

/// Human-readable run summary. `limit` caps the number of viruses listed.
pub fn generate_summary(prediction: &Prediction, limit: usize) -> Result<String> {
    let stats = &prediction.stats;
    let mut output = String::new();

    writeln!(&mut output, "Host Prediction Summary")?;
    writeln!(&mut output, "=======================")?;
    writeln!(&mut output)?;
    writeln!(&mut output, "- Viruses:       {:8}", stats.viruses)?;
    writeln!(&mut output, "- Hosts:         {:8}", stats.hosts)?;
    writeln!(&mut output, "- Pairs total:   {:8}", stats.total_pairs)?;
    writeln!(&mut output, "- Pairs scored:  {:8}", stats.scored_pairs)?;
    writeln!(&mut output, "- Pairs pruned:  {:8}", stats.pruned_pairs)?;

    let tied = prediction.top_matches.iter().filter(|m| m.is_tied()).count();
    let unmatched = prediction
        .top_matches
        .iter()
        .filter(|m| m.score == 0.0)
        .count();
    writeln!(&mut output, "- Tied top hosts:{:8}", tied)?;
    writeln!(&mut output, "- No shared hits:{:8}", unmatched)?;
    writeln!(&mut output)?;

    if limit > 0 && !prediction.top_matches.is_empty() {
        writeln!(&mut output, "Top Matches")?;
        writeln!(&mut output, "-----------")?;
        for m in prediction.top_matches.iter().take(limit) {
            if m.score == 0.0 {
                writeln!(&mut output, "  {}: no host shares a ranked genome", m.virus)?;
            } else {
                writeln!(&mut output, "  {}: {} ({:.4})", m.virus, m.hosts.join(", "), m.score)?;
            }
        }
        if prediction.top_matches.len() > limit {
            writeln!(&mut output, "  ... and {} more", prediction.top_matches.len() - limit)?;
        }
    }

    Ok(output)
}
