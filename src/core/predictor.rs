/// Host prediction over whole virus and host collections
///
/// Stages: pair filter, parallel batch scoring, top-match selection. Inputs are
/// read-only for the whole run and the returned prediction is final.
use crate::bio::ranked_list::{RankedCollection, RankedList};
use crate::core::batch::{BatchScorer, ScoreMatrix};
use crate::core::config::ScoringParams;
use crate::core::pair_filter::filter_pairs;
use crate::core::top_match::{select_top_matches, TopMatch};
use crate::PhirboError;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PredictionStats {
    pub hosts: usize,
    pub viruses: usize,
    pub total_pairs: usize,
    pub scored_pairs: usize,
    pub pruned_pairs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub matrix: ScoreMatrix,
    pub top_matches: Vec<TopMatch>,
    pub stats: PredictionStats,
}

#[derive(Debug, Clone)]
pub struct HostPredictor {
    params: ScoringParams,
    show_progress: bool,
}

impl HostPredictor {
    pub fn new(params: ScoringParams) -> Self {
        Self {
            params,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score every virus against every host and pick the best host(s) per virus.
    ///
    /// Lists are truncated to `k` ranks here, so callers may pass full lists.
    pub fn predict(
        &self,
        viruses: &RankedCollection,
        hosts: &RankedCollection,
    ) -> Result<Prediction, PhirboError> {
        // Re-validate: the fields are public and may have been edited after construction.
        let params = ScoringParams::new(self.params.p, self.params.k, self.params.threads)?;

        if hosts.is_empty() {
            return Err(PhirboError::EmptyCollection("no host ranked lists supplied".to_string()));
        }
        if viruses.is_empty() {
            return Err(PhirboError::EmptyCollection("no virus ranked lists supplied".to_string()));
        }

        let (host_names, host_lists) = prepare(hosts, params.k);
        let (virus_names, virus_lists) = prepare(viruses, params.k);
        let host_refs: Vec<&RankedList> = host_lists.iter().collect();
        let virus_refs: Vec<&RankedList> = virus_lists.iter().collect();

        let start = Instant::now();
        let pairs = filter_pairs(&host_refs, &virus_refs, params.p);
        tracing::info!(
            "Pair filter kept {} of {} pairs ({} pruned) in {:.2?}",
            pairs.tasks.len(),
            pairs.total_pairs,
            pairs.pruned(),
            start.elapsed()
        );

        let start = Instant::now();
        let matrix = BatchScorer::new(params.threads)
            .with_progress(self.show_progress)
            .score(&host_refs, &virus_refs, host_names, virus_names, &pairs.tasks)?;
        tracing::info!(
            "Scored {} pairs on {} workers in {:.2?}",
            pairs.tasks.len(),
            params.threads,
            start.elapsed()
        );

        let top_matches = select_top_matches(&matrix)?;
        let tied = top_matches.iter().filter(|m| m.is_tied()).count();
        if tied > 0 {
            tracing::info!("{} of {} viruses have tied top hosts", tied, top_matches.len());
        }

        let stats = PredictionStats {
            hosts: matrix.host_count(),
            viruses: matrix.virus_count(),
            total_pairs: pairs.total_pairs,
            scored_pairs: pairs.tasks.len(),
            pruned_pairs: pairs.pruned(),
        };

        Ok(Prediction {
            matrix,
            top_matches,
            stats,
        })
    }
}

/// Names ascending with their lists truncated to `k`.
fn prepare(collection: &RankedCollection, k: usize) -> (Vec<String>, Vec<RankedList>) {
    collection
        .iter()
        .map(|(name, list)| (name.clone(), list.clone().truncated(k)))
        .unzip()
}
