/// Selection of (host, virus) pairs that can score above zero
use crate::bio::ranked_list::RankedList;
use rayon::prelude::*;
use std::collections::HashMap;

/// One unit of scoring work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairTask {
    pub host_index: usize,
    pub virus_index: usize,
    pub p: f64,
}

/// Pairs that share at least one identifier, plus the size of the full grid.
#[derive(Debug, Clone, Default)]
pub struct FilteredPairs {
    pub tasks: Vec<PairTask>,
    pub total_pairs: usize,
}

impl FilteredPairs {
    pub fn pruned(&self) -> usize {
        self.total_pairs - self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Emit exactly the (host, virus) pairs whose identifier sets intersect,
/// ordered by virus then host index.
///
/// Every omitted pair is disjoint and therefore scores exactly 0, so pruning
/// never changes the score matrix.
pub fn filter_pairs(hosts: &[&RankedList], viruses: &[&RankedList], p: f64) -> FilteredPairs {
    // Inverted index: identifier -> hosts containing it, built once.
    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (host_index, host) in hosts.iter().enumerate() {
        for id in host.identifiers() {
            index.entry(id).or_default().push(host_index);
        }
    }

    let tasks: Vec<PairTask> = viruses
        .par_iter()
        .enumerate()
        .flat_map_iter(|(virus_index, virus)| {
            let mut candidates: Vec<usize> = virus
                .identifiers()
                .filter_map(|id| index.get(id))
                .flatten()
                .copied()
                .collect();
            candidates.sort_unstable();
            candidates.dedup();

            if candidates.is_empty() {
                tracing::warn!(virus_index, "virus shares no identifier with any host");
            }

            candidates.into_iter().map(move |host_index| PairTask {
                host_index,
                virus_index,
                p,
            })
        })
        .collect();

    let total_pairs = hosts.len() * viruses.len();
    tracing::debug!(
        total_pairs,
        kept = tasks.len(),
        "filtered host/virus pairs"
    );

    FilteredPairs { tasks, total_pairs }
}
