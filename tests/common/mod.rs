//! Common test utilities for phirbo integration tests
//!
//! Builders for ranked lists and synthetic virus/host collections, plus
//! helpers that lay collections out on disk the way `phirbo predict` reads them.
#![allow(dead_code)]

use phirbo::bio::rank_file::write_ranked_list;
use phirbo::bio::{RankedCollection, RankedList};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// Build a ranked list from string literals.
pub fn list(groups: &[&[&str]]) -> RankedList {
    RankedList::from_groups(groups.iter().map(|g| g.iter().copied())).expect("valid ranked list")
}

/// Build a named collection from string literals.
pub fn collection(entries: &[(&str, &[&[&str]])]) -> RankedCollection {
    entries
        .iter()
        .map(|(name, groups)| (name.to_string(), list(groups)))
        .collect()
}

/// Random ranked list drawn from a pool of `pool_size` genome ids.
pub fn random_list(rng: &mut StdRng, pool_size: usize, max_ranks: usize) -> RankedList {
    let mut pool: Vec<String> = (0..pool_size).map(|i| format!("g{}", i)).collect();
    pool.shuffle(rng);

    let ranks = rng.gen_range(1..=max_ranks);
    let mut groups = Vec::with_capacity(ranks);
    let mut ids = pool.into_iter();
    for _ in 0..ranks {
        let size = rng.gen_range(1..=3);
        let group: Vec<String> = ids.by_ref().take(size).collect();
        if group.is_empty() {
            break;
        }
        groups.push(group);
    }

    RankedList::new(groups).expect("generated list is valid")
}

/// Deterministic synthetic collection named `{prefix}{index:03}`.
pub fn random_collection(seed: u64, prefix: &str, count: usize, pool_size: usize) -> RankedCollection {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| (format!("{}{:03}", prefix, i), random_list(&mut rng, pool_size, 12)))
        .collect()
}

/// Write every list of a collection as `<dir>/<name>.txt`.
pub fn write_collection(dir: &Path, collection: &RankedCollection) {
    std::fs::create_dir_all(dir).expect("create collection dir");
    for (name, list) in collection {
        write_ranked_list(dir.join(format!("{}.txt", name)), list).expect("write ranked list");
    }
}
