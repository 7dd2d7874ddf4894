/// Ranking of BLAST tabular hits into tie-aware ranked lists
///
/// Hits are reduced to the best bit score per subject (optionally per subject
/// group, e.g. species), then ranked by score. Subjects with equal scores share
/// a tie-set.
use crate::bio::rank_file::write_ranked_list;
use crate::bio::ranked_list::RankedList;
use crate::PhirboError;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

const SUBJECT_COLUMN: usize = 1;
const BITSCORE_COLUMN: usize = 11;

/// Maps a subject genome id to the group it is ranked under.
pub type GroupMap = HashMap<String, String>;

/// Best bit score per subject from outfmt 6/7 text.
pub fn best_scores(text: &str) -> Result<HashMap<String, f64>, PhirboError> {
    let mut best: HashMap<String, f64> = HashMap::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() <= BITSCORE_COLUMN {
            return Err(PhirboError::Parse(format!(
                "line {}: expected at least {} columns, found {}",
                line_no + 1,
                BITSCORE_COLUMN + 1,
                columns.len()
            )));
        }

        let subject = columns[SUBJECT_COLUMN]
            .split('|')
            .next()
            .unwrap_or(columns[SUBJECT_COLUMN]);
        let score: f64 = columns[BITSCORE_COLUMN].parse().map_err(|_| {
            PhirboError::Parse(format!(
                "line {}: invalid bit score '{}'",
                line_no + 1,
                columns[BITSCORE_COLUMN]
            ))
        })?;

        let entry = best.entry(subject.to_string()).or_insert(score);
        if score > *entry {
            *entry = score;
        }
    }

    Ok(best)
}

/// Re-key subject scores by group, keeping the best score per group.
pub fn group_scores(
    scores: HashMap<String, f64>,
    groups: &GroupMap,
) -> Result<HashMap<String, f64>, PhirboError> {
    let mut grouped: HashMap<String, f64> = HashMap::new();

    for (subject, score) in scores {
        let group = groups.get(&subject).ok_or_else(|| {
            PhirboError::Parse(format!("subject '{}' has no group assignment", subject))
        })?;
        let entry = grouped.entry(group.clone()).or_insert(score);
        if score > *entry {
            *entry = score;
        }
    }

    Ok(grouped)
}

/// Rank scores descending; ids break ordering ties, equal scores share a rank.
pub fn rank_scores(scores: HashMap<String, f64>) -> Result<RankedList, PhirboError> {
    let mut hits: Vec<(String, f64)> = scores.into_iter().collect();
    hits.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut previous: Option<f64> = None;
    for (id, score) in hits {
        match groups.last_mut() {
            Some(group) if previous == Some(score) => group.push(id),
            _ => groups.push(vec![id]),
        }
        previous = Some(score);
    }

    RankedList::new(groups)
}

/// Parse a `genome_id,group_id` CSV.
pub fn parse_group_map(text: &str) -> Result<GroupMap, PhirboError> {
    let mut groups = GroupMap::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut cols = line.split(',');
        match (cols.next(), cols.next()) {
            (Some(genome), Some(group)) if !genome.trim().is_empty() && !group.trim().is_empty() => {
                groups.insert(genome.trim().to_string(), group.trim().to_string());
            }
            _ => {
                return Err(PhirboError::Parse(format!(
                    "group file line {}: expected 'genome_id,group_id'",
                    line_no + 1
                )))
            }
        }
    }
    Ok(groups)
}

/// Rank one BLAST tabular file.
pub fn rank_blast_file<P: AsRef<Path>>(
    path: P,
    groups: Option<&GroupMap>,
) -> Result<RankedList, PhirboError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let annotate = |e: PhirboError| match e {
        PhirboError::Parse(msg) => PhirboError::Parse(format!("{}: {}", path.display(), msg)),
        other => other,
    };

    let mut scores = best_scores(&text).map_err(annotate)?;
    if let Some(groups) = groups {
        scores = group_scores(scores, groups).map_err(annotate)?;
    }
    rank_scores(scores)
}

/// Rank every file in `input_dir` in parallel, writing `<stem>.txt` files to `output_dir`.
/// Returns the written paths in name order. Two inputs sharing a stem are rejected
/// before anything is written.
pub fn rank_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    groups: Option<&GroupMap>,
) -> Result<Vec<PathBuf>, PhirboError> {
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();

    let mut inputs: BTreeMap<String, PathBuf> = BTreeMap::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PhirboError::Parse(format!("Invalid file name: {}", path.display())))?
            .to_string();

        if let Some(previous) = inputs.insert(stem.clone(), path) {
            return Err(PhirboError::Parse(format!(
                "{} and another file in {} both rank to '{}.txt'",
                previous.display(),
                input_dir.display(),
                stem
            )));
        }
    }

    fs::create_dir_all(output_dir)?;

    let inputs: Vec<(String, PathBuf)> = inputs.into_iter().collect();
    inputs
        .par_iter()
        .map(|(stem, input)| -> Result<PathBuf, PhirboError> {
            let list = rank_blast_file(input, groups)?;
            let output = output_dir.join(format!("{}.txt", stem));
            write_ranked_list(&output, &list)?;
            tracing::debug!(input = %input.display(), ranks = list.len(), "ranked BLAST hits");
            Ok(output)
        })
        .collect()
}
