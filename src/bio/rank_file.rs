/// Plain-text ranked list files: one tie-set per line, identifiers separated by commas
use crate::bio::ranked_list::{RankedCollection, RankedList, TieSet};
use crate::PhirboError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Parse a ranked list from text, keeping the first `k` ranks (`k == 0` keeps all).
pub fn parse_ranked_list(text: &str, k: usize) -> Result<RankedList, PhirboError> {
    let mut groups: Vec<TieSet> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            return Err(PhirboError::MalformedRankedList(format!(
                "line {} is an empty tie-set",
                line_no + 1
            )));
        }
        groups.push(line.split(',').map(|id| id.trim().to_string()).collect());
    }

    // Validate the whole list before truncating so bad input never slips past k.
    Ok(RankedList::new(groups)?.truncated(k))
}

/// Read a single ranked list file.
pub fn read_ranked_list<P: AsRef<Path>>(path: P, k: usize) -> Result<RankedList, PhirboError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_ranked_list(&text, k).map_err(|e| match e {
        PhirboError::MalformedRankedList(msg) => {
            PhirboError::MalformedRankedList(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Read every regular file in `dir` as a ranked list named after its file stem.
pub fn read_collection<P: AsRef<Path>>(dir: P, k: usize) -> Result<RankedCollection, PhirboError> {
    let dir = dir.as_ref();
    let mut collection = RankedCollection::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PhirboError::Parse(format!("Invalid file name: {}", path.display())))?
            .to_string();

        let list = read_ranked_list(&path, k)?;
        tracing::debug!(name = %name, ranks = list.len(), "loaded ranked list");

        if collection.insert(name.clone(), list).is_some() {
            return Err(PhirboError::Parse(format!(
                "Two files in {} share the name '{}'",
                dir.display(),
                name
            )));
        }
    }

    tracing::info!("Loaded {} ranked lists from {}", collection.len(), dir.display());
    Ok(collection)
}

/// Write a ranked list in the same format `parse_ranked_list` reads.
pub fn write_ranked_list<P: AsRef<Path>>(path: P, list: &RankedList) -> Result<(), PhirboError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for group in list.groups() {
        writeln!(writer, "{}", group.join(","))?;
    }
    writer.flush()?;
    Ok(())
}
