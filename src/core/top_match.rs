/// Per-virus selection of the best scoring host(s)
use crate::core::batch::ScoreMatrix;
use crate::PhirboError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMatch {
    pub virus: String,
    pub score: f64,
    /// Every host attaining `score`, ascending by name.
    pub hosts: Vec<String>,
}

impl TopMatch {
    pub fn is_tied(&self) -> bool {
        self.hosts.len() > 1
    }
}

/// Best host(s) for each virus column, in virus order.
///
/// Scores are compared exactly: the engine is deterministic, so equal inputs
/// give bit-identical scores and ties are reported rather than broken.
pub fn select_top_matches(matrix: &ScoreMatrix) -> Result<Vec<TopMatch>, PhirboError> {
    if matrix.host_count() == 0 {
        return Err(PhirboError::EmptyCollection(
            "no candidate hosts to select from".to_string(),
        ));
    }

    let matches = matrix
        .viruses()
        .iter()
        .enumerate()
        .map(|(virus_index, virus)| {
            let best = matrix
                .column(virus_index)
                .fold(f64::NEG_INFINITY, f64::max);

            let hosts = matrix
                .column(virus_index)
                .zip(matrix.hosts())
                .filter(|(score, _)| *score == best)
                .map(|(_, host)| host.clone())
                .collect();

            TopMatch {
                virus: virus.clone(),
                score: best,
                hosts,
            }
        })
        .collect();

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::ranked_list::RankedList;
    use crate::core::batch::BatchScorer;
    use crate::core::pair_filter::filter_pairs;

    fn list(groups: &[&[&str]]) -> RankedList {
        RankedList::from_groups(groups.iter().map(|g| g.iter().copied())).unwrap()
    }

    fn scored(hosts: &[RankedList], viruses: &[RankedList]) -> ScoreMatrix {
        let host_refs: Vec<&RankedList> = hosts.iter().collect();
        let virus_refs: Vec<&RankedList> = viruses.iter().collect();
        let host_names = (0..hosts.len()).map(|i| format!("H{}", i + 1)).collect();
        let virus_names = (0..viruses.len()).map(|i| format!("V{}", i + 1)).collect();
        let pairs = filter_pairs(&host_refs, &virus_refs, 0.75);
        BatchScorer::new(2)
            .score(&host_refs, &virus_refs, host_names, virus_names, &pairs.tasks)
            .unwrap()
    }

    #[test]
    fn test_single_best_host() {
        let matrix = scored(
            &[list(&[&["g1"], &["g2"]]), list(&[&["g3"]])],
            &[list(&[&["g1"], &["g3"]])],
        );
        let top = select_top_matches(&matrix).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].hosts, vec!["H1".to_string()]);
        assert!((top[0].score - 0.625).abs() < 1e-12);
        assert!(!top[0].is_tied());
    }

    #[test]
    fn test_ties_are_preserved() {
        let matrix = scored(
            &[list(&[&["g1"]]), list(&[&["g9"]]), list(&[&["g1"]])],
            &[list(&[&["g1"], &["g2"]])],
        );
        let top = select_top_matches(&matrix).unwrap();
        assert_eq!(top[0].hosts, vec!["H1".to_string(), "H3".to_string()]);
        assert!(top[0].is_tied());
    }

    #[test]
    fn test_all_zero_column_reports_every_host() {
        let matrix = scored(
            &[list(&[&["a"]]), list(&[&["b"]])],
            &[list(&[&["z"]])],
        );
        let top = select_top_matches(&matrix).unwrap();
        assert_eq!(top[0].score, 0.0);
        assert_eq!(top[0].hosts.len(), 2);
    }

    #[test]
    fn test_no_hosts_is_an_error() {
        let matrix = ScoreMatrix::zeros(Vec::new(), vec!["V1".to_string()]);
        assert!(matches!(
            select_top_matches(&matrix),
            Err(PhirboError::EmptyCollection(_))
        ));
    }
}
