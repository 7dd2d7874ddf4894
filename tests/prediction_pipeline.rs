/// End-to-end host prediction: ranked list files in, reports out
mod common;

use phirbo::bio::rank_file::read_collection;
use phirbo::core::config::ScoringParams;
use phirbo::core::predictor::HostPredictor;
use phirbo::report::{ReportGenerator, ReportOptions};
use phirbo::PhirboError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;

fn predictor(p: f64, k: usize, threads: usize) -> HostPredictor {
    HostPredictor::new(ScoringParams::new(p, k, threads).unwrap())
}

#[test]
fn test_two_hosts_one_virus() {
    let hosts = common::collection(&[("H1", &[&["g1"], &["g2"]]), ("H2", &[&["g3"]])]);
    let viruses = common::collection(&[("V1", &[&["g1"], &["g3"]])]);

    let prediction = predictor(0.75, 0, 2).predict(&viruses, &hosts).unwrap();

    assert_eq!(prediction.stats.scored_pairs, 2);
    assert_eq!(prediction.matrix.nonzero(), 2);
    assert_eq!(prediction.top_matches.len(), 1);
    assert_eq!(prediction.top_matches[0].hosts, vec!["H1".to_string()]);
    assert!(prediction.matrix.get(0, 0) > prediction.matrix.get(1, 0));
}

#[test]
fn test_equal_hosts_are_both_reported() {
    let hosts = common::collection(&[("H2", &[&["g1"], &["g2"]]), ("H1", &[&["g1"], &["g2"]])]);
    let viruses = common::collection(&[("V1", &[&["g1"], &["g3"]])]);

    let prediction = predictor(0.75, 0, 2).predict(&viruses, &hosts).unwrap();
    assert_eq!(
        prediction.top_matches[0].hosts,
        vec!["H1".to_string(), "H2".to_string()]
    );
}

#[rstest]
#[case(2)]
#[case(4)]
#[case(8)]
fn test_matrix_identical_across_pool_sizes(#[case] threads: usize) {
    let hosts = common::random_collection(7, "host", 40, 60);
    let viruses = common::random_collection(11, "phage", 25, 60);

    let sequential = predictor(0.75, 0, 1).predict(&viruses, &hosts).unwrap();
    let parallel = predictor(0.75, 0, threads).predict(&viruses, &hosts).unwrap();

    assert_eq!(sequential.matrix.hosts(), parallel.matrix.hosts());
    assert_eq!(sequential.matrix.viruses(), parallel.matrix.viruses());
    for h in 0..sequential.matrix.host_count() {
        for v in 0..sequential.matrix.virus_count() {
            assert_eq!(
                sequential.matrix.get(h, v).to_bits(),
                parallel.matrix.get(h, v).to_bits()
            );
        }
    }
    assert_eq!(sequential.top_matches, parallel.top_matches);
}

#[test]
fn test_pruned_cells_match_direct_scores() {
    let hosts = common::random_collection(3, "host", 30, 200);
    let viruses = common::random_collection(5, "phage", 20, 200);

    let prediction = predictor(0.9, 0, 4).predict(&viruses, &hosts).unwrap();
    assert!(prediction.stats.pruned_pairs > 0);

    for (h, host) in hosts.values().enumerate() {
        for (v, virus) in viruses.values().enumerate() {
            let direct = phirbo::rbo(host, virus, 0.9);
            assert_eq!(prediction.matrix.get(h, v).to_bits(), direct.to_bits());
        }
    }
}

#[test]
fn test_files_to_reports() {
    let dir = tempfile::tempdir().unwrap();
    let virus_dir = dir.path().join("viruses");
    let host_dir = dir.path().join("hosts");

    common::write_collection(
        &virus_dir,
        &common::collection(&[("phageA", &[&["g1"], &["g3"]]), ("phageB", &[&["g9"]])]),
    );
    common::write_collection(
        &host_dir,
        &common::collection(&[("hostX", &[&["g1"], &["g2"]]), ("hostY", &[&["g3"]])]),
    );

    let viruses = read_collection(&virus_dir, 30).unwrap();
    let hosts = read_collection(&host_dir, 30).unwrap();
    let prediction = predictor(0.75, 30, 2).predict(&viruses, &hosts).unwrap();

    let output = dir.path().join("hosts.csv");
    let matrix_path = ReportGenerator::new(ReportOptions::default())
        .write(&prediction, &output)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "phage,host,rbo_score\n\
         phageA,hostX,0.625\n\
         phageB,hostX,0\n\
         phageB,hostY,0\n"
    );
    assert_eq!(
        fs::read_to_string(&matrix_path).unwrap(),
        ",hostX,hostY\nphageA,0.625,0.3125\nphageB,0,0\n"
    );
}

#[test]
fn test_malformed_input_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), "g1,g2\ng2\n").unwrap();

    let err = read_collection(dir.path(), 0).unwrap_err();
    assert!(matches!(err, PhirboError::MalformedRankedList(_)));
    assert!(err.to_string().contains("bad.txt"));
}

#[test]
fn test_empty_host_directory() {
    let dir = tempfile::tempdir().unwrap();
    let host_dir = dir.path().join("hosts");
    fs::create_dir(&host_dir).unwrap();

    let hosts = read_collection(&host_dir, 0).unwrap();
    let viruses = common::collection(&[("V1", &[&["g1"]])]);
    assert!(matches!(
        predictor(0.75, 0, 1).predict(&viruses, &hosts),
        Err(PhirboError::EmptyCollection(_))
    ));
}
