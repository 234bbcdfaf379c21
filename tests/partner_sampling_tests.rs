//! Tests for partner file derivation
//!
//! Partner files are checked against the primary file they were sampled from:
//! sizes follow the match rate, every line comes from the primary file and no
//! line is repeated.

use identity_profile_generator::output::{partner_file_name, subset_size, MAX_MATCH_RATE, MIN_MATCH_RATE};
use identity_profile_generator::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn run(dir: &Path, kinds: &[&str], file_type: &str, count: usize, partners: usize, seed: u64) -> RunSummary {
    let config = GeneratorConfig {
        id_types: kinds.iter().map(|kind| kind.to_string()).collect(),
        file_type: Some(file_type.to_string()),
        count,
        partners,
        seed: Some(seed),
        output_dir: dir.display().to_string(),
        ..Default::default()
    };
    GenerationOrchestrator::new(config).unwrap().run().unwrap()
}

fn lines_of(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}

/// Test the five profile, two partner CSV scenario
#[test]
fn test_small_csv_scenario() {
    let dir = TempDir::new().unwrap();
    let summary = run(dir.path(), &["email", "idfa"], "csv", 5, 2, 17);

    let primary = lines_of(&dir.path().join("clusters.csv"));
    assert_eq!(primary.len(), 6);
    assert_eq!(primary[0], "id_e,id_a");

    assert_eq!(summary.partner_files.len(), 2);
    for partner in summary.live_partner_files() {
        assert!((MIN_MATCH_RATE..=MAX_MATCH_RATE).contains(&partner.match_rate));
        assert_eq!(
            partner.path,
            dir.path().join(format!("{}% match rate.csv", partner.match_rate))
        );
        // 23-43% of five records floors to one or two
        assert!(partner.records == 1 || partner.records == 2);

        let lines = lines_of(&partner.path);
        assert_eq!(lines[0], "id_e,id_a");
        assert_eq!(lines.len(), partner.records + 1);
        assert!(lines[1..].iter().all(|line| primary[1..].contains(line)));
    }
}

/// Test JSON partner files are distinct subsets of the primary records
#[test]
fn test_json_partner_subsets() {
    let dir = TempDir::new().unwrap();
    let summary = run(dir.path(), &["email", "gaid", "c1"], "json", 400, 4, 99);

    let primary: HashSet<String> = lines_of(&dir.path().join("clusters.json")).into_iter().collect();
    assert_eq!(primary.len(), 400);

    for partner in summary.live_partner_files() {
        assert_eq!(partner.records, subset_size(partner.match_rate, 400));
        assert_eq!(
            partner.path.file_name().unwrap().to_str().unwrap(),
            partner_file_name(partner.match_rate, FileType::Json)
        );

        let lines = lines_of(&partner.path);
        assert_eq!(lines.len(), partner.records);
        let unique: HashSet<&String> = lines.iter().collect();
        assert_eq!(unique.len(), lines.len());
        assert!(lines.iter().all(|line| primary.contains(line)));
    }
}

/// Test partner records are not written in primary file order
#[test]
fn test_partner_order_is_shuffled() {
    let dir = TempDir::new().unwrap();
    let summary = run(dir.path(), &["email"], "json", 1000, 1, 5);

    let primary = lines_of(&dir.path().join("clusters.json"));
    let partner = lines_of(&summary.partner_files[0].path);
    let positions: Vec<usize> = partner
        .iter()
        .map(|line| primary.iter().position(|p| p == line).unwrap())
        .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_ne!(positions, sorted);
}

/// Test no partners means only the primary file is written
#[test]
fn test_zero_partners() {
    let dir = TempDir::new().unwrap();
    let summary = run(dir.path(), &["idfa"], "csv", 20, 0, 1);

    assert!(summary.partner_files.is_empty());
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["clusters.csv".to_string()]);
}

/// Test a repeated match rate leaves one file per distinct rate
#[test]
fn test_repeated_rates_share_a_file() {
    let dir = TempDir::new().unwrap();
    // 21 possible rates, so 25 partners must repeat at least one
    let summary = run(dir.path(), &["email"], "csv", 50, 25, 31);

    let distinct: HashSet<u32> = summary.partner_files.iter().map(|p| p.match_rate).collect();
    assert_eq!(summary.partner_files.len(), 25);
    assert_eq!(summary.live_partner_files().count(), distinct.len());
    assert_eq!(summary.overwritten_partner_count(), 25 - distinct.len());

    // Primary plus one file per distinct rate
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), distinct.len() + 1);
}

/// Test no temporary files survive a run
#[test]
fn test_no_temporary_files_remain() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["email", "c0"], "json", 60, 3, 8);

    let leftovers: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
