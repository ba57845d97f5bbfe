//! Golden tests - compare event logs to expected snapshots

use piblocks_core::tests::test_helpers::{custom_scenario, load_expected, write_expected};
use piblocks_core::{enumerate, Limits};
use std::path::PathBuf;

fn expected_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("golden");
    path.push(filename);
    path
}

#[test]
fn test_mass_ratio_100_golden() {
    let expected_path = expected_path("mass_ratio_100.expected");
    let scenario = custom_scenario(1, "-1", "0", "1", "2");

    let report = enumerate(&scenario, &Limits::default(), true, None)
        .expect("Failed to enumerate N = 1");
    let log = report.events.expect("log was recorded");
    let actual_json = log.to_json().expect("log serializes");

    match load_expected(expected_path.to_str().unwrap()) {
        Ok(expected_json) => {
            assert_eq!(actual_json, expected_json,
                "Output does not match expected snapshot. If this is intentional, update the .expected file.");
        }
        Err(_) => {
            eprintln!("Writing expected file for first time: {:?}", expected_path);
            write_expected(expected_path.to_str().unwrap(), &actual_json)
                .expect("Failed to write expected file");
        }
    }
}
