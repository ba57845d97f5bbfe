//! Strategy selection, reports and parallel sweeps

use num_bigint::BigUint;
use piblocks_core::batch::{sweep, verify_sweep};
use piblocks_core::pi::leading_digits;
use piblocks_core::tests::test_helpers::q;
use piblocks_core::{compute, Error, Limits, Scenario, SimulationConfig, Strategy};

#[test]
fn test_strategy_parsing() {
    assert_eq!("event-driven".parse::<Strategy>(), Ok(Strategy::EventDriven));
    assert_eq!("FAST".parse::<Strategy>(), Ok(Strategy::FastPath));
    assert_eq!("auto".parse::<Strategy>(), Ok(Strategy::Auto));
    assert!("monte-carlo".parse::<Strategy>().is_err());
    assert_eq!(Strategy::FastPath.to_string(), "fast-path");
    assert_eq!(Strategy::default(), Strategy::Auto);
}

#[test]
fn test_auto_picks_by_enumeration_bound() {
    let limits = Limits::default();
    assert_eq!(Strategy::Auto.resolve(3, &limits), Strategy::EventDriven);
    assert_eq!(Strategy::Auto.resolve(4, &limits), Strategy::FastPath);
    assert_eq!(Strategy::EventDriven.resolve(9, &limits), Strategy::EventDriven);
}

#[test]
fn test_event_driven_report_carries_log() {
    let report = compute(&Scenario::canonical(1), Strategy::EventDriven, &Limits::default()).unwrap();
    assert_eq!(report.strategy, Strategy::EventDriven);
    assert_eq!(report.digit_string, "31");
    assert_eq!(report.events.as_ref().map(|log| log.len()), Some(31));
}

#[test]
fn test_fast_path_report_for_large_n() {
    let report = compute(&Scenario::canonical(30), Strategy::Auto, &Limits::default()).unwrap();
    assert_eq!(report.strategy, Strategy::FastPath);
    assert!(report.events.is_none());
    assert_eq!(report.digit_string.len(), 31);
    assert_eq!(report.digit_string, leading_digits(31).unwrap());
}

#[test]
fn test_event_driven_refuses_large_n() {
    let result = compute(&Scenario::canonical(4), Strategy::EventDriven, &Limits::default());
    assert!(matches!(
        result,
        Err(Error::EnumerationTooLarge { digits: 4, max_digits: 3 })
    ));
}

#[test]
fn test_report_json() {
    let report = compute(&Scenario::canonical(2), Strategy::FastPath, &Limits::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["collision_count"], "314");
    assert_eq!(json["digit_string"], "314");
    assert_eq!(json["strategy"], "fast-path");
    assert!(json.get("events").is_none());
}

#[test]
fn test_sweep_keeps_input_order() {
    let digits = [6u32, 0, 4, 1, 5];
    let results = sweep(
        &digits,
        &SimulationConfig::canonical(0),
        Strategy::FastPath,
        &Limits::default(),
    );
    let order: Vec<u32> = results.iter().map(|(n, _)| *n).collect();
    assert_eq!(order, digits);
    for (n, result) in results {
        let report = result.expect("fast path succeeds");
        assert_eq!(report.digits, n);
        assert_eq!(report.digit_string, leading_digits(n as usize + 1).unwrap());
    }
}

#[test]
fn test_sweep_reports_invalid_template_per_run() {
    let template = SimulationConfig::canonical(0).with_heavy_velocity(q("1"));
    let results = sweep(&[0, 1], &template, Strategy::Auto, &Limits::default());
    assert!(results
        .iter()
        .all(|(_, r)| matches!(r, Err(Error::InvalidConfiguration { .. }))));
}

#[test]
fn test_verify_sweep_agrees() {
    let results = verify_sweep(&[0, 1, 2], &SimulationConfig::canonical(0), &Limits::default());
    let counts: Vec<BigUint> = results
        .into_iter()
        .map(|(_, r)| r.expect("strategies agree").collision_count)
        .collect();
    assert_eq!(counts, vec![3u32.into(), 31u32.into(), 314u32.into()]);
}
