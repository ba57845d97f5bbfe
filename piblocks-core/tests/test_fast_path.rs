//! Closed-form counter: canonical digits, non-canonical starts and budget

use num_bigint::BigUint;
use piblocks_core::pi::leading_digits;
use piblocks_core::tests::test_helpers::{agree, custom_scenario};
use piblocks_core::{cross_validate, fast_count, Error, Limits, Scenario};

fn fast_canonical(digits: u32) -> String {
    fast_count(&Scenario::canonical(digits), &Limits::default())
        .expect("fast path failed")
        .to_string()
}

#[test]
fn test_small_mass_ratios() {
    assert_eq!(fast_canonical(0), "3");
    assert_eq!(fast_canonical(1), "31");
    assert_eq!(fast_canonical(2), "314");
    assert_eq!(fast_canonical(3), "3141");
}

#[test]
fn test_large_mass_ratios_match_pi() {
    for digits in [5u32, 10, 20, 50, 100] {
        assert_eq!(
            fast_canonical(digits),
            leading_digits(digits as usize + 1).unwrap(),
            "N = {}",
            digits
        );
    }
}

#[test]
fn test_agrees_with_enumeration_for_canonical_starts() {
    for digits in 0..=2u32 {
        let report = agree(&Scenario::canonical(digits));
        assert_eq!(report.digit_string, leading_digits(digits as usize + 1).unwrap());
    }
}

#[test]
#[ignore = "about a minute of exact enumeration; run with --release -- --ignored"]
fn test_agrees_with_enumeration_for_mass_ratio_10_to_6() {
    let report = agree(&Scenario::canonical(3));
    assert_eq!(report.digit_string, "3141");
}

#[test]
#[ignore = "exact enumeration of 31415 events; run with --release -- --ignored"]
fn test_agrees_with_enumeration_for_mass_ratio_10_to_8() {
    let limits = Limits {
        max_enumerated_digits: 4,
        ..Limits::default()
    };
    let report = cross_validate(&Scenario::canonical(4), &limits).expect("strategies agree");
    assert_eq!(report.digit_string, "31415");
}

#[test]
fn test_agrees_with_enumeration_for_moving_light_block() {
    // (N, heavy velocity, light velocity, light position, heavy position, count)
    let cases = [
        (1, "-1", "-1", "1", "2", 31u32),
        (2, "-1/2", "3", "0", "1", 308),
        (1, "-2/7", "7/3", "5", "6", 24),
        (2, "-1", "-3", "1/2", "4", 312),
        (2, "-5", "-1", "2", "3", 314),
    ];
    for (digits, heavy_v, light_v, light_x, heavy_x, expected) in cases {
        let scenario = custom_scenario(digits, heavy_v, light_v, light_x, heavy_x);
        let report = agree(&scenario);
        assert_eq!(report.collision_count, BigUint::from(expected), "N = {}", digits);
    }
}

#[test]
fn test_simultaneous_wall_and_pair() {
    // Wall and heavy block reach the light block at the same instant
    assert_eq!(
        agree(&custom_scenario(1, "-3", "-1", "1", "3")).collision_count,
        BigUint::from(32u32)
    );
    assert_eq!(
        agree(&custom_scenario(0, "-3", "-1", "1", "3")).collision_count,
        BigUint::from(4u32)
    );
}

#[test]
fn test_sweep_is_exact_multiple_of_step_angle() {
    // Equal masses: the step angle is 45 degrees and these starts sit
    // exactly on a mirror line, so only the exact rotation test settles them
    assert_eq!(
        agree(&custom_scenario(0, "-1", "1", "0", "1")).collision_count,
        BigUint::from(2u32)
    );
    assert_eq!(
        agree(&custom_scenario(0, "-1", "-1", "1", "2")).collision_count,
        BigUint::from(3u32)
    );
}

#[test]
fn test_precision_budget_exceeded() {
    let limits = Limits {
        precision_budget_bits: 8,
        ..Limits::default()
    };
    match fast_count(&Scenario::canonical(30), &limits) {
        Err(Error::PrecisionBudgetExceeded { budget_bits }) => assert_eq!(budget_bits, 8),
        other => panic!("expected PrecisionBudgetExceeded, got {:?}", other),
    }
}
