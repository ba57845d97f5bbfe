//! Independent runs for many mass ratios
//!
//! Every run owns its own state and log; the only shared input is the
//! read-only template and limits, so runs are spread over the rayon pool.

use crate::config::{Limits, SimulationConfig};
use crate::error::Result;
use crate::report::{compute, cross_validate, Report, Strategy};
use rayon::prelude::*;

/// Count each `N` in `digits` using `template` for everything but `N`.
/// Results come back in input order.
pub fn sweep(
    digits: &[u32],
    template: &SimulationConfig,
    strategy: Strategy,
    limits: &Limits,
) -> Vec<(u32, Result<Report>)> {
    digits
        .par_iter()
        .map(|&n| {
            let config = SimulationConfig {
                digits: i64::from(n),
                ..template.clone()
            };
            let report = config
                .validate()
                .and_then(|scenario| compute(&scenario, strategy, limits));
            (n, report)
        })
        .collect()
}

/// Cross-validate both strategies for each `N` in `digits`
pub fn verify_sweep(
    digits: &[u32],
    template: &SimulationConfig,
    limits: &Limits,
) -> Vec<(u32, Result<Report>)> {
    digits
        .par_iter()
        .map(|&n| {
            let config = SimulationConfig {
                digits: i64::from(n),
                ..template.clone()
            };
            let report = config
                .validate()
                .and_then(|scenario| cross_validate(&scenario, limits));
            (n, report)
        })
        .collect()
}
