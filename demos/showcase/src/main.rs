//! Showcase test binary
//!
//! A small consumer of the harness: three suites exercising the assertion
//! surface, all passing by default. Set `SHOWCASE_FAIL=1` to register one
//! deliberately failing test and watch the failure report and nonzero exit.

use anyhow::Result;
use gauntlet_core::{
    expect_eq, expect_false, expect_float_eq, expect_ge, expect_gt, expect_le, expect_lt,
    expect_ne, expect_near, expect_str_case_eq, expect_str_case_ne, expect_true, register_tests,
    require_true, Registry,
};

fn addition_commutes() {
    expect_eq!(2 + 3, 3 + 2);
}

fn subtraction_orders() {
    expect_lt!(3 - 2, 2);
    expect_gt!(3 - 2, 0);
}

fn division_truncates() {
    expect_eq!(7 / 2, 3, "integer division drops the remainder");
}

fn bounds_hold() {
    require_true!(i32::MAX > 0);
    expect_ge!(i32::MAX, i32::MAX);
    expect_le!(i32::MIN, 0);
}

fn concatenation_appends() {
    let word = format!("{}{}", "gaunt", "let");
    expect_eq!(word, "gauntlet");
    expect_ne!(word, "mitten");
}

fn case_folding_ignores_ascii_case() {
    expect_str_case_eq!("Gauntlet", "gAUNTLET");
    expect_str_case_ne!("gauntlet", "harness");
}

fn emptiness_is_detectable() {
    expect_true!("".is_empty());
    expect_false!("x".is_empty());
}

fn rounding_noise_stays_within_ulps() {
    expect_float_eq!(0.1 + 0.2, 0.3);
}

fn near_tolerates_absolute_error() {
    expect_near!(std::f64::consts::PI, 3.1416, 1e-4);
}

fn distinct_values_differ() {
    expect_ne!(1.0, 2.0);
}

fn deliberate_failure() {
    expect_eq!(6 * 9, 42, "deliberate failure to demo the report");
}

fn main() -> Result<()> {
    let mut registry = Registry::new();
    register_tests!(registry, {
        arithmetic => {
            addition_commutes,
            subtraction_orders,
            division_truncates,
            bounds_hold,
        },
        strings => {
            concatenation_appends,
            case_folding_ignores_ascii_case,
            emptiness_is_detectable,
        },
        floats => {
            rounding_noise_stays_within_ulps,
            near_tolerates_absolute_error,
            distinct_values_differ,
        },
    })?;

    let inject_failure = std::env::var("SHOWCASE_FAIL")
        .map(|v| v == "1")
        .unwrap_or(false);
    if inject_failure {
        registry.add_test("diagnostics", "deliberate_failure", deliberate_failure)?;
    }

    gauntlet_cli::harness_main(registry)
}
