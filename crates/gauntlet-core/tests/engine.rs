//! End-to-end engine behavior through the public API.

use std::time::Duration;

use pretty_assertions::assert_eq;

use gauntlet_core::{register_tests, Registry, Runner};

fn add() {
    gauntlet_core::expect_eq!(2 + 2, 4);
}

fn sub() {
    gauntlet_core::expect_eq!(2 - 2, 1);
}

#[test]
fn test_mixed_run_reports_exact_counts() {
    let mut registry = Registry::new();
    register_tests!(registry, { math => { add, sub } }).unwrap();

    let summary = Runner::new().run(&mut registry, &mut ());
    assert_eq!(summary.suites_run, 1);
    assert_eq!(summary.tests_ran, 2);
    assert_eq!(summary.tests_passed, 1);
    assert_eq!(summary.tests_failed, 1);
    assert!(!summary.success());
    assert_eq!(summary.failures().collect::<Vec<_>>(), [("math", "sub")]);
}

#[test]
fn test_empty_registry_runs_successfully() {
    let mut registry = Registry::new();
    let summary = Runner::new().run(&mut registry, &mut ());
    assert_eq!(summary.suites_run, 0);
    assert_eq!(summary.tests_ran, 0);
    assert!(summary.success());
}

#[test]
fn test_summary_carries_per_suite_and_per_test_timings() {
    fn sleepy() {
        std::thread::sleep(Duration::from_millis(10));
    }

    let mut registry = Registry::new();
    register_tests!(registry, { timing => { sleepy } }).unwrap();

    let summary = Runner::new().run(&mut registry, &mut ());
    let suite = &summary.suites[0];
    let test = &suite.tests[0];
    assert!(test.elapsed >= Duration::from_millis(10));
    assert!(suite.elapsed >= test.elapsed);
    assert!(summary.elapsed >= suite.elapsed);
}

#[test]
#[should_panic(expected = "outside of a running test")]
fn test_assertion_outside_any_test_is_fatal() {
    gauntlet_core::expect_true!(false);
}
