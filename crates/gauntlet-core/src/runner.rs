//! Test execution: walks enabled suites in registration order, times each
//! callback, and rolls the verdicts into a [`RunSummary`].

use std::time::{Duration, Instant};

use crate::failure::ActiveTestGuard;
use crate::registry::Registry;

/// Progress callbacks streamed while a run advances.
///
/// Every method has an empty default body; implement only what you need.
/// The unit type implements this for callers that only want the summary.
pub trait RunObserver {
    /// A run is starting over the given enabled counts.
    fn run_started(&mut self, _enabled_suites: usize, _enabled_tests: usize) {}
    /// An enabled suite is about to execute.
    fn suite_started(&mut self, _suite: &str, _enabled_tests: usize) {}
    /// A test callback is about to be invoked.
    fn test_started(&mut self, _suite: &str, _test: &str) {}
    /// A test callback returned and was classified.
    fn test_finished(&mut self, _suite: &str, _test: &str, _passed: bool, _elapsed: Duration) {}
    /// All of a suite's enabled tests have run.
    fn suite_finished(&mut self, _outcome: &SuiteOutcome) {}
    /// The whole pass is complete.
    fn run_finished(&mut self, _summary: &RunSummary) {}
}

/// Silent observer.
impl RunObserver for () {}

/// Verdict and timing for one executed test.
#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
    pub elapsed: Duration,
}

/// Rollup for one executed suite.
#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    pub name: String,
    pub tests_ran: usize,
    pub tests_passed: usize,
    pub tests_failed: usize,
    pub elapsed: Duration,
    pub tests: Vec<TestOutcome>,
}

/// Aggregate results of a single pass over the registry.
///
/// Produced fresh by every [`Runner::run`] call; nothing carries over
/// between runs.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub suites_run: usize,
    pub tests_ran: usize,
    pub tests_passed: usize,
    pub tests_failed: usize,
    pub elapsed: Duration,
    pub suites: Vec<SuiteOutcome>,
}

impl RunSummary {
    /// `true` when no executed test failed. Zero tests is a success.
    pub fn success(&self) -> bool {
        self.tests_failed == 0
    }

    /// Failed tests as `(suite, test)` name pairs, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.suites.iter().flat_map(|suite| {
            suite
                .tests
                .iter()
                .filter(|test| !test.passed)
                .map(move |test| (suite.name.as_str(), test.name.as_str()))
        })
    }
}

/// Where a [`Runner`] currently is in its pass over the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    /// Executing the test at `(suite, test)` in registration order.
    Running { suite: usize, test: usize },
    Completed,
}

/// Executes every enabled test in registration order.
///
/// Runs never abort early: a failing test marks the summary and execution
/// moves on to the next test. There is no timeout and no isolation; a
/// callback that panics or never returns takes the run with it.
#[derive(Debug, Default)]
pub struct Runner {
    state: RunState,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of this runner's current (or last) pass.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Runs all enabled tests, streaming progress through `observer`.
    ///
    /// Test results are reset first, so repeated calls over the same
    /// registry each produce a fresh, complete verdict.
    pub fn run(&mut self, registry: &mut Registry, observer: &mut dyn RunObserver) -> RunSummary {
        self.state = RunState::NotStarted;
        registry.reset_results();

        let mut summary = RunSummary::default();
        observer.run_started(registry.enabled_suites(), registry.enabled_tests());

        let run_start = Instant::now();
        for suite_index in 0..registry.suites().len() {
            if !registry.suites()[suite_index].enabled() {
                continue;
            }
            let suite_name = registry.suites()[suite_index].name().to_string();
            observer.suite_started(&suite_name, registry.suites()[suite_index].enabled_tests());

            let mut outcome = SuiteOutcome {
                name: suite_name.clone(),
                tests_ran: 0,
                tests_passed: 0,
                tests_failed: 0,
                elapsed: Duration::ZERO,
                tests: Vec::new(),
            };
            let suite_start = Instant::now();
            for test_index in 0..registry.suites()[suite_index].tests().len() {
                let test = &registry.suites()[suite_index].tests()[test_index];
                if !test.enabled() {
                    continue;
                }
                let test_name = test.name().to_string();
                let callback = test.callback;

                self.state = RunState::Running {
                    suite: suite_index,
                    test: test_index,
                };
                observer.test_started(&suite_name, &test_name);

                let guard = ActiveTestGuard::install(&suite_name, &test_name);
                let test_start = Instant::now();
                callback();
                let elapsed = test_start.elapsed();

                let completed = guard.finish();
                if completed.failed && !registry.fail_test(&completed.suite, &completed.test) {
                    panic!(
                        "test `{}.{}` vanished from the registry mid-run",
                        completed.suite, completed.test
                    );
                }

                let passed = registry.suites()[suite_index].tests()[test_index].passed();
                observer.test_finished(&suite_name, &test_name, passed, elapsed);

                outcome.tests_ran += 1;
                if passed {
                    outcome.tests_passed += 1;
                } else {
                    outcome.tests_failed += 1;
                }
                outcome.tests.push(TestOutcome {
                    name: test_name,
                    passed,
                    elapsed,
                });
            }
            outcome.elapsed = suite_start.elapsed();

            summary.suites_run += 1;
            summary.tests_ran += outcome.tests_ran;
            summary.tests_passed += outcome.tests_passed;
            summary.tests_failed += outcome.tests_failed;
            observer.suite_finished(&outcome);
            summary.suites.push(outcome);
        }
        summary.elapsed = run_start.elapsed();

        self.state = RunState::Completed;
        observer.run_finished(&summary);
        summary
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn passing() {}

    fn failing() {
        crate::expect_true!(false);
    }

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_test("math", "add", passing).unwrap();
        registry.add_test("math", "sub", failing).unwrap();
        registry.add_test("strings", "concat", passing).unwrap();
        registry
    }

    #[test]
    fn test_run_counts_passes_and_failures() {
        let mut registry = sample_registry();
        let summary = Runner::new().run(&mut registry, &mut ());
        assert_eq!(summary.suites_run, 2);
        assert_eq!(summary.tests_ran, 3);
        assert_eq!(summary.tests_passed, 2);
        assert_eq!(summary.tests_failed, 1);
        assert!(!summary.success());

        let failures: Vec<_> = summary.failures().collect();
        assert_eq!(failures, [("math", "sub")]);
    }

    #[test]
    fn test_run_skips_disabled_tests_and_suites() {
        let mut registry = sample_registry();
        registry.apply_filter("math.add");
        let summary = Runner::new().run(&mut registry, &mut ());
        assert_eq!(summary.suites_run, 1);
        assert_eq!(summary.tests_ran, 1);
        assert!(summary.success());
    }

    #[test]
    fn test_zero_enabled_tests_is_a_successful_run() {
        let mut registry = sample_registry();
        registry.apply_filter("nothing_matches_this");
        let summary = Runner::new().run(&mut registry, &mut ());
        assert_eq!(summary.suites_run, 0);
        assert_eq!(summary.tests_ran, 0);
        assert!(summary.success());
    }

    #[test]
    fn test_empty_but_enabled_suite_still_counts_as_run() {
        let mut registry = sample_registry();
        registry.apply_filter("math.");
        let summary = Runner::new().run(&mut registry, &mut ());
        assert_eq!(summary.suites_run, 1);
        assert_eq!(summary.tests_ran, 0);
        assert!(summary.success());
    }

    #[test]
    fn test_state_machine_completes() {
        let mut registry = sample_registry();
        let mut runner = Runner::new();
        assert_eq!(runner.state(), RunState::NotStarted);
        runner.run(&mut registry, &mut ());
        assert_eq!(runner.state(), RunState::Completed);
    }

    #[test]
    fn test_reruns_start_from_fresh_results() {
        let mut registry = sample_registry();
        let mut runner = Runner::new();
        let first = runner.run(&mut registry, &mut ());
        let second = runner.run(&mut registry, &mut ());
        assert_eq!(first.tests_failed, second.tests_failed);
        assert_eq!(second.tests_passed, 2);
    }

    #[test]
    fn test_execution_follows_registration_order() {
        struct OrderObserver(Vec<String>);
        impl RunObserver for OrderObserver {
            fn test_started(&mut self, suite: &str, test: &str) {
                self.0.push(format!("{suite}.{test}"));
            }
        }

        let mut registry = sample_registry();
        let mut observer = OrderObserver(Vec::new());
        Runner::new().run(&mut registry, &mut observer);
        assert_eq!(observer.0, ["math.add", "math.sub", "strings.concat"]);
    }

    #[test]
    fn test_observer_sees_suite_rollups() {
        struct SuiteObserver(Vec<(String, usize, usize)>);
        impl RunObserver for SuiteObserver {
            fn suite_finished(&mut self, outcome: &SuiteOutcome) {
                self.0
                    .push((outcome.name.clone(), outcome.tests_passed, outcome.tests_failed));
            }
        }

        let mut registry = sample_registry();
        let mut observer = SuiteObserver(Vec::new());
        Runner::new().run(&mut registry, &mut observer);
        assert_eq!(
            observer.0,
            [("math".to_string(), 1, 1), ("strings".to_string(), 1, 0)]
        );
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let mut registry = Registry::new();
        registry.add_test("order", "first_fails", failing).unwrap();
        registry.add_test("order", "second_runs", passing).unwrap();
        let summary = Runner::new().run(&mut registry, &mut ());
        assert_eq!(summary.tests_ran, 2);
        assert_eq!(summary.tests_passed, 1);
    }
}
