//! Console test reporter
//!
//! Streams a run to stdout in the bracketed gtest-style protocol. Assertion
//! diagnostics reach stderr through the failure hook, so a terminal shows
//! them interleaved under the `[ RUN      ]` line of the test that failed.

use std::time::Duration;

use colored::*;
use gauntlet_core::{RunObserver, RunSummary, SuiteOutcome};

/// Streaming console report over a run.
///
/// Color is controlled globally through `colored::control`; the caller
/// decides before the run starts.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

impl RunObserver for ConsoleReporter {
    fn run_started(&mut self, enabled_suites: usize, enabled_tests: usize) {
        println!(
            "{} Running {} test{} from {} test suite{}.",
            "[==========]".green(),
            enabled_tests,
            plural(enabled_tests),
            enabled_suites,
            plural(enabled_suites)
        );
        println!(
            "{} Global test environment set-up.",
            "[----------]".green()
        );
    }

    fn suite_started(&mut self, suite: &str, enabled_tests: usize) {
        println!(
            "{} {} test{} from {}",
            "[----------]".green(),
            enabled_tests,
            plural(enabled_tests),
            suite
        );
    }

    fn test_started(&mut self, suite: &str, test: &str) {
        println!("{} {}.{}", "[ RUN      ]".green(), suite, test);
    }

    fn test_finished(&mut self, suite: &str, test: &str, passed: bool, elapsed: Duration) {
        let tag = if passed {
            "[       OK ]".green()
        } else {
            "[  FAILED  ]".red()
        };
        println!("{} {}.{} ({:.2} ms)", tag, suite, test, millis(elapsed));
    }

    fn suite_finished(&mut self, outcome: &SuiteOutcome) {
        println!(
            "{} {} test{} from {} ({:.2} ms total)",
            "[----------]".green(),
            outcome.tests_ran,
            plural(outcome.tests_ran),
            outcome.name,
            millis(outcome.elapsed)
        );
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        println!();
        println!(
            "{} Global test environment tear-down.",
            "[----------]".green()
        );
        println!(
            "{} {} test{} from {} test suite{} ran. ({:.2} ms total)",
            "[==========]".green(),
            summary.tests_ran,
            plural(summary.tests_ran),
            summary.suites_run,
            plural(summary.suites_run),
            millis(summary.elapsed)
        );
        println!(
            "{} {} test{}.",
            "[  PASSED  ]".green(),
            summary.tests_passed,
            plural(summary.tests_passed)
        );

        if summary.tests_failed > 0 {
            println!(
                "{} {} test{}, listed below:",
                "[  FAILED  ]".red(),
                summary.tests_failed,
                plural(summary.tests_failed)
            );
            for (suite, test) in summary.failures() {
                println!("{} {}.{}", "[  FAILED  ]".red(), suite, test);
            }
            println!();
            println!(
                " {} FAILED TEST{}",
                summary.tests_failed,
                if summary.tests_failed == 1 { "" } else { "S" }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use gauntlet_core::{Registry, Runner};

    use super::*;

    fn passing() {}

    fn failing() {
        gauntlet_core::expect_true!(false);
    }

    #[test]
    fn test_reporter_survives_passing_run() {
        colored::control::set_override(false);
        let mut registry = Registry::new();
        registry.add_test("math", "add", passing).unwrap();
        registry.add_test("strings", "concat", passing).unwrap();

        let mut reporter = ConsoleReporter::new();
        let summary = Runner::new().run(&mut registry, &mut reporter);
        assert!(summary.success());
        colored::control::unset_override();
    }

    #[test]
    fn test_reporter_survives_failing_run() {
        colored::control::set_override(false);
        let mut registry = Registry::new();
        registry.add_test("math", "add", passing).unwrap();
        registry.add_test("math", "sub", failing).unwrap();

        let mut reporter = ConsoleReporter::new();
        let summary = Runner::new().run(&mut registry, &mut reporter);
        assert_eq!(summary.tests_failed, 1);
        colored::control::unset_override();
    }

    #[test]
    fn test_reporter_survives_empty_run() {
        colored::control::set_override(false);
        let mut registry = Registry::new();
        let mut reporter = ConsoleReporter::new();
        let summary = Runner::new().run(&mut registry, &mut reporter);
        assert!(summary.success());
        colored::control::unset_override();
    }

    #[test]
    fn test_plural_helper() {
        assert_eq!(plural(0), "s");
        assert_eq!(plural(1), "");
        assert_eq!(plural(2), "s");
    }
}
