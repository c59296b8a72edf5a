//! Command-line harness around the test runtime
//!
//! A host binary builds a [`Registry`](gauntlet_core::Registry), registers
//! its tests, and hands the registry to [`harness_main`], which owns flag
//! parsing, optional `gauntlet.toml` configuration, console reporting, and
//! the process exit code.
//!
//! # Example
//!
//! ```no_run
//! use gauntlet_core::{register_tests, Registry};
//!
//! fn wiring_holds() {
//!     gauntlet_core::expect_true!(1 + 1 == 2);
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = Registry::new();
//!     register_tests!(registry, {
//!         smoke => { wiring_holds },
//!     })?;
//!     gauntlet_cli::harness_main(registry)
//! }
//! ```

pub mod args;
pub mod config;
pub mod reporter;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use gauntlet_core::{Registry, RunSummary, Runner};

pub use args::HarnessArgs;
pub use config::{ConfigError, ConfigResult, HarnessConfig, OutputConfig, RunConfig};
pub use reporter::ConsoleReporter;

/// What a harness invocation did.
#[derive(Debug)]
pub enum Execution {
    /// List mode: the rendered listing; nothing ran.
    Listed(String),
    /// A run completed with this summary.
    Completed(RunSummary),
}

/// Renders every registered suite and test, one `Suite.` line per suite
/// with its test names indented beneath it. Filters do not affect the
/// listing; it always shows the full registry.
pub fn render_test_list(registry: &Registry) -> String {
    let mut out = String::new();
    for suite in registry.suites() {
        out.push_str(suite.name());
        out.push_str(".\n");
        for test in suite.tests() {
            out.push_str("  ");
            out.push_str(test.name());
            out.push('\n');
        }
    }
    out
}

/// Applies the flags and configuration to `registry` and either lists the
/// tests or runs them with the console reporter.
///
/// The filter flag (or its environment variable, resolved by clap) takes
/// precedence over a `gauntlet.toml` filter. Exit codes and color overrides
/// are the caller's business, which keeps this layer testable.
pub fn execute(registry: &mut Registry, args: &HarnessArgs, config: &HarnessConfig) -> Execution {
    if args.list_tests {
        return Execution::Listed(render_test_list(registry));
    }

    if let Some(pattern) = args.filter.as_deref().or_else(|| config.filter()) {
        println!("Note: test filter = {pattern}");
        registry.apply_filter(pattern);
    }

    let mut reporter = ConsoleReporter::new();
    let summary = Runner::new().run(registry, &mut reporter);
    Execution::Completed(summary)
}

/// Full harness entry point for a test binary's `main`.
///
/// Parses the process arguments, loads `gauntlet.toml` from the working
/// directory if present, and drives a console run over `registry`. Exits
/// the process with code 1 when any test fails; returns only in list mode
/// or after a fully passing run.
pub fn harness_main(mut registry: Registry) -> Result<()> {
    let args = HarnessArgs::parse();
    let config = HarnessConfig::load_from_directory(Path::new("."))
        .context("failed to load gauntlet.toml")?;

    // NO_COLOR is honored by presence, per convention.
    if args.no_color || std::env::var_os("NO_COLOR").is_some() || !config.color() {
        colored::control::set_override(false);
    }

    match execute(&mut registry, &args, &config) {
        Execution::Listed(listing) => print!("{listing}"),
        Execution::Completed(summary) => {
            if !summary.success() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::RunConfig;

    fn passing() {}

    fn failing() {
        gauntlet_core::expect_true!(false);
    }

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry.add_test("math", "add", passing).unwrap();
        registry.add_test("math", "sub", failing).unwrap();
        registry.add_test("strings", "concat", passing).unwrap();
        registry
    }

    fn plain_args() -> HarnessArgs {
        HarnessArgs {
            list_tests: false,
            filter: None,
            no_color: true,
        }
    }

    #[test]
    fn test_render_test_list_format() {
        let registry = sample_registry();
        assert_eq!(
            render_test_list(&registry),
            "math.\n  add\n  sub\nstrings.\n  concat\n"
        );
    }

    #[test]
    fn test_render_test_list_empty_registry() {
        assert_eq!(render_test_list(&Registry::new()), "");
    }

    #[test]
    fn test_execute_list_mode_runs_nothing() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn counting() {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let mut registry = Registry::new();
        registry.add_test("math", "add", counting).unwrap();

        let args = HarnessArgs {
            list_tests: true,
            ..plain_args()
        };
        match execute(&mut registry, &args, &HarnessConfig::default()) {
            Execution::Listed(listing) => assert_eq!(listing, "math.\n  add\n"),
            Execution::Completed(_) => panic!("list mode must not run tests"),
        }
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_execute_runs_everything_without_filter() {
        colored::control::set_override(false);
        let mut registry = sample_registry();
        let Execution::Completed(summary) =
            execute(&mut registry, &plain_args(), &HarnessConfig::default())
        else {
            panic!("expected a run");
        };
        assert_eq!(summary.tests_ran, 3);
        assert_eq!(summary.tests_failed, 1);
        colored::control::unset_override();
    }

    #[test]
    fn test_execute_flag_filter_overrides_config() {
        colored::control::set_override(false);
        let mut registry = sample_registry();
        let args = HarnessArgs {
            filter: Some("strings".to_string()),
            ..plain_args()
        };
        let config = HarnessConfig {
            run: Some(RunConfig {
                filter: Some("math".to_string()),
            }),
            ..HarnessConfig::default()
        };
        let Execution::Completed(summary) = execute(&mut registry, &args, &config) else {
            panic!("expected a run");
        };
        assert_eq!(summary.tests_ran, 1);
        assert!(summary.success());
        colored::control::unset_override();
    }

    #[test]
    fn test_execute_falls_back_to_config_filter() {
        colored::control::set_override(false);
        let mut registry = sample_registry();
        let config = HarnessConfig {
            run: Some(RunConfig {
                filter: Some("math.add".to_string()),
            }),
            ..HarnessConfig::default()
        };
        let Execution::Completed(summary) = execute(&mut registry, &plain_args(), &config) else {
            panic!("expected a run");
        };
        assert_eq!(summary.tests_ran, 1);
        assert!(summary.success());
        colored::control::unset_override();
    }
}
