//! Minimal unit-testing runtime: named suites of plain test functions,
//! registration-order execution, name-based filtering, and ULP-based float
//! assertions.
//!
//! Everything revolves around an explicitly constructed [`Registry`]; there
//! is no global instance and no self-registration magic. Populate it during
//! a startup phase, optionally narrow it with [`Registry::apply_filter`],
//! then hand it to a [`Runner`]:
//!
//! ```
//! use gauntlet_core::{register_tests, Registry, Runner};
//!
//! fn addition() {
//!     gauntlet_core::expect_eq!(2 + 2, 4);
//! }
//!
//! fn casing() {
//!     gauntlet_core::expect_str_case_eq!("Gauntlet", "gauntlet");
//! }
//!
//! let mut registry = Registry::new();
//! register_tests!(registry, {
//!     arithmetic => { addition },
//!     strings => { casing },
//! })?;
//!
//! let summary = Runner::new().run(&mut registry, &mut ());
//! assert!(summary.success());
//! assert_eq!(summary.tests_ran, 2);
//! # Ok::<(), gauntlet_core::RegistryError>(())
//! ```
//!
//! The console front end (flag parsing, filtering, gtest-style progress
//! output, exit codes) lives in the companion `gauntlet-cli` crate.

pub mod failure;
mod macros;
pub mod registry;
pub mod runner;
pub mod ulp;

pub use failure::mark_current_test_failed;
pub use registry::{Registry, RegistryError, RegistryResult, TestCase, TestFn, TestSuite};
pub use runner::{RunObserver, RunState, RunSummary, Runner, SuiteOutcome, TestOutcome};
pub use ulp::UlpEq;

/// Version of the gauntlet runtime.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
