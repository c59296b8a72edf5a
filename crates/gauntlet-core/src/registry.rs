//! Suite and test bookkeeping: registration, lookup, and filtering.
//!
//! A [`Registry`] owns every suite, and each suite owns its tests. All
//! registration happens during an explicit startup phase, before anything
//! runs; the runner then walks the registry in registration order. Aggregate
//! counts (`total_tests`, `enabled_suites`, `enabled_tests`) are maintained
//! eagerly by every mutation so they can be read without a scan.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced while populating a [`Registry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Growing suite or test storage failed. The registry keeps its prior
    /// contents; nothing is half-added.
    #[error("test storage exhausted")]
    OutOfMemory(#[from] TryReserveError),

    /// The same `(suite, test)` pair was registered twice.
    #[error("test `{suite}.{test}` is already registered")]
    DuplicateTest { suite: String, test: String },

    /// Suite and test names must be non-empty.
    #[error("suite and test names must be non-empty")]
    EmptyName,
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Zero-argument test body. Failures are signalled through the assertion
/// macros rather than a return value.
pub type TestFn = fn();

/// A single registered test.
#[derive(Debug)]
pub struct TestCase {
    pub(crate) name: String,
    pub(crate) callback: TestFn,
    pub(crate) passed: bool,
    pub(crate) enabled: bool,
}

impl TestCase {
    fn new(name: &str, callback: TestFn) -> Self {
        Self {
            name: name.to_string(),
            callback,
            passed: true,
            enabled: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `false` only when a filter excluded this test.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// `true` until a failing assertion flips it during this test's own
    /// execution window. Reset at the start of every run.
    pub fn passed(&self) -> bool {
        self.passed
    }
}

/// A named group of tests, executed in registration order.
#[derive(Debug)]
pub struct TestSuite {
    pub(crate) name: String,
    pub(crate) tests: Vec<TestCase>,
    pub(crate) enabled: bool,
    pub(crate) enabled_tests: usize,
}

impl TestSuite {
    fn with_capacity(name: &str, capacity: usize) -> RegistryResult<Self> {
        let mut tests = Vec::new();
        tests.try_reserve(capacity)?;
        Ok(Self {
            name: name.to_string(),
            tests,
            enabled: true,
            enabled_tests: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    /// `false` only when a filter excluded the whole suite.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Count of tests in this suite that are still enabled.
    pub fn enabled_tests(&self) -> usize {
        self.enabled_tests
    }

    pub fn find_test(&self, name: &str) -> Option<&TestCase> {
        self.tests.iter().find(|test| test.name == name)
    }
}

/// Doubles the backing storage when full. On failure the collection keeps
/// its prior capacity and contents.
fn grow_if_full<T>(items: &mut Vec<T>) -> Result<(), TryReserveError> {
    if items.len() == items.capacity() {
        items.try_reserve(items.capacity().max(1))?;
    }
    Ok(())
}

/// Owner of every suite and test, plus the aggregate enabled/total counts.
///
/// There is deliberately no global instance: construct one, register into
/// it, and hand it to the runner.
#[derive(Debug)]
pub struct Registry {
    suites: Vec<TestSuite>,
    total_tests: usize,
    enabled_suites: usize,
    enabled_tests: usize,
    initial_test_capacity: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Empty registry with minimal initial capacities; storage doubles as
    /// registration outgrows it.
    pub fn new() -> Self {
        Self::with_capacity(1, 1)
    }

    /// Empty registry sized for roughly `suite_capacity` suites of
    /// `test_capacity` tests each. Zero capacities are promoted to 1.
    pub fn with_capacity(suite_capacity: usize, test_capacity: usize) -> Self {
        Self {
            suites: Vec::with_capacity(suite_capacity.max(1)),
            total_tests: 0,
            enabled_suites: 0,
            enabled_tests: 0,
            initial_test_capacity: test_capacity.max(1),
        }
    }

    /// Returns the suite named `name`, creating an empty enabled one at the
    /// end of the registration order if it does not exist yet.
    pub fn find_or_create_suite(&mut self, name: &str) -> RegistryResult<&mut TestSuite> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if let Some(index) = self.suites.iter().position(|suite| suite.name == name) {
            return Ok(&mut self.suites[index]);
        }
        grow_if_full(&mut self.suites)?;
        let suite = TestSuite::with_capacity(name, self.initial_test_capacity)?;
        self.suites.push(suite);
        self.enabled_suites += 1;
        let index = self.suites.len() - 1;
        Ok(&mut self.suites[index])
    }

    /// Registers `callback` as `suite_name.test_name`, creating the suite on
    /// first use. New tests start enabled and passing, appended at the end
    /// of their suite's execution order.
    ///
    /// On error the registry is left exactly as it was.
    pub fn add_test(
        &mut self,
        suite_name: &str,
        test_name: &str,
        callback: TestFn,
    ) -> RegistryResult<()> {
        if suite_name.is_empty() || test_name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.find_test(suite_name, test_name).is_some() {
            return Err(RegistryError::DuplicateTest {
                suite: suite_name.to_string(),
                test: test_name.to_string(),
            });
        }
        let created = self.find_suite(suite_name).is_none();
        let suite = self.find_or_create_suite(suite_name)?;
        if let Err(err) = grow_if_full(&mut suite.tests) {
            if created {
                self.suites.pop();
                self.enabled_suites -= 1;
            }
            return Err(err.into());
        }
        suite.tests.push(TestCase::new(test_name, callback));
        suite.enabled_tests += 1;
        self.total_tests += 1;
        self.enabled_tests += 1;
        Ok(())
    }

    /// Narrows the enabled set to `pattern`, which is either `"Suite"` or
    /// `"Suite.Test"` (split at the first dot, both parts exact matches).
    ///
    /// Suites that do not match are disabled in full. Within the matching
    /// suite, a test part disables every other test; without one the suite's
    /// tests are untouched. A matching suite filtered down to zero tests
    /// stays enabled and still counts as run. Successive filters intersect.
    pub fn apply_filter(&mut self, pattern: &str) {
        let (suite_pattern, test_pattern) = match pattern.split_once('.') {
            Some((suite, test)) => (suite, Some(test)),
            None => (pattern, None),
        };
        for suite in &mut self.suites {
            if !suite.enabled {
                continue;
            }
            if suite.name != suite_pattern {
                suite.enabled = false;
                self.enabled_suites -= 1;
                self.enabled_tests -= suite.enabled_tests;
                continue;
            }
            let Some(test_pattern) = test_pattern else {
                continue;
            };
            for test in &mut suite.tests {
                if test.enabled && test.name != test_pattern {
                    test.enabled = false;
                    suite.enabled_tests -= 1;
                    self.enabled_tests -= 1;
                }
            }
        }
    }

    pub fn find_suite(&self, name: &str) -> Option<&TestSuite> {
        self.suites.iter().find(|suite| suite.name == name)
    }

    /// Exact `(suite, test)` lookup, the pair interface the failure path
    /// resolves through.
    pub fn find_test(&self, suite_name: &str, test_name: &str) -> Option<&TestCase> {
        self.find_suite(suite_name)?.find_test(test_name)
    }

    /// Marks the named test failed. `false` when the pair does not resolve.
    pub(crate) fn fail_test(&mut self, suite_name: &str, test_name: &str) -> bool {
        let Some(suite) = self.suites.iter_mut().find(|s| s.name == suite_name) else {
            return false;
        };
        let Some(test) = suite.tests.iter_mut().find(|t| t.name == test_name) else {
            return false;
        };
        test.passed = false;
        true
    }

    /// Puts every test back into the passing state so a run starts fresh.
    pub(crate) fn reset_results(&mut self) {
        for suite in &mut self.suites {
            for test in &mut suite.tests {
                test.passed = true;
            }
        }
    }

    /// All suites in registration order, including disabled ones.
    pub fn suites(&self) -> &[TestSuite] {
        &self.suites
    }

    pub fn total_tests(&self) -> usize {
        self.total_tests
    }

    pub fn enabled_suites(&self) -> usize {
        self.enabled_suites
    }

    /// Enabled tests within enabled suites; what a run would execute.
    pub fn enabled_tests(&self) -> usize {
        self.enabled_tests
    }
}
