//! Failure signalling from inside running test callbacks.
//!
//! Test bodies are plain `fn()` values, so a failing assertion cannot hand a
//! result back through the return value. Instead the runner installs the
//! identity of the test it is about to invoke in a thread-local slot, the
//! assertion macros report into that slot through
//! [`mark_current_test_failed`], and the runner applies the recorded verdict
//! to the registry once the callback returns. One callback runs at a time on
//! a thread, so the slot never holds more than one identity.

use std::cell::RefCell;
use std::fmt;

struct ActiveTest {
    suite: String,
    test: String,
    failed: bool,
}

thread_local! {
    static ACTIVE_TEST: RefCell<Option<ActiveTest>> = const { RefCell::new(None) };
}

/// Identity and verdict handed back to the runner when a callback finishes.
pub(crate) struct CompletedTest {
    pub(crate) suite: String,
    pub(crate) test: String,
    pub(crate) failed: bool,
}

/// Occupies the live-test slot for the duration of one callback invocation.
///
/// Dropping the guard vacates the slot, so a panicking callback cannot leak
/// a stale identity into later assertions.
pub(crate) struct ActiveTestGuard {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl ActiveTestGuard {
    pub(crate) fn install(suite: &str, test: &str) -> Self {
        ACTIVE_TEST.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                panic!("a test is already running on this thread");
            }
            *slot = Some(ActiveTest {
                suite: suite.to_string(),
                test: test.to_string(),
                failed: false,
            });
        });
        Self {
            _not_send: std::marker::PhantomData,
        }
    }

    /// Vacates the slot and reports what ran.
    pub(crate) fn finish(self) -> CompletedTest {
        let Some(active) = ACTIVE_TEST.with(|slot| slot.borrow_mut().take()) else {
            panic!("the live-test slot was vacated mid-run");
        };
        CompletedTest {
            suite: active.suite,
            test: active.test,
            failed: active.failed,
        }
    }
}

impl Drop for ActiveTestGuard {
    fn drop(&mut self) {
        ACTIVE_TEST.with(|slot| {
            slot.borrow_mut().take();
        });
    }
}

/// Marks the test currently executing on this thread as failed and writes
/// the diagnostic to stderr as `file:line: Failure` followed by `message`.
///
/// This is the hook the assertion macros report through. It never halts the
/// calling test body; the fatal macro variants return early themselves after
/// calling it.
///
/// # Panics
///
/// Panics when no test is executing on this thread: assertions are only
/// meaningful inside a test body, so reporting from anywhere else is a
/// usage-contract violation.
pub fn mark_current_test_failed(file: &str, line: u32, message: fmt::Arguments<'_>) {
    ACTIVE_TEST.with(|slot| {
        let mut slot = slot.borrow_mut();
        let Some(active) = slot.as_mut() else {
            panic!("{file}:{line}: assertion signalled outside of a running test");
        };
        active.failed = true;
        eprintln!("{file}:{line}: Failure");
        eprintln!("{message}");
    });
}
