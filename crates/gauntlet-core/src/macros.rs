//! Assertion and registration macros.
//!
//! Assertions come in two flavors: `expect_*` records a failure and lets the
//! test body continue, `require_*` records it and returns from the enclosing
//! function. Both report through
//! [`mark_current_test_failed`](crate::failure::mark_current_test_failed),
//! so they are only meaningful inside a running test. Every macro accepts an
//! optional trailing `format!`-style context message.

// Shared predicate plumbing: evaluate, report on falsehood, and stop the
// enclosing test body when fatal.
#[doc(hidden)]
#[macro_export]
macro_rules! __gauntlet_check {
    ($fatal:literal, $ok:expr, $($diag:tt)+) => {
        if !($ok) {
            $crate::failure::mark_current_test_failed(file!(), line!(), format_args!($($diag)+));
            if $fatal {
                return;
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __gauntlet_cond {
    ($fatal:literal, $polarity:literal, $wording:literal, $cond:expr $(,)?) => {
        $crate::__gauntlet_check!(
            $fatal,
            ($cond) == $polarity,
            concat!("Expected ", $wording, " of the expression:\n  {}"),
            stringify!($cond)
        )
    };
    ($fatal:literal, $polarity:literal, $wording:literal, $cond:expr, $($msg:tt)+) => {
        $crate::__gauntlet_check!(
            $fatal,
            ($cond) == $polarity,
            concat!("Expected ", $wording, " of the expression:\n  {}\n{}"),
            stringify!($cond),
            format_args!($($msg)+)
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __gauntlet_eq {
    ($fatal:literal, $op:tt, $wording:literal, $lhs:expr, $rhs:expr $(,)?) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                *lhs $op *rhs,
                concat!(
                    "Expected ", $wording, " of these values:\n",
                    "  {}\n    Which is: {:?}\n  {}\n    Which is: {:?}"
                ),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs
            ),
        }
    };
    ($fatal:literal, $op:tt, $wording:literal, $lhs:expr, $rhs:expr, $($msg:tt)+) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                *lhs $op *rhs,
                concat!(
                    "Expected ", $wording, " of these values:\n",
                    "  {}\n    Which is: {:?}\n  {}\n    Which is: {:?}\n{}"
                ),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs,
                format_args!($($msg)+)
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __gauntlet_ord {
    ($fatal:literal, $op:tt, $lhs:expr, $rhs:expr $(,)?) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                *lhs $op *rhs,
                concat!(
                    "Expected ({}) ", stringify!($op), " ({}), where:\n",
                    "  {} evaluates to {:?}, and\n  {} evaluates to {:?}."
                ),
                stringify!($lhs),
                stringify!($rhs),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs
            ),
        }
    };
    ($fatal:literal, $op:tt, $lhs:expr, $rhs:expr, $($msg:tt)+) => {
        match (&$lhs, &$rhs) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                *lhs $op *rhs,
                concat!(
                    "Expected ({}) ", stringify!($op), " ({}), where:\n",
                    "  {} evaluates to {:?}, and\n  {} evaluates to {:?}.\n{}"
                ),
                stringify!($lhs),
                stringify!($rhs),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs,
                format_args!($($msg)+)
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __gauntlet_str_case {
    ($fatal:literal, $polarity:literal, $wording:literal, $lhs:expr, $rhs:expr $(,)?) => {
        match (
            ::core::convert::AsRef::<str>::as_ref(&$lhs),
            ::core::convert::AsRef::<str>::as_ref(&$rhs),
        ) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                lhs.eq_ignore_ascii_case(rhs) == $polarity,
                concat!(
                    "Expected case-insensitive ", $wording, " of these strings:\n",
                    "  {}\n    Which is: {:?}\n  {}\n    Which is: {:?}"
                ),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs
            ),
        }
    };
    ($fatal:literal, $polarity:literal, $wording:literal, $lhs:expr, $rhs:expr, $($msg:tt)+) => {
        match (
            ::core::convert::AsRef::<str>::as_ref(&$lhs),
            ::core::convert::AsRef::<str>::as_ref(&$rhs),
        ) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                lhs.eq_ignore_ascii_case(rhs) == $polarity,
                concat!(
                    "Expected case-insensitive ", $wording, " of these strings:\n",
                    "  {}\n    Which is: {:?}\n  {}\n    Which is: {:?}\n{}"
                ),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs,
                format_args!($($msg)+)
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __gauntlet_float_eq {
    ($fatal:literal, $lhs:expr, $rhs:expr $(,)?) => {
        match ($lhs, $rhs) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                $crate::UlpEq::almost_equal(lhs, rhs, 4),
                concat!(
                    "Expected equality of these values:\n",
                    "  {}\n    Which is: {:?}\n  {}\n    Which is: {:?}"
                ),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs
            ),
        }
    };
    ($fatal:literal, $lhs:expr, $rhs:expr, $($msg:tt)+) => {
        match ($lhs, $rhs) {
            (lhs, rhs) => $crate::__gauntlet_check!(
                $fatal,
                $crate::UlpEq::almost_equal(lhs, rhs, 4),
                concat!(
                    "Expected equality of these values:\n",
                    "  {}\n    Which is: {:?}\n  {}\n    Which is: {:?}\n{}"
                ),
                stringify!($lhs),
                lhs,
                stringify!($rhs),
                rhs,
                format_args!($($msg)+)
            ),
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __gauntlet_near {
    ($fatal:literal, $lhs:expr, $rhs:expr, $abs_error:expr $(,)?) => {
        match ($lhs, $rhs, $abs_error) {
            (lhs, rhs, tolerance) => {
                let difference = (lhs - rhs).abs();
                $crate::__gauntlet_check!(
                    $fatal,
                    difference <= tolerance,
                    concat!(
                        "The difference between {} and {} is {}, which exceeds {}, where:\n",
                        "  {} evaluates to {},\n  {} evaluates to {}, and\n  {} evaluates to {}."
                    ),
                    stringify!($lhs),
                    stringify!($rhs),
                    difference,
                    stringify!($abs_error),
                    stringify!($lhs),
                    lhs,
                    stringify!($rhs),
                    rhs,
                    stringify!($abs_error),
                    tolerance
                )
            }
        }
    };
    ($fatal:literal, $lhs:expr, $rhs:expr, $abs_error:expr, $($msg:tt)+) => {
        match ($lhs, $rhs, $abs_error) {
            (lhs, rhs, tolerance) => {
                let difference = (lhs - rhs).abs();
                $crate::__gauntlet_check!(
                    $fatal,
                    difference <= tolerance,
                    concat!(
                        "The difference between {} and {} is {}, which exceeds {}, where:\n",
                        "  {} evaluates to {},\n  {} evaluates to {}, and\n  {} evaluates to {}.\n{}"
                    ),
                    stringify!($lhs),
                    stringify!($rhs),
                    difference,
                    stringify!($abs_error),
                    stringify!($lhs),
                    lhs,
                    stringify!($rhs),
                    rhs,
                    stringify!($abs_error),
                    tolerance,
                    format_args!($($msg)+)
                )
            }
        }
    };
}

/// Non-fatal: the condition must be true.
#[macro_export]
macro_rules! expect_true {
    ($($args:tt)+) => { $crate::__gauntlet_cond!(false, true, "truthfulness", $($args)+) };
}

/// Fatal: the condition must be true, or the test body returns.
#[macro_export]
macro_rules! require_true {
    ($($args:tt)+) => { $crate::__gauntlet_cond!(true, true, "truthfulness", $($args)+) };
}

/// Non-fatal: the condition must be false.
#[macro_export]
macro_rules! expect_false {
    ($($args:tt)+) => { $crate::__gauntlet_cond!(false, false, "falsehood", $($args)+) };
}

/// Fatal: the condition must be false, or the test body returns.
#[macro_export]
macro_rules! require_false {
    ($($args:tt)+) => { $crate::__gauntlet_cond!(true, false, "falsehood", $($args)+) };
}

/// Non-fatal: the two values must compare equal. Operands need `Debug`.
#[macro_export]
macro_rules! expect_eq {
    ($($args:tt)+) => { $crate::__gauntlet_eq!(false, ==, "equality", $($args)+) };
}

/// Fatal: the two values must compare equal, or the test body returns.
#[macro_export]
macro_rules! require_eq {
    ($($args:tt)+) => { $crate::__gauntlet_eq!(true, ==, "equality", $($args)+) };
}

/// Non-fatal: the two values must compare unequal.
#[macro_export]
macro_rules! expect_ne {
    ($($args:tt)+) => { $crate::__gauntlet_eq!(false, !=, "inequality", $($args)+) };
}

/// Fatal: the two values must compare unequal, or the test body returns.
#[macro_export]
macro_rules! require_ne {
    ($($args:tt)+) => { $crate::__gauntlet_eq!(true, !=, "inequality", $($args)+) };
}

/// Non-fatal: `lhs < rhs`.
#[macro_export]
macro_rules! expect_lt {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(false, <, $($args)+) };
}

/// Fatal: `lhs < rhs`, or the test body returns.
#[macro_export]
macro_rules! require_lt {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(true, <, $($args)+) };
}

/// Non-fatal: `lhs <= rhs`.
#[macro_export]
macro_rules! expect_le {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(false, <=, $($args)+) };
}

/// Fatal: `lhs <= rhs`, or the test body returns.
#[macro_export]
macro_rules! require_le {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(true, <=, $($args)+) };
}

/// Non-fatal: `lhs > rhs`.
#[macro_export]
macro_rules! expect_gt {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(false, >, $($args)+) };
}

/// Fatal: `lhs > rhs`, or the test body returns.
#[macro_export]
macro_rules! require_gt {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(true, >, $($args)+) };
}

/// Non-fatal: `lhs >= rhs`.
#[macro_export]
macro_rules! expect_ge {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(false, >=, $($args)+) };
}

/// Fatal: `lhs >= rhs`, or the test body returns.
#[macro_export]
macro_rules! require_ge {
    ($($args:tt)+) => { $crate::__gauntlet_ord!(true, >=, $($args)+) };
}

/// Non-fatal: the strings must match ignoring ASCII case.
#[macro_export]
macro_rules! expect_str_case_eq {
    ($($args:tt)+) => { $crate::__gauntlet_str_case!(false, true, "equality", $($args)+) };
}

/// Fatal: the strings must match ignoring ASCII case, or the test body
/// returns.
#[macro_export]
macro_rules! require_str_case_eq {
    ($($args:tt)+) => { $crate::__gauntlet_str_case!(true, true, "equality", $($args)+) };
}

/// Non-fatal: the strings must differ ignoring ASCII case.
#[macro_export]
macro_rules! expect_str_case_ne {
    ($($args:tt)+) => { $crate::__gauntlet_str_case!(false, false, "inequality", $($args)+) };
}

/// Fatal: the strings must differ ignoring ASCII case, or the test body
/// returns.
#[macro_export]
macro_rules! require_str_case_ne {
    ($($args:tt)+) => { $crate::__gauntlet_str_case!(true, false, "inequality", $($args)+) };
}

/// Non-fatal: the floats must be within 4 ULPs of each other.
#[macro_export]
macro_rules! expect_float_eq {
    ($($args:tt)+) => { $crate::__gauntlet_float_eq!(false, $($args)+) };
}

/// Fatal: the floats must be within 4 ULPs of each other, or the test body
/// returns.
#[macro_export]
macro_rules! require_float_eq {
    ($($args:tt)+) => { $crate::__gauntlet_float_eq!(true, $($args)+) };
}

/// Non-fatal: the floats must be within `abs_error` of each other.
#[macro_export]
macro_rules! expect_near {
    ($($args:tt)+) => { $crate::__gauntlet_near!(false, $($args)+) };
}

/// Fatal: the floats must be within `abs_error` of each other, or the test
/// body returns.
#[macro_export]
macro_rules! require_near {
    ($($args:tt)+) => { $crate::__gauntlet_near!(true, $($args)+) };
}

/// Registers plain functions as tests during the startup phase.
///
/// Suite and test names come from the identifiers, so they can never be
/// empty; the functions must be in scope. Expands to a
/// [`RegistryResult<()>`](crate::RegistryResult) so a full registry (or a
/// duplicate registration) surfaces at the call site.
///
/// # Examples
///
/// ```
/// use gauntlet_core::{register_tests, Registry, Runner};
///
/// fn addition() {
///     gauntlet_core::expect_eq!(2 + 2, 4);
/// }
///
/// let mut registry = Registry::new();
/// register_tests!(registry, {
///     arithmetic => { addition },
/// })?;
///
/// let summary = Runner::new().run(&mut registry, &mut ());
/// assert!(summary.success());
/// # Ok::<(), gauntlet_core::RegistryError>(())
/// ```
#[macro_export]
macro_rules! register_tests {
    ($registry:expr, { $( $suite:ident => { $( $test:ident ),+ $(,)? } ),+ $(,)? }) => {
        match &mut $registry {
            registry => (|| -> $crate::RegistryResult<()> {
                $( $(
                    registry.add_test(stringify!($suite), stringify!($test), $test)?;
                )+ )+
                Ok(())
            })(),
        }
    };
}
