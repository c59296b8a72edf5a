//! Harness command-line flags
//!
//! Every long flag carries the `gauntlet_` prefix so the harness never
//! collides with flags the host binary defines for itself.

use clap::Parser;

/// Command-line test harness.
///
/// With no flags, every registered test runs. A filter narrows the run to
/// one suite or one test; list mode prints the registered names and runs
/// nothing.
///
/// EXAMPLES:
///     showcase                                Run every test
///     showcase --gauntlet_filter=math         Run one suite
///     showcase --gauntlet_filter=math.add     Run one test
///     showcase --gauntlet_list_tests          List tests without running
///
/// ENVIRONMENT VARIABLES:
///     GAUNTLET_FILTER   Default test filter (overridden by the flag)
///     NO_COLOR          Set to disable colored output
#[derive(Debug, Parser)]
#[command(name = "gauntlet")]
#[command(version)]
pub struct HarnessArgs {
    /// List every registered suite and test, then exit without running
    #[arg(long = "gauntlet_list_tests")]
    pub list_tests: bool,

    /// Run only the named suite ("Suite") or test ("Suite.Test")
    #[arg(
        long = "gauntlet_filter",
        value_name = "PATTERN",
        env = "GAUNTLET_FILTER"
    )]
    pub filter: Option<String>,

    /// Disable colored output
    #[arg(long = "gauntlet_no_color")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use std::env;

    use super::*;

    #[test]
    #[serial]
    fn test_no_flags_runs_everything() {
        env::remove_var("GAUNTLET_FILTER");
        let args = HarnessArgs::try_parse_from(["showcase"]).unwrap();
        assert!(!args.list_tests);
        assert_eq!(args.filter, None);
        assert!(!args.no_color);
    }

    #[test]
    #[serial]
    fn test_filter_flag() {
        env::remove_var("GAUNTLET_FILTER");
        let args =
            HarnessArgs::try_parse_from(["showcase", "--gauntlet_filter=math.add"]).unwrap();
        assert_eq!(args.filter.as_deref(), Some("math.add"));
    }

    #[test]
    #[serial]
    fn test_filter_env_fallback() {
        env::set_var("GAUNTLET_FILTER", "strings");
        let args = HarnessArgs::try_parse_from(["showcase"]).unwrap();
        assert_eq!(args.filter.as_deref(), Some("strings"));

        // The flag wins over the environment.
        let args = HarnessArgs::try_parse_from(["showcase", "--gauntlet_filter=math"]).unwrap();
        assert_eq!(args.filter.as_deref(), Some("math"));
        env::remove_var("GAUNTLET_FILTER");
    }

    #[test]
    #[serial]
    fn test_list_and_no_color_flags() {
        env::remove_var("GAUNTLET_FILTER");
        let args = HarnessArgs::try_parse_from([
            "showcase",
            "--gauntlet_list_tests",
            "--gauntlet_no_color",
        ])
        .unwrap();
        assert!(args.list_tests);
        assert!(args.no_color);
    }

    #[test]
    #[serial]
    fn test_unknown_flag_is_rejected() {
        env::remove_var("GAUNTLET_FILTER");
        assert!(HarnessArgs::try_parse_from(["showcase", "--gauntlet_bogus"]).is_err());
    }
}
