use std::env;

use anyhow::{bail, Context, Result};
use log::LevelFilter;

/// Quantum used when neither the command line nor `QUANTUM` sets one.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Which algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read processes from stdin and run round robin.
    RoundRobin { quantum: i64 },
    /// Read processes from stdin and run preemptive priority scheduling.
    PreemptivePriority,
    /// Run the built in sample through both algorithms.
    Sample { quantum: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub log_level: LevelFilter,
}

impl Config {
    /// Build the configuration from the process arguments and environment.
    pub fn from_env() -> Result<Config> {
        let args: Vec<String> = env::args().skip(1).collect();
        Config::parse(&args, |key| env::var(key).ok())
    }

    /// * `args` - the command line, without the program name.
    /// * `var` - environment lookup.
    pub fn parse<F>(args: &[String], var: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match var("SCHED_LOG") {
            Some(level) => level
                .parse::<LevelFilter>()
                .with_context(|| format!("SCHED_LOG has an unknown log level `{level}`"))?,
            None => LevelFilter::Warn,
        };

        let quantum = match (args.get(1), var("QUANTUM")) {
            (Some(arg), _) => parse_quantum(arg, "the quantum argument")?,
            (None, Some(value)) => parse_quantum(&value, "QUANTUM")?,
            (None, None) => DEFAULT_QUANTUM,
        };

        let mode = match args.first().map(String::as_str) {
            None => Mode::Sample { quantum },
            Some("rr") => Mode::RoundRobin { quantum },
            Some("pps") => Mode::PreemptivePriority,
            Some(other) => bail!("unknown mode `{other}`, expected `rr` or `pps`"),
        };

        Ok(Config { mode, log_level })
    }
}

fn parse_quantum(value: &str, source: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .with_context(|| format!("{source} is not an integer: `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn no_arguments_runs_the_sample() {
        let config = Config::parse(&[], no_env).unwrap();
        assert_eq!(
            config,
            Config {
                mode: Mode::Sample { quantum: 2 },
                log_level: LevelFilter::Warn,
            }
        );
    }

    #[test]
    fn argument_beats_environment() {
        let env = |key: &str| (key == "QUANTUM").then(|| String::from("5"));

        let config = Config::parse(&args(&["rr", "3"]), env).unwrap();
        assert_eq!(config.mode, Mode::RoundRobin { quantum: 3 });

        let config = Config::parse(&args(&["rr"]), env).unwrap();
        assert_eq!(config.mode, Mode::RoundRobin { quantum: 5 });
    }

    #[test]
    fn priority_mode() {
        let config = Config::parse(&args(&["pps"]), no_env).unwrap();
        assert_eq!(config.mode, Mode::PreemptivePriority);
    }

    #[test]
    fn log_level_from_environment() {
        let env = |key: &str| (key == "SCHED_LOG").then(|| String::from("debug"));
        let config = Config::parse(&[], env).unwrap();
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let env = |key: &str| (key == "SCHED_LOG").then(|| String::from("loud"));
        let err = Config::parse(&[], env).unwrap_err();
        assert_eq!(err.to_string(), "SCHED_LOG has an unknown log level `loud`");
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = Config::parse(&args(&["fifo"]), no_env).unwrap_err();
        assert_eq!(err.to_string(), "unknown mode `fifo`, expected `rr` or `pps`");
    }

    #[test]
    fn rejects_garbage_quantum() {
        let err = Config::parse(&args(&["rr", "two"]), no_env).unwrap_err();
        assert_eq!(err.to_string(), "the quantum argument is not an integer: `two`");
    }
}
