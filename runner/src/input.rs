use anyhow::{bail, Context, Result};
use scheduler::ProcessInput;

/// Parse a process list: a count `n`, then `n` records of
/// `pid arrival burst priority`, all separated by whitespace.
///
/// Only the shape of the input is checked here. Value ranges are
/// checked by the scheduler before it runs.
pub fn parse_processes(text: &str) -> Result<Vec<ProcessInput>> {
    let mut tokens = text.split_whitespace();

    let count: usize = tokens
        .next()
        .context("expected the number of processes on the first line")?
        .parse()
        .context("the number of processes must be a non negative integer")?;

    let mut processes = Vec::with_capacity(count);
    for index in 1..=count {
        let mut field = |name: &str| -> Result<i64> {
            let token = tokens
                .next()
                .with_context(|| format!("process #{index}: missing {name}"))?;
            token
                .parse::<i64>()
                .with_context(|| format!("process #{index}: {name} `{token}` is not an integer"))
        };

        let pid = field("pid")?;
        let arrival = field("arrival")?;
        let burst = field("burst")?;
        let priority = field("priority")?;

        let Ok(pid) = usize::try_from(pid) else {
            bail!("process #{index}: pid {pid} is negative");
        };
        let Ok(priority) = i32::try_from(priority) else {
            bail!("process #{index}: priority {priority} is out of range");
        };
        processes.push(ProcessInput::new(pid, arrival, burst, priority));
    }

    if let Some(extra) = tokens.next() {
        bail!("unexpected trailing input `{extra}` after {count} processes");
    }

    Ok(processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_count_then_records() {
        let processes = parse_processes("2\n1 0 5 2\n2 1 3 -1\n").unwrap();
        assert_eq!(
            processes,
            vec![ProcessInput::new(1, 0, 5, 2), ProcessInput::new(2, 1, 3, -1)]
        );
    }

    #[test]
    fn empty_list() {
        assert_eq!(parse_processes("0").unwrap(), vec![]);
    }

    #[test]
    fn keeps_out_of_range_values_for_the_scheduler() {
        let processes = parse_processes("1\n4 -2 0 0").unwrap();
        assert_eq!(processes, vec![ProcessInput::new(4, -2, 0, 0)]);
    }

    #[test]
    fn missing_field() {
        let err = parse_processes("2\n1 0 5 2\n2 1 3").unwrap_err();
        assert_eq!(err.to_string(), "process #2: missing priority");
    }

    #[test]
    fn not_a_number() {
        let err = parse_processes("1\n1 zero 5 2").unwrap_err();
        assert_eq!(err.to_string(), "process #1: arrival `zero` is not an integer");
    }

    #[test]
    fn missing_count() {
        let err = parse_processes("   ").unwrap_err();
        assert_eq!(err.to_string(), "expected the number of processes on the first line");
    }

    #[test]
    fn trailing_garbage() {
        let err = parse_processes("1\n1 0 5 2\n7").unwrap_err();
        assert_eq!(err.to_string(), "unexpected trailing input `7` after 1 processes");
    }
}
