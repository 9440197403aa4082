use std::fmt::{self, Display};

use scheduler::ProcessResult;

use crate::{compute_metrics, Metrics, Timeline};

/// Everything a finished run prints: Gantt chart, metrics and per process table.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub title: &'a str,
    pub timeline: &'a Timeline,
    pub results: &'a [ProcessResult],
    pub metrics: Metrics,
}

impl<'a> Report<'a> {
    pub fn new(title: &'a str, timeline: &'a Timeline, results: &'a [ProcessResult]) -> Self {
        Report {
            title,
            timeline,
            results,
            metrics: compute_metrics(results, timeline),
        }
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        writeln!(f)?;
        writeln!(f, "Gantt Chart (pid : [start -> end])")?;
        writeln!(f, "{}", self.timeline)?;
        writeln!(f)?;
        write!(f, "{}", self.metrics)?;
        writeln!(f)?;
        writeln!(
            f,
            "PID  Arrival  Burst  Priority  Start  Completion  Waiting  Turnaround"
        )?;
        for result in self.results {
            writeln!(
                f,
                "{:>3}{:>9}{:>7}{:>10}{:>7}{:>12}{:>9}{:>12}",
                result.pid,
                result.arrival,
                result.burst,
                result.priority,
                result.start,
                result.completion,
                result.waiting,
                result.turnaround
            )?;
        }
        Ok(())
    }
}

/// Format a run to a [`String`].
///
/// * `title` - the policy name, see [`scheduler::Scheduler::name`].
/// * `timeline` - the timeline returned by the [`Processor`](crate::Processor).
/// * `results` - the finished processes.
pub fn format_report(title: &str, timeline: &Timeline, results: &[ProcessResult]) -> String {
    Report::new(title, timeline, results).to_string()
}
