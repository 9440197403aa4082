use std::fmt::{self, Display};

use scheduler::{ProcessResult, Ticks};

use crate::Timeline;

/// Aggregate statistics of one finished run.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Metrics {
    pub makespan: Ticks,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    pub cpu_utilization_pct: f64,
    /// Processes completed per unit of virtual time.
    pub throughput: f64,
    pub context_switches: usize,
}

impl Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Metrics ---")?;
        writeln!(f, "Total time (makespan): {}", self.makespan)?;
        writeln!(f, "Average Waiting Time : {:.2}", self.avg_waiting)?;
        writeln!(f, "Average Turnaround Time : {:.2}", self.avg_turnaround)?;
        writeln!(f, "Average Response Time : {:.2}", self.avg_response)?;
        writeln!(f, "CPU Utilization: {:.2} %", self.cpu_utilization_pct)?;
        writeln!(f, "Throughput (processes/unit time): {:.2}", self.throughput)?;
        writeln!(f, "Context switches: {}", self.context_switches)
    }
}

/// Compute the [`Metrics`] of a run.
///
/// Every ratio is 0 when its denominator is 0, so an empty run yields
/// [`Metrics::default`].
pub fn compute_metrics(results: &[ProcessResult], timeline: &Timeline) -> Metrics {
    let makespan = timeline.makespan();
    let count = results.len();

    let (cpu_utilization_pct, throughput) = if makespan == 0 {
        (0.0, 0.0)
    } else {
        (
            100.0 * timeline.busy_time() as f64 / makespan as f64,
            count as f64 / makespan as f64,
        )
    };

    Metrics {
        makespan,
        avg_waiting: mean(results, |result| result.waiting),
        avg_turnaround: mean(results, |result| result.turnaround),
        avg_response: mean(results, ProcessResult::response),
        cpu_utilization_pct,
        throughput,
        context_switches: timeline.context_switches(),
    }
}

fn mean(results: &[ProcessResult], value: impl Fn(&ProcessResult) -> Ticks) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    // summed as f64, a batch of long turnarounds can exceed `Ticks`
    let total: f64 = results.iter().map(|result| value(result) as f64).sum();
    total / results.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Occupant;
    use pretty_assertions::assert_eq;
    use scheduler::Pid;

    fn result(
        pid: usize,
        arrival: Ticks,
        burst: Ticks,
        start: Ticks,
        completion: Ticks,
    ) -> ProcessResult {
        ProcessResult {
            pid: Pid::new(pid),
            arrival,
            burst,
            priority: 0,
            start,
            completion,
            waiting: completion - arrival - burst,
            turnaround: completion - arrival,
        }
    }

    #[test]
    fn idle_gap_lowers_utilization() {
        let mut timeline = Timeline::new();
        timeline.push(Occupant::Idle, 0, 5);
        timeline.push(Occupant::Process(Pid::new(1)), 5, 8);
        let results = [result(1, 5, 3, 5, 8)];

        assert_eq!(
            compute_metrics(&results, &timeline),
            Metrics {
                makespan: 8,
                avg_waiting: 0.0,
                avg_turnaround: 3.0,
                avg_response: 0.0,
                cpu_utilization_pct: 37.5,
                throughput: 0.125,
                context_switches: 1,
            }
        );
    }

    #[test]
    fn empty_run_is_all_zero() {
        assert_eq!(compute_metrics(&[], &Timeline::new()), Metrics::default());
    }

    #[test]
    fn averages() {
        let mut timeline = Timeline::new();
        timeline.push(Occupant::Process(Pid::new(1)), 0, 2);
        timeline.push(Occupant::Process(Pid::new(2)), 2, 4);
        timeline.push(Occupant::Process(Pid::new(1)), 4, 5);
        let results = [result(1, 0, 3, 0, 5), result(2, 1, 2, 2, 4)];

        let metrics = compute_metrics(&results, &timeline);
        assert_eq!(metrics.avg_waiting, 1.5);
        assert_eq!(metrics.avg_turnaround, 4.0);
        assert_eq!(metrics.avg_response, 0.5);
        assert_eq!(metrics.cpu_utilization_pct, 100.0);
        assert_eq!(metrics.context_switches, 2);
    }

    #[test]
    fn computing_twice_gives_the_same_answer() {
        let mut timeline = Timeline::new();
        timeline.push(Occupant::Process(Pid::new(1)), 0, 3);
        let results = [result(1, 0, 3, 0, 3)];

        assert_eq!(
            compute_metrics(&results, &timeline),
            compute_metrics(&results, &timeline)
        );
    }

    #[test]
    fn display() {
        let metrics = Metrics {
            makespan: 22,
            avg_waiting: 9.75,
            avg_turnaround: 15.25,
            avg_response: 2.0,
            cpu_utilization_pct: 100.0,
            throughput: 4.0 / 22.0,
            context_switches: 11,
        };

        assert_eq!(
            metrics.to_string(),
            "--- Metrics ---\n\
             Total time (makespan): 22\n\
             Average Waiting Time : 9.75\n\
             Average Turnaround Time : 15.25\n\
             Average Response Time : 2.00\n\
             CPU Utilization: 100.00 %\n\
             Throughput (processes/unit time): 0.18\n\
             Context switches: 11\n"
        );
    }
}
