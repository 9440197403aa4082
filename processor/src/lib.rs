//! A processor simulation library
//!
//! This drives the policies from the [`scheduler`] crate on a discrete
//! virtual clock and records what ran when.

use std::num::NonZeroU64;

use log::{debug, info, trace};

use scheduler::{
    priority_queue, round_robin, Error, ProcessInput, ProcessResult, ProcessTable, Scheduler,
    SchedulingDecision, Slot, StopReason, Ticks,
};

mod metrics;
mod report;
mod timeline;

pub use metrics::{compute_metrics, Metrics};
pub use report::{format_report, Report};
pub use timeline::{Interval, Occupant, Timeline};

/// The outcome of one complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// The policy name, as reported by [`Scheduler::name`].
    pub policy: String,
    pub timeline: Timeline,
    pub results: Vec<ProcessResult>,
}

impl Simulation {
    pub fn metrics(&self) -> Metrics {
        compute_metrics(&self.results, &self.timeline)
    }

    pub fn report(&self) -> Report<'_> {
        Report::new(&self.policy, &self.timeline, &self.results)
    }
}

/// The processor simulator.
///
/// It owns the clock, the process table and the timeline. The scheduler
/// only decides who runs next.
pub struct Processor<S: Scheduler> {
    scheduler: S,
    table: ProcessTable,
    timeline: Timeline,
    clock: Ticks,
    /// Slot of the first process that has not arrived yet.
    next_arrival: Slot,
    finished: usize,
}

impl<S: Scheduler> Processor<S> {
    /// Run `scheduler` over `table` until every process has finished.
    ///
    /// * `scheduler` - the policy to use for the simulation.
    /// * `table` - a fresh table, nothing in it may have run yet.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::{ProcessInput, ProcessTable};
    /// use std::num::NonZeroU64;
    ///
    /// let table = ProcessTable::new(&[
    ///     ProcessInput::new(1, 0, 5, 2),
    ///     ProcessInput::new(2, 1, 3, 1),
    /// ])
    /// .unwrap();
    ///
    /// let simulation = Processor::run(scheduler::round_robin(NonZeroU64::new(2).unwrap()), table);
    /// assert_eq!(simulation.timeline.makespan(), 8);
    /// ```
    pub fn run(scheduler: S, table: ProcessTable) -> Simulation {
        let mut processor = Processor {
            scheduler,
            table,
            timeline: Timeline::new(),
            clock: 0,
            next_arrival: 0,
            finished: 0,
        };

        let policy = processor.scheduler.name();
        info!("{}: scheduling {} processes", policy, processor.table.len());

        processor.admit_arrivals();
        while processor.finished < processor.table.len() {
            if !processor.step() {
                break;
            }
        }

        info!(
            "{}: done at t={} after {} intervals",
            policy,
            processor.clock,
            processor.timeline.len()
        );

        Simulation {
            policy,
            results: processor.table.results(),
            timeline: processor.timeline,
        }
    }

    /// One scheduling decision. Returns `false` when nothing can make
    /// progress anymore.
    fn step(&mut self) -> bool {
        let upcoming = self.upcoming_arrival();
        let decision = self.scheduler.next(&self.table, self.clock, upcoming);
        debug!("t={} {}", self.clock, decision);

        match decision {
            SchedulingDecision::Run { slot, timeslice } => {
                self.execute(slot, timeslice);
                true
            }
            SchedulingDecision::Idle => match upcoming {
                Some(arrival) => {
                    debug!("t={} idle until {}", self.clock, arrival);
                    self.timeline.push(Occupant::Idle, self.clock, arrival);
                    self.clock = arrival;
                    self.admit_arrivals();
                    true
                }
                None => false,
            },
        }
    }

    fn execute(&mut self, slot: Slot, timeslice: NonZeroU64) {
        let start = self.clock;
        let process = &mut self.table[slot];
        let ticks = timeslice.get().min(process.remaining());
        let pid = process.pid();

        process.dispatch(start);
        process.execute(ticks);
        self.timeline.push(Occupant::Process(pid), start, start + ticks);
        self.clock += ticks;

        // arrivals during the slice queue up before the process is handed back
        self.admit_arrivals();

        let process = &mut self.table[slot];
        let reason = if process.remaining() == 0 {
            process.finish(self.clock);
            self.finished += 1;
            StopReason::Exited
        } else {
            process.preempt();
            StopReason::Expired
        };
        trace!("t={} P{} {}, now {}", self.clock, pid, reason, process.state());

        self.scheduler.stop(&self.table, slot, reason);
    }

    /// Admit every process whose arrival is at or before the clock,
    /// in ascending arrival then PID order.
    fn admit_arrivals(&mut self) {
        while let Some(process) = self.table.get(self.next_arrival) {
            if process.arrival() > self.clock {
                break;
            }
            let slot = self.next_arrival;
            self.table[slot].admit();
            self.scheduler.enqueue(&self.table, slot);
            self.next_arrival += 1;
        }
        trace!("t={} ready: {:?}", self.clock, self.scheduler.ready());
    }

    fn upcoming_arrival(&self) -> Option<Ticks> {
        self.table.get(self.next_arrival).map(|process| process.arrival())
    }
}

/// Validate `processes` and run them through `scheduler` on a fresh table.
pub fn simulate<S: Scheduler>(
    scheduler: S,
    processes: &[ProcessInput],
) -> Result<Simulation, Error> {
    let table = ProcessTable::new(processes)?;
    Ok(Processor::run(scheduler, table))
}

/// Round robin with a fixed `quantum`.
///
/// Fails with [`Error::InvalidQuantum`] if `quantum <= 0`, and with the
/// process errors of [`ProcessTable::new`], before anything runs.
pub fn simulate_round_robin(
    processes: &[ProcessInput],
    quantum: i64,
) -> Result<Simulation, Error> {
    let timeslice = u64::try_from(quantum)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(Error::InvalidQuantum(quantum))?;
    simulate(round_robin(timeslice), processes)
}

/// Preemptive priority scheduling, lower priority value wins.
///
/// Results are listed by arrival, then priority, then PID.
pub fn simulate_preemptive_priority(processes: &[ProcessInput]) -> Result<Simulation, Error> {
    let mut simulation = simulate(priority_queue(), processes)?;
    simulation
        .results
        .sort_by_key(|result| (result.arrival, result.priority, result.pid));
    Ok(simulation)
}

/// Same as [`simulate_round_robin`], without the policy name.
pub fn run_round_robin(
    processes: &[ProcessInput],
    quantum: i64,
) -> Result<(Timeline, Vec<ProcessResult>), Error> {
    let simulation = simulate_round_robin(processes, quantum)?;
    Ok((simulation.timeline, simulation.results))
}

/// Same as [`simulate_preemptive_priority`], without the policy name.
pub fn run_preemptive_priority(
    processes: &[ProcessInput],
) -> Result<(Timeline, Vec<ProcessResult>), Error> {
    let simulation = simulate_preemptive_priority(processes)?;
    Ok((simulation.timeline, simulation.results))
}
