use std::collections::HashSet;
use std::ops::{Index, IndexMut};

use log::trace;

use crate::{Error, Pid, ProcessState, Slot, Ticks};

/// A process as described by the caller, before validation.
///
/// Fields are signed so that bad input can be reported instead of
/// silently wrapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProcessInput {
    pub pid: Pid,
    pub arrival: i64,
    pub burst: i64,
    /// Lower value means higher priority. Round robin ignores it.
    pub priority: i32,
}

impl ProcessInput {
    pub fn new(pid: usize, arrival: i64, burst: i64, priority: i32) -> Self {
        ProcessInput {
            pid: Pid::new(pid),
            arrival,
            burst,
            priority,
        }
    }
}

/// The outcome of a finished process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: i32,
    pub start: Ticks,
    pub completion: Ticks,
    pub waiting: Ticks,
    pub turnaround: Ticks,
}

impl ProcessResult {
    /// Time between arrival and first dispatch.
    pub fn response(&self) -> Ticks {
        self.start - self.arrival
    }
}

/// The Process Record: static inputs plus the state a single run mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    pid: Pid,
    arrival: Ticks,
    burst: Ticks,
    priority: i32,
    remaining: Ticks,
    start: Option<Ticks>,
    completion: Option<Ticks>,
    state: ProcessState,
}

impl Process {
    fn new(input: &ProcessInput) -> Result<Self, Error> {
        if input.arrival < 0 {
            return Err(Error::InvalidProcess {
                pid: input.pid,
                field: "arrival",
                value: input.arrival,
            });
        }
        if input.burst <= 0 {
            return Err(Error::InvalidProcess {
                pid: input.pid,
                field: "burst",
                value: input.burst,
            });
        }

        Ok(Process {
            pid: input.pid,
            arrival: input.arrival as Ticks,
            burst: input.burst as Ticks,
            priority: input.priority,
            remaining: input.burst as Ticks,
            start: None,
            completion: None,
            state: ProcessState::NotArrived,
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival(&self) -> Ticks {
        self.arrival
    }

    pub fn burst(&self) -> Ticks {
        self.burst
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    pub fn start(&self) -> Option<Ticks> {
        self.start
    }

    pub fn completion(&self) -> Option<Ticks> {
        self.completion
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn turnaround(&self) -> Option<Ticks> {
        self.completion.map(|completion| completion - self.arrival)
    }

    pub fn waiting(&self) -> Option<Ticks> {
        self.turnaround().map(|turnaround| turnaround - self.burst)
    }

    /// `NotArrived -> Ready`, once the clock has reached the arrival.
    pub fn admit(&mut self) {
        debug_assert_eq!(self.state, ProcessState::NotArrived);
        self.state = ProcessState::Ready;
    }

    /// `Ready -> Running`. The start time is recorded on the first dispatch only.
    pub fn dispatch(&mut self, now: Ticks) {
        debug_assert_eq!(self.state, ProcessState::Ready);
        if self.start.is_none() {
            self.start = Some(now);
        }
        self.state = ProcessState::Running;
    }

    /// Burn `ticks` units of the remaining burst.
    pub fn execute(&mut self, ticks: Ticks) {
        debug_assert!(ticks <= self.remaining, "process {} overran its burst", self.pid);
        self.remaining = self.remaining.saturating_sub(ticks);
    }

    /// `Running -> Ready`, the slice ended with work left.
    pub fn preempt(&mut self) {
        debug_assert_eq!(self.state, ProcessState::Running);
        self.state = ProcessState::Ready;
    }

    /// `Running -> Finished`.
    pub fn finish(&mut self, now: Ticks) {
        debug_assert_eq!(self.remaining, 0);
        self.completion = Some(now);
        self.state = ProcessState::Finished;
    }

    pub fn result(&self) -> Option<ProcessResult> {
        Some(ProcessResult {
            pid: self.pid,
            arrival: self.arrival,
            burst: self.burst,
            priority: self.priority,
            start: self.start?,
            completion: self.completion?,
            waiting: self.waiting()?,
            turnaround: self.turnaround()?,
        })
    }
}

/// The records of one simulation run, in admission order
/// (ascending arrival, then ascending PID).
///
/// Every run builds its own table from the inputs, so two runs never
/// share mutable records.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    /// Validates the whole batch and builds the table.
    ///
    /// A single bad process rejects the batch. An empty batch is valid.
    /// The batch is also rejected if the CPU could still be busy after
    /// the last representable tick.
    pub fn new(inputs: &[ProcessInput]) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        let mut processes = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !seen.insert(input.pid) {
                return Err(Error::DuplicateId(input.pid));
            }
            processes.push(Process::new(input)?);
        }
        processes.sort_by_key(|process| (process.arrival, process.pid));

        // the clock never passes the latest arrival plus all the work
        let latest = processes.last().map_or(0, |process| process.arrival);
        processes
            .iter()
            .try_fold(latest, |end, process| end.checked_add(process.burst))
            .ok_or(Error::ClockOverflow)?;
        trace!("process table built with {} processes", processes.len());

        Ok(ProcessTable { processes })
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn get(&self, slot: Slot) -> Option<&Process> {
        self.processes.get(slot)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Results of the finished processes, in table order.
    pub fn results(&self) -> Vec<ProcessResult> {
        self.processes.iter().filter_map(Process::result).collect()
    }
}

impl Index<Slot> for ProcessTable {
    type Output = Process;

    fn index(&self, slot: Slot) -> &Process {
        &self.processes[slot]
    }
}

impl IndexMut<Slot> for ProcessTable {
    fn index_mut(&mut self, slot: Slot) -> &mut Process {
        &mut self.processes[slot]
    }
}
