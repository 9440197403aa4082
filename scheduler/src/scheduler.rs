use std::fmt::{self, Display};
use std::num::NonZeroU64;

use crate::ProcessTable;

/// A point on the virtual clock, or a duration measured on it.
pub type Ticks = u64;

/// A stable index into a [`ProcessTable`].
///
/// Ready structures hold slots, never the records themselves.
pub type Slot = usize;

/// The PID of a process
///
/// PIDs are assigned by whoever builds the input and are never reused
/// within one simulation.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The action that the scheduler asks the processor to take.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SchedulingDecision {
    /// Run the process in `slot` for exactly `timeslice` time units.
    Run { slot: Slot, timeslice: NonZeroU64 },

    /// Nothing is ready. The processor idles until the next arrival.
    Idle,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run { slot, timeslice } => {
                write!(f, "Run slot {} for {} ticks", slot, timeslice)
            }
            SchedulingDecision::Idle => {
                write!(f, "Idle, no process is ready")
            }
        }
    }
}

/// The reason that a process has stopped and the processor
/// has called the scheduler.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StopReason {
    /// The timeslice allocated for the process has expired and the process
    /// still has work left. It goes back to the ready structure.
    Expired,

    /// The process used its last unit of burst and has finished.
    Exited,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Expired => write!(f, "Expired"),
            StopReason::Exited => write!(f, "Exited"),
        }
    }
}

/// The trait that any scheduling policy has to implement.
///
/// A policy only owns its ready structure. The records live in the
/// [`ProcessTable`] owned by the processor, which passes it in read-only
/// on every call.
pub trait Scheduler {
    /// Human readable policy name, used as the report title.
    fn name(&self) -> String;

    /// A process has just arrived and is ready to run.
    fn enqueue(&mut self, table: &ProcessTable, slot: Slot);

    /// Returns the action that the processor has to perform next.
    ///
    /// * `now` - the current virtual time; every process with
    ///           `arrival <= now` has already been enqueued.
    /// * `next_arrival` - the arrival time of the next process that has
    ///                    not been enqueued yet, if any.
    fn next(
        &mut self,
        table: &ProcessTable,
        now: Ticks,
        next_arrival: Option<Ticks>,
    ) -> SchedulingDecision;

    /// The scheduler is informed about the stopping of the process it
    /// last returned from [`Scheduler::next`], and the reason.
    ///
    /// Arrivals that happened while the process was running are
    /// enqueued before this call.
    fn stop(&mut self, table: &ProcessTable, slot: Slot, reason: StopReason);

    /// Returns the ready slots, in the order they would be dispatched.
    fn ready(&self) -> Vec<Slot>;
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The virtual clock has not reached the process's arrival yet.
    NotArrived,

    /// The process is ready to be scheduled.
    Ready,

    /// The process is currently scheduled.
    Running,

    /// The process has used its whole burst.
    Finished,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::NotArrived => write!(f, "NOT ARRIVED"),
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Finished => write!(f, "FINISHED"),
        }
    }
}
