//! A scheduler library.
//!
//! This library provides the process records, the traits and the
//! policies needed to simulate a single CPU scheduler on a virtual clock.
//!

use std::num::NonZeroU64;

mod error;
mod process;
mod scheduler;

pub use crate::error::Error;
pub use crate::process::{Process, ProcessInput, ProcessResult, ProcessTable};
pub use crate::scheduler::{
    Pid, ProcessState, Scheduler, SchedulingDecision, Slot, StopReason, Ticks,
};

pub mod schedulers;

use schedulers::{PriorityQueue, RoundRobin};

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
///                 and sent to the back of the ready queue.
pub fn round_robin(timeslice: NonZeroU64) -> impl Scheduler {
    RoundRobin::new(timeslice)
}

/// Returns a structure that implements the `Scheduler` trait with a preemptive
/// priority scheduler policy.
///
/// A lower priority value means a higher priority. A process is only preempted
/// by a ready process with a strictly lower priority value.
pub fn priority_queue() -> impl Scheduler {
    PriorityQueue::new()
}
