use std::collections::VecDeque;
use std::num::NonZeroU64;

use log::trace;

use crate::SchedulingDecision::{Idle, Run};
use crate::{ProcessTable, Scheduler, SchedulingDecision, Slot, StopReason, Ticks};

/// Time sliced round robin over a FIFO ready queue.
pub struct RoundRobin {
    ready_queue: VecDeque<Slot>,
    timeslice: NonZeroU64,
}

impl RoundRobin {
    pub fn new(timeslice: NonZeroU64) -> Self {
        RoundRobin {
            ready_queue: VecDeque::new(),
            timeslice,
        }
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> String {
        format!("Round Robin (quantum = {})", self.timeslice)
    }

    fn enqueue(&mut self, table: &ProcessTable, slot: Slot) {
        trace!("rr: P{} joins the ready queue", table[slot].pid());
        self.ready_queue.push_back(slot);
    }

    fn next(
        &mut self,
        table: &ProcessTable,
        _now: Ticks,
        _next_arrival: Option<Ticks>,
    ) -> SchedulingDecision {
        let Some(slot) = self.ready_queue.pop_front() else {
            return Idle;
        };

        let remaining = table[slot].remaining();
        let timeslice =
            NonZeroU64::new(remaining.min(self.timeslice.get())).unwrap_or(self.timeslice);
        Run { slot, timeslice }
    }

    fn stop(&mut self, table: &ProcessTable, slot: Slot, reason: StopReason) {
        match reason {
            StopReason::Expired => {
                trace!("rr: P{} goes to the back of the queue", table[slot].pid());
                self.ready_queue.push_back(slot);
            }
            StopReason::Exited => {}
        }
    }

    fn ready(&self) -> Vec<Slot> {
        self.ready_queue.iter().copied().collect()
    }
}
