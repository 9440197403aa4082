use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::num::NonZeroU64;

use log::trace;

use crate::SchedulingDecision::{Idle, Run};
use crate::{Pid, ProcessTable, Scheduler, SchedulingDecision, Slot, StopReason, Ticks};

/// Ready structure key. The derived ordering compares fields top to bottom,
/// so the smallest key is the best candidate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    priority: i32,
    arrival: Ticks,
    pid: Pid,
    slot: Slot,
}

impl Rank {
    fn of(table: &ProcessTable, slot: Slot) -> Self {
        let process = &table[slot];
        Rank {
            priority: process.priority(),
            arrival: process.arrival(),
            pid: process.pid(),
            slot,
        }
    }
}

/// Preemptive priority scheduling, lower value wins.
///
/// The best ready process is re-selected at every decision point. Equal
/// priorities never preempt each other: the incumbent keeps winning on
/// `(arrival, pid)`.
pub struct PriorityQueue {
    ready_queue: BinaryHeap<Reverse<Rank>>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        PriorityQueue {
            ready_queue: BinaryHeap::new(),
        }
    }
}

impl Default for PriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for PriorityQueue {
    fn name(&self) -> String {
        String::from("Preemptive Priority Scheduling (lower value = higher priority)")
    }

    fn enqueue(&mut self, table: &ProcessTable, slot: Slot) {
        let rank = Rank::of(table, slot);
        trace!("pps: P{} ready with priority {}", rank.pid, rank.priority);
        self.ready_queue.push(Reverse(rank));
    }

    fn next(
        &mut self,
        table: &ProcessTable,
        now: Ticks,
        next_arrival: Option<Ticks>,
    ) -> SchedulingDecision {
        let Some(Reverse(rank)) = self.ready_queue.pop() else {
            return Idle;
        };

        // Only an arrival can outrank the chosen process, so it runs
        // uninterrupted until the next one or until it is done.
        let remaining = table[rank.slot].remaining();
        let until_arrival = next_arrival.map_or(remaining, |arrival| arrival.saturating_sub(now));
        let timeslice = NonZeroU64::new(remaining.min(until_arrival)).unwrap_or(NonZeroU64::MIN);
        Run {
            slot: rank.slot,
            timeslice,
        }
    }

    fn stop(&mut self, table: &ProcessTable, slot: Slot, reason: StopReason) {
        if reason == StopReason::Expired {
            self.ready_queue.push(Reverse(Rank::of(table, slot)));
        }
    }

    fn ready(&self) -> Vec<Slot> {
        let mut ranks: Vec<Rank> = self.ready_queue.iter().map(|Reverse(rank)| *rank).collect();
        ranks.sort();
        ranks.into_iter().map(|rank| rank.slot).collect()
    }
}
