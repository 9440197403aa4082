//! Scheduling policies
//!
//! Each policy only keeps a ready structure of [`Slot`](crate::Slot)s,
//! the records themselves stay in the [`ProcessTable`](crate::ProcessTable).
//!
mod round_robin;
pub use round_robin::RoundRobin;

mod priority_queue;
pub use priority_queue::PriorityQueue;
