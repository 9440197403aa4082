use std::fmt::{self, Display};

use scheduler::{Pid, Ticks};

/// Who holds the CPU during an [`Interval`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Occupant {
    Idle,
    Process(Pid),
}

impl Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Idle => write!(f, "idle"),
            Occupant::Process(pid) => write!(f, "P{}", pid),
        }
    }
}

/// A half open span `[start, end)` of the virtual clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Interval {
    pub occupant: Occupant,
    pub start: Ticks,
    pub end: Ticks,
}

impl Interval {
    pub fn new(occupant: Occupant, start: Ticks, end: Ticks) -> Self {
        Interval {
            occupant,
            start,
            end,
        }
    }

    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : [{} -> {}]", self.occupant, self.start, self.end)
    }
}

/// The execution history of one run: contiguous intervals starting at 0,
/// where no two neighbours share an occupant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    intervals: Vec<Interval>,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline::default()
    }

    /// Append `[start, end)` for `occupant`.
    ///
    /// Empty spans are dropped and a span that continues the last
    /// interval's occupant extends it instead of starting a new one.
    pub fn push(&mut self, occupant: Occupant, start: Ticks, end: Ticks) {
        if start >= end {
            return;
        }
        debug_assert_eq!(start, self.makespan(), "timeline must stay contiguous");

        match self.intervals.last_mut() {
            Some(last) if last.occupant == occupant && last.end == start => last.end = end,
            _ => self.intervals.push(Interval::new(occupant, start, end)),
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// End of the last interval, 0 for an empty timeline.
    pub fn makespan(&self) -> Ticks {
        self.intervals.last().map_or(0, |interval| interval.end)
    }

    /// Total time spent running processes.
    pub fn busy_time(&self) -> Ticks {
        self.intervals
            .iter()
            .filter(|interval| interval.occupant != Occupant::Idle)
            .map(Interval::duration)
            .sum()
    }

    /// Adjacent pairs with different occupants, idle transitions included.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|pair| pair[0].occupant != pair[1].occupant)
            .count()
    }

    /// The intervals during which `pid` held the CPU.
    #[cfg(test)]
    pub fn spans_of(&self, pid: Pid) -> impl Iterator<Item = &Interval> {
        self.intervals
            .iter()
            .filter(move |interval| interval.occupant == Occupant::Process(pid))
    }
}

impl Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, interval) in self.intervals.iter().enumerate() {
            if index > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}
