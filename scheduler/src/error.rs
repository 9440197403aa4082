use std::fmt::{self, Display};

use crate::Pid;

/// Input rejected before a simulation starts.
///
/// No timeline is produced for a run that fails with any of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Round robin was given a quantum that is not strictly positive.
    InvalidQuantum(i64),

    /// A process has a negative arrival or a non positive burst.
    InvalidProcess {
        pid: Pid,
        field: &'static str,
        value: i64,
    },

    /// Two processes share the same PID.
    DuplicateId(Pid),

    /// The latest arrival plus every burst does not fit on the clock.
    ClockOverflow,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidQuantum(quantum) => {
                write!(f, "invalid quantum {quantum}, it must be greater than 0")
            }
            Error::InvalidProcess { pid, field, value } => {
                write!(f, "process {pid} has an invalid {field} ({value})")
            }
            Error::DuplicateId(pid) => {
                write!(f, "PID {pid} is used by more than one process")
            }
            Error::ClockOverflow => {
                write!(f, "the processes would run past the end of the virtual clock")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_name_the_culprit() {
        assert_eq!(
            Error::InvalidQuantum(0).to_string(),
            "invalid quantum 0, it must be greater than 0"
        );
        assert_eq!(
            Error::InvalidProcess {
                pid: Pid::new(3),
                field: "burst",
                value: -2,
            }
            .to_string(),
            "process 3 has an invalid burst (-2)"
        );
        assert_eq!(
            Error::DuplicateId(Pid::new(7)).to_string(),
            "PID 7 is used by more than one process"
        );
        assert_eq!(
            Error::ClockOverflow.to_string(),
            "the processes would run past the end of the virtual clock"
        );
    }
}
