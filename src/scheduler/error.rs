use std::io;

#[derive(Debug, thiserror::Error)]
pub enum SchedError {
    #[error("process count must be a positive number, got {0}")]
    InvalidCount(i64),

    #[error("process ID cannot be empty")]
    EmptyPid,

    #[error("arrival time cannot be negative, got {0}")]
    NegativeArrival(i64),

    #[error("burst time must be positive, got {0}")]
    NonPositiveBurst(i64),

    #[error("time quantum must be positive, got {0}")]
    NonPositiveQuantum(i64),

    #[error("\"{0}\" is not a valid number")]
    NotANumber(String),

    #[error("please choose one of the listed options, got {0}")]
    InvalidChoice(usize),

    #[error("please answer 'yes' or 'no', got \"{0}\"")]
    NotYesNo(String),

    #[error("process ID \"{0}\" is used more than once")]
    DuplicatePid(String),

    #[error("processes need {bound} time units, more than the simulated clock can count")]
    TimeOverflow { bound: u64 },

    #[error("simulation passed its termination bound of {bound} time units")]
    TerminationBound { bound: u64 },

    #[error("process {pid} was dispatched at time {time} while not ready")]
    InvalidDispatch { pid: String, time: u32 },

    #[error("no process was dispatched at time {time} although some were ready")]
    MissingDispatch { time: u32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SchedError {
    /// Errors caused by bad user input, which an interactive caller should re-prompt on.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SchedError::InvalidCount(_)
                | SchedError::EmptyPid
                | SchedError::NegativeArrival(_)
                | SchedError::NonPositiveBurst(_)
                | SchedError::NonPositiveQuantum(_)
                | SchedError::NotANumber(_)
                | SchedError::InvalidChoice(_)
                | SchedError::NotYesNo(_)
                | SchedError::DuplicatePid(_)
                | SchedError::TimeOverflow { .. }
        )
    }
}
