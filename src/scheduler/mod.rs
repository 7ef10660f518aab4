mod display;
mod error;
mod fcfs;
mod priority;
mod process;
pub mod report;
mod round_robin;
mod runner;
mod schedule;
mod srtf;

pub use display::DisplayTerminal;
pub use error::SchedError;
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use process::{Process, ProcessRecord};
pub use round_robin::RoundRobinScheduler;
pub use runner::{Dispatch, Policy, ProcessRunner};
pub use schedule::{GanttChart, Schedule};
pub use srtf::SrtfScheduler;

pub trait Scheduler {
    const NAME: &'static str;

    /// Runs every process to completion. The input is left untouched; the returned
    /// schedule lists the records in input order.
    fn schedule(&mut self, processes: &[Process]) -> Result<Schedule, SchedError>;
}

/// One algorithm's run over one process list, ready to be shown.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub show_priority: bool,
    pub schedule: Schedule,
}

impl Report {
    pub fn run<S: Scheduler>(
        scheduler: &mut S,
        processes: &[Process],
        show_priority: bool,
    ) -> Result<Self, SchedError> {
        Ok(Self {
            title: S::NAME.to_owned(),
            show_priority,
            schedule: scheduler.schedule(processes)?,
        })
    }
}
