use super::{GanttChart, Process, ProcessRecord, SchedError, Schedule};
use log::{debug, error, info, trace};
use std::collections::HashSet;

/// A selection rule for the time-stepped simulation.
pub trait Policy {
    const NAME: &'static str;

    /// Picks the next process among `ready`, which holds indices into `records` in input
    /// order. `previous` is the process dispatched last, if it is still unfinished.
    /// Returns `None` only when `ready` is empty.
    fn dispatch(
        &mut self,
        records: &[ProcessRecord],
        ready: &[usize],
        previous: Option<usize>,
    ) -> Option<Dispatch>;
}

/// The process to run next and for how many time units before deciding again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub index: usize,
    pub slice: u32,
}

impl Dispatch {
    pub fn unit(index: usize) -> Self {
        Self { index, slice: 1 }
    }
}

/// Checks every process, rejects reused ids, and rejects process sets whose schedule
/// would not fit on the `u32` clock.
pub fn validate_processes(processes: &[Process]) -> Result<(), SchedError> {
    let mut seen = HashSet::new();
    for process in processes {
        process.validate()?;
        if !seen.insert(process.pid()) {
            return Err(SchedError::DuplicatePid(process.pid().to_owned()));
        }
    }

    let bound = termination_bound(processes);
    if bound > u32::MAX as u64 {
        return Err(SchedError::TimeOverflow { bound });
    }
    Ok(())
}

/// Upper bound on the simulated time any schedule of `processes` can need.
pub fn termination_bound(processes: &[Process]) -> u64 {
    let last_arrival = processes.iter().map(|p| p.arrival() as u64).max().unwrap_or(0);
    let total_burst: u64 = processes.iter().map(|p| p.burst() as u64).sum();
    last_arrival + total_burst
}

/// Drives a [`Policy`] over simulated time, one time unit at a time.
pub struct ProcessRunner<'a, P> {
    policy: &'a mut P,
    records: Vec<ProcessRecord>,
    gantt: GanttChart,
    clock: u32,
    completed: usize,
    bound: u64,
}

impl<'a, P: Policy> ProcessRunner<'a, P> {
    pub fn new(policy: &'a mut P, processes: &[Process]) -> Result<Self, SchedError> {
        validate_processes(processes)?;

        Ok(Self {
            policy,
            records: processes.iter().cloned().map(ProcessRecord::new).collect(),
            gantt: GanttChart::new(),
            clock: 0,
            completed: 0,
            bound: termination_bound(processes),
        })
    }

    fn ready_set(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_ready(self.clock))
            .map(|(index, _)| index)
            .collect()
    }

    fn check_bound(&self) -> Result<(), SchedError> {
        if self.clock as u64 > self.bound {
            error!(
                "{}: clock {} passed the termination bound {}",
                P::NAME,
                self.clock,
                self.bound
            );
            return Err(SchedError::TerminationBound { bound: self.bound });
        }
        Ok(())
    }

    fn run_process(&mut self, dispatch: Dispatch, ready: &[usize]) -> Result<bool, SchedError> {
        let record = match self.records.get_mut(dispatch.index) {
            Some(record) if ready.contains(&dispatch.index) => record,
            Some(record) => {
                error!("{}: dispatched {} while not ready", P::NAME, record.pid());
                return Err(SchedError::InvalidDispatch {
                    pid: record.pid().to_owned(),
                    time: self.clock,
                });
            }
            None => {
                error!("{}: dispatched unknown index {}", P::NAME, dispatch.index);
                return Err(SchedError::InvalidDispatch {
                    pid: format!("#{}", dispatch.index),
                    time: self.clock,
                });
            }
        };

        debug!(
            "{}: t={} run {} for {} unit(s), remaining {}",
            P::NAME,
            self.clock,
            record.pid(),
            dispatch.slice.max(1).min(record.remaining()),
            record.remaining()
        );

        // Step unit by unit so the bound check covers every tick of a slice.
        let mut left = dispatch.slice.max(1);
        while left > 0 && !record.is_finished() {
            let end = record.run(self.clock, 1);
            self.gantt.record(Some(record.pid()), self.clock, end);
            self.clock = end;
            left -= 1;
        }

        let finished = record.is_finished();
        if finished {
            self.completed += 1;
            debug!(
                "{}: {} completed at {}",
                P::NAME,
                record.pid(),
                record.completion()
            );
        }
        self.check_bound()?;
        Ok(finished)
    }

    /// Returns `false` once every process has completed.
    fn step(&mut self, previous: &mut Option<usize>) -> Result<bool, SchedError> {
        if self.completed == self.records.len() {
            return Ok(false);
        }

        let ready = self.ready_set();
        if ready.is_empty() {
            trace!("{}: t={} idle", P::NAME, self.clock);
            self.gantt.record(None, self.clock, self.clock + 1);
            self.clock += 1;
            *previous = None;
            self.check_bound()?;
            return Ok(true);
        }

        let dispatch = match self.policy.dispatch(&self.records, &ready, *previous) {
            Some(dispatch) => dispatch,
            None => {
                error!("{}: nothing dispatched at t={}", P::NAME, self.clock);
                return Err(SchedError::MissingDispatch { time: self.clock });
            }
        };
        let finished = self.run_process(dispatch, &ready)?;
        *previous = if finished { None } else { Some(dispatch.index) };
        Ok(true)
    }

    pub fn run(mut self) -> Result<Schedule, SchedError> {
        if self.records.is_empty() {
            return Ok(Schedule::empty());
        }

        let mut previous = None;
        while self.step(&mut previous)? {}

        let schedule = Schedule::new(self.records, self.gantt.into_segments());
        info!(
            "{}: {} processes finished at t={}, avg waiting {:.2}, avg turnaround {:.2}",
            P::NAME,
            schedule.records().len(),
            schedule.makespan(),
            schedule.average_waiting(),
            schedule.average_turnaround()
        );
        Ok(schedule)
    }
}
