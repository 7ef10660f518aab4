use super::{Dispatch, Policy, Process, ProcessRecord, ProcessRunner, SchedError, Schedule, Scheduler};
use std::collections::VecDeque;

pub const DEFAULT_QUANTUM: u32 = 2;

pub struct RoundRobinScheduler {
    queue: VecDeque<usize>,
    admitted: Vec<bool>,
    quantum: u32,
}

impl RoundRobinScheduler {
    pub fn new() -> Self {
        RoundRobinScheduler::with_quantum(DEFAULT_QUANTUM)
    }

    /// A zero quantum is treated as one time unit.
    pub fn with_quantum(quantum: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            admitted: Vec::new(),
            quantum: quantum.max(1),
        }
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    fn admit_arrivals(&mut self, records: &[ProcessRecord], ready: &[usize]) {
        if self.admitted.len() != records.len() {
            self.admitted = vec![false; records.len()];
        }

        let mut arrivals: Vec<usize> = ready
            .iter()
            .copied()
            .filter(|&index| !self.admitted[index])
            .collect();
        arrivals.sort_by_key(|&index| records[index].arrival());

        for index in arrivals {
            self.admitted[index] = true;
            self.queue.push_back(index);
        }
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin Scheduler";

    fn dispatch(
        &mut self,
        records: &[ProcessRecord],
        ready: &[usize],
        previous: Option<usize>,
    ) -> Option<Dispatch> {
        // Processes that arrived during the last slice queue up ahead of the preempted one.
        self.admit_arrivals(records, ready);
        if let Some(index) = previous {
            self.queue.push_back(index);
        }

        self.queue.pop_front().map(|index| Dispatch {
            index,
            slice: self.quantum.min(records[index].remaining()),
        })
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = <Self as Policy>::NAME;

    fn schedule(&mut self, processes: &[Process]) -> Result<Schedule, SchedError> {
        self.queue.clear();
        self.admitted.clear();
        ProcessRunner::new(self, processes)?.run()
    }
}
