use super::SchedError;

/// The static description of a process, as handed to a scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: String,
    arrival: u32,
    burst: u32,
    priority: i32,
}

impl Process {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(pid: &str, arrival: u32, burst: u32) -> Self {
        Process::with_priority(pid, arrival, burst, Process::DEFAULT_PRIORITY)
    }

    /// Higher numeric priority means the process is more urgent.
    pub fn with_priority(pid: &str, arrival: u32, burst: u32, priority: i32) -> Self {
        Self {
            pid: pid.to_owned(),
            arrival,
            burst,
            priority,
        }
    }

    pub fn pid(&self) -> &str {
        &self.pid
    }

    pub fn arrival(&self) -> u32 {
        self.arrival
    }

    pub fn burst(&self) -> u32 {
        self.burst
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn validate(&self) -> Result<(), SchedError> {
        if self.pid.trim().is_empty() {
            return Err(SchedError::EmptyPid);
        }
        if self.burst == 0 {
            return Err(SchedError::NonPositiveBurst(0));
        }
        Ok(())
    }
}

/// A process together with the bookkeeping of one simulation run.
///
/// Records are mutated only while a scheduler runs; the finished [`Schedule`](super::Schedule)
/// hands them out read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    process: Process,
    remaining: u32,
    start_time: Option<u32>,
    completion: u32,
    turnaround: u32,
    waiting: u32,
}

impl ProcessRecord {
    pub fn new(process: Process) -> Self {
        let remaining = process.burst();
        Self {
            process,
            remaining,
            start_time: None,
            completion: 0,
            turnaround: 0,
            waiting: 0,
        }
    }

    pub fn pid(&self) -> &str {
        self.process.pid()
    }

    pub fn arrival(&self) -> u32 {
        self.process.arrival()
    }

    pub fn burst(&self) -> u32 {
        self.process.burst()
    }

    pub fn priority(&self) -> i32 {
        self.process.priority()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn start_time(&self) -> Option<u32> {
        self.start_time
    }

    pub fn completion(&self) -> u32 {
        self.completion
    }

    pub fn turnaround(&self) -> u32 {
        self.turnaround
    }

    pub fn waiting(&self) -> u32 {
        self.waiting
    }

    /// Time between arrival and the first dispatch.
    pub fn response_time(&self) -> Option<u32> {
        self.start_time.map(|start| start - self.arrival())
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn is_ready(&self, time: u32) -> bool {
        self.arrival() <= time && !self.is_finished()
    }

    /// Runs the process for `units` starting at `time` and returns the time it stops at.
    /// Completion metrics are filled in when the last unit is consumed.
    pub(super) fn run(&mut self, time: u32, units: u32) -> u32 {
        let units = units.min(self.remaining);
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
        self.remaining -= units;
        let end = time + units;
        if self.remaining == 0 {
            self.complete(end);
        }
        end
    }

    fn complete(&mut self, time: u32) {
        self.completion = time;
        self.turnaround = self.completion - self.arrival();
        self.waiting = self.turnaround - self.burst();
    }
}
