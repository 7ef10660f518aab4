use super::ProcessRecord;

/// A stretch of time during which the CPU ran one process, or idled when `pid` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttSegment {
    pub pid: Option<String>,
    pub start: u32,
    pub end: u32,
}

impl GanttSegment {
    pub fn label(&self) -> &str {
        self.pid.as_deref().unwrap_or("idle")
    }

    pub fn duration(&self) -> u32 {
        self.end - self.start
    }
}

/// Builds a Gantt chart from consecutive executions, merging back-to-back runs of the same
/// process into one segment.
#[derive(Debug, Default)]
pub struct GanttChart {
    segments: Vec<GanttSegment>,
}

impl GanttChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pid: Option<&str>, start: u32, end: u32) {
        if start == end {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.pid.as_deref() == pid && last.end == start {
                last.end = end;
                return;
            }
        }
        self.segments.push(GanttSegment {
            pid: pid.map(str::to_owned),
            start,
            end,
        });
    }

    pub fn into_segments(self) -> Vec<GanttSegment> {
        self.segments
    }
}

/// The outcome of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    records: Vec<ProcessRecord>,
    gantt: Vec<GanttSegment>,
    average_waiting: f64,
    average_turnaround: f64,
    average_response: f64,
}

impl Schedule {
    /// `records` must be in the caller's input order.
    pub fn new(records: Vec<ProcessRecord>, gantt: Vec<GanttSegment>) -> Self {
        let average = |metric: fn(&ProcessRecord) -> u32| {
            if records.is_empty() {
                0.0
            } else {
                records.iter().map(|r| metric(r) as f64).sum::<f64>() / records.len() as f64
            }
        };
        let average_waiting = average(ProcessRecord::waiting);
        let average_turnaround = average(ProcessRecord::turnaround);
        let average_response = average(|r: &ProcessRecord| r.response_time().unwrap_or(0));

        Self {
            records,
            gantt,
            average_waiting,
            average_turnaround,
            average_response,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn gantt(&self) -> &[GanttSegment] {
        &self.gantt
    }

    pub fn average_waiting(&self) -> f64 {
        self.average_waiting
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average_turnaround
    }

    pub fn average_response(&self) -> f64 {
        self.average_response
    }

    pub fn makespan(&self) -> u32 {
        self.gantt.last().map_or(0, |segment| segment.end)
    }

    /// Fraction of the makespan during which the CPU was busy.
    pub fn utilization(&self) -> f64 {
        let makespan = self.makespan();
        if makespan == 0 {
            return 0.0;
        }
        let busy: u32 = self
            .gantt
            .iter()
            .filter(|segment| segment.pid.is_some())
            .map(GanttSegment::duration)
            .sum();
        busy as f64 / makespan as f64
    }
}

#[cfg(test)]
impl Schedule {
    /// Looks a record up by id, for assertions on a single process.
    pub fn record(&self, pid: &str) -> Option<&ProcessRecord> {
        self.records.iter().find(|record| record.pid() == pid)
    }
}
