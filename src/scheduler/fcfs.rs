use super::{runner, GanttChart, Process, ProcessRecord, SchedError, Schedule, Scheduler};
use log::{debug, info};

/// First come, first served. Processes run to completion in arrival order; simultaneous
/// arrivals keep their input order.
#[derive(Debug, Default)]
pub struct FcfsScheduler;

impl FcfsScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First Come First Served";

    fn schedule(&mut self, processes: &[Process]) -> Result<Schedule, SchedError> {
        runner::validate_processes(processes)?;
        if processes.is_empty() {
            return Ok(Schedule::empty());
        }

        let mut records: Vec<ProcessRecord> =
            processes.iter().cloned().map(ProcessRecord::new).collect();

        // `sort_by_key` is stable, which gives the input-order tie-break.
        let mut order: Vec<usize> = (0..records.len()).collect();
        order.sort_by_key(|&index| records[index].arrival());

        let mut gantt = GanttChart::new();
        let mut current_time = 0;
        for index in order {
            let record = &mut records[index];
            if current_time < record.arrival() {
                gantt.record(None, current_time, record.arrival());
                current_time = record.arrival();
            }

            let burst = record.burst();
            let completion = record.run(current_time, burst);
            debug!(
                "{}: {} ran {}..{}",
                Self::NAME,
                record.pid(),
                current_time,
                completion
            );
            gantt.record(Some(record.pid()), current_time, completion);
            current_time = completion;
        }

        let schedule = Schedule::new(records, gantt.into_segments());
        info!(
            "{}: {} processes finished at t={}, avg waiting {:.2}, avg turnaround {:.2}",
            Self::NAME,
            schedule.records().len(),
            schedule.makespan(),
            schedule.average_waiting(),
            schedule.average_turnaround()
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::fcfs_dataset;
    use proptest::prelude::*;

    #[test]
    fn fcfs_dataset_matches_textbook_example() {
        let schedule = FcfsScheduler::new().schedule(&fcfs_dataset()).unwrap();

        let rows: Vec<_> = schedule
            .records()
            .iter()
            .map(|r| (r.pid(), r.completion(), r.turnaround(), r.waiting()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("P1", 8, 8, 0),
                ("P2", 12, 11, 7),
                ("P3", 21, 19, 10),
                ("P4", 26, 23, 18),
            ]
        );
        assert!((schedule.average_waiting() - 8.75).abs() < 1e-9);
        assert!((schedule.average_turnaround() - 15.25).abs() < 1e-9);
    }

    #[test]
    fn cpu_idles_until_next_arrival() {
        let processes = [Process::new("late", 5, 2), Process::new("early", 1, 1)];
        let schedule = FcfsScheduler::new().schedule(&processes).unwrap();

        let gantt: Vec<_> = schedule
            .gantt()
            .iter()
            .map(|s| (s.label(), s.start, s.end))
            .collect();
        assert_eq!(
            gantt,
            vec![("idle", 0, 1), ("early", 1, 2), ("idle", 2, 5), ("late", 5, 7)]
        );
        // Records stay in input order even though "early" ran first.
        assert_eq!(schedule.records()[0].pid(), "late");
        assert_eq!(schedule.record("late").unwrap().waiting(), 0);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let schedule = FcfsScheduler::new().schedule(&[]).unwrap();
        assert_eq!(schedule.average_waiting(), 0.0);
        assert_eq!(schedule.average_turnaround(), 0.0);
        assert!(schedule.gantt().is_empty());
    }

    #[test]
    fn invalid_input_is_rejected() {
        let processes = [Process::new("", 0, 1)];
        assert!(matches!(
            FcfsScheduler::new().schedule(&processes),
            Err(SchedError::EmptyPid)
        ));
    }

    #[test]
    fn schedules_longer_than_the_clock_are_rejected_not_wrapped() {
        let late = [Process::new("A", u32::MAX, 1)];
        assert!(matches!(
            FcfsScheduler::new().schedule(&late),
            Err(SchedError::TimeOverflow { .. })
        ));

        let long = [Process::new("A", 0, u32::MAX), Process::new("B", 0, 1)];
        assert!(matches!(
            FcfsScheduler::new().schedule(&long),
            Err(SchedError::TimeOverflow { .. })
        ));

        let edge = [Process::new("A", u32::MAX - 1, 1)];
        let schedule = FcfsScheduler::new().schedule(&edge).unwrap();
        assert_eq!(schedule.record("A").unwrap().completion(), u32::MAX);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn simultaneous_arrivals_keep_input_order(
            bursts in prop::collection::vec(1u32..10, 1..8),
            arrival in 0u32..5,
        ) {
            let processes: Vec<Process> = bursts
                .iter()
                .enumerate()
                .map(|(i, &burst)| Process::new(&format!("P{}", i + 1), arrival, burst))
                .collect();
            let schedule = FcfsScheduler::new().schedule(&processes).unwrap();

            let ran: Vec<&str> = schedule.gantt().iter().filter_map(|s| s.pid.as_deref()).collect();
            let listed: Vec<&str> = processes.iter().map(Process::pid).collect();
            prop_assert_eq!(ran, listed);
        }

        #[test]
        fn stored_metrics_can_be_recomputed(
            specs in prop::collection::vec((0u32..20, 1u32..10), 1..10)
        ) {
            let processes: Vec<Process> = specs
                .iter()
                .enumerate()
                .map(|(i, &(arrival, burst))| Process::new(&format!("P{}", i + 1), arrival, burst))
                .collect();
            let schedule = FcfsScheduler::new().schedule(&processes).unwrap();

            let mut turnaround_sum = 0;
            for record in schedule.records() {
                prop_assert_eq!(record.turnaround(), record.completion() - record.arrival());
                prop_assert_eq!(record.waiting(), record.turnaround() - record.burst());
                turnaround_sum += record.turnaround();
            }
            let n = processes.len() as f64;
            prop_assert!((schedule.average_turnaround() - turnaround_sum as f64 / n).abs() < 1e-9);
        }
    }
}
