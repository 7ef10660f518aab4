use super::{Dispatch, Policy, Process, ProcessRecord, ProcessRunner, SchedError, Schedule, Scheduler};
use std::cmp::Reverse;

/// Preemptive priority scheduling. A higher priority number wins; ties go to the earlier
/// arrival, then to the earlier input position.
#[derive(Debug, Default)]
pub struct PriorityScheduler;

impl PriorityScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for PriorityScheduler {
    const NAME: &'static str = "Preemptive Priority Scheduler";

    fn dispatch(
        &mut self,
        records: &[ProcessRecord],
        ready: &[usize],
        _: Option<usize>,
    ) -> Option<Dispatch> {
        ready
            .iter()
            .copied()
            .min_by_key(|&index| {
                let record = &records[index];
                (Reverse(record.priority()), record.arrival())
            })
            .map(Dispatch::unit)
    }
}

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = <Self as Policy>::NAME;

    fn schedule(&mut self, processes: &[Process]) -> Result<Schedule, SchedError> {
        ProcessRunner::new(self, processes)?.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::priority_dataset;
    use proptest::prelude::*;

    #[test]
    fn priority_dataset_matches_hand_trace() {
        let schedule = PriorityScheduler::new().schedule(&priority_dataset()).unwrap();

        let rows: Vec<_> = schedule
            .records()
            .iter()
            .map(|r| (r.pid(), r.completion(), r.turnaround(), r.waiting()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("P1", 15, 15, 11),
                ("P2", 12, 11, 8),
                ("P3", 3, 1, 0),
                ("P4", 8, 5, 0),
                ("P5", 10, 6, 4),
            ]
        );

        let gantt: Vec<_> = schedule
            .gantt()
            .iter()
            .map(|s| (s.label(), s.start))
            .collect();
        assert_eq!(
            gantt,
            vec![
                ("P1", 0),
                ("P2", 1),
                ("P3", 2),
                ("P4", 3),
                ("P5", 8),
                ("P2", 10),
                ("P1", 12)
            ]
        );
        assert!((schedule.average_turnaround() - 7.6).abs() < 1e-9);
        assert!((schedule.average_waiting() - 4.6).abs() < 1e-9);
    }

    #[test]
    fn urgent_arrival_preempts_and_finishes_promptly() {
        let schedule = PriorityScheduler::new().schedule(&priority_dataset()).unwrap();
        let p3 = schedule.record("P3").unwrap();
        assert_eq!(p3.start_time(), Some(p3.arrival()));
        assert_eq!(p3.waiting(), 0);
    }

    #[test]
    fn equal_priority_prefers_earlier_arrival() {
        let schedule = PriorityScheduler::new().schedule(&priority_dataset()).unwrap();
        let p4 = schedule.record("P4").unwrap();
        let p5 = schedule.record("P5").unwrap();
        assert!(p4.completion() <= p5.start_time().unwrap());
    }

    #[test]
    fn nothing_is_dispatched_from_an_empty_ready_set() {
        let records = [ProcessRecord::new(Process::with_priority("A", 3, 1, 9))];
        assert_eq!(PriorityScheduler::new().dispatch(&records, &[], None), None);
    }

    #[test]
    fn lower_numbers_never_preempt() {
        let processes = [
            Process::with_priority("high", 0, 3, 10),
            Process::with_priority("low", 1, 1, -5),
        ];
        let schedule = PriorityScheduler::new().schedule(&processes).unwrap();
        assert_eq!(schedule.record("high").unwrap().completion(), 3);
        assert_eq!(schedule.record("low").unwrap().completion(), 4);
        assert_eq!(schedule.gantt().len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn running_process_always_has_highest_priority(
            specs in prop::collection::vec((0u32..10, 1u32..6, -3i32..4), 1..8)
        ) {
            let processes: Vec<Process> = specs
                .iter()
                .enumerate()
                .map(|(i, &(arrival, burst, priority))| {
                    Process::with_priority(&format!("P{}", i + 1), arrival, burst, priority)
                })
                .collect();
            let schedule = PriorityScheduler::new().schedule(&processes).unwrap();
            let mut remaining: Vec<u32> = processes.iter().map(Process::burst).collect();

            for segment in schedule.gantt() {
                for time in segment.start..segment.end {
                    let ready: Vec<usize> = (0..processes.len())
                        .filter(|&i| processes[i].arrival() <= time && remaining[i] > 0)
                        .collect();
                    if let Some(pid) = &segment.pid {
                        let running = processes.iter().position(|p| p.pid() == pid).unwrap();
                        let best = ready
                            .iter()
                            .copied()
                            .min_by_key(|&i| (Reverse(processes[i].priority()), processes[i].arrival(), i))
                            .unwrap();
                        prop_assert_eq!(running, best);
                        remaining[running] -= 1;
                    } else {
                        prop_assert!(ready.is_empty());
                    }
                }
            }

            for record in schedule.records() {
                prop_assert_eq!(record.turnaround(), record.completion() - record.arrival());
                prop_assert_eq!(record.waiting(), record.turnaround() - record.burst());
            }
        }
    }
}
