use super::{Dispatch, Policy, Process, ProcessRecord, ProcessRunner, SchedError, Schedule, Scheduler};

/// Shortest remaining time first, preempting every time unit.
///
/// Ties on remaining time go to the earlier arrival, then to the earlier input position.
#[derive(Debug, Default)]
pub struct SrtfScheduler;

impl SrtfScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for SrtfScheduler {
    const NAME: &'static str = "Shortest Remaining Time First";

    fn dispatch(
        &mut self,
        records: &[ProcessRecord],
        ready: &[usize],
        _: Option<usize>,
    ) -> Option<Dispatch> {
        // `min_by_key` keeps the first minimum, and `ready` is in input order.
        ready
            .iter()
            .copied()
            .min_by_key(|&index| (records[index].remaining(), records[index].arrival()))
            .map(Dispatch::unit)
    }
}

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = <Self as Policy>::NAME;

    fn schedule(&mut self, processes: &[Process]) -> Result<Schedule, SchedError> {
        ProcessRunner::new(self, processes)?.run()
    }
}
