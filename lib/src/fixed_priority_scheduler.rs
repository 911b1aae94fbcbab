use log::info;

use crate::{
    error::Result,
    process::Process,
    scheduler::{CpuScheduler, PreemptiveType},
    timeline::Timeline,
};

impl CpuScheduler {
    /// Priority scheduling; smaller values have higher priority.
    ///
    /// Same selection loop as `shortest_job_first` with `priority` as the key.
    pub fn priority_scheduling(&mut self, preemptive_type: PreemptiveType) -> Result<Timeline> {
        self.ensure_runnable("priority")?;
        let timeline = self.schedule_by_key(preemptive_type, Process::priority);
        info!(
            "Priority ({:?}) finished: {} spans, makespan {}",
            preemptive_type,
            timeline.len(),
            self.total_time()
        );
        Ok(timeline)
    }
}
