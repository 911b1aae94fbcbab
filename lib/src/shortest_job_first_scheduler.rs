use log::info;

use crate::{
    error::Result,
    process::Process,
    scheduler::{CpuScheduler, PreemptiveType},
    timeline::Timeline,
};

impl CpuScheduler {
    /// Shortest-Job-First, or Shortest-Remaining-Time-First when preemptive.
    ///
    /// The eligible process with the least remaining time is selected; the
    /// first registered one wins ties. Preemptive runs reselect every tick and
    /// record one span per tick.
    pub fn shortest_job_first(&mut self, preemptive_type: PreemptiveType) -> Result<Timeline> {
        self.ensure_runnable("shortest job first")?;
        let timeline = self.schedule_by_key(preemptive_type, Process::remaining_time);
        info!(
            "Shortest job first ({:?}) finished: {} spans, makespan {}",
            preemptive_type,
            timeline.len(),
            self.total_time()
        );
        Ok(timeline)
    }
}
