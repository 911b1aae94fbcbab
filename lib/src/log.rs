use serde_derive::{Deserialize, Serialize};

use crate::{
    error::Result,
    output_log::append_info_to_yaml,
    process::{Process, ProcessState},
    scheduler::{CpuScheduler, SchedulingAlgorithm},
    timeline::Timeline,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub average_waiting_time: f32,
    pub average_turnaround_time: f32,
    pub average_response_time: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessLog {
    pub pid: usize,
    pub arrival_time: i32,
    pub burst_time: i32,
    pub priority: i32,
    pub state: ProcessState,
    pub completion_time: i32,
    pub waiting_time: i32,
    pub turnaround_time: i32,
    pub response_time: i32,
}

impl ProcessLog {
    pub fn new(process: &Process) -> Self {
        Self {
            pid: process.pid(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            priority: process.priority(),
            state: process.state(),
            completion_time: process.completion_time(),
            waiting_time: process.waiting_time(),
            turnaround_time: process.turnaround_time(),
            response_time: process.response_time(),
        }
    }
}

/// Cpu-side performance figures of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorLog {
    pub total_proc_time: i32,
    pub schedule_length: i32,
    pub utilization: f32,
    pub throughput: f32,
    pub context_switches: usize,
}

impl ProcessorLog {
    pub fn new(scheduler: &CpuScheduler, timeline: &Timeline) -> Self {
        let mut processor_log = Self {
            total_proc_time: scheduler.processes().iter().map(Process::burst_time).sum(),
            schedule_length: scheduler.total_time(),
            context_switches: timeline.context_switches(),
            ..Default::default()
        };
        let completed = scheduler
            .processes()
            .iter()
            .filter(|process| process.state() == ProcessState::Completed)
            .count();
        processor_log.calculate_utilization();
        processor_log.calculate_throughput(completed);
        processor_log
    }

    /// Busy share of the schedule length, in percent.
    pub fn calculate_utilization(&mut self) {
        self.utilization = if self.schedule_length > 0 {
            self.total_proc_time as f32 * 100.0 / self.schedule_length as f32
        } else {
            0.0
        };
    }

    /// Completed processes per tick.
    pub fn calculate_throughput(&mut self, completed: usize) {
        self.throughput = if self.schedule_length > 0 {
            completed as f32 / self.schedule_length as f32
        } else {
            0.0
        };
    }
}

/// Everything worth keeping from one scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuSchedulerLog {
    pub algorithm: SchedulingAlgorithm,
    pub statistics: Statistics,
    pub processor_log: ProcessorLog,
    pub process_logs: Vec<ProcessLog>,
    pub timeline: Timeline,
}

impl CpuSchedulerLog {
    pub fn new(
        algorithm: SchedulingAlgorithm,
        scheduler: &CpuScheduler,
        timeline: &Timeline,
    ) -> Result<Self> {
        Ok(Self {
            algorithm,
            statistics: scheduler.calculate_statistics()?,
            processor_log: ProcessorLog::new(scheduler, timeline),
            process_logs: scheduler.processes().iter().map(ProcessLog::new).collect(),
            timeline: timeline.clone(),
        })
    }

    pub fn dump_log_to_yaml(&self, file_path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        append_info_to_yaml(file_path, &yaml)
    }
}
