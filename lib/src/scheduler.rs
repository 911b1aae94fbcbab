//! Single cpu scheduler owning the registered process set
use std::{fmt, str::FromStr};

use log::{debug, info, warn};
use serde_derive::{Deserialize, Serialize};

use crate::{
    error::{Result, SchedulerError},
    log::Statistics,
    process::{Process, ProcessState},
    process_creator::ProcessConfig,
    timeline::Timeline,
};

pub const TIME_QUANTUM: i32 = 3;
pub const MIN_PROCESSES: usize = 3;
pub const MAX_PROCESSES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreemptiveType {
    NonPreemptive,
    Preemptive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingAlgorithm {
    RoundRobin,
    ShortestJobFirst,
    ShortestRemainingTimeFirst,
    Priority,
    PreemptivePriority,
}

impl SchedulingAlgorithm {
    pub const ALL: [SchedulingAlgorithm; 5] = [
        SchedulingAlgorithm::RoundRobin,
        SchedulingAlgorithm::ShortestJobFirst,
        SchedulingAlgorithm::ShortestRemainingTimeFirst,
        SchedulingAlgorithm::Priority,
        SchedulingAlgorithm::PreemptivePriority,
    ];
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchedulingAlgorithm::RoundRobin => write!(f, "rr"),
            SchedulingAlgorithm::ShortestJobFirst => write!(f, "sjf"),
            SchedulingAlgorithm::ShortestRemainingTimeFirst => write!(f, "srtf"),
            SchedulingAlgorithm::Priority => write!(f, "priority"),
            SchedulingAlgorithm::PreemptivePriority => write!(f, "priority_p"),
        }
    }
}

impl FromStr for SchedulingAlgorithm {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rr" | "round_robin" => Ok(SchedulingAlgorithm::RoundRobin),
            "sjf" => Ok(SchedulingAlgorithm::ShortestJobFirst),
            "srtf" | "sjf_p" => Ok(SchedulingAlgorithm::ShortestRemainingTimeFirst),
            "priority" => Ok(SchedulingAlgorithm::Priority),
            "priority_p" => Ok(SchedulingAlgorithm::PreemptivePriority),
            _ => Err(SchedulerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Owns the processes in registration order. Every run mutates them in place,
/// so a second run continues from the completed state unless `reset` is called.
#[derive(Debug, Clone, Default)]
pub struct CpuScheduler {
    pub(crate) processes: Vec<Process>,
    pub(crate) total_time: i32,
}

impl CpuScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a process after checking every constraint; all violations are
    /// reported together.
    pub fn add_process(
        &mut self,
        pid: usize,
        arrival_time: i32,
        burst_time: i32,
        priority: i32,
    ) -> Result<()> {
        self.validate_input(arrival_time, burst_time, priority)?;
        let process = Process::new(pid, arrival_time, burst_time, priority);
        info!("Process added: {}", process);
        self.processes.push(process);
        Ok(())
    }

    fn validate_input(&self, arrival_time: i32, burst_time: i32, priority: i32) -> Result<()> {
        let mut violations = Vec::new();

        if arrival_time < 0 {
            violations.push("Arrival time cannot be negative".to_string());
        }
        if burst_time <= 0 {
            violations.push("Burst time must be positive".to_string());
        }
        if priority < 0 {
            violations.push("Priority cannot be negative".to_string());
        }
        if self.processes.len() >= MAX_PROCESSES {
            violations.push(format!("Maximum process limit ({}) reached", MAX_PROCESSES));
        }
        if self.processes.is_empty() && arrival_time != 0 {
            violations.push("First process must arrive at time 0".to_string());
        }
        if arrival_time >= 0
            && burst_time > 0
            && self.schedule_horizon(arrival_time, burst_time).is_none()
        {
            violations.push(format!(
                "Latest arrival plus total burst time exceeds {}",
                i32::MAX
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchedulerError::Validation { violations })
        }
    }

    /// Upper bound on the schedule length once a process with `arrival_time`
    /// and `burst_time` joins the set, `None` if it does not fit in `i32`.
    /// Every run finishes by the latest arrival plus the total burst time.
    fn schedule_horizon(&self, arrival_time: i32, burst_time: i32) -> Option<i32> {
        let latest_arrival = self
            .processes
            .iter()
            .map(Process::arrival_time)
            .fold(arrival_time, i32::max);
        self.processes
            .iter()
            .map(Process::burst_time)
            .try_fold(latest_arrival, |total, burst| total.checked_add(burst))?
            .checked_add(burst_time)
    }

    /// Replaces the registered processes with `configs`. Nothing changes if any
    /// entry is rejected.
    pub fn register_process_set(&mut self, configs: &[ProcessConfig]) -> Result<()> {
        let mut scheduler = CpuScheduler::new();
        for config in configs {
            scheduler.add_process(
                config.pid,
                config.arrival_time,
                config.burst_time,
                config.priority,
            )?;
        }
        *self = scheduler;
        Ok(())
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn get_processes(&self) -> Vec<Process> {
        self.processes.clone()
    }

    pub fn get_process(&self, pid: usize) -> Option<&Process> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn clear_processes(&mut self) {
        self.processes.clear();
        self.total_time = 0;
        info!("Cleared all processes");
    }

    /// Restores every process to its registered state so the next run starts fresh.
    pub fn reset(&mut self) {
        for process in self.processes.iter_mut() {
            process.reset();
        }
        self.total_time = 0;
        info!("Reset {} processes", self.processes.len());
    }

    pub fn total_time(&self) -> i32 {
        self.total_time
    }

    pub fn time_quantum(&self) -> i32 {
        TIME_QUANTUM
    }

    pub fn min_processes(&self) -> usize {
        MIN_PROCESSES
    }

    pub fn max_processes(&self) -> usize {
        MAX_PROCESSES
    }

    pub fn run(&mut self, algorithm: SchedulingAlgorithm) -> Result<Timeline> {
        match algorithm {
            SchedulingAlgorithm::RoundRobin => self.round_robin(),
            SchedulingAlgorithm::ShortestJobFirst => {
                self.shortest_job_first(PreemptiveType::NonPreemptive)
            }
            SchedulingAlgorithm::ShortestRemainingTimeFirst => {
                self.shortest_job_first(PreemptiveType::Preemptive)
            }
            SchedulingAlgorithm::Priority => {
                self.priority_scheduling(PreemptiveType::NonPreemptive)
            }
            SchedulingAlgorithm::PreemptivePriority => {
                self.priority_scheduling(PreemptiveType::Preemptive)
            }
        }
    }

    /// Averages waiting, turnaround and response time over every registered process.
    pub fn calculate_statistics(&self) -> Result<Statistics> {
        if self.processes.is_empty() {
            return Err(SchedulerError::EmptyProcessSet);
        }
        let count = self.processes.len() as f32;
        let mean = |field: fn(&Process) -> i32| {
            self.processes.iter().map(|p| field(p) as f32).sum::<f32>() / count
        };

        Ok(Statistics {
            average_waiting_time: mean(Process::waiting_time),
            average_turnaround_time: mean(Process::turnaround_time),
            average_response_time: mean(Process::response_time),
        })
    }

    pub(crate) fn ensure_runnable(&self, alg_name: &str) -> Result<()> {
        if self.processes.len() < MIN_PROCESSES {
            return Err(SchedulerError::InsufficientProcesses {
                required: MIN_PROCESSES,
                actual: self.processes.len(),
            });
        }
        if self.processes.iter().all(Process::is_complete) {
            warn!(
                "Every process is already completed, {} will produce an empty timeline. Call reset() first for a fresh run.",
                alg_name
            );
        }
        Ok(())
    }

    pub(crate) fn has_pending_work(&self) -> bool {
        self.processes.iter().any(|process| !process.is_complete())
    }

    pub(crate) fn update_total_time(&mut self, current_time: i32) {
        self.total_time = self.total_time.max(current_time);
    }

    /// Index of the eligible process with the smallest `key`; the first
    /// registered one wins ties.
    fn select_process<F>(&self, current_time: i32, key: &F) -> Option<usize>
    where
        F: Fn(&Process) -> i32,
    {
        self.processes
            .iter()
            .enumerate()
            .filter(|&(_, process)| process.is_ready(current_time))
            .min_by_key(|&(_, process)| key(process))
            .map(|(index, _)| index)
    }

    /// Shared loop for the key-selected disciplines (SJF, priority).
    ///
    /// Non-preemptive runs the selected process to completion in one span.
    /// Preemptive reselects every tick and records one span per tick.
    pub(crate) fn schedule_by_key<F>(&mut self, preemptive_type: PreemptiveType, key: F) -> Timeline
    where
        F: Fn(&Process) -> i32,
    {
        let mut timeline = Timeline::new();
        let mut current_time = 0;
        let mut running: Option<usize> = None;

        while self.has_pending_work() {
            let Some(selected) = self.select_process(current_time, &key) else {
                //cpu idle until the next arrival
                current_time += 1;
                continue;
            };

            if let Some(preempted) = running.filter(|&index| index != selected) {
                self.processes[preempted].update_state(ProcessState::Ready, current_time);
            }

            let start_time = current_time;
            let process = &mut self.processes[selected];
            let ticks = match preemptive_type {
                PreemptiveType::NonPreemptive => process.remaining_time(),
                PreemptiveType::Preemptive => 1,
            };
            process.update_state(ProcessState::Running, start_time);
            current_time += process.execute(ticks);
            timeline.push(process.pid(), start_time, current_time);
            debug!("P{} runs [{}, {})", process.pid(), start_time, current_time);

            if process.is_complete() {
                process.update_state(ProcessState::Completed, current_time);
                running = None;
            } else {
                running = Some(selected);
            }
        }

        self.update_total_time(current_time);
        timeline
    }
}
