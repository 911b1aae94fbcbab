//! This module contains the definition of the process and its state machine
use std::fmt;

use getset::CopyGetters;
use serde_derive::{Deserialize, Serialize};

/// Response time of a process that has never been dispatched.
pub const UNSET_RESPONSE_TIME: i32 = -1;

///enum to represent the three states of a process
///ready to be dispatched, holding the cpu, finished (terminal)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessState {
    #[default]
    Ready,
    Running,
    Completed,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessState::Ready => write!(f, "ready"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Process {
    pid: usize,
    arrival_time: i32,
    burst_time: i32,
    remaining_time: i32,
    priority: i32,
    state: ProcessState,
    waiting_time: i32,
    turnaround_time: i32,
    completion_time: i32,
    response_time: i32,
}

impl Process {
    pub fn new(pid: usize, arrival_time: i32, burst_time: i32, priority: i32) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            priority,
            state: ProcessState::Ready,
            waiting_time: 0,
            turnaround_time: 0,
            completion_time: 0,
            response_time: UNSET_RESPONSE_TIME,
        }
    }

    /// Moves the process to `new_state` at `current_time`.
    ///
    /// Entering `Running` records the response time on the first dispatch only.
    /// Entering `Completed` records completion, turnaround and waiting time.
    /// Requesting the current state does nothing.
    pub fn update_state(&mut self, new_state: ProcessState, current_time: i32) {
        if self.state == new_state {
            return;
        }
        self.state = new_state;
        match new_state {
            ProcessState::Running => {
                if self.response_time == UNSET_RESPONSE_TIME {
                    self.response_time = current_time - self.arrival_time;
                }
            }
            ProcessState::Completed => {
                self.completion_time = current_time;
                self.turnaround_time = self.completion_time - self.arrival_time;
                self.waiting_time = self.turnaround_time - self.burst_time;
            }
            ProcessState::Ready => {}
        }
    }

    /// Consumes up to `ticks` of cpu time and returns how many were used.
    pub fn execute(&mut self, ticks: i32) -> i32 {
        let executed = ticks.clamp(0, self.remaining_time);
        self.remaining_time -= executed;
        executed
    }

    pub fn is_arrived(&self, current_time: i32) -> bool {
        self.arrival_time <= current_time
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Eligible for dispatch at `current_time`.
    pub fn is_ready(&self, current_time: i32) -> bool {
        self.is_arrived(current_time) && !self.is_complete()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.pid, self.arrival_time, self.burst_time, self.priority);
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "P{} [Arrival={}, Burst={}, Priority={}, State={}]",
            self.pid, self.arrival_time, self.burst_time, self.priority, self.state
        )
    }
}
