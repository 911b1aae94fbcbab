pub mod error;
pub mod fixed_priority_scheduler;
pub mod log;
pub mod output_log;
pub mod process;
pub mod process_creator;
pub mod round_robin_scheduler;
pub mod scheduler;
pub mod shortest_job_first_scheduler;
pub mod timeline;

pub use error::{Result, SchedulerError};
pub use process::{Process, ProcessState};
pub use scheduler::{CpuScheduler, PreemptiveType, SchedulingAlgorithm};
pub use timeline::{ExecutionSpan, Timeline};
