//! Errors returned by the scheduler and its file-backed helpers
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("{}", .violations.join(", "))]
    Validation { violations: Vec<String> },
    #[error("Need minimum {required} processes to run simulation, got {actual}.")]
    InsufficientProcesses { required: usize, actual: usize },
    #[error("No processes have been registered.")]
    EmptyProcessSet,
    #[error("Unknown scheduling algorithm '{0}'.")]
    UnknownAlgorithm(String),
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
    #[error("YAML Error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
