//! Load and save process sets as yaml files
use log::info;
use serde_derive::{Deserialize, Serialize};
use std::fs;

use crate::{error::Result, process::Process};

/// Registration parameters of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    pub pid: usize,
    pub arrival_time: i32,
    pub burst_time: i32,
    #[serde(default)]
    pub priority: i32,
}

impl ProcessConfig {
    pub fn new(pid: usize, arrival_time: i32, burst_time: i32, priority: i32) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
        }
    }
}

impl From<&Process> for ProcessConfig {
    fn from(process: &Process) -> Self {
        Self::new(
            process.pid(),
            process.arrival_time(),
            process.burst_time(),
            process.priority(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSetConfig {
    pub processes: Vec<ProcessConfig>,
}

/// load yaml file and return the process configs it lists
///
/// # Arguments
///
/// *  `file_path` - yaml file path
///
/// # Example
///
/// ```
/// use lib::process_creator::load_process_set;
///
/// let configs = load_process_set("tests/sample_processes/basic.yaml").unwrap();
/// assert_eq!(configs.len(), 3);
/// ```
pub fn load_process_set(file_path: &str) -> Result<Vec<ProcessConfig>> {
    let file_contents = fs::read_to_string(file_path)?;
    let process_set: ProcessSetConfig = serde_yaml::from_str(&file_contents)?;
    info!(
        "Loaded {} processes from {}",
        process_set.processes.len(),
        file_path
    );
    Ok(process_set.processes)
}

/// Writes the registration parameters of `processes`, dropping simulation state.
pub fn save_process_set(file_path: &str, processes: &[Process]) -> Result<()> {
    let process_set = ProcessSetConfig {
        processes: processes.iter().map(ProcessConfig::from).collect(),
    };
    let yaml = serde_yaml::to_string(&process_set)?;
    fs::write(file_path, yaml)?;
    info!("Saved {} processes to {}", processes.len(), file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchedulerError;
    use crate::output_log::create_yaml_file;
    use crate::scheduler::{tests::create_sample_scheduler, CpuScheduler, SchedulingAlgorithm};
    use std::fs::remove_file;

    #[test]
    fn test_load_process_set_normal() {
        let configs = load_process_set("tests/sample_processes/basic.yaml").unwrap();
        assert_eq!(
            configs,
            vec![
                ProcessConfig::new(1, 0, 5, 2),
                ProcessConfig::new(2, 1, 3, 1),
                ProcessConfig::new(3, 2, 8, 3),
            ]
        );
    }

    #[test]
    fn test_load_process_set_priority_defaults_to_zero() {
        let configs = load_process_set("tests/sample_processes/no_priority.yaml").unwrap();
        assert!(configs.iter().all(|config| config.priority == 0));
    }

    #[test]
    fn test_load_process_set_invalid_entries_are_rejected_on_registration() {
        let configs = load_process_set("tests/sample_processes/invalid.yaml").unwrap();
        let mut scheduler = CpuScheduler::new();
        match scheduler.register_process_set(&configs) {
            Err(SchedulerError::Validation { violations }) => {
                assert!(violations[0].contains("First process"))
            }
            _ => panic!("expected a validation error"),
        }
    }

    #[test]
    fn test_load_process_set_missing_file() {
        assert!(matches!(
            load_process_set("tests/sample_processes/missing.yaml"),
            Err(SchedulerError::Io(_))
        ));
    }

    #[test]
    fn test_load_process_set_malformed_yaml() {
        assert!(matches!(
            load_process_set("tests/sample_processes/malformed.yaml"),
            Err(SchedulerError::Yaml(_))
        ));
    }

    #[test]
    fn test_save_process_set_drops_simulation_state() {
        let mut scheduler = create_sample_scheduler();
        scheduler.run(SchedulingAlgorithm::RoundRobin).unwrap();

        let file_path = create_yaml_file("../outputs", "test_save_process_set").unwrap();
        save_process_set(&file_path, scheduler.processes()).unwrap();

        let mut restored = CpuScheduler::new();
        restored
            .register_process_set(&load_process_set(&file_path).unwrap())
            .unwrap();
        scheduler.reset();
        assert_eq!(restored.get_processes(), scheduler.get_processes());

        remove_file(file_path).unwrap();
    }
}
