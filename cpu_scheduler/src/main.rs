use clap::Parser;
use env_logger::Env;
use lib::log::CpuSchedulerLog;
use lib::output_log::create_scheduler_log_yaml_file;
use lib::process_creator::load_process_set;
use lib::{CpuScheduler, SchedulingAlgorithm};
use log::{error, info};

#[derive(Parser)]
#[clap(
    name = "cpu_scheduler",
    version = "1.0",
    about = "About:
    Simulates single cpu scheduling of a process set with Round Robin (quantum 3),
    Shortest-Job-First and Priority scheduling, each preemptive or not.
    The process set needs between 3 and 10 processes and the first one must arrive at time 0."
)]
struct ArgParser {
    ///Path to the process set yaml file.
    #[clap(short = 'f', long = "process_file_path", required = true)]
    process_file_path: String,
    ///Scheduling algorithm: rr, sjf, srtf, priority, priority_p or all.
    #[clap(short = 'a', long = "algorithm", default_value = "rr")]
    algorithm: String,
    ///Path to output directory.
    #[clap(short = 'o', long = "output_dir_path", default_value = "../outputs")]
    output_dir_path: String,
}

fn parse_algorithms(name: &str) -> lib::Result<Vec<SchedulingAlgorithm>> {
    if name.eq_ignore_ascii_case("all") {
        Ok(SchedulingAlgorithm::ALL.to_vec())
    } else {
        Ok(vec![name.parse()?])
    }
}

fn format_gantt_chart(log: &CpuSchedulerLog) -> String {
    log.timeline
        .iter()
        .map(|span| format!("P{}[{}-{})", span.pid, span.start_time, span.finish_time))
        .collect::<Vec<String>>()
        .join(" ")
}

fn report(log: &CpuSchedulerLog) {
    info!("Algorithm: {}", log.algorithm);
    info!("Gantt chart: {}", format_gantt_chart(log));
    info!(
        "Average Waiting Time: {:.2}",
        log.statistics.average_waiting_time
    );
    info!(
        "Average Turnaround Time: {:.2}",
        log.statistics.average_turnaround_time
    );
    info!(
        "Average Response Time: {:.2}",
        log.statistics.average_response_time
    );
    info!("CPU Utilization: {:.2}%", log.processor_log.utilization);
    info!(
        "Throughput: {:.2} processes/unit",
        log.processor_log.throughput
    );
    info!("Context Switches: {}", log.processor_log.context_switches);
    for process_log in &log.process_logs {
        info!(
            "P{}: Wait={}, Turnaround={}, Response={}",
            process_log.pid,
            process_log.waiting_time,
            process_log.turnaround_time,
            process_log.response_time
        );
    }
}

/// Runs `algorithm` from a fresh process state and dumps the result.
fn simulate(
    scheduler: &mut CpuScheduler,
    algorithm: SchedulingAlgorithm,
    output_dir_path: &str,
) -> lib::Result<String> {
    scheduler.reset();
    let timeline = scheduler.run(algorithm)?;
    let log = CpuSchedulerLog::new(algorithm, scheduler, &timeline)?;
    report(&log);

    let file_path = create_scheduler_log_yaml_file(output_dir_path, &algorithm.to_string())?;
    log.dump_log_to_yaml(&file_path)?;
    info!("Log written to {}", file_path);
    Ok(file_path)
}

fn run(arg: &ArgParser) -> lib::Result<Vec<String>> {
    let algorithms = parse_algorithms(&arg.algorithm)?;
    let mut scheduler = CpuScheduler::new();
    scheduler.register_process_set(&load_process_set(&arg.process_file_path)?)?;

    algorithms
        .into_iter()
        .map(|algorithm| simulate(&mut scheduler, algorithm, &arg.output_dir_path))
        .collect()
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let arg: ArgParser = ArgParser::parse();

    if let Err(err) = run(&arg) {
        error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::remove_file;

    const SAMPLE_PROCESS_FILE: &str = "../lib/tests/sample_processes/basic.yaml";

    fn create_arg(algorithm: &str, output_dir_path: &str) -> ArgParser {
        ArgParser::try_parse_from([
            "cpu_scheduler",
            "-f",
            SAMPLE_PROCESS_FILE,
            "-a",
            algorithm,
            "-o",
            output_dir_path,
        ])
        .unwrap()
    }

    #[test]
    fn test_command_line_arguments() {
        let arg = ArgParser::try_parse_from(["cpu_scheduler", "-f", "processes.yaml"]).unwrap();
        assert_eq!(arg.process_file_path, "processes.yaml");
        assert_eq!(arg.algorithm, "rr");
        assert_eq!(arg.output_dir_path, "../outputs");

        assert!(ArgParser::try_parse_from(["cpu_scheduler", "-a", "sjf"]).is_err());
    }

    #[test]
    fn test_parse_algorithms() {
        assert_eq!(
            parse_algorithms("srtf").unwrap(),
            vec![SchedulingAlgorithm::ShortestRemainingTimeFirst]
        );
        assert_eq!(parse_algorithms("ALL").unwrap().len(), 5);
        assert!(parse_algorithms("fcfs").is_err());
    }

    #[test]
    fn test_run_single_algorithm_dumps_log() {
        let arg = create_arg("sjf", "../outputs/test_run_single_algorithm_dumps_log");
        let file_paths = run(&arg).unwrap();
        assert_eq!(file_paths.len(), 1);

        let file_contents = std::fs::read_to_string(&file_paths[0]).unwrap();
        let log: CpuSchedulerLog = serde_yaml::from_str(&file_contents).unwrap();
        assert_eq!(
            format_gantt_chart(&log),
            "P1[0-5) P2[5-8) P3[8-16)"
        );
        assert_eq!(log.processor_log.utilization, 100.0);

        remove_file(&file_paths[0]).unwrap();
    }

    #[test]
    fn test_run_all_algorithms_resets_between_runs() {
        let arg = create_arg("all", "../outputs/test_run_all_algorithms");
        let file_paths = run(&arg).unwrap();
        assert_eq!(file_paths.len(), 5);

        for file_path in &file_paths {
            let file_contents = std::fs::read_to_string(file_path).unwrap();
            let log: CpuSchedulerLog = serde_yaml::from_str(&file_contents).unwrap();
            assert_eq!(log.timeline.busy_time(), 16);
            assert_eq!(log.processor_log.schedule_length, 16);
            remove_file(file_path).unwrap();
        }
    }

    #[test]
    fn test_run_missing_process_file() {
        let arg = ArgParser::try_parse_from(["cpu_scheduler", "-f", "missing.yaml"]).unwrap();
        assert!(run(&arg).is_err());
    }
}
