use std::collections::VecDeque;

use log::{debug, info};

use crate::{
    error::Result,
    process::ProcessState,
    scheduler::{CpuScheduler, TIME_QUANTUM},
    timeline::Timeline,
};

impl CpuScheduler {
    /// Round Robin with a fixed quantum of `TIME_QUANTUM` ticks.
    ///
    /// # Description
    ///
    /// The ready queue is FIFO. Each loop iteration:
    ///
    /// 1. Processes that have arrived, still have work, are `Ready` and are not
    ///    already queued are appended in registration order.
    /// 2. The head of the queue runs for `min(TIME_QUANTUM, remaining_time)` ticks.
    /// 3. A process with work left goes back to the tail immediately, so it is
    ///    queued ahead of processes arriving at the tick its quantum expired.
    /// 4. With an empty queue the cpu idles for one tick.
    ///
    /// Returns one span per dispatch.
    pub fn round_robin(&mut self) -> Result<Timeline> {
        self.ensure_runnable("round robin")?;

        let mut timeline = Timeline::new();
        let mut ready_queue: VecDeque<usize> = VecDeque::new();
        let mut current_time = 0;

        while self.has_pending_work() {
            // Add newly arrived processes to the ready queue.
            for (index, process) in self.processes.iter().enumerate() {
                if process.is_ready(current_time)
                    && process.state() == ProcessState::Ready
                    && !ready_queue.contains(&index)
                {
                    ready_queue.push_back(index);
                }
            }

            let Some(index) = ready_queue.pop_front() else {
                current_time += 1;
                continue;
            };

            let start_time = current_time;
            let process = &mut self.processes[index];
            process.update_state(ProcessState::Running, start_time);
            current_time += process.execute(TIME_QUANTUM);
            timeline.push(process.pid(), start_time, current_time);
            debug!("P{} runs [{}, {})", process.pid(), start_time, current_time);

            if process.is_complete() {
                process.update_state(ProcessState::Completed, current_time);
            } else {
                process.update_state(ProcessState::Ready, current_time);
                ready_queue.push_back(index);
            }
        }

        self.update_total_time(current_time);
        info!(
            "Round robin finished: {} spans, makespan {}",
            timeline.len(),
            current_time
        );
        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use crate::scheduler::tests::{
        as_tuples, assert_all_completed, create_sample_scheduler, create_scheduler,
    };

    #[test]
    fn test_round_robin_sample() {
        let mut scheduler = create_sample_scheduler();
        let timeline = scheduler.round_robin().unwrap();
        assert_eq!(
            as_tuples(&timeline),
            vec![
                (1, 0, 3),
                (1, 3, 5),
                (2, 5, 8),
                (3, 8, 11),
                (3, 11, 14),
                (3, 14, 16)
            ]
        );
        assert_all_completed(&scheduler);
        assert_eq!(scheduler.total_time(), 16);

        let response_times: Vec<i32> = scheduler
            .processes()
            .iter()
            .map(|p| p.response_time())
            .collect();
        assert_eq!(response_times, vec![0, 4, 6]);
    }

    #[test]
    fn test_round_robin_spans_never_exceed_quantum() {
        let mut scheduler = create_scheduler(&[(0, 10, 0), (0, 7, 0), (2, 4, 0), (3, 3, 0)]);
        let timeline = scheduler.round_robin().unwrap();
        assert!(timeline.iter().all(|span| span.length() <= 3));
        assert!(!timeline.has_overlap());
        assert_eq!(timeline.busy_time(), 24);
        assert_all_completed(&scheduler);
    }

    #[test]
    fn test_round_robin_requeued_process_precedes_same_tick_arrival() {
        let mut scheduler = create_scheduler(&[(0, 4, 0), (0, 2, 0), (3, 2, 0)]);
        let timeline = scheduler.round_robin().unwrap();
        assert_eq!(
            as_tuples(&timeline),
            vec![(1, 0, 3), (2, 3, 5), (1, 5, 6), (3, 6, 8)]
        );
    }

    #[test]
    fn test_round_robin_idles_until_next_arrival() {
        let mut scheduler = create_scheduler(&[(0, 1, 0), (4, 2, 0), (4, 4, 0)]);
        let timeline = scheduler.round_robin().unwrap();
        assert_eq!(
            as_tuples(&timeline),
            vec![(1, 0, 1), (2, 4, 6), (3, 6, 9), (3, 9, 10)]
        );
        assert_eq!(scheduler.total_time(), 10);
        assert_eq!(scheduler.get_process(2).unwrap().response_time(), 0);
        assert_eq!(scheduler.get_process(3).unwrap().waiting_time(), 2);
    }

    #[test]
    fn test_round_robin_insufficient_processes() {
        let mut scheduler = create_scheduler(&[(0, 1, 0)]);
        assert!(scheduler.round_robin().is_err());
    }
}
