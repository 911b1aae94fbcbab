use serde_derive::{Deserialize, Serialize};

/// One contiguous stretch of cpu time `[start_time, finish_time)` given to a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSpan {
    pub pid: usize,
    pub start_time: i32,
    pub finish_time: i32,
}

impl ExecutionSpan {
    pub fn new(pid: usize, start_time: i32, finish_time: i32) -> Self {
        Self {
            pid,
            start_time,
            finish_time,
        }
    }

    pub fn length(&self) -> i32 {
        self.finish_time - self.start_time
    }
}

/// Gantt data produced by one scheduling run, in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    spans: Vec<ExecutionSpan>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pid: usize, start_time: i32, finish_time: i32) {
        self.spans.push(ExecutionSpan::new(pid, start_time, finish_time));
    }

    pub fn spans(&self) -> &[ExecutionSpan] {
        &self.spans
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionSpan> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Finish time of the last span, 0 for an empty timeline.
    pub fn makespan(&self) -> i32 {
        self.spans.last().map_or(0, |span| span.finish_time)
    }

    pub fn busy_time(&self) -> i32 {
        self.spans.iter().map(ExecutionSpan::length).sum()
    }

    /// Number of adjacent spans handing the cpu to a different process.
    pub fn context_switches(&self) -> usize {
        self.spans
            .windows(2)
            .filter(|pair| pair[0].pid != pair[1].pid)
            .count()
    }

    /// Spans of a single process, in order.
    pub fn spans_of(&self, pid: usize) -> Vec<ExecutionSpan> {
        self.spans
            .iter()
            .filter(|span| span.pid == pid)
            .copied()
            .collect()
    }

    pub fn has_overlap(&self) -> bool {
        self.spans
            .windows(2)
            .any(|pair| pair[1].start_time < pair[0].finish_time)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ExecutionSpan;
    type IntoIter = std::slice::Iter<'a, ExecutionSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}
