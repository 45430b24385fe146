use crate::domain::monitoring::MonitoringRecord;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded, oldest-first log of served readings.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    records: VecDeque<MonitoringRecord>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a record, evicting the oldest once capacity is exceeded.
    pub fn push(&mut self, record: MonitoringRecord) {
        if self.capacity == 0 {
            return;
        }
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&MonitoringRecord> {
        self.records.back()
    }

    /// The last `limit` records, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<MonitoringRecord> {
        let skip = self.records.len().saturating_sub(limit);
        self.records.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
