//! Ring buffer for trace records.
//!
//! Provides a fixed-size buffer that stores the most recent trace records,
//! with lookup by evaluation run.

use std::collections::{HashMap, VecDeque};

use super::record::{TraceEvent, TraceRecord};

// =============================================================================
// Trace Buffer
// =============================================================================

/// A ring buffer for storing trace records.
///
/// Maintains a fixed maximum size, discarding oldest records when full.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    /// The records, oldest first.
    records: VecDeque<TraceRecord>,
    /// Maximum number of records to store.
    max_size: usize,
    /// Next record ID to assign.
    next_id: u64,
}

impl TraceBuffer {
    /// Creates a new trace buffer with the given maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Creates a buffer with default size (10000 records).
    #[must_use]
    pub fn default_size() -> Self {
        Self::new(10000)
    }

    /// Pushes a new event to the buffer.
    ///
    /// Returns the assigned record ID.
    pub fn push(&mut self, run: u64, timestamp_ns: u64, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.records
            .push_back(TraceRecord::new(id, run, timestamp_ns, event));
        while self.records.len() > self.max_size {
            self.records.pop_front();
        }

        id
    }

    /// Returns the number of records in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the maximum number of records kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Clears all records from the buffer.
    ///
    /// Record IDs keep increasing across clears.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns an iterator over all records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// Returns the record with the given ID, if still buffered.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&TraceRecord> {
        // ids are pushed in increasing order
        let front = self.records.front()?.id;
        let offset = usize::try_from(id.checked_sub(front)?).ok()?;
        self.records.get(offset).filter(|r| r.id == id)
    }

    /// Returns records for a specific run.
    #[must_use]
    pub fn records_for_run(&self, run: u64) -> Vec<&TraceRecord> {
        self.filter(|r| r.run == run)
    }

    /// Returns records in a run range (inclusive).
    #[must_use]
    pub fn records_in_range(&self, first_run: u64, last_run: u64) -> Vec<&TraceRecord> {
        self.filter(|r| r.run >= first_run && r.run <= last_run)
    }

    /// Returns records emitted while evaluating the rule `head`.
    #[must_use]
    pub fn records_for_rule(&self, head: &str) -> Vec<&TraceRecord> {
        self.filter(|r| r.event.rule() == Some(head))
    }

    /// Returns the most recent N records.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&TraceRecord> {
        let start = self.records.len().saturating_sub(count);
        self.records.iter().skip(start).collect()
    }

    /// Returns records matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> Vec<&TraceRecord>
    where
        F: Fn(&TraceRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Returns records of a specific event type.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.filter(|r| r.event_type() == event_type)
    }

    /// Returns the oldest run number in the buffer.
    #[must_use]
    pub fn oldest_run(&self) -> Option<u64> {
        self.records.front().map(|r| r.run)
    }

    /// Returns the newest run number in the buffer.
    #[must_use]
    pub fn newest_run(&self) -> Option<u64> {
        self.records.back().map(|r| r.run)
    }

    /// Returns all distinct run numbers in the buffer, in order.
    #[must_use]
    pub fn runs(&self) -> Vec<u64> {
        let mut runs: Vec<u64> = self.records.iter().map(|r| r.run).collect();
        runs.dedup();
        runs
    }

    /// Returns statistics about the buffer.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        let mut event_counts = HashMap::new();
        for record in &self.records {
            *event_counts.entry(record.event_type()).or_insert(0) += 1;
        }

        TraceBufferStats {
            record_count: self.records.len(),
            max_size: self.max_size,
            oldest_run: self.oldest_run(),
            newest_run: self.newest_run(),
            run_count: self.runs().len(),
            event_counts,
        }
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::default_size()
    }
}

// =============================================================================
// Buffer Statistics
// =============================================================================

/// Statistics about a trace buffer.
#[derive(Clone, Debug)]
pub struct TraceBufferStats {
    /// Number of records currently in buffer.
    pub record_count: usize,
    /// Maximum buffer size.
    pub max_size: usize,
    /// Oldest run in buffer.
    pub oldest_run: Option<u64>,
    /// Newest run in buffer.
    pub newest_run: Option<u64>,
    /// Number of distinct runs.
    pub run_count: usize,
    /// Count of each event type.
    pub event_counts: HashMap<&'static str, usize>,
}

// =============================================================================
// Tests
// =============================================================================
