//! Step history tracking.
//!
//! Records the transitions a controller takes over time. Histories can be
//! bounded so a driver running indefinitely keeps only the most recent
//! steps.

use super::sample::SensorSample;
use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single FSM step.
///
/// # Example
///
/// ```rust
/// use traffic_fsm::core::{SensorSample, StateId, StepRecord};
/// use chrono::Utc;
///
/// let record = StepRecord {
///     from: StateId::new(0),
///     to: StateId::new(1),
///     sample: SensorSample::from_sensors(false, true, false),
///     step: 1,
///     timestamp: Utc::now(),
/// };
/// assert!(record.changed_state());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// State before the step
    pub from: StateId,
    /// State after the step
    pub to: StateId,
    /// Sensor sample that selected the successor
    pub sample: SensorSample,
    /// Sequence number of the step, starting at 1
    pub step: u64,
    /// When the step was taken
    pub timestamp: DateTime<Utc>,
}

impl StepRecord {
    /// True if the step moved to a different state.
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of FSM steps.
///
/// An optional capacity bounds the number of retained records; once full,
/// the oldest record is evicted for every new one.
///
/// # Example
///
/// ```rust
/// use traffic_fsm::core::{SensorSample, StateHistory, StateId, StepRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StepRecord {
///         from: StateId::new(0),
///         to: StateId::new(1),
///         sample: SensorSample::IDLE,
///         step: 1,
///         timestamp: Utc::now(),
///     })
///     .record(StepRecord {
///         from: StateId::new(1),
///         to: StateId::new(2),
///         sample: SensorSample::IDLE,
///         step: 2,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![StateId::new(0), StateId::new(1), StateId::new(2)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    records: VecDeque<StepRecord>,
    capacity: Option<usize>,
    evicted: u64,
}

impl StateHistory {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that retains at most `capacity` records.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
            evicted: 0,
        }
    }

    /// Record a step, returning the updated history.
    pub fn record(mut self, record: StepRecord) -> Self {
        self.push(record);
        self
    }

    /// Record a step in place.
    pub fn push(&mut self, record: StepRecord) {
        self.records.push_back(record);
        if let Some(capacity) = self.capacity {
            while self.records.len() > capacity {
                self.records.pop_front();
                self.evicted += 1;
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record followed by
    /// the `to` state of every record.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the oldest and newest retained record.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StepRecord> + '_ {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of records dropped to respect the capacity.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: usize, to: usize, step: u64) -> StepRecord {
        StepRecord {
            from: StateId::new(from),
            to: StateId::new(to),
            sample: SensorSample::IDLE,
            step,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.capacity(), None);
    }

    #[test]
    fn record_adds_transition() {
        let history = StateHistory::new().record(step(0, 1, 1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|r| r.to), Some(StateId::new(1)));
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step(0, 1, 1))
            .record(step(1, 2, 2))
            .record(step(2, 2, 3));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                StateId::new(0),
                StateId::new(1),
                StateId::new(2),
                StateId::new(2)
            ]
        );
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = StateHistory::bounded(2);
        history.push(step(0, 1, 1));
        history.push(step(1, 2, 2));
        history.push(step(2, 3, 3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.evicted(), 1);
        let steps: Vec<u64> = history.transitions().map(|r| r.step).collect();
        assert_eq!(steps, vec![2, 3]);
        assert_eq!(history.get_path()[0], StateId::new(1));
    }

    #[test]
    fn zero_capacity_retains_nothing() {
        let history = StateHistory::bounded(0).record(step(0, 1, 1));
        assert!(history.is_empty());
        assert_eq!(history.evicted(), 1);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let mut first = step(0, 1, 1);
        first.timestamp = start;
        let mut second = step(1, 2, 2);
        second.timestamp = start + chrono::Duration::milliseconds(250);

        let history = StateHistory::new().record(first).record(second);
        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_record_has_zero_duration() {
        let history = StateHistory::new().record(step(0, 0, 1));
        assert_eq!(history.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn changed_state_detects_self_loops() {
        assert!(step(0, 1, 1).changed_state());
        assert!(!step(4, 4, 1).changed_state());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::bounded(8).record(step(0, 1, 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
