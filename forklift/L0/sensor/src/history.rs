//! Bounded history of load-cell readings.

use std::collections::VecDeque;

/// A fixed-capacity FIFO of `(timestamp, value)` readings.
///
/// When full, pushing a reading evicts the oldest one. Readings are kept
/// in insertion order.
///
/// # Example
///
/// ```
/// use forklift_sensor::SampleHistory;
///
/// let mut history = SampleHistory::new(2);
/// history.push(0.0, 1.0);
/// history.push(0.1, 2.0);
/// history.push(0.2, 3.0);
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.values().collect::<Vec<_>>(), vec![2.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SampleHistory {
    capacity: usize,
    readings: VecDeque<(f64, f64)>,
}

impl SampleHistory {
    /// Creates an empty history holding at most `capacity` readings.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            readings: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Returns the capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of stored readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns true if no readings are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Returns true if the history is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.readings.len() >= self.capacity
    }

    /// Appends a reading, evicting the oldest when full.
    pub fn push(&mut self, timestamp: f64, value: f64) {
        if self.is_full() {
            self.readings.pop_front();
        }
        self.readings.push_back((timestamp, value));
    }

    /// Returns the newest reading.
    #[must_use]
    pub fn latest(&self) -> Option<(f64, f64)> {
        self.readings.back().copied()
    }

    /// Returns the oldest reading.
    #[must_use]
    pub fn oldest(&self) -> Option<(f64, f64)> {
        self.readings.front().copied()
    }

    /// Iterates over readings from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.readings.iter()
    }

    /// Iterates over the values from oldest to newest.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.readings.iter().map(|&(_, v)| v)
    }

    /// Removes all readings.
    pub fn clear(&mut self) {
        self.readings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_most_recent_in_order() {
        let mut history = SampleHistory::new(100);
        for i in 0..150 {
            history.push(f64::from(i) * 0.016, f64::from(i));
        }
        assert_eq!(history.len(), 100);
        assert!(history.is_full());

        let values: Vec<f64> = history.values().collect();
        let expected: Vec<f64> = (50..150).map(f64::from).collect();
        assert_eq!(values, expected);
        assert_eq!(history.oldest().map(|(_, v)| v), Some(50.0));
        assert_eq!(history.latest().map(|(_, v)| v), Some(149.0));
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut history = SampleHistory::new(0);
        assert_eq!(history.capacity(), 1);
        history.push(0.0, 1.0);
        history.push(1.0, 2.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some((1.0, 2.0)));
    }

    #[test]
    fn clear_empties() {
        let mut history = SampleHistory::new(4);
        history.push(0.0, 1.0);
        history.clear();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
    }
}
