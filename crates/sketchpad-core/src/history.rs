//! Bounded undo history.

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_HISTORY_DEPTH: usize = 5;

/// A deep copy of the full shape order at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    shapes: Vec<Shape>,
}

impl Snapshot {
    /// Deep-copy the given shapes.
    pub fn capture(shapes: &[Shape]) -> Self {
        Self {
            shapes: shapes.to_vec(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Fixed-capacity ring of snapshots, most recent first.
///
/// The ring never grows past its capacity: a push into a full ring drops the
/// oldest snapshot before inserting. There is no redo; a popped snapshot is
/// gone.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history with the default depth.
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_DEPTH)
    }

    /// Create an empty history holding at most `capacity` snapshots.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a history from persisted snapshots (most recent first).
    /// Anything past the default depth is dropped.
    pub fn from_snapshots(snapshots: Vec<Snapshot>) -> Self {
        let mut history = Self::new();
        history
            .snapshots
            .extend(snapshots.into_iter().take(history.capacity));
        history
    }

    /// Push a snapshot, evicting the oldest one if the ring is full.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_back();
        }
        self.snapshots.push_front(snapshot);
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_front()
    }

    /// Most recent snapshot without removing it.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.front()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Snapshots from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Copy out the snapshots for persistence (most recent first).
    pub fn to_snapshots(&self) -> Vec<Snapshot> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    fn snapshot_of(count: usize) -> Snapshot {
        let shapes: Vec<Shape> = (0..count)
            .map(|i| Rectangle::new(Point::new(i as f64 * 10.0, 0.0), 5.0, 5.0).into())
            .collect();
        Snapshot::capture(&shapes)
    }

    #[test]
    fn test_push_pop_order() {
        let mut history = History::new();
        history.push(snapshot_of(1));
        history.push(snapshot_of(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().map(|s| s.len()), Some(2));
        assert_eq!(history.pop().map(|s| s.len()), Some(1));
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = History::new();
        for i in 0..8 {
            history.push(snapshot_of(i));
            assert!(history.len() <= MAX_HISTORY_DEPTH);
        }
        assert_eq!(history.len(), history.capacity());

        // Only the five most recent survive: sizes 7, 6, 5, 4, 3.
        let sizes: Vec<usize> = std::iter::from_fn(|| history.pop().map(|s| s.len())).collect();
        assert_eq!(sizes, vec![7, 6, 5, 4, 3]);
        assert!(history.is_empty());
    }

    #[test]
    fn test_from_snapshots_truncates() {
        let snapshots: Vec<Snapshot> = (0..9).map(snapshot_of).collect();
        let history = History::from_snapshots(snapshots);
        assert_eq!(history.len(), MAX_HISTORY_DEPTH);
        assert_eq!(history.peek().map(Snapshot::len), Some(0));
    }

    #[test]
    fn test_snapshot_is_independent_of_source() {
        let mut shapes: Vec<Shape> = vec![Rectangle::new(Point::new(0.0, 0.0), 50.0, 50.0).into()];
        let snapshot = Snapshot::capture(&shapes);
        shapes[0].translate(kurbo::Vec2::new(100.0, 0.0));
        shapes.clear();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.shapes()[0].bounds().x0, 0.0);
    }

    #[test]
    fn test_snapshot_serializes_as_list() {
        let json = serde_json::to_value(snapshot_of(2)).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }
}
