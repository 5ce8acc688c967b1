//! Bounded position history used for rendering motion trails.

use std::collections::VecDeque;

use nalgebra::Point2;

/// Fixed-capacity FIFO of recent positions, oldest first.
///
/// Pushing onto a full trail evicts the oldest point, so `len() <= capacity()`
/// always holds. A capacity of zero records nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Point2<f64>>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a position, evicting the oldest one when full.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointmass::trail::Trail;
    /// use nalgebra::Point2;
    ///
    /// let mut trail = Trail::with_capacity(2);
    /// trail.push(Point2::new(0.0, 0.0));
    /// trail.push(Point2::new(1.0, 0.0));
    /// trail.push(Point2::new(2.0, 0.0));
    ///
    /// assert_eq!(trail.len(), 2);
    /// assert_eq!(trail.oldest(), Some(Point2::new(1.0, 0.0)));
    /// ```
    pub fn push(&mut self, point: Point2<f64>) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<Point2<f64>> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<Point2<f64>> {
        self.points.back().copied()
    }

    /// Positions from oldest to newest
    pub fn points(&self) -> impl Iterator<Item = &Point2<f64>> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
