// src/point_store.rs
// Holds the points of the measurement in progress.

use crate::data::point::Point2D;

/// Outcome of [`PointStore::add_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointCapture {
    /// One point held, waiting for the second.
    Pending(Point2D),
    /// Both points captured, in insertion order. The store is empty again.
    Complete(Point2D, Point2D),
}

/// Zero or one pending point. A second point completes the pair and empties
/// the store, so it never holds two points at rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointStore {
    first: Option<Point2D>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, point: Point2D) -> PointCapture {
        match self.first.take() {
            None => {
                self.first = Some(point);
                PointCapture::Pending(point)
            }
            Some(first) => PointCapture::Complete(first, point),
        }
    }

    /// The pending first point, if any.
    pub fn first(&self) -> Option<Point2D> {
        self.first
    }

    pub fn len(&self) -> usize {
        usize::from(self.first.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Discard any pending point.
    pub fn clear(&mut self) {
        self.first = None;
    }
}
