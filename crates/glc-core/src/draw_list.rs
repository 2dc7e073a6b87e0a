//! Per-frame draw list.
//!
//! Shapes submitted during a frame are appended here and drained in one go
//! at flush time. Nothing persists across frames: callers resubmit every
//! shape every frame.

use crate::model::{Circle, Rectangle};
use serde::{Deserialize, Serialize};

/// Two append-only sequences, one per shape kind, in submission order.
///
/// Rectangles and circles are kept apart, so the relative order of a
/// rectangle and a circle is not recorded. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    #[serde(default)]
    pub rectangles: Vec<Rectangle>,
    #[serde(default)]
    pub circles: Vec<Circle>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rect(&mut self, rect: Rectangle) {
        self.rectangles.push(rect);
    }

    pub fn push_circle(&mut self, circle: Circle) {
        self.circles.push(circle);
    }

    /// Append everything in `other`, keeping each kind's order.
    pub fn extend(&mut self, other: DrawList) {
        self.rectangles.extend(other.rectangles);
        self.circles.extend(other.circles);
    }

    /// Take every queued shape, leaving both sequences empty.
    pub fn take(&mut self) -> DrawList {
        std::mem::take(self)
    }

    pub fn len(&self) -> usize {
        self.rectangles.len() + self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty() && self.circles.is_empty()
    }
}
