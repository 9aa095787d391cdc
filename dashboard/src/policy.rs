//! Move clamping and per-edge resize rules.
//!
//! All inputs and outputs are container-relative percent. The functions here
//! are pure: they take the pointer position and the box as it is rendered now,
//! and return where the box should go. Each axis is handled on its own, so
//! corner resizes are just the two edge rules applied one after the other.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use serde::{Deserialize, Serialize};

use crate::consts::{FULL_PCT, MIN_BOX_SIZE_PCT, SNAP_TO_END_PCT};
use crate::geometry::{PercentPoint, PercentRect};
use crate::input::Direction;

/// Tunables for move and resize geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Smallest width or height a resize may produce.
    pub min_box_size: f64,
    /// Distance from a container edge within which a dragged edge snaps flush.
    pub snap_to_end: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self { min_box_size: MIN_BOX_SIZE_PCT, snap_to_end: SNAP_TO_END_PCT }
    }
}

impl Policy {
    /// New top-left for a box of `width` x `height` dragged so that the grab
    /// point (already scaled into container percent) stays under `mouse`.
    ///
    /// The box never leaves the container.
    #[must_use]
    pub fn drag(&self, mouse: PercentPoint, grab: PercentPoint, width: f64, height: f64) -> PercentPoint {
        PercentPoint {
            x: clamp_start(mouse.x - grab.x, width),
            y: clamp_start(mouse.y - grab.y, height),
        }
    }

    /// Apply the edge rules implied by `direction`.
    #[must_use]
    pub fn resize(&self, direction: Direction, mouse: PercentPoint, current: PercentRect) -> PercentRect {
        let mut next = current;
        if direction.moves_top() {
            next = self.north(mouse.y, next);
        }
        if direction.moves_bottom() {
            next = self.south(mouse.y, next);
        }
        if direction.moves_left() {
            next = self.west(mouse.x, next);
        }
        if direction.moves_right() {
            next = self.east(mouse.x, next);
        }
        next
    }

    /// Drag the right edge to `mouse_x`.
    #[must_use]
    pub fn east(&self, mouse_x: f64, current: PercentRect) -> PercentRect {
        let (x, width) = self.grow_end(mouse_x, current.x);
        PercentRect { x, width, ..current }
    }

    /// Drag the left edge to `mouse_x`; the right edge stays put.
    #[must_use]
    pub fn west(&self, mouse_x: f64, current: PercentRect) -> PercentRect {
        let (x, width) = self.grow_start(mouse_x, current.x, current.width);
        PercentRect { x, width, ..current }
    }

    /// Drag the top edge to `mouse_y`; the bottom edge stays put.
    #[must_use]
    pub fn north(&self, mouse_y: f64, current: PercentRect) -> PercentRect {
        let (y, height) = self.grow_start(mouse_y, current.y, current.height);
        PercentRect { y, height, ..current }
    }

    /// Drag the bottom edge to `mouse_y`.
    #[must_use]
    pub fn south(&self, mouse_y: f64, current: PercentRect) -> PercentRect {
        let (y, height) = self.grow_end(mouse_y, current.y);
        PercentRect { y, height, ..current }
    }

    /// Far edge follows the pointer; returns `(start, length)`.
    fn grow_end(&self, pointer: f64, start: f64) -> (f64, f64) {
        let mut end = pointer.max(start + self.min_box_size);
        if end > FULL_PCT - self.snap_to_end {
            end = FULL_PCT;
        }
        let length = (end - start).max(self.min_box_size);
        // Only reachable when the minimum no longer fits past `start`.
        let start = if start + length > FULL_PCT { FULL_PCT - length } else { start };
        (start, length)
    }

    /// Near edge follows the pointer, far edge is fixed; returns `(start, length)`.
    fn grow_start(&self, pointer: f64, start: f64, length: f64) -> (f64, f64) {
        let end = start + length;
        let mut next = if pointer < self.snap_to_end { 0.0 } else { pointer };
        next = next.min(end - self.min_box_size).max(0.0);
        let length = (end - next).max(self.min_box_size);
        let next = if next + length > FULL_PCT { (FULL_PCT - length).max(0.0) } else { next };
        (next, length)
    }
}

fn clamp_start(raw: f64, length: f64) -> f64 {
    let start = raw.max(0.0);
    if start + length > FULL_PCT { FULL_PCT - length } else { start }
}
