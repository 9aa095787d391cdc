//! Edge and corner hotspots: the regions that start a resize.
//!
//! Every widget owns eight hotspots, one per [`Direction`]. Idle hotspots are
//! thin strips flush with their edge. While a resize is in progress the active
//! hotspot is widened and pushed outwards so the pointer stays inside it even
//! when it outruns the edge it is dragging.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HOTSPOT_ACTIVE_OFFSET_PX, HOTSPOT_ACTIVE_PX, HOTSPOT_IDLE_PX};
use crate::input::{Direction, Interaction};

/// Size and offset of one hotspot along the axes it spans, in CSS pixels.
///
/// Edge hotspots only span the axis perpendicular to their edge (an east strip
/// has a width, its height follows the box). Corner hotspots span both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotExtent {
    /// Strip thickness (and side length for corners).
    pub thickness: f64,
    /// Offset from the edge the hotspot hugs; negative is outside the box.
    pub offset: f64,
}

impl HotspotExtent {
    pub const IDLE: HotspotExtent = HotspotExtent { thickness: HOTSPOT_IDLE_PX, offset: 0.0 };
    pub const ACTIVE: HotspotExtent = HotspotExtent { thickness: HOTSPOT_ACTIVE_PX, offset: HOTSPOT_ACTIVE_OFFSET_PX };
}

/// The eight hotspots of one widget, indexed by direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspots {
    extents: [HotspotExtent; 8],
}

impl Default for Hotspots {
    fn default() -> Self {
        Self { extents: [HotspotExtent::IDLE; 8] }
    }
}

impl Hotspots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn extent(&self, direction: Direction) -> HotspotExtent {
        self.extents[direction.index()]
    }

    pub fn set(&mut self, direction: Direction, extent: HotspotExtent) {
        self.extents[direction.index()] = extent;
    }

    /// The direction whose hotspot is currently widened, if any.
    #[must_use]
    pub fn active(&self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.extents[d.index()] == HotspotExtent::ACTIVE)
    }
}

/// Decide what a pointer-down at `(x, y)` grabbed.
///
/// `x`/`y` are pixels relative to the widget box's top-left, and the box is
/// `width` x `height` pixels. Corners are the intersection of two edge strips
/// and win over either edge. Points outside the box still resolve to the
/// nearest edge so a pointer-down on a widened hotspot is not lost.
#[must_use]
pub fn classify(x: f64, y: f64, width: f64, height: f64) -> Interaction {
    let strip = HOTSPOT_IDLE_PX;
    let north = y < strip;
    let south = y >= height - strip;
    let west = x < strip;
    let east = x >= width - strip;

    let direction = match (north, south, west, east) {
        (true, _, true, _) => Some(Direction::Nw),
        (true, _, _, true) => Some(Direction::Ne),
        (_, true, true, _) => Some(Direction::Sw),
        (_, true, _, true) => Some(Direction::Se),
        (true, _, _, _) => Some(Direction::N),
        (_, true, _, _) => Some(Direction::S),
        (_, _, true, _) => Some(Direction::W),
        (_, _, _, true) => Some(Direction::E),
        _ => None,
    };
    direction.map_or(Interaction::Move, Interaction::Resize)
}
