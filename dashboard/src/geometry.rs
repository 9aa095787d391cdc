//! Pixel and percentage geometry, and the conversions between them.
//!
//! Everything the engine stores is in container-relative percent. Pixels only
//! appear at the edge: the rendered rectangles reported by the surface and the
//! pointer's client coordinates. A [`Frame`] pairs the two rectangles for one
//! event and answers every pixel-to-percent question for it.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::input::PointerEvent;
use crate::surface::{Element, Surface, SurfaceError};

/// A rendered rectangle in CSS pixels, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether the rectangle has a usable, non-degenerate area.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A point in container-relative percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A box in container-relative percent: `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentRect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The widget box and its container resolved for a single pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    parent: PixelRect,
    widget: PixelRect,
}

impl Frame {
    /// Pair a container and widget rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::MissingElement`] if either rectangle is absent,
    /// or if the container has no area (nothing to take a percentage of).
    pub fn new(parent: Option<PixelRect>, widget: Option<PixelRect>) -> Result<Self, SurfaceError> {
        let widget = widget.ok_or(SurfaceError::MissingElement(Element::Widget))?;
        let parent = parent.ok_or(SurfaceError::MissingElement(Element::Container))?;
        if !parent.has_area() {
            return Err(SurfaceError::MissingElement(Element::Container));
        }
        Ok(Self { parent, widget })
    }

    /// Read both rectangles from the surface as they are rendered right now.
    ///
    /// # Errors
    ///
    /// See [`Frame::new`].
    pub fn resolve<S: Surface + ?Sized>(surface: &S) -> Result<Self, SurfaceError> {
        Self::new(surface.parent_rect(), surface.box_rect())
    }

    /// Horizontal pixel distance as a percentage of the container width.
    #[must_use]
    pub fn to_percent_x(&self, px: f64) -> f64 {
        100.0 * px / self.parent.width
    }

    /// Vertical pixel distance as a percentage of the container height.
    #[must_use]
    pub fn to_percent_y(&self, px: f64) -> f64 {
        100.0 * px / self.parent.height
    }

    /// The pointer's client position translated into container percent.
    #[must_use]
    pub fn pointer_relative_to_parent(&self, pointer: PointerEvent) -> PercentPoint {
        PercentPoint {
            x: self.to_percent_x(pointer.client_x - self.parent.left),
            y: self.to_percent_y(pointer.client_y - self.parent.top),
        }
    }

    /// The widget's rendered geometry in container percent.
    #[must_use]
    pub fn box_relative_to_parent(&self) -> PercentRect {
        PercentRect {
            x: self.to_percent_x(self.widget.left - self.parent.left),
            y: self.to_percent_y(self.widget.top - self.parent.top),
            width: self.to_percent_x(self.widget.width),
            height: self.to_percent_y(self.widget.height),
        }
    }

    /// Where on its own face the box was grabbed, in percent of the box.
    ///
    /// A zero-sized box has no face to grab; the offset collapses to its
    /// top-left corner.
    #[must_use]
    pub fn grab_offset(&self, pointer: PointerEvent) -> PercentPoint {
        let mouse = self.pointer_relative_to_parent(pointer);
        let rect = self.box_relative_to_parent();
        PercentPoint {
            x: ratio(mouse.x - rect.x, rect.width),
            y: ratio(mouse.y - rect.y, rect.height),
        }
    }

    /// Scale a box-relative grab offset into container percent using the
    /// box's current rendered size.
    #[must_use]
    pub fn grab_to_parent(&self, grab: PercentPoint) -> PercentPoint {
        PercentPoint {
            x: self.to_percent_x(grab.x / 100.0 * self.widget.width),
            y: self.to_percent_y(grab.y / 100.0 * self.widget.height),
        }
    }
}

fn ratio(distance: f64, extent: f64) -> f64 {
    if extent > 0.0 { distance / extent * 100.0 } else { 0.0 }
}
