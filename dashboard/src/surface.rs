//! The view-layer seam.
//!
//! The engine never reads layout state back from the store while an
//! interaction is running; it asks the surface where the widget and its
//! container are actually rendered. The browser implementation lives in
//! [`crate::dom`]. [`HeadlessSurface`] renders records into a fixed-size
//! container so the engine can run without a DOM.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::fmt;

use crate::geometry::PixelRect;
use crate::hit::{HotspotExtent, Hotspots};
use crate::input::Direction;
use crate::store::WidgetRecord;

/// Which rendered element could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Widget,
    Container,
    Hotspot(Direction),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget => f.write_str("widget box"),
            Self::Container => f.write_str("container"),
            Self::Hotspot(d) => write!(f, "{d} hotspot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("could not resolve the {0}")]
    MissingElement(Element),
    #[error("failed to style the {element}: {message}")]
    Style { element: Element, message: String },
}

/// Rendered rectangles of one widget and its container, plus hotspot styling.
pub trait Surface {
    /// The widget box as rendered, or `None` if it is not attached.
    fn box_rect(&self) -> Option<PixelRect>;

    /// The widget's container as rendered, or `None` if it is not attached.
    fn parent_rect(&self) -> Option<PixelRect>;

    /// Resize the capture region of one hotspot.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] if the hotspot cannot be resolved or styled.
    fn apply_hotspot(&mut self, direction: Direction, extent: HotspotExtent) -> Result<(), SurfaceError>;
}

/// A surface that lays records out in a fixed pixel container.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    container: Option<PixelRect>,
    widget: Option<PixelRect>,
    hotspots: Hotspots,
}

impl HeadlessSurface {
    /// A container at `container` with no widget rendered yet.
    #[must_use]
    pub fn new(container: PixelRect) -> Self {
        Self { container: Some(container), widget: None, hotspots: Hotspots::new() }
    }

    /// A surface already showing `record`.
    #[must_use]
    pub fn with_record(container: PixelRect, record: &WidgetRecord) -> Self {
        let mut surface = Self::new(container);
        surface.render(record);
        surface
    }

    /// Lay `record` out in the container, as a browser would after a re-render.
    pub fn render(&mut self, record: &WidgetRecord) {
        self.widget = self.container.map(|c| PixelRect {
            left: c.left + record.position.left / 100.0 * c.width,
            top: c.top + record.position.top / 100.0 * c.height,
            width: record.size.width / 100.0 * c.width,
            height: record.size.height / 100.0 * c.height,
        });
    }

    /// Remove the widget from the surface.
    pub fn detach(&mut self) {
        self.widget = None;
    }

    /// Remove the container from the surface.
    pub fn detach_container(&mut self) {
        self.container = None;
    }

    /// Hotspot extents as last applied by the engine.
    #[must_use]
    pub fn hotspots(&self) -> &Hotspots {
        &self.hotspots
    }

    #[must_use]
    pub fn container(&self) -> Option<PixelRect> {
        self.container
    }
}

impl Surface for HeadlessSurface {
    fn box_rect(&self) -> Option<PixelRect> {
        self.widget
    }

    fn parent_rect(&self) -> Option<PixelRect> {
        self.container
    }

    fn apply_hotspot(&mut self, direction: Direction, extent: HotspotExtent) -> Result<(), SurfaceError> {
        if self.widget.is_none() {
            return Err(SurfaceError::MissingElement(Element::Hotspot(direction)));
        }
        self.hotspots.set(direction, extent);
        Ok(())
    }
}
