//! Pointer scripts: a JSON list of board operations replayed headlessly.
//!
//! Each widget gets a [`HeadlessSurface`] sized to the configured container.
//! After a move applies new geometry the surface is re-rendered from the
//! store, as a browser would on the next frame.

use std::collections::HashMap;

use dashboard::engine::{BoardCore, EngineError};
use dashboard::geometry::PixelRect;
use dashboard::hit;
use dashboard::input::{Direction, Interaction, PointerEvent};
use dashboard::store::{Toggled, WidgetRecord};
use dashboard::surface::{Element, HeadlessSurface, Surface, SurfaceError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BoardConfig, WIDGET_CATALOG};

/// One scripted operation. Pointer coordinates are client pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Add { name: String },
    AddNext,
    Remove { name: String },
    Toggle { name: String },
    /// Pointer-down. Without `hotspot` the grabbed region is hit-tested.
    Down { widget: String, x: f64, y: f64, #[serde(default)] hotspot: Option<Direction> },
    Move { widget: String, x: f64, y: f64 },
    Up { widget: String },
    Leave { widget: String },
}

#[derive(Debug, thiserror::Error)]
#[error("step {index} failed: {source}")]
pub struct ReplayError {
    pub index: usize,
    #[source]
    pub source: EngineError,
}

/// Parse a script: a bare JSON array of steps.
///
/// # Errors
///
/// Returns the `serde_json` error for malformed input or unknown ops.
pub fn parse(text: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(text)
}

/// Final state written to stdout.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub widgets: &'a [WidgetRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<CatalogEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub placed: bool,
}

pub struct Replay {
    core: BoardCore,
    surfaces: HashMap<String, HeadlessSurface>,
    container: PixelRect,
}

impl Replay {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self { core: BoardCore::new(config.engine), surfaces: HashMap::new(), container: config.container }
    }

    #[must_use]
    pub fn core(&self) -> &BoardCore {
        &self.core
    }

    #[cfg(test)]
    #[must_use]
    pub fn surface(&self, name: &str) -> Option<&HeadlessSurface> {
        self.surfaces.get(name)
    }

    /// Apply every step in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the failing step's index and cause.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), ReplayError> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(step).map_err(|source| ReplayError { index, source })?;
        }
        Ok(())
    }

    /// Apply one step.
    ///
    /// # Errors
    ///
    /// Propagates board errors. A failed move leaves the session running.
    pub fn apply(&mut self, step: &Step) -> Result<(), EngineError> {
        debug!(step = ?step, "replay");
        match step {
            Step::Add { name } => {
                let record = self.core.add(name)?;
                self.show(&record);
            }
            Step::AddNext => {
                let record = self.core.add_next()?;
                self.show(&record);
            }
            Step::Remove { name } => {
                self.core.remove(name);
                self.surfaces.remove(name);
            }
            Step::Toggle { name } => match self.core.toggle(name)? {
                Toggled::Added => {
                    if let Some(record) = self.core.widget(name).cloned() {
                        self.show(&record);
                    }
                }
                Toggled::Removed => {
                    self.surfaces.remove(name);
                }
            },
            Step::Down { widget, x, y, hotspot } => {
                let pointer = PointerEvent::new(*x, *y)?;
                let surface = surface_mut(&mut self.surfaces, widget)?;
                let mode = match hotspot {
                    Some(direction) => Interaction::Resize(*direction),
                    None => grabbed(surface, pointer)?,
                };
                self.core.pointer_down(widget, mode, pointer, surface)?;
            }
            Step::Move { widget, x, y } => {
                let pointer = PointerEvent::new(*x, *y)?;
                let surface = surface_mut(&mut self.surfaces, widget)?;
                if self.core.pointer_move(widget, pointer, &*surface)?.is_some() {
                    if let Some(record) = self.core.widget(widget) {
                        surface.render(record);
                    }
                }
            }
            Step::Up { widget } => {
                let surface = surface_mut(&mut self.surfaces, widget)?;
                self.core.pointer_up(widget, surface)?;
            }
            Step::Leave { widget } => {
                let surface = surface_mut(&mut self.surfaces, widget)?;
                self.core.pointer_leave(widget, surface)?;
            }
        }
        Ok(())
    }

    /// The layout, optionally with the catalog marked against placed widgets.
    #[must_use]
    pub fn report(&self, with_catalog: bool) -> Report<'_> {
        let catalog = with_catalog.then(|| {
            WIDGET_CATALOG
                .iter()
                .map(|&name| CatalogEntry { name, placed: self.core.widget(name).is_some() })
                .collect()
        });
        Report { widgets: self.core.widgets(), catalog }
    }

    fn show(&mut self, record: &WidgetRecord) {
        self.surfaces
            .insert(record.name.clone(), HeadlessSurface::with_record(self.container, record));
    }
}

fn surface_mut<'a>(surfaces: &'a mut HashMap<String, HeadlessSurface>, name: &str) -> Result<&'a mut HeadlessSurface, EngineError> {
    surfaces
        .get_mut(name)
        .ok_or_else(|| EngineError::UnknownWidget(name.to_owned()))
}

/// Hit-test `pointer` against the rendered box.
fn grabbed(surface: &HeadlessSurface, pointer: PointerEvent) -> Result<Interaction, EngineError> {
    let rect = surface.box_rect().ok_or(SurfaceError::MissingElement(Element::Widget))?;
    Ok(hit::classify(pointer.client_x - rect.left, pointer.client_y - rect.top, rect.width, rect.height))
}

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;
