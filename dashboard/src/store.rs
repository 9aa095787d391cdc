//! Widget records and the store that keeps their stacking order.
//!
//! `WidgetRecord` is what the dashboard knows about one widget: its name and
//! its box in container percent, plus a stack index. `LayoutStore` owns the
//! records in insertion order and is the only place stack indices change. The
//! indices of N records are always exactly `1..=N`.
//!
//! Every mutation that completes a user-visible change (add, remove, and the
//! end of a pointer interaction) hands the full collection to the configured
//! [`SettingsOutput`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{DEFAULT_HEIGHT_PCT, DEFAULT_LEFT_PCT, DEFAULT_TOP_PCT, DEFAULT_WIDTH_PCT};
use crate::geometry::PercentRect;
use crate::output::{SettingsOutput, TracingOutput};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("a widget named {0:?} already exists")]
    DuplicateName(String),
}

/// Top-left offset of a widget in container percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

/// Dimensions of a widget in container percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// One widget on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetRecord {
    /// Unique name; the lookup key.
    pub name: String,
    #[serde(flatten)]
    pub position: Position,
    #[serde(flatten)]
    pub size: Size,
    /// Front-to-back rank; higher values paint above lower ones.
    #[serde(rename = "z_index")]
    pub stack_index: u32,
}

impl WidgetRecord {
    /// The record's box as a [`PercentRect`].
    #[must_use]
    pub fn rect(&self) -> PercentRect {
        PercentRect::new(self.position.left, self.position.top, self.size.width, self.size.height)
    }
}

/// New geometry for a named widget, as reported by the interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetGeometry {
    pub name: String,
    pub position: Position,
    pub size: Size,
}

impl WidgetGeometry {
    #[must_use]
    pub fn from_rect(name: &str, rect: PercentRect) -> Self {
        Self {
            name: name.to_owned(),
            position: Position { top: rect.y, left: rect.x },
            size: Size { width: rect.width, height: rect.height },
        }
    }
}

/// Result of [`LayoutStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Ordered collection of widget records.
pub struct LayoutStore {
    records: Vec<WidgetRecord>,
    default_box: PercentRect,
    output: Box<dyn SettingsOutput>,
}

impl LayoutStore {
    /// Create an empty store that logs settings snapshots through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(TracingOutput)
    }

    /// Create an empty store that reports settings snapshots to `output`.
    #[must_use]
    pub fn with_output(output: impl SettingsOutput + 'static) -> Self {
        Self {
            records: Vec::new(),
            default_box: PercentRect::new(DEFAULT_LEFT_PCT, DEFAULT_TOP_PCT, DEFAULT_WIDTH_PCT, DEFAULT_HEIGHT_PCT),
            output: Box::new(output),
        }
    }

    /// Use `rect` as the box for widgets added from now on.
    #[must_use]
    pub fn default_box(mut self, rect: PercentRect) -> Self {
        self.default_box = rect;
        self
    }

    /// Append a widget at the default box, in front of every other widget.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`] if `name` is already on the board.
    pub fn add(&mut self, name: &str) -> Result<WidgetRecord, StoreError> {
        if self.get(name).is_some() {
            return Err(StoreError::DuplicateName(name.to_owned()));
        }
        let record = WidgetRecord {
            name: name.to_owned(),
            position: Position { top: self.default_box.y, left: self.default_box.x },
            size: Size { width: self.default_box.width, height: self.default_box.height },
            stack_index: self.next_stack_index(),
        };
        info!(%name, stack_index = record.stack_index, "widget added");
        self.records.push(record.clone());
        self.output_settings();
        Ok(record)
    }

    /// Add a widget named `Widget {n}` where `n` is one past the current count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`] if that name is already taken.
    pub fn add_next(&mut self) -> Result<WidgetRecord, StoreError> {
        let name = format!("Widget {}", self.records.len() + 1);
        self.add(&name)
    }

    /// Remove a widget by name. Widgets stacked above it close the gap.
    ///
    /// Returns the removed record, or `None` (and does nothing) if absent.
    pub fn remove(&mut self, name: &str) -> Option<WidgetRecord> {
        let pos = self.records.iter().position(|r| r.name == name)?;
        let removed = self.records.remove(pos);
        for r in &mut self.records {
            if r.stack_index > removed.stack_index {
                r.stack_index -= 1;
            }
        }
        info!(%name, remaining = self.records.len(), "widget removed");
        self.output_settings();
        Some(removed)
    }

    /// Remove the widget if present, add it otherwise.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutStore::add`] errors.
    pub fn toggle(&mut self, name: &str) -> Result<Toggled, StoreError> {
        if self.remove(name).is_some() {
            return Ok(Toggled::Removed);
        }
        self.add(name)?;
        Ok(Toggled::Added)
    }

    /// Replace a widget's geometry and bring it to the front.
    ///
    /// The previous topmost widget ends up directly behind it. Returns false
    /// if no widget has that name.
    pub fn update(&mut self, geometry: &WidgetGeometry) -> bool {
        let top = self.top_stack_index();
        let Some(target) = self.get(&geometry.name).map(|r| r.stack_index) else {
            return false;
        };
        if target != top {
            for r in &mut self.records {
                if r.name != geometry.name && r.stack_index > target {
                    r.stack_index -= 1;
                }
            }
        }
        let Some(record) = self.records.iter_mut().find(|r| r.name == geometry.name) else {
            return false;
        };
        record.position = geometry.position;
        record.size = geometry.size;
        record.stack_index = top;
        debug!(
            name = %geometry.name,
            left = geometry.position.left,
            top = geometry.position.top,
            width = geometry.size.width,
            height = geometry.size.height,
            "widget updated"
        );
        true
    }

    /// Hand the current collection to the settings output.
    pub fn output_settings(&mut self) {
        self.output.output(&self.records);
    }

    /// Look up a widget by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WidgetRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// All widgets in insertion order.
    #[must_use]
    pub fn widgets(&self) -> &[WidgetRecord] {
        &self.records
    }

    /// All widgets in paint order (back to front).
    #[must_use]
    pub fn sorted_by_stack(&self) -> Vec<&WidgetRecord> {
        let mut sorted: Vec<&WidgetRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.stack_index);
        sorted
    }

    /// The widget painted in front of all others.
    #[must_use]
    pub fn topmost(&self) -> Option<&WidgetRecord> {
        self.records.iter().max_by_key(|r| r.stack_index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the collection as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }

    fn top_stack_index(&self) -> u32 {
        u32::try_from(self.records.len()).unwrap_or(u32::MAX)
    }

    fn next_stack_index(&self) -> u32 {
        self.top_stack_index().saturating_add(1)
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new()
    }
}
