//! Settings output: where finished layouts go.
//!
//! The store calls [`SettingsOutput::output`] with every widget after add,
//! remove, and the end of a pointer interaction. What happens next (logging,
//! saving, posting to a parent frame) is the host's business.

#[cfg(test)]
#[path = "output_test.rs"]
mod output_test;

use tracing::{info, warn};

use crate::store::WidgetRecord;

/// Receiver for full layout snapshots.
pub trait SettingsOutput {
    fn output(&mut self, widgets: &[WidgetRecord]);
}

impl<F> SettingsOutput for F
where
    F: FnMut(&[WidgetRecord]),
{
    fn output(&mut self, widgets: &[WidgetRecord]) {
        self(widgets);
    }
}

/// Serializes each snapshot and hands the JSON text to `send`.
///
/// The browser board wraps a JavaScript callback in this.
pub struct JsonOutput<F> {
    send: F,
}

impl<F: FnMut(&str)> JsonOutput<F> {
    #[must_use]
    pub fn new(send: F) -> Self {
        Self { send }
    }
}

impl<F: FnMut(&str)> SettingsOutput for JsonOutput<F> {
    fn output(&mut self, widgets: &[WidgetRecord]) {
        match serde_json::to_string(widgets) {
            Ok(json) => (self.send)(&json),
            Err(e) => warn!(error = %e, "failed to serialize widget settings"),
        }
    }
}

/// Emits each snapshot as a JSON field on an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOutput;

impl SettingsOutput for TracingOutput {
    fn output(&mut self, widgets: &[WidgetRecord]) {
        match serde_json::to_string(widgets) {
            Ok(json) => info!(count = widgets.len(), widgets = %json, "widget settings"),
            Err(e) => warn!(error = %e, "failed to serialize widget settings"),
        }
    }
}
