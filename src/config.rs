//! Replay configuration: container size and geometry policy.

use dashboard::engine::EngineConfig;
use dashboard::geometry::PixelRect;
use dashboard::policy::Policy;

pub const DEFAULT_CONTAINER_WIDTH_PX: f64 = 800.0;
pub const DEFAULT_CONTAINER_HEIGHT_PX: f64 = 600.0;

/// Widgets a selection list offers. Read-only; the board itself accepts any name.
pub const WIDGET_CATALOG: [&str; 6] = ["News Feed", "Note", "Poster", "Sample Widget 1", "Sample Widget 2", "Sample Widget 3"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("container {axis} must be a positive number of pixels, got {value}")]
    Container { axis: &'static str, value: f64 },
    #[error("min box size must be in (0, 100], got {0}")]
    MinBoxSize(f64),
    #[error("snap distance must be in [0, 50), got {0}")]
    SnapToEnd(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    /// Simulated container, anchored at the viewport origin.
    pub container: PixelRect,
    pub engine: EngineConfig,
}

impl BoardConfig {
    /// Validate raw settings.
    ///
    /// - `width`/`height`: positive, finite
    /// - `min_box_size`: `0 < v <= 100`
    /// - `snap_to_end`: `0 <= v < 50`
    pub fn new(width: f64, height: f64, min_box_size: f64, snap_to_end: f64) -> Result<Self, ConfigError> {
        let container = PixelRect::new(0.0, 0.0, positive("width", width)?, positive("height", height)?);
        if !(min_box_size > 0.0 && min_box_size <= 100.0) {
            return Err(ConfigError::MinBoxSize(min_box_size));
        }
        if !(0.0..50.0).contains(&snap_to_end) {
            return Err(ConfigError::SnapToEnd(snap_to_end));
        }
        let engine = EngineConfig { policy: Policy { min_box_size, snap_to_end }, ..EngineConfig::default() };
        Ok(Self { container, engine })
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            container: PixelRect::new(0.0, 0.0, DEFAULT_CONTAINER_WIDTH_PX, DEFAULT_CONTAINER_HEIGHT_PX),
            engine: EngineConfig::default(),
        }
    }
}

fn positive(axis: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(value) } else { Err(ConfigError::Container { axis, value }) }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
