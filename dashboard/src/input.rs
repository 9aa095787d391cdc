//! Input model: pointer events, interaction modes, and the session state machine.
//!
//! `PointerEvent` is the only shape raw pointer input takes once it crosses
//! into the engine, and it is validated on construction. `Session` is the
//! active interaction being tracked between pointer-down and pointer-up or
//! pointer-leave, carrying the context needed to compute each move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::PercentPoint;

/// Errors raised while validating raw input at the engine boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("pointer coordinates must be finite, got ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
    #[error("unknown hotspot: {0}")]
    UnknownHotspot(String),
}

/// A pointer position in client (viewport) CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    /// Validate raw client coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonFinite`] if either coordinate is NaN or infinite.
    pub fn new(client_x: f64, client_y: f64) -> Result<Self, InputError> {
        if !client_x.is_finite() || !client_y.is_finite() {
            return Err(InputError::NonFinite { x: client_x, y: client_y });
        }
        Ok(Self { client_x, client_y })
    }
}

/// Edge or corner being dragged by a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::Ne,
        Direction::E,
        Direction::Se,
        Direction::S,
        Direction::Sw,
        Direction::W,
        Direction::Nw,
    ];

    /// Position of this direction in [`Direction::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::N => 0,
            Self::Ne => 1,
            Self::E => 2,
            Self::Se => 3,
            Self::S => 4,
            Self::Sw => 5,
            Self::W => 6,
            Self::Nw => 7,
        }
    }

    /// Whether the top edge moves.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Whether the bottom edge moves.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Whether the left edge moves.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether the right edge moves.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Whether this is one of the four corners.
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownHotspot(s.to_owned()))
    }
}

/// What a pointer-down asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Drag the whole box.
    Move,
    /// Drag one edge or corner.
    Resize(Direction),
}

/// Why a session is ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The pointer button was released over the widget.
    PointerUp,
    /// The pointer left the widget's hit area.
    PointerLeave,
}

/// Per-widget interaction state between pointer-down and pointer-up/leave.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Session {
    /// No interaction in progress.
    #[default]
    Idle,
    /// The box follows the pointer.
    Dragging {
        /// Pointer position at pointer-down in percent of the box's own size.
        grab: PercentPoint,
    },
    /// One edge or corner follows the pointer.
    Resizing {
        /// Which edge or corner.
        direction: Direction,
    },
}

impl Session {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The interaction this session represents, if any.
    #[must_use]
    pub fn interaction(&self) -> Option<Interaction> {
        match self {
            Self::Idle => None,
            Self::Dragging { .. } => Some(Interaction::Move),
            Self::Resizing { direction } => Some(Interaction::Resize(*direction)),
        }
    }
}
