//! Input event types passed from the display surface.

use crate::shapes::ShapeId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A press and release closer than this on both axes (in screen pixels)
/// count as a click.
pub const CLICK_DISTANCE: f64 = 5.0;

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Up { position: Point },
    Move { position: Point },
    Scroll { position: Point, delta: Vec2 },
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other(String),
}

impl Key {
    /// Map a DOM-style key name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    /// Whether this key deletes the selection.
    pub fn is_delete(&self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// What the pointer landed on, as reported by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Background, grid or the stage itself.
    Empty,
    Shape(ShapeId),
    /// A transformer handle; clicks on it never change the selection.
    Transformer,
}

/// Whether a press/release pair forms a click rather than a drag.
pub fn is_click(down: Point, up: Point) -> bool {
    let delta = up - down;
    delta.x.abs() < CLICK_DISTANCE && delta.y.abs() < CLICK_DISTANCE
}

/// Tracks the pointer between press and release.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Where the primary button went down, if it is held.
    pub press_position: Option<Point>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a pointer event. Returns the press position when the event
    /// completes a click.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<Point> {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_position = position;
                self.press_position = Some(position);
                None
            }
            PointerEvent::Up { position } => {
                self.pointer_position = position;
                self.press_position
                    .take()
                    .filter(|down| is_click(*down, position))
            }
            PointerEvent::Move { position } | PointerEvent::Scroll { position, .. } => {
                self.pointer_position = position;
                None
            }
        }
    }

    /// Whether the primary button is currently held.
    pub fn is_pressed(&self) -> bool {
        self.press_position.is_some()
    }
}
