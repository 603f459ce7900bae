use std::collections::HashSet;
use std::time::{Duration, Instant};

use glam::Vec2;

/// Identifier for a mouse button (left button is zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButton(u8);

impl MouseButton {
    pub const LEFT: Self = Self(0);
    pub const RIGHT: Self = Self(1);
    pub const MIDDLE: Self = Self(2);

    pub fn new(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Camera motion driven by a pointer drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Orbit,
    Pan,
}

/// Pointer snapshot used for camera dragging and picking.
#[derive(Debug, Default)]
pub struct PointerState {
    buttons: HashSet<MouseButton>,
    position: Vec2,
    shift: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button_down(&mut self, button: MouseButton) {
        self.buttons.insert(button);
    }

    pub fn set_button_up(&mut self, button: MouseButton) {
        self.buttons.remove(&button);
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    /// Moves the pointer and returns the delta from the previous position.
    pub fn move_to(&mut self, position: Vec2) -> Vec2 {
        let delta = position - self.position;
        self.position = position;
        delta
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_shift(&mut self, held: bool) {
        self.shift = held;
    }

    pub fn shift_held(&self) -> bool {
        self.shift
    }

    /// Right-drag and shift+left-drag pan; a plain left-drag orbits.
    pub fn drag_mode(&self) -> Option<DragMode> {
        if self.is_button_down(MouseButton::RIGHT) {
            Some(DragMode::Pan)
        } else if self.is_button_down(MouseButton::LEFT) {
            Some(if self.shift {
                DragMode::Pan
            } else {
                DragMode::Orbit
            })
        } else {
            None
        }
    }

    pub fn release_all(&mut self) {
        self.buttons.clear();
        self.shift = false;
    }
}

/// Turns raw presses into double-activations.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    interval: Duration,
    max_distance: f32,
    last: Option<(Instant, Vec2)>,
}

impl ClickTracker {
    pub fn new(interval: Duration, max_distance: f32) -> Self {
        Self {
            interval,
            max_distance,
            last: None,
        }
    }

    /// Records a press; returns `true` when it completes a double click.
    ///
    /// A completed double click resets the tracker so a third press starts a
    /// new sequence.
    pub fn press(&mut self, position: Vec2, at: Instant) -> bool {
        let is_double = match self.last {
            Some((previous, origin)) => {
                at.saturating_duration_since(previous) <= self.interval
                    && origin.distance(position) <= self.max_distance
            }
            None => false,
        };
        self.last = if is_double { None } else { Some((at, position)) };
        is_double
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
