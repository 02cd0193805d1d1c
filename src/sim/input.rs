//! Normalized input state
//!
//! Host listeners write into an `InputState` as events arrive; the frame
//! loop takes a `TickInput` snapshot once per frame.

use std::collections::HashMap;

use glam::Vec2;

use super::tick::TickInput;

/// Logical controls the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Control {
    /// Map a keyboard key name (as reported by the browser) to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Control::Up),
            "s" | "arrowdown" => Some(Control::Down),
            "a" | "arrowleft" => Some(Control::Left),
            "d" | "arrowright" => Some(Control::Right),
            _ => None,
        }
    }

    /// Map a mouse button index to a control; any button fires
    pub fn from_mouse_button(button: i16) -> Option<Self> {
        (button >= 0).then_some(Control::Fire)
    }
}

/// Live pressed-state map, pointer position and queued fire events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashMap<Control, bool>,
    pointer: Vec2,
    fire_queue: Vec<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&mut self, control: Control, pressed: bool) {
        self.held.insert(control, pressed);
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.held.get(&control).copied().unwrap_or(false)
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Record a discrete fire action aimed at `at`
    pub fn push_fire(&mut self, at: Vec2) {
        self.pointer = at;
        self.fire_queue.push(at);
    }

    /// Release every held control (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Per-frame snapshot; consumes queued fire events
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            up: self.is_pressed(Control::Up),
            down: self.is_pressed(Control::Down),
            left: self.is_pressed(Control::Left),
            right: self.is_pressed(Control::Right),
            fire_at: std::mem::take(&mut self.fire_queue),
        }
    }
}
