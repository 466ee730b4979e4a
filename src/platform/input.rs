//! Keyboard state
//!
//! Key events arrive between frames; the latch folds them into one
//! `KeyState` sample per frame. Held keys stay held, a jump press counts
//! once even if the key was released again before the frame.

use crate::sim::TickInput;

/// Game actions a key can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to an action
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "Space" | "ArrowUp" | "KeyW" => Some(Key::Jump),
            _ => None,
        }
    }
}

/// One frame's worth of input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    /// Jump was pressed since the previous sample
    pub jump: bool,
}

impl KeyState {
    pub fn to_tick_input(self, now_ms: f64) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
            now_ms,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputLatch {
    left: bool,
    right: bool,
    jump_pressed: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => self.jump_pressed = true,
        }
    }

    pub fn release(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Jump => {}
        }
    }

    /// Read this frame's state and clear the one-shot jump
    pub fn sample(&mut self) -> KeyState {
        let state = KeyState {
            left: self.left,
            right: self.right,
            jump: self.jump_pressed,
        };
        self.jump_pressed = false;
        state
    }
}
