//! Held-key tracking
//!
//! Keys are identified by DOM-style strings (`"w"`, `" "`, `"ArrowUp"`), the
//! same identifiers the controls configuration binds actions to.

use std::collections::HashMap;

use winit::event::ElementState;
use winit::keyboard::{Key, NamedKey};

/// Map a winit logical key to its DOM-style identifier.
///
/// Character keys map to their text and the space bar to `" "`. Named keys
/// that make sense as movement or action bindings map to their W3C key name;
/// every other key has no identifier and is ignored.
pub fn key_identifier(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(named) => named_key_identifier(*named).map(str::to_string),
        Key::Unidentified(_) | Key::Dead(_) => None,
    }
}

fn named_key_identifier(key: NamedKey) -> Option<&'static str> {
    let id = match key {
        NamedKey::Space => " ",
        NamedKey::ArrowUp => "ArrowUp",
        NamedKey::ArrowDown => "ArrowDown",
        NamedKey::ArrowLeft => "ArrowLeft",
        NamedKey::ArrowRight => "ArrowRight",
        NamedKey::Enter => "Enter",
        NamedKey::Tab => "Tab",
        NamedKey::Escape => "Escape",
        NamedKey::Backspace => "Backspace",
        NamedKey::Delete => "Delete",
        NamedKey::Insert => "Insert",
        NamedKey::Home => "Home",
        NamedKey::End => "End",
        NamedKey::PageUp => "PageUp",
        NamedKey::PageDown => "PageDown",
        NamedKey::Shift => "Shift",
        NamedKey::Control => "Control",
        NamedKey::Alt => "Alt",
        NamedKey::Super => "Meta",
        NamedKey::CapsLock => "CapsLock",
        _ => return None,
    };
    Some(id)
}

/// Set of currently held keys, each with the tick time (ms) it was pressed at
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    held: HashMap<String, f64>,
}

impl PressedKeys {
    /// Create a new empty key set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses refresh the timestamp.
    pub fn press(&mut self, key: &str, time: f64) {
        self.held.insert(key.to_string(), time);
    }

    /// Record a key release
    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Check if a key is currently held
    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains_key(key)
    }

    /// Tick time at which a held key was pressed
    pub fn pressed_at(&self, key: &str) -> Option<f64> {
        self.held.get(key).copied()
    }

    /// Number of held keys
    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Release every key (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Handle a winit keyboard event
    pub fn handle_keyboard(&mut self, key: &Key, element_state: ElementState, time: f64) {
        let Some(id) = key_identifier(key) else {
            return;
        };
        match element_state {
            ElementState::Pressed => self.press(&id, time),
            ElementState::Released => self.release(&id),
        }
    }
}
