//! Keyboard input, translated into game events.

use crate::{
    cheat_code::{
        CheatCodeParser,
        CheatCommand,
        CheatKey,
        CheatOutcome,
    },
    movement::Horizontal,
};
use std::collections::HashSet;
use winit::keyboard::KeyCode;


/// Discrete input event for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Quit,
    Reset,
    /// Jump-only key pressed.
    JumpPressed,
    /// Up key pressed. Enters a door if standing in one, otherwise jumps.
    JumpOrEnterPressed,
    JumpReleased,
    GravityUp,
    GravityDown,
    JumpSpeedUp,
    JumpSpeedDown,
    Cheat(CheatCommand),
}

/// Keyboard state: which keys are held, and any cheat code being typed.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    pressed_keys: HashSet<KeyCode>,
    cheat: CheatCodeParser,
}

impl KeyboardInput {
    pub fn new() -> Self {
        KeyboardInput::default()
    }

    /// Handle a key press, with the text the key would type if any.
    ///
    /// Repeated presses of a key already held are ignored.
    pub fn on_key_press(&mut self, key: KeyCode, text: Option<&str>) -> Option<InputEvent> {
        if !self.pressed_keys.insert(key) {
            return None;
        }

        match cheat_key(key, text).map(|cheat_key| self.cheat.on_key(cheat_key)) {
            Some(CheatOutcome::Dispatched(command)) => return Some(InputEvent::Cheat(command)),
            Some(CheatOutcome::Capturing) | Some(CheatOutcome::Cancelled(_)) => return None,
            Some(CheatOutcome::Ignored) | None => {
                if self.cheat.is_capturing() {
                    return None;
                }
            }
        }

        match key {
            KeyCode::Escape => Some(InputEvent::Quit),
            KeyCode::KeyR => Some(InputEvent::Reset),
            KeyCode::Space => Some(InputEvent::JumpPressed),
            KeyCode::KeyW | KeyCode::ArrowUp => Some(InputEvent::JumpOrEnterPressed),
            KeyCode::PageUp => Some(InputEvent::GravityUp),
            KeyCode::PageDown => Some(InputEvent::GravityDown),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(InputEvent::JumpSpeedUp),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(InputEvent::JumpSpeedDown),
            _ => None,
        }
    }

    pub fn on_key_release(&mut self, key: KeyCode) -> Option<InputEvent> {
        if !self.pressed_keys.remove(&key) || self.cheat.is_capturing() {
            return None;
        }
        match key {
            KeyCode::Space | KeyCode::KeyW | KeyCode::ArrowUp => Some(InputEvent::JumpReleased),
            _ => None,
        }
    }

    /// Release all keys, such as when the window loses focus.
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        let keys = self.pressed_keys.iter().copied().collect::<Vec<_>>();
        keys.into_iter().filter_map(|key| self.on_key_release(key)).collect()
    }

    /// Held movement direction. Neutral while a cheat code is being typed.
    pub fn horizontal(&self) -> Horizontal {
        if self.cheat.is_capturing() {
            return Horizontal::Neutral;
        }
        let held = |a, b| self.pressed_keys.contains(&a) || self.pressed_keys.contains(&b);
        Horizontal::from_held(
            held(KeyCode::KeyA, KeyCode::ArrowLeft),
            held(KeyCode::KeyD, KeyCode::ArrowRight),
        )
    }

    /// Cheat code text typed so far, if one is being typed.
    pub fn cheat_buffer(&self) -> Option<&str> {
        self.cheat.buffer()
    }
}

fn cheat_key(key: KeyCode, text: Option<&str>) -> Option<CheatKey> {
    match key {
        KeyCode::Enter | KeyCode::NumpadEnter => Some(CheatKey::Enter),
        KeyCode::Backspace => Some(CheatKey::Backspace),
        KeyCode::Escape => Some(CheatKey::Escape),
        _ => text.and_then(|s| s.chars().next()).map(CheatKey::Char),
    }
}


#[cfg(test)]
fn tap(input: &mut KeyboardInput, key: KeyCode, text: &str) -> Option<InputEvent> {
    let event = input.on_key_press(key, Some(text));
    input.on_key_release(key);
    event
}

#[test]
fn test_key_mapping() {
    let mut input = KeyboardInput::new();
    assert_eq!(tap(&mut input, KeyCode::KeyR, "r"), Some(InputEvent::Reset));
    assert_eq!(tap(&mut input, KeyCode::PageUp, ""), Some(InputEvent::GravityUp));
    assert_eq!(tap(&mut input, KeyCode::Minus, "-"), Some(InputEvent::JumpSpeedDown));
    assert_eq!(input.on_key_press(KeyCode::Space, Some(" ")), Some(InputEvent::JumpPressed));
    assert_eq!(input.on_key_release(KeyCode::Space), Some(InputEvent::JumpReleased));
    assert_eq!(input.on_key_press(KeyCode::ArrowUp, None), Some(InputEvent::JumpOrEnterPressed));
    assert_eq!(input.on_key_press(KeyCode::Escape, None), Some(InputEvent::Quit));
}

#[test]
fn test_repeat_press_ignored() {
    let mut input = KeyboardInput::new();
    assert_eq!(input.on_key_press(KeyCode::Space, Some(" ")), Some(InputEvent::JumpPressed));
    assert_eq!(input.on_key_press(KeyCode::Space, Some(" ")), None);
    assert_eq!(input.on_key_release(KeyCode::Space), Some(InputEvent::JumpReleased));
    assert_eq!(input.on_key_release(KeyCode::Space), None);
}

#[test]
fn test_horizontal_from_held_keys() {
    let mut input = KeyboardInput::new();
    assert_eq!(input.horizontal(), Horizontal::Neutral);
    input.on_key_press(KeyCode::KeyA, Some("a"));
    assert_eq!(input.horizontal(), Horizontal::Left);
    input.on_key_press(KeyCode::ArrowRight, None);
    assert_eq!(input.horizontal(), Horizontal::Neutral);
    input.on_key_release(KeyCode::KeyA);
    assert_eq!(input.horizontal(), Horizontal::Right);
    input.release_all();
    assert_eq!(input.horizontal(), Horizontal::Neutral);
}

#[test]
fn test_cheat_code_captures_gameplay_keys() {
    let mut input = KeyboardInput::new();
    assert_eq!(tap(&mut input, KeyCode::Slash, "/"), None);
    assert_eq!(tap(&mut input, KeyCode::KeyB, "b"), None);
    assert_eq!(tap(&mut input, KeyCode::KeyR, "r"), None);
    input.on_key_press(KeyCode::KeyD, Some("d"));
    assert_eq!(input.horizontal(), Horizontal::Neutral);
    assert_eq!(input.cheat_buffer(), Some("brd"));
    input.on_key_release(KeyCode::KeyD);
    assert_eq!(tap(&mut input, KeyCode::PageUp, ""), None);
    assert_eq!(tap(&mut input, KeyCode::Escape, ""), None);
    assert_eq!(input.cheat_buffer(), None);
    assert_eq!(tap(&mut input, KeyCode::Escape, ""), Some(InputEvent::Quit));
}

#[test]
fn test_cheat_code_swallows_jump_release() {
    let mut input = KeyboardInput::new();
    assert_eq!(tap(&mut input, KeyCode::Slash, "/"), None);
    assert_eq!(tap(&mut input, KeyCode::KeyB, "b"), None);
    assert_eq!(input.on_key_press(KeyCode::KeyW, Some("w")), None);
    assert_eq!(input.on_key_release(KeyCode::KeyW), None);
    assert_eq!(input.cheat_buffer(), Some("bw"));
    assert_eq!(tap(&mut input, KeyCode::Escape, ""), None);
    assert_eq!(input.on_key_press(KeyCode::KeyW, Some("w")), Some(InputEvent::JumpOrEnterPressed));
    assert_eq!(input.on_key_release(KeyCode::KeyW), Some(InputEvent::JumpReleased));
}

#[test]
fn test_cheat_code_dispatch() {
    let mut input = KeyboardInput::new();
    for (key, text) in [
        (KeyCode::Slash, "/"),
        (KeyCode::KeyG, "g"),
        (KeyCode::Digit3, "3"),
        (KeyCode::Digit0, "0"),
        (KeyCode::Digit1, "1"),
        (KeyCode::Digit0, "0"),
    ] {
        assert_eq!(tap(&mut input, key, text), None);
    }
    assert_eq!(
        tap(&mut input, KeyCode::Enter, "\r"),
        Some(InputEvent::Cheat(CheatCommand::SetGravity(3010.0))),
    );
    assert_eq!(input.cheat_buffer(), None);
}
