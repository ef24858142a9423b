//! Keyboard input handling for the game.
//!
//! This module defines the [`GameKey`] enum for abstracting game actions from physical keys,
//! and provides [`KeyState`] for tracking held keys and applying them to the [`GameState`].
//! It also includes utilities for mapping from winit key events to game actions.

use crate::game::GameState;
use std::collections::HashSet;
use winit::keyboard;

/// In-game actions that can be triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Move player forward (W or Up Arrow).
    MoveForward,
    /// Move player backward (S or Down Arrow).
    MoveBackward,
    /// Strafe left (A or Left Arrow).
    MoveLeft,
    /// Strafe right (D or Right Arrow).
    MoveRight,
    /// Carve a new maze (Space).
    Regenerate,
    /// Close the window (Escape).
    Exit,
}

impl GameKey {
    /// Actions that fire once per physical press rather than while held.
    pub fn is_one_shot(self) -> bool {
        matches!(self, GameKey::Regenerate | GameKey::Exit)
    }
}

/// Tracks the set of currently held game keys.
#[derive(Debug, Default)]
pub struct KeyState {
    /// Set of currently pressed keys.
    pub pressed_keys: HashSet<GameKey>,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    /// Marks a key as pressed. Returns `true` if it was not already held,
    /// so key repeat can be told apart from a fresh press.
    pub fn press_key(&mut self, key: GameKey) -> bool {
        self.pressed_keys.insert(key)
    }

    pub fn release_key(&mut self, key: GameKey) {
        self.pressed_keys.remove(&key);
    }

    pub fn is_pressed(&self, key: GameKey) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }

    /// Moves the player according to the held movement keys.
    ///
    /// Returns `true` if the player moved this frame.
    pub fn update(&self, game_state: &mut GameState) -> bool {
        let forward = self.is_pressed(GameKey::MoveForward);
        let backward = self.is_pressed(GameKey::MoveBackward);
        let left = self.is_pressed(GameKey::MoveLeft);
        let right = self.is_pressed(GameKey::MoveRight);

        if !(forward || backward || left || right) {
            return false;
        }
        game_state.update_movement(forward, backward, left, right)
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it matches a mapped action.
///
/// Supports named keys (arrows, space, escape) and the WASD character keys,
/// case-insensitively.
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowUp => GameKey::MoveForward,
            ArrowDown => GameKey::MoveBackward,
            ArrowLeft => GameKey::MoveLeft,
            ArrowRight => GameKey::MoveRight,
            Space => GameKey::Regenerate,
            Escape => GameKey::Exit,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "w" => GameKey::MoveForward,
            "s" => GameKey::MoveBackward,
            "a" => GameKey::MoveLeft,
            "d" => GameKey::MoveRight,
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key, NamedKey, SmolStr};

    #[test]
    fn test_wasd_and_arrows_map_to_movement() {
        let w = Key::Character(SmolStr::new("w"));
        let upper_d = Key::Character(SmolStr::new("D"));
        assert_eq!(winit_key_to_game_key(&w), Some(GameKey::MoveForward));
        assert_eq!(winit_key_to_game_key(&upper_d), Some(GameKey::MoveRight));
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::ArrowLeft)),
            Some(GameKey::MoveLeft)
        );
    }

    #[test]
    fn test_space_and_escape() {
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::Space)),
            Some(GameKey::Regenerate)
        );
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::Escape)),
            Some(GameKey::Exit)
        );
        assert_eq!(winit_key_to_game_key(&Key::Named(NamedKey::Shift)), None);
        assert_eq!(
            winit_key_to_game_key(&Key::Character(SmolStr::new("q"))),
            None
        );
    }

    /// A second press without a release is reported as a repeat.
    #[test]
    fn test_press_reports_repeat() {
        let mut keys = KeyState::new();
        assert!(keys.press_key(GameKey::Regenerate));
        assert!(!keys.press_key(GameKey::Regenerate));
        keys.release_key(GameKey::Regenerate);
        assert!(keys.press_key(GameKey::Regenerate));
        assert!(GameKey::Regenerate.is_one_shot());
        assert!(!GameKey::MoveForward.is_one_shot());
    }
}
