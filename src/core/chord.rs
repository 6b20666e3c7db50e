// File: src/core/chord.rs
use crate::core::types::key;
use std::collections::BTreeSet;

/// Tracks the modifier + shortcut chord that toggles the input language.
///
/// The modifier must be pressed before the shortcut; pressing the modifier
/// while the shortcut is already held restarts the chord. Any other key
/// breaks it. A completed chord fires once and stays latched until either of
/// its keys is released.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChordState {
    held: BTreeSet<u32>,
    fired: bool,
}

impl ChordState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key-down. Returns true when this press completes the chord.
    pub fn on_key_down(&mut self, code: u32, shortcut: u32) -> bool {
        if code == key::MODIFIER {
            self.held.remove(&shortcut);
        }
        if code == key::MODIFIER || code == shortcut {
            self.held.insert(code);
        } else {
            self.held.clear();
            self.fired = false;
        }

        if self.is_complete(shortcut) && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn on_key_up(&mut self, code: u32, shortcut: u32) {
        self.held.remove(&code);
        if code == key::MODIFIER || code == shortcut {
            self.fired = false;
        }
    }

    fn is_complete(&self, shortcut: u32) -> bool {
        self.held.contains(&key::MODIFIER) && self.held.contains(&shortcut)
    }

    /// Key codes currently held towards the chord, ascending.
    pub fn held(&self) -> impl Iterator<Item = u32> + '_ {
        self.held.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: u32 = key::DEFAULT_SHORTCUT;

    #[test]
    fn test_ctrl_then_q_fires() {
        let mut chord = ChordState::new();
        assert!(!chord.on_key_down(key::MODIFIER, Q));
        assert!(chord.on_key_down(Q, Q));
    }

    #[test]
    fn test_held_chord_fires_once() {
        let mut chord = ChordState::new();
        chord.on_key_down(key::MODIFIER, Q);
        let fired = (0..10).filter(|_| chord.on_key_down(Q, Q)).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_modifier_repeat_does_not_refire() {
        let mut chord = ChordState::new();
        chord.on_key_down(key::MODIFIER, Q);
        assert!(chord.on_key_down(Q, Q));
        // Auto-repeat of both keys while still held.
        assert!(!chord.on_key_down(key::MODIFIER, Q));
        assert!(!chord.on_key_down(Q, Q));
    }

    #[test]
    fn test_release_rearms() {
        let mut chord = ChordState::new();
        chord.on_key_down(key::MODIFIER, Q);
        assert!(chord.on_key_down(Q, Q));
        chord.on_key_up(Q, Q);
        assert!(chord.on_key_down(Q, Q));
    }

    #[test]
    fn test_q_then_ctrl_does_not_fire() {
        let mut chord = ChordState::new();
        assert!(!chord.on_key_down(Q, Q));
        assert!(!chord.on_key_down(key::MODIFIER, Q));
        assert_eq!(chord.held().collect::<Vec<_>>(), vec![key::MODIFIER]);
    }

    #[test]
    fn test_other_key_breaks_chord() {
        let mut chord = ChordState::new();
        chord.on_key_down(key::MODIFIER, Q);
        assert!(!chord.on_key_down(65, Q));
        assert!(!chord.on_key_down(Q, Q));
    }

    #[test]
    fn test_custom_shortcut() {
        let space = 32;
        let mut chord = ChordState::new();
        chord.on_key_down(key::MODIFIER, space);
        assert!(!chord.on_key_down(Q, space));
        chord.on_key_down(key::MODIFIER, space);
        assert!(chord.on_key_down(space, space));
    }
}
