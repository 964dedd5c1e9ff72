use std::collections::HashSet;

use super::snapshot::InputSnapshot;
use super::types::Key;

/// Keyboard state visible to game callbacks.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    key_repeat: bool,
    down: HashSet<Key>,
}

impl Keyboard {
    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    /// True if any of `keys` is held.
    pub fn is_any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.down.contains(k))
    }

    pub fn has_key_repeat(&self) -> bool {
        self.key_repeat
    }

    /// While enabled, a held key fires `key_pressed` every frame with
    /// `is_repeat` set.
    pub fn set_key_repeat(&mut self, enabled: bool) {
        self.key_repeat = enabled;
    }

    pub(crate) fn sync(&mut self, snapshot: &InputSnapshot) {
        self.down.clone_from(&snapshot.keys_down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_synced_snapshot() {
        let mut kb = Keyboard::default();
        kb.sync(&InputSnapshot::baseline(1, 1).with_key(Key::W));
        assert!(kb.is_down(Key::W));
        assert!(!kb.is_down(Key::S));
        assert!(kb.is_any_down(&[Key::S, Key::W]));
        assert!(!kb.is_any_down(&[]));
    }

    #[test]
    fn repeat_defaults_off() {
        let mut kb = Keyboard::default();
        assert!(!kb.has_key_repeat());
        kb.set_key_repeat(true);
        assert!(kb.has_key_repeat());
    }
}
