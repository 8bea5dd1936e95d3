use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A set of keys bound to one action, plus the label shown for it in a toolbar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub label_key: String,
    pub label_desc: String,
}

impl Binding {
    pub fn new(
        label_key: impl Into<String>,
        label_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            label_key: label_key.into(),
            label_desc: label_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        any_matches(&self.keys, event)
    }
}

pub fn any_matches(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

/// Exact match on key code and all three modifiers.
///
/// Uppercase characters are matched as typed, so `key_char('G')` matches a `G` whether or not
/// the backend also reported `shift`.
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    let shift_insensitive = matches!(pattern.code, KeyCode::Char(c) if c.is_uppercase());
    (shift_insensitive || pattern.modifiers.shift == event.modifiers.shift)
        && pattern.modifiers.ctrl == event.modifiers.ctrl
        && pattern.modifiers.alt == event.modifiers.alt
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

pub fn key_alt(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::alt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("alt+b", "bold", vec![key_alt('b')]);
        assert!(b.matches(&key_alt('b')));
        assert!(!b.matches(&key_char('b')));
        assert!(!b.matches(&key_ctrl('b')));
    }

    #[test]
    fn uppercase_ignores_shift_flag() {
        let shifted = key_char('G').with_modifiers(KeyModifiers::shift());
        assert!(key_event_matches(&key_char('G'), &shifted));
        assert!(key_event_matches(&key_char('G'), &key_char('G')));
    }
}
