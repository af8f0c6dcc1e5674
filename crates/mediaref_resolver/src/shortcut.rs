//! Keyboard shortcut assignment.

use mediaref_core::MimeClass;
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Number of shortcuts a counter hands out (`1`..`9`, then `0`).
const SHORTCUTS_PER_CLASS: u8 = 10;

/// Hands out `"<letter> 1"` .. `"<letter> 9"`, `"<letter> 0"`, then nothing.
///
/// # Example
///
/// ```
/// use mediaref_resolver::ShortcutCounter;
///
/// let mut counter = ShortcutCounter::new('a');
/// let issued: Vec<_> = std::iter::from_fn(|| counter.next_shortcut()).collect();
/// assert_eq!(issued.len(), 10);
/// assert_eq!(issued[0], "a 1");
/// assert_eq!(issued[9], "a 0");
/// ```
#[derive(Debug, Clone)]
pub struct ShortcutCounter {
    letter: char,
    issued: u8,
}

impl ShortcutCounter {
    /// Create a counter for `letter`.
    pub fn new(letter: char) -> Self {
        Self { letter, issued: 0 }
    }

    /// Next shortcut, or `None` once ten have been issued.
    pub fn next_shortcut(&mut self) -> Option<String> {
        if self.issued >= SHORTCUTS_PER_CLASS {
            return None;
        }
        self.issued += 1;
        Some(format!("{} {}", self.letter, self.issued % 10))
    }

    /// Number of shortcuts issued so far.
    pub fn issued(&self) -> u8 {
        self.issued
    }

    /// Start over at `1`.
    pub fn reset(&mut self) {
        self.issued = 0;
    }
}

/// One counter per mime class that has a shortcut letter.
#[derive(Debug, Clone)]
pub struct ShortcutManager {
    counters: HashMap<MimeClass, ShortcutCounter>,
}

impl ShortcutManager {
    /// Create fresh counters.
    pub fn new() -> Self {
        let counters = MimeClass::iter()
            .filter_map(|class| {
                class
                    .shortcut_letter()
                    .map(|letter| (class, ShortcutCounter::new(letter)))
            })
            .collect();
        Self { counters }
    }

    /// Next shortcut for `class`; `None` for documents or exhausted classes.
    pub fn next_for(&mut self, class: MimeClass) -> Option<String> {
        self.counters.get_mut(&class)?.next_shortcut()
    }

    /// Reset every counter.
    pub fn reset(&mut self) {
        self.counters.values_mut().for_each(ShortcutCounter::reset);
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_count_independently() {
        let mut manager = ShortcutManager::new();
        assert_eq!(manager.next_for(MimeClass::Audio).as_deref(), Some("a 1"));
        assert_eq!(manager.next_for(MimeClass::Video).as_deref(), Some("v 1"));
        assert_eq!(manager.next_for(MimeClass::Image).as_deref(), Some("i 1"));
        assert_eq!(manager.next_for(MimeClass::Audio).as_deref(), Some("a 2"));
        assert_eq!(manager.next_for(MimeClass::Document), None);
    }

    #[test]
    fn test_exhausted_counter_stays_exhausted_until_reset() {
        let mut manager = ShortcutManager::new();
        for _ in 0..10 {
            assert!(manager.next_for(MimeClass::Image).is_some());
        }
        assert_eq!(manager.next_for(MimeClass::Image), None);
        assert_eq!(manager.next_for(MimeClass::Image), None);

        manager.reset();
        assert_eq!(manager.next_for(MimeClass::Image).as_deref(), Some("i 1"));
    }
}
