//! Keyboard event hub
//!
//! The host pushes key-release events in as they happen. Screens subscribe on
//! enter and get a `Subscription` whose queue they drain on their next update
//! step. Dropping the subscription unregisters it, so a screen that leaves
//! can't keep receiving keys.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Numeric key code as reported by the browser's `keyCode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const DIGIT_1: KeyCode = KeyCode(49);
    pub const DIGIT_2: KeyCode = KeyCode(50);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const SPACE: KeyCode = KeyCode(32);

    /// Map a `KeyboardEvent.key` string, for hosts that don't expose `keyCode`
    pub fn from_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => Some(KeyCode(c.to_ascii_uppercase() as u32)),
            _ => match key {
                "Enter" => Some(Self::ENTER),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    queues: Vec<(u64, VecDeque<KeyCode>)>,
}

/// Shared handle to the key-release event source
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    registry: Rc<RefCell<Registry>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; events are queued until drained
    pub fn subscribe(&self) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.queues.push((id, VecDeque::new()));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver a key release to every live subscription
    pub fn key_up(&self, key: KeyCode) {
        let mut registry = self.registry.borrow_mut();
        for (_, queue) in &mut registry.queues {
            queue.push_back(key);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().queues.len()
    }
}

/// Live registration with a `Keyboard`; released on drop
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Take every key received since the last drain, oldest first
    pub fn drain(&self) -> Vec<KeyCode> {
        let Some(registry) = self.registry.upgrade() else {
            return Vec::new();
        };
        let mut registry = registry.borrow_mut();
        registry
            .queues
            .iter_mut()
            .find(|(id, _)| *id == self.id)
            .map(|(_, queue)| queue.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .queues
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_every_subscriber() {
        let keyboard = Keyboard::new();
        let a = keyboard.subscribe();
        let b = keyboard.subscribe();

        keyboard.key_up(KeyCode::DIGIT_1);
        keyboard.key_up(KeyCode::DIGIT_2);

        assert_eq!(a.drain(), vec![KeyCode::DIGIT_1, KeyCode::DIGIT_2]);
        assert_eq!(b.drain(), vec![KeyCode::DIGIT_1, KeyCode::DIGIT_2]);
        assert!(a.drain().is_empty());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let keyboard = Keyboard::new();
        let sub = keyboard.subscribe();
        assert_eq!(keyboard.subscriber_count(), 1);

        drop(sub);
        assert_eq!(keyboard.subscriber_count(), 0);
        keyboard.key_up(KeyCode::SPACE);
    }

    #[test]
    fn test_events_before_subscribe_are_not_seen() {
        let keyboard = Keyboard::new();
        keyboard.key_up(KeyCode::DIGIT_1);
        let sub = keyboard.subscribe();
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_subscription_outliving_keyboard() {
        let keyboard = Keyboard::new();
        let sub = keyboard.subscribe();
        drop(keyboard);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_from_key() {
        assert_eq!(KeyCode::from_key("1"), Some(KeyCode::DIGIT_1));
        assert_eq!(KeyCode::from_key("2"), Some(KeyCode::DIGIT_2));
        assert_eq!(KeyCode::from_key("a"), Some(KeyCode(65)));
        assert_eq!(KeyCode::from_key("Enter"), Some(KeyCode::ENTER));
        assert_eq!(KeyCode::from_key("Shift"), None);
    }
}
