//! # Round-Robin Distribution
//!
//! Cycles through a fixed, ordered list of values so that consecutive
//! invocations address consecutive targets.
//!
//! A [`RoundRobinCursor`] is plain mutable state: it advances one position per
//! `next()` and never yields `None`. It does not synchronize itself. When one
//! cursor is shared by several worker tasks, wrap it in a [`SharedCursor`] (or
//! any other lock) so every draw observes a single advancing position.
//!
//! ```rust
//! use deferred_actions::round_robin::RoundRobin;
//!
//! let targets = RoundRobin::new(vec!["publish-1", "publish-2"]).unwrap();
//! let picked: Vec<_> = targets.iter().take(5).collect();
//! assert_eq!(picked, ["publish-1", "publish-2", "publish-1", "publish-2", "publish-1"]);
//! ```

use crate::error::{ActionError, ActionResult};
use parking_lot::Mutex;
use std::sync::Arc;

/// Immutable, non-empty list of values to distribute
#[derive(Debug, Clone)]
pub struct RoundRobin<T> {
    items: Arc<[T]>,
}

impl<T: Clone> RoundRobin<T> {
    /// Build a distributor; an empty list is rejected
    pub fn new(items: Vec<T>) -> ActionResult<Self> {
        if items.is_empty() {
            return Err(ActionError::Validation(
                "round robin requires at least one value".to_string(),
            ));
        }
        Ok(Self {
            items: items.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn values(&self) -> &[T] {
        &self.items
    }

    /// A new cursor starting at the first value
    pub fn iter(&self) -> RoundRobinCursor<T> {
        RoundRobinCursor {
            items: Arc::clone(&self.items),
            position: 0,
        }
    }

    /// A new cursor behind a lock, for sharing across tasks
    pub fn shared(&self) -> SharedCursor<T> {
        SharedCursor::new(self.iter())
    }
}

impl<'a, T: Clone> IntoIterator for &'a RoundRobin<T> {
    type Item = T;
    type IntoIter = RoundRobinCursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only, infinite cursor over a [`RoundRobin`]
#[derive(Debug)]
pub struct RoundRobinCursor<T> {
    items: Arc<[T]>,
    position: usize,
}

impl<T> RoundRobinCursor<T> {
    /// Index of the value the next draw returns
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<T: Clone> RoundRobinCursor<T> {
    /// Return the current value and step forward, wrapping at the end
    fn draw(&mut self) -> T {
        let value = self.items[self.position].clone();
        self.position = (self.position + 1) % self.items.len();
        value
    }
}

impl<T: Clone> Iterator for RoundRobinCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// A cursor serialized behind a mutex
#[derive(Debug)]
pub struct SharedCursor<T> {
    cursor: Mutex<RoundRobinCursor<T>>,
}

impl<T: Clone> SharedCursor<T> {
    pub fn new(cursor: RoundRobinCursor<T>) -> Self {
        Self {
            cursor: Mutex::new(cursor),
        }
    }

    /// Take the next value, advancing the shared position exactly once
    pub fn advance(&self) -> T {
        self.cursor.lock().draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_shared_cursor_matches_plain_cursor() {
        let rr = RoundRobin::new(vec![1, 2, 3]).unwrap();
        let shared = rr.shared();
        let from_shared: Vec<_> = (0..7).map(|_| shared.advance()).collect();
        let from_plain: Vec<_> = rr.iter().take(7).collect();
        assert_eq!(from_shared, from_plain);
    }

    #[test]
    fn test_cycles_in_list_order() {
        let rr = RoundRobin::new(vec!['A', 'B', 'C']).unwrap();
        let drawn: String = rr.iter().take(7).collect();
        assert_eq!(drawn, "ABCABCA");
    }

    #[test]
    fn test_single_value_repeats() {
        let rr = RoundRobin::new(vec![42]).unwrap();
        assert!(rr.iter().take(5).all(|v| v == 42));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let result = RoundRobin::<u8>::new(Vec::new());
        assert!(matches!(result, Err(ActionError::Validation(_))));
    }

    #[test]
    fn test_new_cursor_restarts() {
        let rr = RoundRobin::new(vec![1, 2, 3]).unwrap();
        let mut first = rr.iter();
        first.next();
        first.next();
        assert_eq!(first.position(), 2);
        assert_eq!(rr.iter().next(), Some(1));
        assert_eq!(first.next(), Some(3));
    }

    #[test]
    fn test_remainder_goes_to_first_targets() {
        let rr = RoundRobin::new(vec!["a", "b", "c"]).unwrap();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for target in rr.iter().take(11) {
            *counts.entry(target).or_default() += 1;
        }
        assert_eq!(counts["a"], 4);
        assert_eq!(counts["b"], 4);
        assert_eq!(counts["c"], 3);
    }

    #[test]
    fn test_shared_cursor_advances_once_per_draw() {
        let rr = RoundRobin::new(vec![0usize, 1, 2, 3]).unwrap();
        let shared = Arc::new(rr.shared());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || (0..100).map(|_| shared.advance()).collect::<Vec<_>>())
            })
            .collect();

        let mut counts = [0usize; 4];
        for handle in handles {
            for value in handle.join().unwrap() {
                counts[value] += 1;
            }
        }
        assert_eq!(counts, [100, 100, 100, 100]);
    }
}
