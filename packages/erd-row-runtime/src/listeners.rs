//! Click-away listener registry.

use std::collections::BTreeSet;

use crate::row::RowKey;

/// Rows listening for pointer-downs outside themselves.
///
/// A row subscribes when it enters edit mode and unsubscribes when it leaves
/// it or unmounts.
#[derive(Debug, Default)]
pub struct PointerListeners {
    subscribed: BTreeSet<RowKey>,
}

impl PointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, key: RowKey) -> bool {
        self.subscribed.insert(key)
    }

    pub fn unsubscribe(&mut self, key: RowKey) -> bool {
        self.subscribed.remove(&key)
    }

    pub fn contains(&self, key: RowKey) -> bool {
        self.subscribed.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.subscribed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribed.is_empty()
    }

    /// Listeners outside the row that received the pointer-down.
    pub fn outside(&self, target: Option<RowKey>) -> Vec<RowKey> {
        self.subscribed
            .iter()
            .copied()
            .filter(|key| Some(*key) != target)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_skips_target() {
        let mut listeners = PointerListeners::new();
        assert!(listeners.subscribe(RowKey(1)));
        assert!(!listeners.subscribe(RowKey(1)));
        listeners.subscribe(RowKey(2));

        assert_eq!(listeners.outside(Some(RowKey(1))), vec![RowKey(2)]);
        assert_eq!(listeners.outside(None), vec![RowKey(1), RowKey(2)]);

        assert!(listeners.unsubscribe(RowKey(2)));
        assert!(!listeners.contains(RowKey(2)));
        assert_eq!(listeners.len(), 1);
    }
}
