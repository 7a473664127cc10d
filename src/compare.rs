//! Bounded selection of catalog items for side-by-side comparison.
//!
//! The selection is a plain value owned by whichever view renders it and is
//! passed by `&mut` to event handlers. It never persists: a new view starts
//! empty.

use crate::catalog::Font;

/// Maximum number of items compared at once.
pub const CAPACITY: usize = 3;

/// Minimum number of items before a comparison makes sense.
pub const MIN_TO_COMPARE: usize = 2;

/// Anything with a stable identity can be selected.
pub trait Selectable {
    fn selection_id(&self) -> &str;
}

impl Selectable for Font {
    fn selection_id(&self) -> &str {
        &self.id
    }
}

/// Result of a selection action, for driving the control's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// Already selected, or the selection is full. Nothing changed.
    Rejected,
}

/// At most [`CAPACITY`] distinct items, in insertion order.
#[derive(Debug, Clone)]
pub struct ComparisonSelection<T> {
    items: Vec<T>,
}

impl<T> Default for ComparisonSelection<T> {
    fn default() -> Self {
        Self {
            items: Vec::with_capacity(CAPACITY),
        }
    }
}

impl<T: Selectable> ComparisonSelection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) -> SelectionChange {
        if self.is_full() || self.is_selected(item.selection_id()) {
            return SelectionChange::Rejected;
        }
        self.items.push(item);
        SelectionChange::Added
    }

    /// Returns whether the item was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.selection_id() != id);
        self.items.len() != before
    }

    pub fn toggle(&mut self, item: T) -> SelectionChange {
        if self.remove(item.selection_id()) {
            SelectionChange::Removed
        } else {
            self.add(item)
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.selection_id() == id)
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    /// Clears the selection when a click lands outside any interactive
    /// region. Returns whether anything was cleared.
    pub fn dismiss_on_background(&mut self, interactive: bool) -> bool {
        if interactive || self.items.is_empty() {
            return false;
        }
        self.clear_all();
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= CAPACITY
    }

    pub fn can_compare(&self) -> bool {
        self.items.len() >= MIN_TO_COMPARE
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item(String);

    impl Selectable for Item {
        fn selection_id(&self) -> &str {
            &self.0
        }
    }

    fn item(id: &str) -> Item {
        Item(id.to_owned())
    }

    fn ids(selection: &ComparisonSelection<Item>) -> Vec<&str> {
        selection.items().iter().map(|i| i.0.as_str()).collect()
    }

    #[test]
    fn test_fourth_toggle_is_rejected() {
        let mut selection = ComparisonSelection::new();
        for id in ["A", "B", "C"] {
            assert_eq!(selection.toggle(item(id)), SelectionChange::Added);
        }

        assert_eq!(selection.toggle(item("D")), SelectionChange::Rejected);
        assert_eq!(ids(&selection), vec!["A", "B", "C"]);
        assert!(selection.is_full());
    }

    #[test]
    fn test_add_duplicate_is_rejected() {
        let mut selection = ComparisonSelection::new();
        selection.add(item("A"));
        assert_eq!(selection.add(item("A")), SelectionChange::Rejected);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut selection = ComparisonSelection::new();
        selection.add(item("A"));
        assert!(!selection.remove("B"));
        assert!(selection.remove("A"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_removes_selected() {
        let mut selection = ComparisonSelection::new();
        selection.toggle(item("A"));
        selection.toggle(item("B"));
        assert_eq!(selection.toggle(item("A")), SelectionChange::Removed);
        assert_eq!(ids(&selection), vec!["B"]);
        assert!(!selection.is_selected("A"));
    }

    #[test]
    fn test_full_selection_frees_a_slot_after_removal() {
        let mut selection = ComparisonSelection::new();
        for id in ["A", "B", "C"] {
            selection.add(item(id));
        }
        selection.remove("B");
        assert_eq!(selection.add(item("D")), SelectionChange::Added);
        assert_eq!(ids(&selection), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_can_compare_needs_two() {
        let mut selection = ComparisonSelection::new();
        selection.add(item("A"));
        assert!(!selection.can_compare());
        selection.add(item("B"));
        assert!(selection.can_compare());
        assert_eq!(selection.capacity(), 3);
    }

    #[test]
    fn test_clear_all() {
        let mut selection = ComparisonSelection::new();
        selection.add(item("A"));
        selection.add(item("B"));
        selection.clear_all();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_dismiss_on_background() {
        let mut selection = ComparisonSelection::new();
        assert!(!selection.dismiss_on_background(false));

        selection.add(item("A"));
        assert!(!selection.dismiss_on_background(true));
        assert_eq!(selection.len(), 1);

        assert!(selection.dismiss_on_background(false));
        assert!(selection.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8),
        Remove(u8),
        Toggle(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..10).prop_map(Op::Add),
            (0u8..10).prop_map(Op::Remove),
            (0u8..10).prop_map(Op::Toggle),
        ]
    }

    fn as_set(selection: &ComparisonSelection<Item>) -> HashSet<String> {
        selection.items().iter().map(|i| i.0.clone()).collect()
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity_or_duplicates(ops in prop::collection::vec(op(), 100)) {
            let mut selection = ComparisonSelection::new();
            for op in ops {
                match op {
                    Op::Add(n) => { selection.add(item(&n.to_string())); }
                    Op::Remove(n) => { selection.remove(&n.to_string()); }
                    Op::Toggle(n) => { selection.toggle(item(&n.to_string())); }
                }
                prop_assert!(selection.len() <= CAPACITY);
                prop_assert_eq!(as_set(&selection).len(), selection.len());
            }
        }

        #[test]
        fn prop_double_toggle_restores_set(
            setup in prop::collection::vec(0u8..10, 0..6),
            x in 0u8..10,
        ) {
            let mut selection = ComparisonSelection::new();
            for n in setup {
                selection.add(item(&n.to_string()));
            }
            let before = as_set(&selection);

            selection.toggle(item(&x.to_string()));
            selection.toggle(item(&x.to_string()));

            prop_assert_eq!(as_set(&selection), before);
        }
    }
}
