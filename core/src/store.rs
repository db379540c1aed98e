//! Immutable snapshot of the client-held todo collection.
//!
//! # Design
//! Every transition returns a new `TodoStore`; the previous value is never
//! mutated, so observers holding an older snapshot keep a consistent view.
//! Items sit behind an `Arc`, making snapshots cheap to clone and hand out.
//! Transitions are total and are only applied after the matching remote call
//! has succeeded.

use std::sync::Arc;

use crate::types::{Todo, TodoId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    items: Arc<Vec<Todo>>,
    loading: bool,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item carrying `id`.
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.iter().find(|t| &t.id == id)
    }

    pub fn with_loading(&self, loading: bool) -> Self {
        Self {
            items: Arc::clone(&self.items),
            loading,
        }
    }

    pub fn replace_all(&self, items: Vec<Todo>) -> Self {
        Self {
            items: Arc::new(items),
            loading: self.loading,
        }
    }

    /// Appends at the end regardless of where the server placed the item.
    pub fn append(&self, item: Todo) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);
        self.replace_all(items)
    }

    /// Replaces every entry whose id equals `id`. Ids are assumed unique;
    /// with duplicates all matches are replaced.
    pub fn replace_by_id(&self, id: &TodoId, updated: Todo) -> Self {
        let items = self
            .items
            .iter()
            .map(|t| if &t.id == id { updated.clone() } else { t.clone() })
            .collect();
        self.replace_all(items)
    }

    /// Removes every entry whose id equals `id`.
    pub fn remove_by_id(&self, id: &TodoId) -> Self {
        let items = self.items.iter().filter(|t| &t.id != id).cloned().collect();
        self.replace_all(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, title: &str) -> Todo {
        Todo {
            id: TodoId::from(id),
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn replace_all_keeps_given_order() {
        let store = TodoStore::new().replace_all(vec![todo("b", "B"), todo("a", "A")]);
        let ids: Vec<_> = store.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn append_adds_to_the_end_and_leaves_original_untouched() {
        let before = TodoStore::new().replace_all(vec![todo("1", "one")]);
        let after = before.append(todo("2", "two"));
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after.items()[1], todo("2", "two"));
    }

    #[test]
    fn replace_by_id_touches_only_the_match() {
        let store = TodoStore::new().replace_all(vec![todo("1", "one"), todo("2", "two")]);
        let updated = store.replace_by_id(&TodoId::from("2"), todo("2", "TWO"));
        assert_eq!(updated.items()[0], store.items()[0]);
        assert_eq!(updated.items()[1].title, "TWO");
        assert_eq!(store.items()[1].title, "two");
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let store = TodoStore::new().replace_all(vec![todo("1", "one")]);
        assert_eq!(store.replace_by_id(&TodoId::from("9"), todo("9", "x")), store);
        assert_eq!(store.remove_by_id(&TodoId::from("9")), store);
    }

    #[test]
    fn duplicate_ids_are_all_replaced_and_all_removed() {
        let store = TodoStore::new().replace_all(vec![todo("d", "first"), todo("x", "other"), todo("d", "second")]);

        let replaced = store.replace_by_id(&TodoId::from("d"), todo("d", "new"));
        let titles: Vec<_> = replaced.items().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "other", "new"]);

        let removed = store.remove_by_id(&TodoId::from("d"));
        assert_eq!(removed.items(), &[todo("x", "other")]);
    }

    #[test]
    fn loading_flag_survives_item_transitions() {
        let store = TodoStore::new().with_loading(true).append(todo("1", "one"));
        assert!(store.loading());
        assert!(!store.with_loading(false).loading());
    }
}
