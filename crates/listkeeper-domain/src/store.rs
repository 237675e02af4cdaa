//! The state container: single owner of the current [`ListsState`].

use crate::column::KanbanColumn;
use crate::commands::*;
use crate::document::AppData;
use crate::item::{ItemId, ItemUpdate, ListItem};
use crate::list::{List, ListId, ListType, ListUpdate};
use crate::state::ListsState;
use crate::tag::TagMetadata;
use crate::tag_sync::synchronize_tags;

/// Observer notified after every transition that changed the state.
pub trait StateListener: Send {
    fn state_changed(&self, state: &ListsState);
}

/// Holds the authoritative state and applies actions to it.
///
/// Construction from a loaded document does not notify the listener; only
/// later transitions do, and only when they actually change something.
pub struct ListsStore {
    state: ListsState,
    revision: u64,
    listener: Option<Box<dyn StateListener>>,
}

impl Default for ListsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ListsStore {
    pub fn new() -> Self {
        Self {
            state: ListsState::default(),
            revision: 0,
            listener: None,
        }
    }

    pub fn from_document(document: &AppData) -> Self {
        Self {
            state: ListsState::from_document(document),
            revision: 0,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn StateListener>) {
        self.listener = Some(listener);
    }

    pub fn take_listener(&mut self) -> Option<Box<dyn StateListener>> {
        self.listener.take()
    }

    pub fn state(&self) -> &ListsState {
        &self.state
    }

    /// Incremented on every effective transition.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::debug!("Executing: {}", action.description());

        let next = match self.state.reduce(&action) {
            Ok(next) => next,
            Err(e) => {
                tracing::error!("Action '{}' failed: {}", action.description(), e);
                return;
            }
        };

        if next == self.state {
            tracing::debug!("Action '{}' left state unchanged", action.description());
            return;
        }

        self.state = next;
        self.revision += 1;
        if let Some(ref listener) = self.listener {
            listener.state_changed(&self.state);
        }
    }

    pub fn load_document(&mut self, document: AppData) {
        self.dispatch(LoadDocument { document });
    }

    pub fn create_list(&mut self, list: List) {
        self.dispatch(CreateList { list });
    }

    pub fn update_list(&mut self, list_id: impl Into<ListId>, updates: ListUpdate) {
        self.dispatch(UpdateList {
            list_id: list_id.into(),
            updates,
        });
    }

    pub fn delete_list(&mut self, list_id: impl Into<ListId>) {
        self.dispatch(DeleteList {
            list_id: list_id.into(),
        });
    }

    pub fn add_item(&mut self, list_id: impl Into<ListId>, item: ListItem) {
        self.dispatch(AddItem {
            list_id: list_id.into(),
            item,
        });
    }

    pub fn update_item(
        &mut self,
        list_id: impl Into<ListId>,
        item_id: impl Into<ItemId>,
        updates: ItemUpdate,
    ) {
        self.dispatch(UpdateItem {
            list_id: list_id.into(),
            item_id: item_id.into(),
            updates,
        });
    }

    pub fn delete_item(&mut self, list_id: impl Into<ListId>, item_id: impl Into<ItemId>) {
        self.dispatch(DeleteItem {
            list_id: list_id.into(),
            item_id: item_id.into(),
        });
    }

    pub fn reorder_items(&mut self, list_id: impl Into<ListId>, items: Vec<ListItem>) {
        self.dispatch(ReorderItems {
            list_id: list_id.into(),
            items,
        });
    }

    pub fn set_active_list(&mut self, list_id: Option<ListId>) {
        self.dispatch(SetActiveList { list_id });
    }

    pub fn set_theme(&mut self, theme_id: impl Into<String>) {
        self.dispatch(SetTheme {
            theme_id: theme_id.into(),
        });
    }

    pub fn set_kanban_columns(&mut self, list_id: impl Into<ListId>, columns: Vec<KanbanColumn>) {
        self.dispatch(SetKanbanColumns {
            list_id: list_id.into(),
            columns,
        });
    }

    pub fn update_tag_registry(&mut self, tags: Vec<TagMetadata>) {
        self.dispatch(UpdateTagRegistry { tags });
    }

    /// Recompute the tag registry from the current lists.
    pub fn sync_tags(&mut self) {
        let tags = synchronize_tags(&self.state.lists, &self.state.tags);
        self.update_tag_registry(tags);
    }

    /// Store the default column seed for a kanban list that has none yet.
    pub fn ensure_kanban_columns(&mut self, list_id: &str) {
        let needs_seed = self
            .state
            .list(list_id)
            .is_some_and(|list| list.list_type == ListType::Kanban)
            && !self.state.has_columns(list_id);
        if needs_seed {
            let columns = self.state.columns_for(list_id);
            self.set_kanban_columns(list_id, columns);
        }
    }

    pub fn active_list(&self) -> Option<&List> {
        self.state.active_list()
    }

    pub fn all_tag_names(&self) -> Vec<String> {
        self.state.all_tag_names()
    }

    pub fn to_document(&self) -> AppData {
        self.state.to_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::VisualStyle;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counter(Arc<AtomicUsize>);

    impl StateListener for Counter {
        fn state_changed(&self, _state: &ListsState) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn store_with_counter() -> (ListsStore, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = ListsStore::new();
        store.set_listener(Box::new(Counter(calls.clone())));
        (store, calls)
    }

    #[test]
    fn test_listener_sees_effective_changes_only() {
        let (mut store, calls) = store_with_counter();
        store.create_list(List::new("a", ListType::Bullet, "ocean", VisualStyle::Card).with_id("L1"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.update_list("missing", ListUpdate::name("X"));
        store.delete_item("L1", "missing");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_from_document_does_not_notify() {
        let mut doc = AppData::default();
        doc.lists.push(List::new("a", ListType::Bullet, "ocean", VisualStyle::Card));
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = ListsStore::from_document(&doc);
        store.set_listener(Box::new(Counter(calls.clone())));
        assert_eq!(store.state().lists.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_sync_tags_twice_notifies_once() {
        let (mut store, calls) = store_with_counter();
        store.create_list(List::new("a", ListType::Bullet, "ocean", VisualStyle::Card).with_id("L1"));
        store.update_list("L1", ListUpdate::tags(["work"]));
        let before = calls.load(Ordering::SeqCst);

        store.sync_tags();
        let registry = store.state().tags.clone();
        store.sync_tags();

        assert_eq!(store.state().tags, registry);
        assert_eq!(store.all_tag_names(), vec!["work".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_ensure_kanban_columns_seeds_once() {
        let mut store = ListsStore::new();
        store.create_list(List::new("b", ListType::Kanban, "ocean", VisualStyle::Card).with_id("K"));
        store.create_list(List::new("c", ListType::Checklist, "ocean", VisualStyle::Card).with_id("C"));

        store.ensure_kanban_columns("K");
        store.ensure_kanban_columns("C");
        assert_eq!(store.state().kanban_columns.get("K").map(Vec::len), Some(3));
        assert!(!store.state().has_columns("C"));

        let custom = vec![KanbanColumn::new("Only", 1)];
        store.set_kanban_columns("K", custom.clone());
        store.ensure_kanban_columns("K");
        assert_eq!(store.state().columns_for("K"), custom);
    }
}
