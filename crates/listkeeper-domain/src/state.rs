//! In-memory application state and its transition function.

use std::collections::BTreeMap;

use listkeeper_core::ListResult;

use crate::column::{default_kanban_columns, KanbanColumn};
use crate::commands::{Action, Command, CommandContext};
use crate::document::{AppData, Preferences, SCHEMA_VERSION};
use crate::list::{List, ListId, DEFAULT_COLOR_THEME};
use crate::tag::TagMetadata;

#[derive(Debug, Clone, PartialEq)]
pub struct ListsState {
    pub lists: Vec<List>,
    pub kanban_columns: BTreeMap<ListId, Vec<KanbanColumn>>,
    pub tags: Vec<TagMetadata>,
    pub active_list_id: Option<ListId>,
    pub theme_id: String,
}

impl Default for ListsState {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            kanban_columns: BTreeMap::new(),
            tags: Vec::new(),
            active_list_id: None,
            theme_id: DEFAULT_COLOR_THEME.to_string(),
        }
    }
}

impl ListsState {
    /// State seeded from a stored document. A last-active id that names no
    /// list is dropped.
    pub fn from_document(document: &AppData) -> Self {
        let active_list_id = document
            .preferences
            .last_active_list_id
            .as_ref()
            .filter(|id| document.lists.iter().any(|list| &list.id == *id))
            .cloned();
        Self {
            lists: document.lists.clone(),
            kanban_columns: document.kanban_columns.clone(),
            tags: document.tags.clone(),
            active_list_id,
            theme_id: document.preferences.theme_id.clone(),
        }
    }

    pub fn context(&mut self) -> CommandContext<'_> {
        CommandContext {
            lists: &mut self.lists,
            kanban_columns: &mut self.kanban_columns,
            tags: &mut self.tags,
            active_list_id: &mut self.active_list_id,
            theme_id: &mut self.theme_id,
        }
    }

    /// Produce the state that follows `action`. `self` is left untouched,
    /// so a failing command never leaves a half-applied state behind.
    pub fn reduce(&self, action: &Action) -> ListResult<Self> {
        let mut next = self.clone();
        action.execute(&mut next.context())?;
        Ok(next)
    }

    /// Snapshot as a persistable document.
    pub fn to_document(&self) -> AppData {
        AppData {
            lists: self.lists.clone(),
            kanban_columns: self.kanban_columns.clone(),
            tags: self.tags.clone(),
            preferences: Preferences {
                theme_id: self.theme_id.clone(),
                last_active_list_id: self.active_list_id.clone(),
            },
            version: SCHEMA_VERSION.to_string(),
        }
    }

    pub fn list(&self, list_id: &str) -> Option<&List> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    /// The active list, or `None` when nothing is selected or the
    /// selection points at a list that no longer exists.
    pub fn active_list(&self) -> Option<&List> {
        self.active_list_id
            .as_deref()
            .and_then(|id| self.list(id))
    }

    pub fn all_tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.name.clone()).collect()
    }

    pub fn tag(&self, name: &str) -> Option<&TagMetadata> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Stored columns of a list, or the default seed when none are stored.
    pub fn columns_for(&self, list_id: &str) -> Vec<KanbanColumn> {
        self.kanban_columns
            .get(list_id)
            .cloned()
            .unwrap_or_else(default_kanban_columns)
    }

    pub fn has_columns(&self, list_id: &str) -> bool {
        self.kanban_columns.contains_key(list_id)
    }

    /// Lists carrying at least one of `tags`; every list when `tags` is empty.
    pub fn lists_with_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&List> {
        if tags.is_empty() {
            return self.lists.iter().collect();
        }
        self.lists
            .iter()
            .filter(|list| tags.iter().any(|tag| list.has_tag(tag.as_ref())))
            .collect()
    }
}
