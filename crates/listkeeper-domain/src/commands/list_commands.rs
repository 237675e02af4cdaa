use super::{Command, CommandContext};
use crate::document::AppData;
use crate::list::{List, ListId, ListUpdate};
use crate::state::ListsState;
use listkeeper_core::ListResult;

/// Replace the entire state with a loaded document
#[derive(Debug, Clone, PartialEq)]
pub struct LoadDocument {
    pub document: AppData,
}

impl Command for LoadDocument {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        let loaded = ListsState::from_document(&self.document);
        *context.lists = loaded.lists;
        *context.kanban_columns = loaded.kanban_columns;
        *context.tags = loaded.tags;
        *context.active_list_id = loaded.active_list_id;
        *context.theme_id = loaded.theme_id;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Load document with {} lists", self.document.lists.len())
    }
}

/// Append a new list and make it active
#[derive(Debug, Clone, PartialEq)]
pub struct CreateList {
    pub list: List,
}

impl Command for CreateList {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        if context.lists.iter().any(|l| l.id == self.list.id) {
            tracing::warn!("List {} already exists, ignoring create", self.list.id);
            return Ok(());
        }
        context.lists.push(self.list.clone());
        *context.active_list_id = Some(self.list.id.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create list: '{}'", self.list.name)
    }
}

/// Merge partial fields into a list
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateList {
    pub list_id: ListId,
    pub updates: ListUpdate,
}

impl Command for UpdateList {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        if let Some(list) = context.list_mut(&self.list_id) {
            list.apply(self.updates.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update list {}", self.list_id)
    }
}

/// Remove a list and its kanban columns
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteList {
    pub list_id: ListId,
}

impl Command for DeleteList {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        let before = context.lists.len();
        context.lists.retain(|list| list.id != self.list_id);
        if context.lists.len() == before {
            return Ok(());
        }

        context.kanban_columns.remove(&self.list_id);

        if context.active_list_id.as_deref() == Some(self.list_id.as_str()) {
            *context.active_list_id = context.lists.first().map(|list| list.id.clone());
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete list {}", self.list_id)
    }
}

/// Point the active-list selection at a list, or at nothing.
/// The id is not checked; a dangling id resolves to no active list.
#[derive(Debug, Clone, PartialEq)]
pub struct SetActiveList {
    pub list_id: Option<ListId>,
}

impl Command for SetActiveList {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        *context.active_list_id = self.list_id.clone();
        Ok(())
    }

    fn description(&self) -> String {
        match &self.list_id {
            Some(id) => format!("Set active list to {}", id),
            None => "Clear active list".to_string(),
        }
    }
}

/// Change the color theme preference
#[derive(Debug, Clone, PartialEq)]
pub struct SetTheme {
    pub theme_id: String,
}

impl Command for SetTheme {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        *context.theme_id = self.theme_id.clone();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Set theme to {}", self.theme_id)
    }
}
