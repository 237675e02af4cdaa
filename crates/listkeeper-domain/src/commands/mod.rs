use listkeeper_core::ListResult;
use std::collections::BTreeMap;

use crate::column::KanbanColumn;
use crate::list::{List, ListId};
use crate::tag::TagMetadata;

pub mod column_commands;
pub mod item_commands;
pub mod list_commands;
pub mod tag_commands;

pub use column_commands::*;
pub use item_commands::*;
pub use list_commands::*;
pub use tag_commands::*;

/// Trait for domain commands that mutate state.
///
/// Commands never fail on a missing target; they leave the state unchanged.
pub trait Command: Send + Sync {
    /// Execute this command, mutating the domain state
    fn execute(&self, context: &mut CommandContext) -> ListResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub lists: &'a mut Vec<List>,
    pub kanban_columns: &'a mut BTreeMap<ListId, Vec<KanbanColumn>>,
    pub tags: &'a mut Vec<TagMetadata>,
    pub active_list_id: &'a mut Option<ListId>,
    pub theme_id: &'a mut String,
}

impl CommandContext<'_> {
    pub fn list_mut(&mut self, list_id: &str) -> Option<&mut List> {
        self.lists.iter_mut().find(|list| list.id == list_id)
    }
}

/// Closed set of state transitions accepted by the container.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadDocument(LoadDocument),
    CreateList(CreateList),
    UpdateList(UpdateList),
    DeleteList(DeleteList),
    SetActiveList(SetActiveList),
    SetTheme(SetTheme),
    AddItem(AddItem),
    UpdateItem(UpdateItem),
    DeleteItem(DeleteItem),
    ReorderItems(ReorderItems),
    SetKanbanColumns(SetKanbanColumns),
    UpdateTagRegistry(UpdateTagRegistry),
}

impl Action {
    fn as_command(&self) -> &dyn Command {
        match self {
            Action::LoadDocument(cmd) => cmd,
            Action::CreateList(cmd) => cmd,
            Action::UpdateList(cmd) => cmd,
            Action::DeleteList(cmd) => cmd,
            Action::SetActiveList(cmd) => cmd,
            Action::SetTheme(cmd) => cmd,
            Action::AddItem(cmd) => cmd,
            Action::UpdateItem(cmd) => cmd,
            Action::DeleteItem(cmd) => cmd,
            Action::ReorderItems(cmd) => cmd,
            Action::SetKanbanColumns(cmd) => cmd,
            Action::UpdateTagRegistry(cmd) => cmd,
        }
    }

    /// Whether this action can change some list's tag set, meaning tag
    /// metadata should be synchronized afterwards.
    pub fn affects_tags(&self) -> bool {
        match self {
            Action::CreateList(cmd) => !cmd.list.tags.is_empty(),
            Action::UpdateList(cmd) => cmd.updates.touches_tags(),
            Action::DeleteList(_) => true,
            Action::LoadDocument(_)
            | Action::SetActiveList(_)
            | Action::SetTheme(_)
            | Action::AddItem(_)
            | Action::UpdateItem(_)
            | Action::DeleteItem(_)
            | Action::ReorderItems(_)
            | Action::SetKanbanColumns(_)
            | Action::UpdateTagRegistry(_) => false,
        }
    }
}

impl Command for Action {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        self.as_command().execute(context)
    }

    fn description(&self) -> String {
        self.as_command().description()
    }
}

macro_rules! impl_into_action {
    ($($command:ident),* $(,)?) => {
        $(
            impl From<$command> for Action {
                fn from(command: $command) -> Self {
                    Action::$command(command)
                }
            }
        )*
    };
}

impl_into_action!(
    LoadDocument,
    CreateList,
    UpdateList,
    DeleteList,
    SetActiveList,
    SetTheme,
    AddItem,
    UpdateItem,
    DeleteItem,
    ReorderItems,
    SetKanbanColumns,
    UpdateTagRegistry,
);
