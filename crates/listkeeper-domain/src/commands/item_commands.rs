use super::{Command, CommandContext};
use crate::item::{ItemId, ItemUpdate, ListItem};
use crate::list::{List, ListId};
use listkeeper_core::ListResult;
use std::collections::HashSet;

/// Append an item to a list
#[derive(Debug, Clone, PartialEq)]
pub struct AddItem {
    pub list_id: ListId,
    pub item: ListItem,
}

impl Command for AddItem {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        let Some(list) = context.list_mut(&self.list_id) else {
            return Ok(());
        };

        if self.item.list_type() != list.list_type {
            tracing::warn!(
                "Rejected {:?} item for {:?} list {}",
                self.item.list_type(),
                list.list_type,
                list.id
            );
            return Ok(());
        }
        if list.item(&self.item.id).is_some() {
            tracing::warn!("Item {} already exists in list {}", self.item.id, list.id);
            return Ok(());
        }

        list.items.push(self.item.clone());
        list.touch();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add item '{}' to list {}", self.item.content, self.list_id)
    }
}

/// Merge partial fields into an item
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateItem {
    pub list_id: ListId,
    pub item_id: ItemId,
    pub updates: ItemUpdate,
}

impl Command for UpdateItem {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        if let Some(list) = context.list_mut(&self.list_id) {
            if let Some(item) = list.item_mut(&self.item_id) {
                item.apply(self.updates.clone());
                list.touch();
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Update item {} in list {}", self.item_id, self.list_id)
    }
}

/// Remove an item from a list
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteItem {
    pub list_id: ListId,
    pub item_id: ItemId,
}

impl Command for DeleteItem {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        if let Some(list) = context.list_mut(&self.list_id) {
            let before = list.items.len();
            list.items.retain(|item| item.id != self.item_id);
            if list.items.len() != before {
                list.touch();
            }
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete item {} from list {}", self.item_id, self.list_id)
    }
}

/// Replace a list's item sequence with a permutation of itself
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderItems {
    pub list_id: ListId,
    pub items: Vec<ListItem>,
}

impl ReorderItems {
    fn is_permutation_of(&self, list: &List) -> bool {
        let current = &list.items;
        if self.items.len() != current.len()
            || self.items.iter().any(|item| item.list_type() != list.list_type)
        {
            return false;
        }
        let proposed: HashSet<&str> = self.items.iter().map(|i| i.id.as_str()).collect();
        proposed.len() == self.items.len()
            && current.iter().all(|item| proposed.contains(item.id.as_str()))
    }
}

impl Command for ReorderItems {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        let Some(list) = context.list_mut(&self.list_id) else {
            return Ok(());
        };

        if !self.is_permutation_of(list) {
            tracing::warn!(
                "Rejected reorder of list {}: new sequence is not a permutation of its items",
                list.id
            );
            return Ok(());
        }

        list.items = self.items.clone();
        list.touch();
        Ok(())
    }

    fn description(&self) -> String {
        format!("Reorder {} items in list {}", self.items.len(), self.list_id)
    }
}
