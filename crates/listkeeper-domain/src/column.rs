use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::{ItemDetails, ListItem, DEFAULT_KANBAN_COLUMN_ID};
use crate::list::List;

pub type ColumnId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub id: ColumnId,
    pub name: String,
    pub order: i32,
}

impl KanbanColumn {
    pub fn new(name: impl Into<String>, order: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            order,
        }
    }

    pub fn with_id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = id.into();
        self
    }
}

/// Seed columns for a kanban list that has none yet.
pub fn default_kanban_columns() -> Vec<KanbanColumn> {
    vec![
        KanbanColumn::new("To Do", 1).with_id(DEFAULT_KANBAN_COLUMN_ID),
        KanbanColumn::new("In Progress", 2).with_id("inprogress"),
        KanbanColumn::new("Done", 3).with_id("done"),
    ]
}

/// Columns sorted by `order`.
pub fn sorted_columns(columns: &[KanbanColumn]) -> Vec<&KanbanColumn> {
    let mut sorted: Vec<&KanbanColumn> = columns.iter().collect();
    sorted.sort_by_key(|column| column.order);
    sorted
}

/// Kanban items of `list` placed in `column_id`.
pub fn items_in_column<'a>(list: &'a List, column_id: &str) -> Vec<&'a ListItem> {
    list.items
        .iter()
        .filter(|item| matches!(&item.details, ItemDetails::Kanban(f) if f.column_id == column_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemUpdate;
    use crate::list::{ListType, VisualStyle};

    #[test]
    fn test_default_columns() {
        let columns = default_kanban_columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["To Do", "In Progress", "Done"]);
        let orders: Vec<i32> = columns.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(columns[0].id, DEFAULT_KANBAN_COLUMN_ID);
    }

    #[test]
    fn test_sorted_columns() {
        let columns = vec![
            KanbanColumn::new("Later", 9),
            KanbanColumn::new("Now", 1),
        ];
        let sorted: Vec<&str> = sorted_columns(&columns).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(sorted, vec!["Now", "Later"]);
    }

    #[test]
    fn test_items_in_column() {
        let mut list = List::new("Board", ListType::Kanban, "ocean", VisualStyle::Card);
        list.items.push(ListItem::for_list(ListType::Kanban, "a"));
        let mut moved = ListItem::for_list(ListType::Kanban, "b");
        moved.apply(ItemUpdate::move_to_column("done"));
        list.items.push(moved);

        assert_eq!(items_in_column(&list, "todo").len(), 1);
        assert_eq!(items_in_column(&list, "done")[0].content, "b");
        assert!(items_in_column(&list, "inprogress").is_empty());
    }
}
