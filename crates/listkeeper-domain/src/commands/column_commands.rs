use super::{Command, CommandContext};
use crate::column::{sorted_columns, KanbanColumn};
use crate::item::ItemDetails;
use crate::list::{ListId, ListType};
use listkeeper_core::ListResult;

/// Replace the column set of a kanban list.
///
/// Items whose column disappears are moved to the lowest-ordered remaining
/// column. With an empty column set they are left where they are. Unknown
/// and non-kanban lists are left alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SetKanbanColumns {
    pub list_id: ListId,
    pub columns: Vec<KanbanColumn>,
}

impl Command for SetKanbanColumns {
    fn execute(&self, context: &mut CommandContext) -> ListResult<()> {
        let Some(list) = context.list_mut(&self.list_id) else {
            return Ok(());
        };
        if list.list_type != ListType::Kanban {
            tracing::warn!(
                "Rejected kanban columns for {:?} list {}",
                list.list_type,
                list.id
            );
            return Ok(());
        }

        if let Some(fallback) = sorted_columns(&self.columns).first().map(|c| c.id.clone()) {
            let mut moved = 0;
            for item in list.items.iter_mut() {
                if let ItemDetails::Kanban(fields) = &mut item.details {
                    if !self.columns.iter().any(|c| c.id == fields.column_id) {
                        fields.column_id = fallback.clone();
                        moved += 1;
                    }
                }
            }
            if moved > 0 {
                tracing::debug!("Moved {} orphaned items to column {}", moved, fallback);
                list.touch();
            }
        }

        context
            .kanban_columns
            .insert(self.list_id.clone(), self.columns.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Set {} kanban columns for list {}",
            self.columns.len(),
            self.list_id
        )
    }
}
