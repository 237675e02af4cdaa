pub mod clock;
pub mod column;
pub mod commands;
pub mod document;
pub mod field_update;
pub mod habit;
pub mod item;
pub mod list;
pub mod state;
pub mod store;
pub mod tag;
pub mod tag_sync;

pub use column::{default_kanban_columns, items_in_column, ColumnId, KanbanColumn};
pub use commands::{Action, Command, CommandContext};
pub use document::{AppData, Preferences, SCHEMA_VERSION};
pub use field_update::FieldUpdate;
pub use habit::{streak, toggle_completion, DayStamp};
pub use item::{
    next_order, shopping_total, ChecklistFields, Frequency, HabitFields, ItemDetails, ItemId,
    ItemUpdate, KanbanFields, ListItem, PriorityFields, Quadrant, ShoppingFields,
};
pub use list::{List, ListId, ListType, ListUpdate, VisualStyle, DEFAULT_COLOR_THEME};
pub use state::ListsState;
pub use store::{ListsStore, StateListener};
pub use tag::{tag_color, TagMetadata};
pub use tag_sync::synchronize_tags;
