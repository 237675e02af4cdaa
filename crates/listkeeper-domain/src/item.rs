use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::clock::now_millis;
use crate::field_update::FieldUpdate;
use crate::habit::DayStamp;
use crate::list::ListType;

pub type ItemId = String;

/// Column new kanban items land in when no column is given.
pub const DEFAULT_KANBAN_COLUMN_ID: &str = "todo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Custom,
}

/// Eisenhower matrix quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    #[default]
    UrgentImportant,
    NotUrgentImportant,
    UrgentNotImportant,
    NotUrgentNotImportant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChecklistFields {
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderedFields {
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulletFields {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanFields {
    #[serde(default = "default_column_id")]
    pub column_id: String,
}

fn default_column_id() -> String {
    DEFAULT_KANBAN_COLUMN_ID.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingFields {
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitFields {
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub completed_dates: BTreeSet<DayStamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityFields {
    #[serde(default)]
    pub quadrant: Quadrant,
    #[serde(
        default,
        with = "ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineFields {
    #[serde(default, with = "ts_milliseconds")]
    pub start_date: DateTime<Utc>,
    #[serde(
        default,
        with = "ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub milestone: bool,
    #[serde(default)]
    pub status: TimelineStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, with = "ts_milliseconds")]
    pub last_edited: DateTime<Utc>,
}

/// Variant-specific part of an item. The variant always matches the
/// owning list's [`ListType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemDetails {
    Checklist(ChecklistFields),
    Ordered(OrderedFields),
    Bullet(BulletFields),
    Kanban(KanbanFields),
    Shopping(ShoppingFields),
    Habit(HabitFields),
    Priority(PriorityFields),
    Timeline(TimelineFields),
    Note(NoteFields),
}

impl ItemDetails {
    pub fn list_type(&self) -> ListType {
        match self {
            ItemDetails::Checklist(_) => ListType::Checklist,
            ItemDetails::Ordered(_) => ListType::Ordered,
            ItemDetails::Bullet(_) => ListType::Bullet,
            ItemDetails::Kanban(_) => ListType::Kanban,
            ItemDetails::Shopping(_) => ListType::Shopping,
            ItemDetails::Habit(_) => ListType::Habit,
            ItemDetails::Priority(_) => ListType::Priority,
            ItemDetails::Timeline(_) => ListType::Timeline,
            ItemDetails::Note(_) => ListType::Notes,
        }
    }

    /// Empty details for a fresh item in a list of `list_type`.
    pub fn default_for(list_type: ListType) -> Self {
        let now = now_millis();
        match list_type {
            ListType::Checklist => ItemDetails::Checklist(ChecklistFields::default()),
            ListType::Ordered => ItemDetails::Ordered(OrderedFields::default()),
            ListType::Bullet => ItemDetails::Bullet(BulletFields::default()),
            ListType::Kanban => ItemDetails::Kanban(KanbanFields {
                column_id: default_column_id(),
            }),
            ListType::Shopping => ItemDetails::Shopping(ShoppingFields {
                quantity: default_quantity(),
                unit: None,
                category: None,
                price: None,
                checked: false,
                store: None,
            }),
            ListType::Habit => ItemDetails::Habit(HabitFields::default()),
            ListType::Priority => ItemDetails::Priority(PriorityFields::default()),
            ListType::Timeline => ItemDetails::Timeline(TimelineFields {
                start_date: now,
                end_date: None,
                milestone: false,
                status: TimelineStatus::Planned,
                color: None,
            }),
            ListType::Notes => ItemDetails::Note(NoteFields {
                rich_content: None,
                color: None,
                pinned: false,
                last_edited: now,
            }),
        }
    }

    /// Decode the variant fields of a stored item, choosing the variant
    /// from the owning list's type.
    pub fn from_fields(list_type: ListType, fields: Value) -> Result<Self, serde_json::Error> {
        Ok(match list_type {
            ListType::Checklist => ItemDetails::Checklist(serde_json::from_value(fields)?),
            ListType::Ordered => ItemDetails::Ordered(serde_json::from_value(fields)?),
            ListType::Bullet => ItemDetails::Bullet(serde_json::from_value(fields)?),
            ListType::Kanban => ItemDetails::Kanban(serde_json::from_value(fields)?),
            ListType::Shopping => {
                let mut shopping: ShoppingFields = serde_json::from_value(fields)?;
                shopping.quantity = shopping.quantity.max(1);
                shopping.price = shopping.price.filter(|p| valid_price(*p));
                ItemDetails::Shopping(shopping)
            }
            ListType::Habit => ItemDetails::Habit(serde_json::from_value(fields)?),
            ListType::Priority => ItemDetails::Priority(serde_json::from_value(fields)?),
            ListType::Timeline => ItemDetails::Timeline(serde_json::from_value(fields)?),
            ListType::Notes => ItemDetails::Note(serde_json::from_value(fields)?),
        })
    }

    /// Completion flag, for the variants that have one.
    pub fn is_done(&self) -> Option<bool> {
        match self {
            ItemDetails::Checklist(f) => Some(f.checked),
            ItemDetails::Shopping(f) => Some(f.checked),
            ItemDetails::Priority(f) => Some(f.completed),
            ItemDetails::Timeline(f) => Some(f.status == TimelineStatus::Completed),
            ItemDetails::Ordered(_)
            | ItemDetails::Bullet(_)
            | ItemDetails::Kanban(_)
            | ItemDetails::Habit(_)
            | ItemDetails::Note(_) => None,
        }
    }
}

fn valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: ItemId,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    id: ItemId,
    #[serde(default)]
    content: String,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(with = "ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl ListItem {
    pub fn new(content: impl Into<String>, details: ItemDetails) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            emoji: None,
            created_at: now_millis(),
            details,
        }
    }

    /// Convenience for a fresh item with the default variant of `list_type`.
    pub fn for_list(list_type: ListType, content: impl Into<String>) -> Self {
        Self::new(content, ItemDetails::default_for(list_type))
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn list_type(&self) -> ListType {
        self.details.list_type()
    }

    /// Decode a stored item belonging to a list of `list_type`.
    pub fn from_value(list_type: ListType, value: Value) -> Result<Self, serde_json::Error> {
        let raw: RawItem = serde_json::from_value(value)?;
        let details = ItemDetails::from_fields(list_type, Value::Object(raw.rest))?;
        Ok(Self {
            id: raw.id,
            content: raw.content,
            emoji: raw.emoji,
            created_at: raw.created_at,
            details,
        })
    }

    /// Merge a partial update. Fields that do not apply to this item's
    /// variant are ignored.
    pub fn apply(&mut self, update: ItemUpdate) {
        let ItemUpdate {
            content,
            emoji,
            checked,
            order,
            column_id,
            quantity,
            price,
            unit,
            category,
            store,
            frequency,
            completed_dates,
            target_count,
            color,
            quadrant,
            completed,
            due_date,
            start_date,
            end_date,
            milestone,
            status,
            rich_content,
            pinned,
        } = update;

        let content_changed = content.is_some();
        if let Some(content) = content {
            self.content = content;
        }
        emoji.apply_to(&mut self.emoji);

        match &mut self.details {
            ItemDetails::Checklist(f) => {
                if let Some(checked) = checked {
                    f.checked = checked;
                }
            }
            ItemDetails::Ordered(f) => {
                if let Some(order) = order {
                    f.order = order;
                }
            }
            ItemDetails::Bullet(_) => {}
            ItemDetails::Kanban(f) => {
                if let Some(column_id) = column_id {
                    f.column_id = column_id;
                }
            }
            ItemDetails::Shopping(f) => {
                if let Some(quantity) = quantity {
                    f.quantity = quantity.max(1);
                }
                price.filter(|p| valid_price(*p)).apply_to(&mut f.price);
                unit.apply_to(&mut f.unit);
                category.apply_to(&mut f.category);
                store.apply_to(&mut f.store);
                if let Some(checked) = checked {
                    f.checked = checked;
                }
            }
            ItemDetails::Habit(f) => {
                if let Some(frequency) = frequency {
                    f.frequency = frequency;
                }
                if let Some(dates) = completed_dates {
                    f.completed_dates = dates;
                }
                target_count.apply_to(&mut f.target_count);
                color.apply_to(&mut f.color);
            }
            ItemDetails::Priority(f) => {
                if let Some(quadrant) = quadrant {
                    f.quadrant = quadrant;
                }
                due_date.apply_to(&mut f.due_date);
                if let Some(completed) = completed {
                    f.completed = completed;
                }
            }
            ItemDetails::Timeline(f) => {
                if let Some(start_date) = start_date {
                    f.start_date = start_date;
                }
                end_date.apply_to(&mut f.end_date);
                if let Some(milestone) = milestone {
                    f.milestone = milestone;
                }
                if let Some(status) = status {
                    f.status = status;
                }
                color.apply_to(&mut f.color);
            }
            ItemDetails::Note(f) => {
                let touched = content_changed || rich_content.is_change();
                rich_content.apply_to(&mut f.rich_content);
                color.apply_to(&mut f.color);
                if let Some(pinned) = pinned {
                    f.pinned = pinned;
                }
                if touched {
                    f.last_edited = now_millis();
                }
            }
        }
    }
}

/// Partial item update. `None` / `FieldUpdate::NoChange` leave a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub content: Option<String>,
    pub emoji: FieldUpdate<String>,
    /// Checklist and shopping items.
    pub checked: Option<bool>,
    pub order: Option<i64>,
    pub column_id: Option<String>,
    pub quantity: Option<u32>,
    pub price: FieldUpdate<f64>,
    pub unit: FieldUpdate<String>,
    pub category: FieldUpdate<String>,
    pub store: FieldUpdate<String>,
    pub frequency: Option<Frequency>,
    pub completed_dates: Option<BTreeSet<DayStamp>>,
    pub target_count: FieldUpdate<u32>,
    /// Habit, timeline and note items.
    pub color: FieldUpdate<String>,
    pub quadrant: Option<Quadrant>,
    pub completed: Option<bool>,
    pub due_date: FieldUpdate<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: FieldUpdate<DateTime<Utc>>,
    pub milestone: Option<bool>,
    pub status: Option<TimelineStatus>,
    pub rich_content: FieldUpdate<String>,
    pub pinned: Option<bool>,
}

impl ItemUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Default::default()
        }
    }

    pub fn move_to_column(column_id: impl Into<String>) -> Self {
        Self {
            column_id: Some(column_id.into()),
            ..Default::default()
        }
    }
}

/// Sum of price × quantity over the shopping items of a list.
pub fn shopping_total(items: &[ListItem]) -> f64 {
    items
        .iter()
        .filter_map(|item| match &item.details {
            ItemDetails::Shopping(f) => Some(f.price.unwrap_or(0.0) * f64::from(f.quantity)),
            _ => None,
        })
        .sum()
}

/// Order value for an item appended to an ordered list.
pub fn next_order(items: &[ListItem]) -> i64 {
    items
        .iter()
        .filter_map(|item| match &item.details {
            ItemDetails::Ordered(f) => Some(f.order),
            _ => None,
        })
        .max()
        .map_or(1, |max| max + 1)
}

/// Items of an ordered list by ascending `order`, ties kept in sequence order.
pub fn sorted_by_order(items: &[ListItem]) -> Vec<&ListItem> {
    let mut sorted: Vec<&ListItem> = items.iter().collect();
    sorted.sort_by_key(|item| match &item.details {
        ItemDetails::Ordered(f) => f.order,
        _ => i64::MAX,
    });
    sorted
}
