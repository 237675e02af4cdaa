use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::clock::{next_stamp_after, now_millis};
use crate::item::{ItemId, ListItem};

pub type ListId = String;

pub const DEFAULT_COLOR_THEME: &str = "ocean";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "todo")]
    Checklist,
    #[serde(rename = "ordered")]
    Ordered,
    #[serde(rename = "bullet")]
    Bullet,
    #[serde(rename = "kanban")]
    Kanban,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "habit")]
    Habit,
    #[serde(rename = "priority")]
    Priority,
    /// Reserved: no dedicated view yet.
    #[serde(rename = "timeline")]
    Timeline,
    /// Reserved: no dedicated view yet.
    #[serde(rename = "notes")]
    Notes,
}

impl ListType {
    pub const ALL: [ListType; 9] = [
        ListType::Checklist,
        ListType::Ordered,
        ListType::Bullet,
        ListType::Kanban,
        ListType::Shopping,
        ListType::Habit,
        ListType::Priority,
        ListType::Timeline,
        ListType::Notes,
    ];
}

/// Visual density preset of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    Compact,
    #[default]
    Card,
    Minimal,
    Playful,
}

impl VisualStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" => Some(VisualStyle::Compact),
            "card" => Some(VisualStyle::Card),
            "minimal" => Some(VisualStyle::Minimal),
            "playful" => Some(VisualStyle::Playful),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawList")]
pub struct List {
    pub id: ListId,
    pub name: String,
    #[serde(rename = "type")]
    pub list_type: ListType,
    pub items: Vec<ListItem>,
    pub color_theme: String,
    pub visual_style: VisualStyle,
    pub tags: Vec<String>,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Stored shape of a list; items are decoded once the list type is known.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawList {
    id: ListId,
    name: String,
    #[serde(rename = "type")]
    list_type: ListType,
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default = "default_color_theme")]
    color_theme: String,
    #[serde(default)]
    visual_style: VisualStyle,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(with = "ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    updated_at: DateTime<Utc>,
}

fn default_color_theme() -> String {
    DEFAULT_COLOR_THEME.to_string()
}

impl TryFrom<RawList> for List {
    type Error = serde_json::Error;

    fn try_from(raw: RawList) -> Result<Self, Self::Error> {
        let items = raw
            .items
            .into_iter()
            .map(|value| ListItem::from_value(raw.list_type, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: raw.id,
            name: raw.name,
            list_type: raw.list_type,
            items,
            color_theme: raw.color_theme,
            visual_style: raw.visual_style,
            tags: dedup_tags(raw.tags),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

/// Partial list update. The list type is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub color_theme: Option<String>,
    pub visual_style: Option<VisualStyle>,
    pub tags: Option<Vec<String>>,
}

impl ListUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Whether applying this update can change the list's tag set.
    pub fn touches_tags(&self) -> bool {
        self.tags.is_some()
    }
}

impl List {
    pub fn new(
        name: impl Into<String>,
        list_type: ListType,
        color_theme: impl Into<String>,
        visual_style: VisualStyle,
    ) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            list_type,
            items: Vec::new(),
            color_theme: color_theme.into(),
            visual_style,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<ListId>) -> Self {
        self.id = id.into();
        self
    }

    /// Refresh `updated_at`; it always moves strictly forward.
    pub fn touch(&mut self) {
        self.updated_at = next_stamp_after(self.updated_at.max(self.created_at));
    }

    pub fn apply(&mut self, update: ListUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(theme) = update.color_theme {
            self.color_theme = theme;
        }
        if let Some(style) = update.visual_style {
            self.visual_style = style;
        }
        if let Some(tags) = update.tags {
            self.tags = dedup_tags(tags);
        }
        self.touch();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn item(&self, item_id: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut ListItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Items that report a completion flag, as (done, total).
    pub fn progress(&self) -> (usize, usize) {
        self.items
            .iter()
            .filter_map(|item| item.details.is_done())
            .fold((0, 0), |(done, total), is_done| {
                (done + usize::from(is_done), total + 1)
            })
    }
}
