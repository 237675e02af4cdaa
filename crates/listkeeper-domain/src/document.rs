//! Root persisted document.
//!
//! `AppData` is the single JSON blob written to storage. It is pure data;
//! the state container seeds itself from it on startup and produces a new
//! one for every save.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::column::KanbanColumn;
use crate::list::{List, ListId, DEFAULT_COLOR_THEME};
use crate::tag::TagMetadata;

/// Schema version stamped on every saved document.
pub const SCHEMA_VERSION: &str = "2.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_theme_id")]
    pub theme_id: String,
    #[serde(default)]
    pub last_active_list_id: Option<ListId>,
}

fn default_theme_id() -> String {
    DEFAULT_COLOR_THEME.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme_id: default_theme_id(),
            last_active_list_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub kanban_columns: BTreeMap<ListId, Vec<KanbanColumn>>,
    #[serde(default)]
    pub tags: Vec<TagMetadata>,
    #[serde(default)]
    pub preferences: Preferences,
    pub version: String,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            kanban_columns: BTreeMap::new(),
            tags: Vec::new(),
            preferences: Preferences::default(),
            version: SCHEMA_VERSION.to_string(),
        }
    }
}

impl AppData {
    /// Empty document with the given theme preference.
    pub fn with_theme(theme_id: impl Into<String>) -> Self {
        Self {
            preferences: Preferences {
                theme_id: theme_id.into(),
                last_active_list_id: None,
            },
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.kanban_columns.is_empty() && self.tags.is_empty()
    }

    pub fn is_current(&self) -> bool {
        self.version == SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{ListType, VisualStyle};

    #[test]
    fn test_default_document() {
        let doc = AppData::default();
        assert!(doc.is_empty());
        assert!(doc.is_current());
        assert_eq!(doc.preferences.theme_id, "ocean");
        assert_eq!(doc.preferences.last_active_list_id, None);
    }

    #[test]
    fn test_wire_keys() {
        let mut doc = AppData::with_theme("forest");
        doc.lists.push(List::new("a", ListType::Bullet, "forest", VisualStyle::Minimal).with_id("L1"));
        doc.preferences.last_active_list_id = Some("L1".to_string());

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["lists"].is_array());
        assert!(value["kanbanColumns"].is_object());
        assert!(value["tags"].is_array());
        assert_eq!(value["preferences"]["themeId"], "forest");
        assert_eq!(value["preferences"]["lastActiveListId"], "L1");
        assert_eq!(value["version"], "2.0");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut doc = AppData::default();
        doc.lists.push(List::new("Trip", ListType::Checklist, "ocean", VisualStyle::Card));

        let json = serde_json::to_string(&doc).unwrap();
        let restored: AppData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, doc);
    }
}
