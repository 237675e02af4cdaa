use crate::migration::{MigrationStep, SchemaVersion};
use listkeeper_core::{ListError, ListResult};
use serde_json::{json, Map, Value};

/// 1.0 → 2.0: lists gained tags and a visual style, the document gained a
/// tag registry.
pub struct V1ToV2Migration;

fn backfill(object: &mut Map<String, Value>, key: &str, default: Value) {
    let missing = object.get(key).map_or(true, Value::is_null);
    if missing {
        object.insert(key.to_string(), default);
    }
}

impl MigrationStep for V1ToV2Migration {
    fn from_version(&self) -> SchemaVersion {
        SchemaVersion::V1_0
    }

    fn to_version(&self) -> SchemaVersion {
        SchemaVersion::V2_0
    }

    fn apply(&self, mut document: Value) -> ListResult<Value> {
        let root = document.as_object_mut().ok_or_else(|| {
            ListError::Migration("Stored document is not a JSON object".to_string())
        })?;

        backfill(root, "lists", json!([]));
        if let Some(lists) = root.get_mut("lists").and_then(Value::as_array_mut) {
            for list in lists.iter_mut().filter_map(Value::as_object_mut) {
                backfill(list, "tags", json!([]));
                backfill(list, "visualStyle", json!("card"));
            }
        }
        backfill(root, "tags", json!([]));
        root.insert(
            "version".to_string(),
            json!(self.to_version().as_str()),
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backfills_list_fields() {
        let v1 = json!({
            "lists": [
                { "id": "a", "name": "A", "type": "todo" },
                { "id": "b", "name": "B", "type": "todo", "tags": ["x"], "visualStyle": "compact" }
            ],
            "kanbanColumns": {},
            "preferences": { "themeId": "forest", "lastActiveListId": null }
        });

        let v2 = V1ToV2Migration.apply(v1).unwrap();

        assert_eq!(v2["version"], "2.0");
        assert_eq!(v2["tags"], json!([]));
        assert_eq!(v2["lists"][0]["tags"], json!([]));
        assert_eq!(v2["lists"][0]["visualStyle"], "card");
        assert_eq!(v2["lists"][1]["tags"], json!(["x"]));
        assert_eq!(v2["lists"][1]["visualStyle"], "compact");
        assert_eq!(v2["preferences"]["themeId"], "forest");
    }

    #[test]
    fn test_null_fields_are_backfilled() {
        let v1 = json!({ "lists": [{ "id": "a", "tags": null }], "tags": null });
        let v2 = V1ToV2Migration.apply(v1).unwrap();
        assert_eq!(v2["lists"][0]["tags"], json!([]));
        assert_eq!(v2["tags"], json!([]));
    }

    #[test]
    fn test_missing_lists_become_empty() {
        let v2 = V1ToV2Migration.apply(json!({})).unwrap();
        assert_eq!(v2["lists"], json!([]));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = V1ToV2Migration.apply(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ListError::Migration(_)));
    }
}
