use crate::migration::{MigrationStep, SchemaVersion, V1ToV2Migration};
use listkeeper_core::{ListError, ListResult};
use serde_json::Value;

/// Orchestrates migrations between schema versions
pub struct Migrator {
    steps: Vec<Box<dyn MigrationStep>>,
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Migrator {
    pub fn new() -> Self {
        Self {
            steps: vec![Box::new(V1ToV2Migration)],
        }
    }

    /// Detect the schema version of a stored document.
    /// Documents without a version predate versioning and count as 1.0.
    /// Returns `None` for a version this build does not know.
    pub fn detect_version(document: &Value) -> Option<SchemaVersion> {
        match document.get("version") {
            None | Some(Value::Null) => Some(SchemaVersion::V1_0),
            Some(Value::String(s)) if s.is_empty() => Some(SchemaVersion::V1_0),
            Some(Value::String(s)) => SchemaVersion::parse(s),
            Some(_) => None,
        }
    }

    /// Upgrade `document` one step at a time until it reaches the current
    /// version. A current document is returned unchanged, and so is one
    /// with an unrecognised version.
    pub fn migrate(&self, mut document: Value) -> ListResult<Value> {
        let Some(mut version) = Self::detect_version(&document) else {
            tracing::warn!(
                "Unrecognised schema version {}, reading document as is",
                document["version"]
            );
            return Ok(document);
        };

        while version != SchemaVersion::CURRENT {
            let step = self
                .steps
                .iter()
                .find(|step| step.from_version() == version)
                .ok_or_else(|| {
                    ListError::Migration(format!("No migration path from version {}", version))
                })?;

            document = step.apply(document)?;
            tracing::info!(
                "Migrated document from {} to {}",
                step.from_version(),
                step.to_version()
            );
            version = step.to_version();
        }

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_versionless_as_v1() {
        assert_eq!(
            Migrator::detect_version(&json!({ "lists": [] })),
            Some(SchemaVersion::V1_0)
        );
        assert_eq!(
            Migrator::detect_version(&json!({ "version": null })),
            Some(SchemaVersion::V1_0)
        );
    }

    #[test]
    fn test_detect_current() {
        let doc = json!({ "version": "2.0" });
        assert_eq!(Migrator::detect_version(&doc), Some(SchemaVersion::V2_0));
    }

    #[test]
    fn test_unknown_version_is_not_detected() {
        assert_eq!(Migrator::detect_version(&json!({ "version": "2.1" })), None);
        assert_eq!(Migrator::detect_version(&json!({ "version": 2 })), None);
    }

    #[test]
    fn test_migrate_leaves_unknown_version_as_is() {
        let doc = json!({
            "lists": [{ "id": "a", "name": "Keep" }],
            "version": "2.1"
        });
        assert_eq!(Migrator::new().migrate(doc.clone()).unwrap(), doc);
    }

    #[test]
    fn test_migrate_current_is_identity() {
        let doc = json!({
            "lists": [{ "id": "a", "tags": ["x"], "visualStyle": "minimal" }],
            "tags": [],
            "version": "2.0"
        });
        assert_eq!(Migrator::new().migrate(doc.clone()).unwrap(), doc);
    }

    #[test]
    fn test_migrate_v1_reaches_current() {
        let migrated = Migrator::new()
            .migrate(json!({ "lists": [{ "id": "a" }] }))
            .unwrap();
        assert_eq!(migrated["version"], SchemaVersion::CURRENT.as_str());
        assert_eq!(migrated["lists"][0]["visualStyle"], "card");
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let migrator = Migrator::new();
        let once = migrator.migrate(json!({ "lists": [] })).unwrap();
        let twice = migrator.migrate(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_step_is_error() {
        let migrator = Migrator { steps: Vec::new() };
        assert!(migrator.migrate(json!({})).is_err());
    }
}
