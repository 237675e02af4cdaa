pub mod migrator;
pub mod v1_to_v2;

pub use migrator::Migrator;
pub use v1_to_v2::V1ToV2Migration;

use listkeeper_core::ListResult;
use serde_json::Value;

/// Known schema versions of the stored document, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaVersion {
    V1_0,
    V2_0,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V2_0;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V2_0 => "2.0",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1.0" => Some(Self::V1_0),
            "2.0" => Some(Self::V2_0),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single upgrade between two adjacent schema versions.
pub trait MigrationStep: Send + Sync {
    fn from_version(&self) -> SchemaVersion;

    fn to_version(&self) -> SchemaVersion;

    /// Transform a document at `from_version` into one at `to_version`
    fn apply(&self, document: Value) -> ListResult<Value>;
}
