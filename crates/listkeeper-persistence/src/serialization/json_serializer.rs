use crate::traits::Serializer;
use listkeeper_core::{ListError, ListResult};

/// JSON serializer for persisted documents
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Single-line output, used for storage writes
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Two-space indented output, used for export
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> ListResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };
        json.map_err(|e| ListError::Serialization(e.to_string()))
    }

    fn deserialize(&self, text: &str) -> ListResult<T> {
        serde_json::from_str(text).map_err(|e| ListError::Serialization(e.to_string()))
    }
}
