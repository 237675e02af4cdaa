use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Palette tag colors are drawn from.
pub const TAG_COLORS: [&str; 14] = [
    "#EF4444", "#F97316", "#F59E0B", "#84CC16", "#10B981", "#14B8A6", "#06B6D4", "#3B82F6",
    "#6366F1", "#8B5CF6", "#A855F7", "#D946EF", "#EC4899", "#F43F5E",
];

/// Registry entry for a tag. `count` is derived from the lists and only
/// written by tag synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMetadata {
    pub name: String,
    pub color: String,
    pub count: usize,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Stable palette color for a tag name.
///
/// Uses the 31-multiplier string hash over UTF-16 code units with the
/// shift truncated to 32 bits, so colors match documents written by
/// earlier versions of the app.
pub fn tag_color(name: &str) -> &'static str {
    let hash = name.encode_utf16().fold(0_i64, |hash, unit| {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        i64::from(unit) + (shifted - hash)
    });
    TAG_COLORS[(hash.unsigned_abs() % TAG_COLORS.len() as u64) as usize]
}
