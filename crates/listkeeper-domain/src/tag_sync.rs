//! Tag registry derivation.
//!
//! The registry is a cache over the lists: counts are recomputed from
//! scratch on every pass, colors and creation stamps are carried forward for
//! tags that survive, and tags no list uses anymore are dropped.

use std::collections::{HashMap, HashSet};

use crate::clock::now_millis;
use crate::list::List;
use crate::tag::{tag_color, TagMetadata};

/// Build a fresh registry from `lists`, reusing entries from `previous`.
///
/// Tags appear in order of first use across the lists.
pub fn synchronize_tags(lists: &[List], previous: &[TagMetadata]) -> Vec<TagMetadata> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for list in lists {
        let mut seen: HashSet<&str> = HashSet::new();
        for tag in list.tags.iter().map(String::as_str) {
            if !seen.insert(tag) {
                continue;
            }
            let count = counts.entry(tag).or_insert_with(|| {
                order.push(tag);
                0
            });
            *count += 1;
        }
    }

    let existing: HashMap<&str, &TagMetadata> =
        previous.iter().map(|tag| (tag.name.as_str(), tag)).collect();
    let now = now_millis();

    order
        .into_iter()
        .map(|name| {
            let count = counts.get(name).copied().unwrap_or_default();
            match existing.get(name) {
                Some(known) => TagMetadata {
                    name: name.to_string(),
                    color: known.color.clone(),
                    count,
                    created_at: known.created_at,
                },
                None => TagMetadata {
                    name: name.to_string(),
                    color: tag_color(name).to_string(),
                    count,
                    created_at: now,
                },
            }
        })
        .collect()
}
