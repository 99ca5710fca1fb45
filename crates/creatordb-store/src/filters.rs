//! Builders for the query filters and update documents the aggregation
//! service issues against the cache collection.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use creatordb_core::creators::{CreatorProfile, Platform};

fn id_path(platform: Platform) -> String {
    format!("{}.id", platform.slot_path())
}

fn name_path(platform: Platform) -> String {
    format!("{}.name", platform.slot_path())
}

/// Case-insensitive substring match across the document name and both
/// per-platform display names, for typeahead live search.
#[must_use]
pub fn live_search_filter(query: &str) -> Value {
    let pattern = regex::escape(query);
    let regex = json!({ "$regex": pattern, "$options": "i" });
    json!({
        "$or": [
            { "name": regex },
            { (name_path(Platform::Youtube)): regex },
            { (name_path(Platform::Twitch)): regex },
        ]
    })
}

/// Exact-or-fuzzy id match for creator lookup: one round trip evaluating
/// both conditions in a single `$or`, matching the id exactly or as a whole
/// string case-insensitively.
#[must_use]
pub fn creator_lookup_filter(platform: Platform, id: &str) -> Value {
    let path = id_path(platform);
    json!({
        "$or": [
            { (path.clone()): id },
            { (path): { "$regex": format!("^{}$", regex::escape(id)), "$options": "i" } },
        ]
    })
}

/// Exact id match on one platform slot, used to locate the document a fresh
/// profile should be merged into.
#[must_use]
pub fn platform_id_filter(platform: Platform, id: &str) -> Value {
    json!({ (id_path(platform)): id })
}

/// Match a document by its `_id`.
#[must_use]
pub fn document_id_filter(doc_id: &str) -> Value {
    json!({ "_id": doc_id })
}

/// `$set` update replacing the matched document's top-level identity fields
/// and the profile's whole platform slot.
#[must_use]
pub fn populate_update(profile: &CreatorProfile, now: DateTime<Utc>) -> Value {
    json!({
        "$set": {
            "name": profile.name,
            "thumbnail": profile.thumbnail,
            (profile.platform.slot_path()): profile,
            "lastUpdated": now,
        }
    })
}
