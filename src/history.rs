//! Per-client history of created short links.
//!
//! The whole list lives under one key of a [`KeyValueStore`] as a JSON array.
//! Values in the older delimited format (`code,target,createdAt` records
//! joined by `|`) are still readable and are rewritten as JSON on the next
//! append.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::ShortLink;
use crate::store::KeyValueStore;

/// Store key holding the history.
pub const HISTORY_KEY: &str = "shortlinks";

const LEGACY_RECORD_SEPARATOR: char = '|';
const LEGACY_FIELD_SEPARATOR: char = ',';

pub struct LocalHistory {
    store: Arc<dyn KeyValueStore>,
    // serializes read-modify-write of HISTORY_KEY
    write_lock: Mutex<()>,
}

impl LocalHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Append one link to the stored list.
    pub async fn append(&self, link: &ShortLink) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut links = match self.store.get(HISTORY_KEY).await? {
            Some(raw) => decode(&raw),
            None => Vec::new(),
        };
        links.push(link.clone());

        let encoded = serde_json::to_string(&links)?;
        self.store.set(HISTORY_KEY, &encoded).await?;

        tracing::debug!("Stored short link '{}' ({} in history)", link.code, links.len());
        Ok(())
    }

    /// Every stored link, oldest first.
    pub async fn read_all(&self) -> Result<Vec<ShortLink>, StoreError> {
        let mut links = match self.store.get(HISTORY_KEY).await? {
            Some(raw) => decode(&raw),
            None => return Ok(Vec::new()),
        };
        links.sort_by_key(|l| l.created_at);
        Ok(links)
    }
}

// ── Decoding ───────────────────────────────────────────────────────────────

/// Decode a stored value in either format. Records that cannot be decoded
/// are skipped.
fn decode(raw: &str) -> Vec<ShortLink> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<Value>>(trimmed) {
        Ok(items) => items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value::<ShortLink>(item) {
                Ok(link) => Some(link),
                Err(e) => {
                    tracing::warn!("Skipping unreadable history record #{}: {}", i, e);
                    None
                }
            })
            .collect(),
        Err(_) => decode_legacy(trimmed),
    }
}

fn decode_legacy(raw: &str) -> Vec<ShortLink> {
    raw.split(LEGACY_RECORD_SEPARATOR)
        .filter_map(|record| {
            let link = parse_legacy_record(record);
            if link.is_none() {
                tracing::warn!("Skipping malformed history record {:?}", record);
            }
            link
        })
        .collect()
}

/// `code,target,createdAt`; the target may itself contain commas, so the
/// code ends at the first separator and the timestamp starts after the last.
fn parse_legacy_record(record: &str) -> Option<ShortLink> {
    let (code, rest) = record.split_once(LEGACY_FIELD_SEPARATOR)?;
    let (target, created_at) = rest.rsplit_once(LEGACY_FIELD_SEPARATOR)?;

    if code.is_empty() || target.is_empty() {
        return None;
    }
    let created_at = created_at.trim().parse::<i64>().ok()?;

    Some(ShortLink::new(code, target, created_at))
}
