// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Portable header records and the global header set

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

/// A single HTTP header as seen by interceptors and configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub key: String,
    pub value: String,
}

impl HeaderRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Convert to the native header pair, if both halves are valid
    pub fn to_native(&self) -> Option<(HeaderName, HeaderValue)> {
        let name = HeaderName::try_from(self.key.as_str()).ok()?;
        let value = HeaderValue::try_from(self.value.as_str()).ok()?;
        Some((name, value))
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for HeaderRecord {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Project a native header map into records, one per value.
///
/// UTF-8 values are kept as text. Values that are not UTF-8 are skipped.
pub fn to_records(headers: &HeaderMap) -> Vec<HeaderRecord> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            std::str::from_utf8(value.as_bytes())
                .ok()
                .map(|v| HeaderRecord::new(name.as_str(), v))
        })
        .collect()
}

/// Apply edits made on a record projection back onto the native map.
///
/// Works per key: keys whose records did not change keep their native
/// entries untouched, including values the projection skipped. Changed keys
/// are replaced by their new records and dropped keys are removed.
pub fn apply_record_changes(
    headers: &mut HeaderMap,
    original: &[HeaderRecord],
    updated: &[HeaderRecord],
) {
    let before = group_by_key(original);
    let after = group_by_key(updated);

    for (key, _) in &before {
        if after.iter().all(|(k, _)| k != key) {
            if let Ok(name) = HeaderName::try_from(key.as_str()) {
                headers.remove(name);
            }
        }
    }

    for (key, values) in &after {
        let unchanged = before
            .iter()
            .any(|(k, previous)| k == key && previous == values);
        if unchanged {
            continue;
        }

        let Ok(name) = HeaderName::try_from(key.as_str()) else {
            tracing::warn!(key = %key, "Skipping invalid header record");
            continue;
        };
        headers.remove(&name);
        for value in values {
            match HeaderValue::try_from(*value) {
                Ok(value) => {
                    headers.append(name.clone(), value);
                }
                Err(_) => {
                    tracing::warn!(key = %key, "Skipping invalid header record");
                }
            }
        }
    }
}

/// Group record values by lowercased key, in first-seen key order
fn group_by_key(records: &[HeaderRecord]) -> Vec<(String, Vec<&str>)> {
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();
    for record in records {
        let key = record.key.to_ascii_lowercase();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(record.value.as_str()),
            None => groups.push((key, vec![record.value.as_str()])),
        }
    }
    groups
}

/// Rebuild a native header map from records, preserving multi-values.
pub fn from_records(records: &[HeaderRecord]) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(records.len());
    append_records(&mut headers, records);
    headers
}

/// Append records to a native header map. Invalid records are logged and skipped.
pub fn append_records<'a>(
    headers: &mut HeaderMap,
    records: impl IntoIterator<Item = &'a HeaderRecord>,
) {
    for record in records {
        match record.to_native() {
            Some((name, value)) => {
                headers.append(name, value);
            }
            None => {
                tracing::warn!(key = %record.key, "Skipping invalid header record");
            }
        }
    }
}

/// Headers attached to every outgoing call.
///
/// Lookup is by key, application order is registration order.
#[derive(Debug, Clone, Default)]
pub struct GlobalHeaderSet {
    headers: Vec<HeaderRecord>,
}

impl GlobalHeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a header, replacing any entry with the same key
    pub fn register(&mut self, header: HeaderRecord) {
        self.deregister(&header.key);
        self.headers.push(header);
    }

    /// Remove the entry for `key`. Returns whether one existed.
    pub fn deregister(&mut self, key: &str) -> bool {
        match self.headers.iter().position(|h| h.key == key) {
            Some(index) => {
                self.headers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every registered header
    pub fn clear_all(&mut self) {
        self.headers.clear();
    }

    pub fn get(&self, key: &str) -> Option<&HeaderRecord> {
        self.headers.iter().find(|h| h.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderRecord> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
