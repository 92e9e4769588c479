//! # Execution Environment
//!
//! The session environment a calculation runs in: tenant, organization,
//! language, and whatever else the host system places there. It is a flat
//! string map, as host sessions are, with typed lookups on top.
//!
//! A setting owns one; every calculation context built from that setting
//! starts with a copy of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key holding the tenant (client) identifier.
pub const CLIENT_ID: &str = "client_id";
/// Key holding the organization identifier.
pub const ORG_ID: &str = "org_id";
/// Key holding the session language tag.
pub const LANGUAGE: &str = "language";

/// String-keyed session environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionContext {
    entries: BTreeMap<String, String>,
}

impl ExecutionContext {
    /// An empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add an entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or overwrite an entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Integer lookup; `0` when absent or not an integer.
    pub fn get_as_int(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    /// Flag lookup; `true` only for `"Y"` or `"true"`.
    pub fn get_as_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some("Y") | Some("true"))
    }

    /// Tenant identifier, `0` when unset.
    pub fn client_id(&self) -> i64 {
        self.get_as_int(CLIENT_ID)
    }

    /// Organization identifier, `0` when unset.
    pub fn org_id(&self) -> i64 {
        self.get_as_int(ORG_ID)
    }

    /// Session language tag, if set.
    pub fn language(&self) -> Option<&str> {
        self.get(LANGUAGE)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the environment has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
