//! In-memory cache store: named groups of TTL-bounded entries plus the
//! location alias registry, all behind one process-wide lock.
//!
//! The whole store resets when the calendar day changes. Weather
//! responses and location aliases are not meaningful across a day
//! boundary, so a wholesale reset replaces per-entry bookkeeping at the
//! top level. The day check runs at the start of every store-touching
//! operation.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, Utc};
use parking_lot::Mutex;
use serde_json::Value;

/// A cached response and the instant it stops being valid.
#[derive(Debug, Clone)]
struct Entry {
    expires_at: DateTime<Utc>,
    value: Value,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

type Group = HashMap<String, Entry>;

#[derive(Debug)]
struct StoreInner {
    last_refresh_date: NaiveDate,
    groups: HashMap<String, Group>,
    aliases: HashMap<String, String>,
}

impl StoreInner {
    fn empty(today: NaiveDate) -> Self {
        Self {
            last_refresh_date: today,
            groups: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Invalidate everything once per calendar day (local time).
    /// Returns true if the store was reset.
    fn ensure_today(&mut self) -> bool {
        let today = Local::now().date_naive();
        if self.last_refresh_date == today {
            return false;
        }
        tracing::debug!(%today, "Day rollover, clearing cache groups and aliases");
        self.groups.clear();
        self.aliases.clear();
        self.last_refresh_date = today;
        true
    }
}

/// Process-wide cache of upstream JSON responses, partitioned into
/// independently clearable groups, plus the in-session location alias
/// registry.
///
/// One mutex guards groups, aliases, and the rollover date together;
/// every operation is atomic with respect to every other. Callers share
/// the store via `Arc` so tests can construct isolated instances.
#[derive(Debug)]
pub struct CacheStore {
    inner: Mutex<StoreInner>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    /// Create an empty store stamped with today's date.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner::empty(Local::now().date_naive())),
        }
    }

    /// Look up a cached value. A hit requires the entry to exist and to
    /// not have expired. Misses never mutate the store; expired entries
    /// are swept on the next write to their group, not here.
    pub fn get(&self, group: &str, key: &str) -> Option<Value> {
        let mut inner = self.inner.lock();
        inner.ensure_today();
        let entry = inner.groups.get(group)?.get(key)?;
        if entry.is_live(Utc::now()) {
            tracing::debug!(group, key, "cache hit");
            Some(entry.value.clone())
        } else {
            tracing::debug!(group, key, "cache entry expired");
            None
        }
    }

    /// Insert or overwrite a cached value with the given TTL. Expired
    /// entries in the same group are pruned first; other groups are left
    /// alone.
    pub fn put(&self, group: &str, key: &str, value: Value, ttl: Duration) {
        let mut inner = self.inner.lock();
        inner.ensure_today();
        let now = Utc::now();
        let entries = inner.groups.entry(group.to_string()).or_default();
        entries.retain(|_, entry| entry.is_live(now));
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        entries.insert(key.to_string(), Entry { expires_at, value });
    }

    /// Drop every group and alias unconditionally and restamp the store
    /// with today's date.
    pub fn clear_all(&self) {
        let mut inner = self.inner.lock();
        *inner = StoreInner::empty(Local::now().date_naive());
        tracing::debug!("cache cleared");
    }

    /// Remove one group and everything in it. Clearing an absent group
    /// or passing an empty name is a silent no-op.
    pub fn clear_group(&self, group: &str) {
        if group.is_empty() {
            return;
        }
        let mut inner = self.inner.lock();
        inner.ensure_today();
        if inner.groups.remove(group).is_some() {
            tracing::debug!(group, "cache group cleared");
        }
    }

    /// Remove the per-location group for a location key. Empty key is a
    /// silent no-op.
    pub fn clear_for_location(&self, location_key: &str) {
        if location_key.is_empty() {
            return;
        }
        self.clear_group(&crate::location::location_group(location_key));
    }

    /// Map an ad-hoc location identifier (coordinates, zip) to its
    /// canonical key. Re-registering overwrites. Empty arguments are a
    /// silent no-op.
    pub fn register_alias(&self, alias: &str, canonical: &str) {
        if alias.is_empty() || canonical.is_empty() {
            return;
        }
        let mut inner = self.inner.lock();
        inner.ensure_today();
        inner.aliases.insert(alias.to_string(), canonical.to_string());
    }

    /// Resolve a previously registered alias to its canonical key.
    pub fn resolve_alias(&self, alias: &str) -> Option<String> {
        if alias.is_empty() {
            return None;
        }
        let mut inner = self.inner.lock();
        inner.ensure_today();
        inner.aliases.get(alias).cloned()
    }
}
