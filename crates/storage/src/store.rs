// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! The authoritative in-memory route map plus its durability boundary.
//!
//! Every operation here is atomic under a single `parking_lot::Mutex`, and
//! every successful mutation is followed by a full snapshot write so the
//! store survives a restart.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use route_core::{Clock, DeletedRecord, RouteRecord, RouteStatus};

use crate::error::StoreError;
use crate::persistence::{load_snapshot, save_snapshot, Snapshot};

/// A partial update to an existing [`RouteRecord`], applied by [`RouteStore::update`].
///
/// `via`/`dev` are doubly-optional: the outer `Option` says whether this
/// update touches the field at all, the inner one is the new value (`None`
/// clears it). `create_at`/`delete_at`/`active`/`status` are set-if-present.
#[derive(Debug, Clone, Default)]
pub struct RouteUpdate {
    pub via: Option<Option<IpAddr>>,
    pub dev: Option<Option<String>>,
    pub create_at: Option<DateTime<Utc>>,
    pub delete_at: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub status: Option<RouteStatus>,
}

impl RouteUpdate {
    /// An update that only flips `active`/`status`, as used by the
    /// reconciler's T1/T2 transitions.
    pub fn activation(active: bool, status: RouteStatus) -> Self {
        Self { active: Some(active), status: Some(status), ..Default::default() }
    }

    fn apply(self, record: &mut RouteRecord) {
        if let Some(via) = self.via {
            record.via = via;
        }
        if let Some(dev) = self.dev {
            record.dev = dev;
        }
        if let Some(create_at) = self.create_at {
            record.create_at = create_at;
        }
        if let Some(delete_at) = self.delete_at {
            record.delete_at = Some(delete_at);
        }
        if let Some(active) = self.active {
            record.active = active;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
    }
}

struct Inner {
    routes: HashMap<String, RouteRecord>,
    deleted: Vec<DeletedRecord>,
}

/// The durable, process-wide route map. Constructed once at startup; an
/// in-memory-only instance (no `persist_path`) exists solely for test
/// injection.
pub struct RouteStore<C: Clock> {
    inner: Mutex<Inner>,
    persist_path: Option<PathBuf>,
    clock: C,
}

impl<C: Clock> RouteStore<C> {
    /// Construct an in-memory store with no durability — for tests.
    pub fn in_memory(clock: C) -> Self {
        Self {
            inner: Mutex::new(Inner { routes: HashMap::new(), deleted: Vec::new() }),
            persist_path: None,
            clock,
        }
    }

    /// Construct a store backed by a snapshot file, loading existing state
    /// if the file is present.
    pub fn open(path: impl Into<PathBuf>, clock: C) -> Result<Self, StoreError> {
        let path = path.into();
        let (routes, deleted) = match load_snapshot(&path)? {
            Some(snapshot) => (snapshot.routes, snapshot.deleted),
            None => (HashMap::new(), Vec::new()),
        };
        Ok(Self {
            inner: Mutex::new(Inner { routes, deleted }),
            persist_path: Some(path),
            clock,
        })
    }

    fn persist(&self, inner: &Inner) -> Result<(), StoreError> {
        let Some(path) = self.persist_path.as_ref() else { return Ok(()) };
        let snapshot = Snapshot::new(inner.routes.clone(), inner.deleted.clone(), self.clock.now());
        save_snapshot(path, &snapshot)?;
        Ok(())
    }

    /// All records currently in the live map, in arbitrary (HashMap)
    /// enumeration order — callers that need a stable sweep order should
    /// sort by `to`.
    pub fn list_active(&self) -> Vec<RouteRecord> {
        self.inner.lock().routes.values().cloned().collect()
    }

    pub fn list_deleted(&self) -> Vec<DeletedRecord> {
        self.inner.lock().deleted.clone()
    }

    pub fn get(&self, to: &str) -> Result<RouteRecord, StoreError> {
        self.inner
            .lock()
            .routes
            .get(to)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(to.to_string()))
    }

    pub fn insert(&self, record: RouteRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let key = record.key();
        if inner.routes.contains_key(&key) {
            return Err(StoreError::Conflict(key));
        }
        inner.routes.insert(key, record);
        self.persist(&inner)
    }

    pub fn update(&self, to: &str, update: RouteUpdate) -> Result<RouteRecord, StoreError> {
        let mut inner = self.inner.lock();
        let record = inner
            .routes
            .get_mut(to)
            .ok_or_else(|| StoreError::NotFound(to.to_string()))?;
        update.apply(record);
        let updated = record.clone();
        self.persist(&inner)?;
        Ok(updated)
    }

    /// Remove `to` from the live map and append a history entry stamped
    /// with `removal_status`.
    pub fn delete(&self, to: &str, removal_status: RouteStatus) -> Result<RouteRecord, StoreError> {
        let mut inner = self.inner.lock();
        let record = inner
            .routes
            .remove(to)
            .ok_or_else(|| StoreError::NotFound(to.to_string()))?;
        let removed_at = self.clock.now();
        let mut history_entry = DeletedRecord::from_record(&record, removed_at);
        history_entry.status = removal_status;
        inner.deleted.push(history_entry);
        self.persist(&inner)?;
        Ok(record)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
