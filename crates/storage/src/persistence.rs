// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Snapshot persistence for the route store: a single JSON file holding the
//! full live map plus the deleted-routes history, written atomically with
//! backup rotation on every successful mutation.
//!
//! This store has no multi-writer or replicated-log requirement, only a
//! durable single-process map, so a plain snapshot-on-write is sufficient
//! (see DESIGN.md for the tradeoff against a WAL+checkpoint design).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use route_core::{DeletedRecord, RouteRecord};
use serde::{Deserialize, Serialize};

use crate::error::PersistError;

pub const CURRENT_SNAPSHOT_VERSION: u32 = 1;

/// The full persisted state of a [`crate::store::RouteStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "v")]
    pub version: u32,
    pub routes: HashMap<String, RouteRecord>,
    pub deleted: Vec<DeletedRecord>,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(routes: HashMap<String, RouteRecord>, deleted: Vec<DeletedRecord>, now: DateTime<Utc>) -> Self {
        Self { version: CURRENT_SNAPSHOT_VERSION, routes, deleted, created_at: now }
    }
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`. The
/// oldest backup is removed when the limit is reached.
fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

/// Write `snapshot` to `path` atomically: serialize to a sibling `.tmp` file,
/// rotate any existing file into the backup chain, then rename the temp
/// file into place.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), PersistError> {
    let tmp_path = path.with_extension("tmp");
    let body = serde_json::to_vec_pretty(snapshot)?;
    fs::write(&tmp_path, &body)?;

    if path.exists() {
        let bak_path = rotate_bak_path(path);
        fs::rename(path, bak_path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load a snapshot from `path`. Returns `Ok(None)` if the file does not
/// exist — a missing file means the store starts empty, not an error.
pub fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, PersistError> {
    match fs::read(path) {
        Ok(body) => Ok(Some(serde_json::from_slice(&body)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
