// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Host network interface inventory, used to validate a route's `dev` field.
//! Reads `/proc/net/dev` (Linux's interface table) directly instead of
//! shelling out or linking a full system-info crate, since only interface
//! names are needed.

use std::collections::HashSet;
use std::fs;

const PROC_NET_DEV: &str = "/proc/net/dev";

/// Read the set of interface names currently present on the host.
///
/// Returns an empty set (rather than failing startup) if `/proc/net/dev` is
/// unreadable, e.g. in a sandboxed test environment — every `dev`-bearing
/// route then fails validation with [`route_core::ValidationError::UnknownInterface`],
/// which is the safe failure mode for a validation input this service
/// cannot itself repair.
pub fn discover_interfaces() -> HashSet<String> {
    let Ok(contents) = fs::read_to_string(PROC_NET_DEV) else {
        return HashSet::new();
    };
    parse_proc_net_dev(&contents)
}

/// `/proc/net/dev` has two header lines, then one line per interface of the
/// form `  eth0: 1234 ...`.
fn parse_proc_net_dev(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .skip(2)
        .filter_map(|line| line.split(':').next())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
