// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Errors surfaced by a [`crate::kernel::KernelActuator`] implementation.

use thiserror::Error;

/// Failure modes of installing/removing a route in the host kernel table.
///
/// `AlreadyExists`/`NotPresent` are idempotency signals, not generic
/// failures — callers treat them as benign rather than as errors to
/// propagate to a client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActuatorError {
    #[error("route already exists in the kernel table")]
    AlreadyExists,

    #[error("route is not present in the kernel table")]
    NotPresent,

    #[error("command failed: {stderr}")]
    CommandFailed { stderr: String },

    #[error("io error invoking kernel command: {0}")]
    Io(String),
}
