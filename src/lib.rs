// Copyright 2026 Vulntrack Contributors
// SPDX-License-Identifier: Apache-2.0

//! Cloud security-bulletin tracker.
//!
//! Fetches published Google Cloud security-bulletin pages, extracts
//! per-bulletin records (identifiers, titles, CVE lists, remediation
//! text), classifies who must act to remediate, and serves the
//! aggregate over a small HTTP API.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod registry;
pub mod rest;
