// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registration of the composed resources with the Kubernetes API server.

pub mod namespaces;
pub mod secrets;

pub use namespaces::{apply_namespace, delete_namespace, wait_namespace_deleted};
pub use secrets::{apply_secret, delete_secret};
