// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutfitterError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Namespace removal failed: {0}")]
    NamespaceError(String),

    #[error("Helm release failed: {0}")]
    ReleaseError(String),
}

pub type Result<T> = std::result::Result<T, OutfitterError>;
