// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace registration and teardown

use crate::constants::{DELETE_WAIT_TIMEOUT_SECS, FIELD_MANAGER};
use crate::error::{OutfitterError, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{DeleteParams, Patch, PatchParams},
    Api, Client, ResourceExt,
};
use kube_runtime::wait::{await_condition, conditions};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Apply the namespace declaration and return the object as resolved by the
/// API server. Repeated applies of the same declaration converge.
#[instrument(skip(client, namespace), fields(namespace = %namespace.name_any()))]
pub async fn apply_namespace(client: &Client, namespace: &Namespace) -> Result<Namespace> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let applied = namespaces
        .patch(&namespace.name_any(), &pp, &Patch::Apply(namespace))
        .await?;

    debug!("Namespace {} applied", applied.name_any());
    Ok(applied)
}

/// Request deletion of a namespace. Returns the uid the namespace had, so a
/// caller can wait for that exact object to go away; None if it was already
/// absent.
#[instrument(skip(client))]
pub async fn delete_namespace(client: &Client, name: &str) -> Result<Option<String>> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let existing = match namespaces.get(name).await {
        Ok(ns) => ns,
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("Namespace {} already absent", name);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let uid = existing.uid();

    match namespaces.delete(name, &DeleteParams::default()).await {
        Ok(_) => {
            info!("Namespace {} deletion requested", name);
            Ok(uid)
        }
        Err(kube::Error::Api(err)) if err.code == 404 => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Wait until the namespace with the given uid is fully terminated. The uid
/// guards against a recreated namespace under the same name.
#[instrument(skip(client))]
pub async fn wait_namespace_deleted(client: &Client, name: &str, uid: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    let deleted = await_condition(namespaces, name, conditions::is_deleted(uid));
    match tokio::time::timeout(Duration::from_secs(DELETE_WAIT_TIMEOUT_SECS), deleted).await {
        Ok(Ok(_)) => {
            info!("Namespace {} terminated", name);
            Ok(())
        }
        Ok(Err(e)) => Err(OutfitterError::NamespaceError(format!(
            "Watch failed while waiting for namespace {} to terminate: {}",
            name, e
        ))),
        Err(_) => Err(OutfitterError::NamespaceError(format!(
            "Timed out after {}s waiting for namespace {} to terminate",
            DELETE_WAIT_TIMEOUT_SECS, name
        ))),
    }
}
