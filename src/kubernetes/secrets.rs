// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Credentials secret registration and teardown

use crate::constants::FIELD_MANAGER;
use crate::error::Result;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{DeleteParams, Patch, PatchParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, info, instrument};

/// Apply the secret declaration into its namespace and return the object as
/// resolved by the API server.
#[instrument(
    skip(client, secret),
    fields(secret = %format!("{}/{}", secret.namespace().unwrap_or_default(), secret.name_any()))
)]
pub async fn apply_secret(client: &Client, secret: &Secret) -> Result<Secret> {
    let namespace = secret.namespace().unwrap_or_default();
    let secrets: Api<Secret> = Api::namespaced(client.clone(), &namespace);

    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let applied = secrets
        .patch(&secret.name_any(), &pp, &Patch::Apply(secret))
        .await?;

    debug!("Secret {}/{} applied", namespace, applied.name_any());
    Ok(applied)
}

/// Delete a secret, treating an already absent secret as success.
#[instrument(skip(client))]
pub async fn delete_secret(client: &Client, namespace: &str, name: &str) -> Result<()> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    match secrets.delete(name, &DeleteParams::default()).await {
        Ok(_) => {
            info!("Secret {}/{} deleted", namespace, name);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("Secret {}/{} already absent", namespace, name);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
