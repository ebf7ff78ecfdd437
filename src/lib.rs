//! AliStore application library
//!
//! Wires the application modules and the API descriptor into the HTTP layer.

pub mod modules;
pub mod openapi;

use alistore_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use anyhow::Context;
use axum::Router;
use utoipa::OpenApi;

/// Registry holding every application module.
pub fn registry() -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry)?;
    Ok(registry)
}

/// Build the fully layered router together with the merged OpenAPI document.
pub fn app(settings: &Settings) -> anyhow::Result<(Router, utoipa::openapi::OpenApi)> {
    let registry = registry()?;
    Ok(alistore_http::build_router(
        &registry,
        settings,
        openapi::ApiDoc::openapi(),
    ))
}

/// Run module lifecycle around the HTTP server until a shutdown signal.
pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let registry = registry()?;
    let ctx = InitCtx { settings };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = alistore_http::start_server(&registry, settings, openapi::ApiDoc::openapi())
        .await
        .context("HTTP server terminated with an error");

    // Modules are stopped even when serving failed.
    registry.stop_all().await?;
    served
}
