use async_trait::async_trait;
use utoipa_axum::router::OpenApiRouter;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Core module trait that all AliStore modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module, also the last segment of its base path
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup before the HTTP server binds
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the documented router for this module's routes.
    /// Routes will be mounted under `{api_prefix}/{module_name}` and their
    /// OpenAPI paths merged into the service document with the same prefix.
    fn routes(&self) -> OpenApiRouter {
        OpenApiRouter::new()
    }

    /// Start background tasks for this module
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
