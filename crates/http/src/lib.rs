//! HTTP server facade for AliStore with Axum, error handling, and OpenAPI support.

use std::future::Future;

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, Router};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

use alistore_kernel::{settings::Settings, ModuleRegistry};

pub mod error;
pub mod extract;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry and serve until
/// SIGINT/SIGTERM.
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &Settings,
    openapi: utoipa::openapi::OpenApi,
) -> anyhow::Result<()> {
    let (app, _) = build_router(registry, settings, openapi);
    serve(app, settings, shutdown_signal()).await
}

/// Bind the configured address and serve `app` until `shutdown` resolves.
/// In-flight requests are drained before returning.
pub async fn serve<F>(app: Router, settings: &Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = settings.server.bind_address();
    tracing::info!("starting HTTP server on {}", address);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to address {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted, returning the
/// merged OpenAPI document alongside it.
pub fn build_router(
    registry: &ModuleRegistry,
    settings: &Settings,
    openapi: utoipa::openapi::OpenApi,
) -> (Router, utoipa::openapi::OpenApi) {
    let mut router_builder = RouterBuilder::new(openapi)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .with_docs(&settings.docs)
        .routes(utoipa_axum::routes!(health_check));

    for module in registry.modules() {
        router_builder =
            router_builder.mount_module(&settings.server.api_prefix, module.name(), module.routes());
    }

    router_builder.into_parts()
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    security(()),
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain"))
)]
async fn health_check() -> &'static str {
    "ok"
}

/// Resolves on CTRL+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("CTRL+C received"),
            Err(err) => {
                tracing::error!(%err, "failed to install CTRL+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone, Copy)]
pub(crate) struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;
    use utoipa_axum::router::OpenApiRouter;

    struct WidgetsModule;

    #[utoipa::path(get, path = "", responses((status = 200, body = String)))]
    async fn list_widgets() -> &'static str {
        "[]"
    }

    #[async_trait::async_trait]
    impl alistore_kernel::Module for WidgetsModule {
        fn name(&self) -> &'static str {
            "widgets"
        }

        fn routes(&self) -> OpenApiRouter {
            OpenApiRouter::new().routes(utoipa_axum::routes!(list_widgets))
        }
    }

    fn empty_doc() -> utoipa::openapi::OpenApi {
        utoipa::openapi::OpenApiBuilder::new().build()
    }

    #[tokio::test]
    async fn health_check_is_mounted_at_root() {
        let registry = ModuleRegistry::new();
        let (app, openapi) = build_router(&registry, &Settings::default(), empty_doc());

        assert!(openapi.paths.paths.contains_key("/healthz"));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn modules_are_mounted_under_api_prefix() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(WidgetsModule)).unwrap();

        let mut settings = Settings::default();
        settings.server.api_prefix = "/api/v2".to_string();

        let (app, openapi) = build_router(&registry, &settings, empty_doc());
        assert!(openapi.paths.paths.contains_key("/api/v2/widgets"));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/api/v2/widgets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown_signal() {
        let mut settings = Settings::default();
        settings.server.host = "127.0.0.1".to_string();
        settings.server.port = 0;

        let app = Router::new();
        serve(app, &settings, async {}).await.unwrap();
    }
}
