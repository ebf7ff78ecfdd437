//! Router builder for the AliStore HTTP server

use axum::{http::Uri, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_axum::router::{OpenApiRouter, UtoipaMethodRouter};
use utoipa_swagger_ui::SwaggerUi;

use alistore_kernel::settings::DocsSettings;

use crate::error::{AppError, ErrorBody, ErrorResponse};
use crate::MakeRequestUuidV7;

#[derive(OpenApi)]
#[openapi(components(schemas(ErrorResponse, ErrorBody)))]
struct SharedComponents;

/// Builder for constructing the main HTTP router and its OpenAPI document.
///
/// Middleware is recorded and applied in [`RouterBuilder::into_parts`] so it
/// wraps every route regardless of the order the builder methods are called.
pub struct RouterBuilder {
    router: OpenApiRouter,
    docs: Option<DocsSettings>,
    tracing: bool,
    cors: bool,
    request_id: bool,
    timeout: Option<Duration>,
}

impl RouterBuilder {
    /// Create a new router builder seeded with the service-level document
    pub fn new(mut openapi: utoipa::openapi::OpenApi) -> Self {
        openapi.merge(SharedComponents::openapi());

        Self {
            router: OpenApiRouter::with_openapi(openapi),
            docs: None,
            tracing: false,
            cors: false,
            request_id: false,
            timeout: None,
        }
    }

    /// Add documented routes at the root of the router
    pub fn routes(mut self, routes: UtoipaMethodRouter) -> Self {
        self.router = self.router.routes(routes);
        self
    }

    /// Mount a module's router under `{api_prefix}/{module_name}`
    pub fn mount_module(
        mut self,
        api_prefix: &str,
        module_name: &str,
        module_router: OpenApiRouter,
    ) -> Self {
        let api_path = format!("{}/{}", api_prefix, module_name);
        tracing::info!(module = module_name, "mounting module routes under {}", api_path);
        self.router = self.router.nest(&api_path, module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Add request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.request_id = true;
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(Duration::from_millis(timeout_ms));
        self
    }

    /// Serve Swagger UI and the merged document, when enabled in `docs`
    pub fn with_docs(mut self, docs: &DocsSettings) -> Self {
        self.docs = docs.enabled.then(|| docs.clone());
        self
    }

    /// Finish the router and return it together with the merged document
    pub fn into_parts(self) -> (Router, utoipa::openapi::OpenApi) {
        let (mut router, openapi) = self.router.split_for_parts();

        if let Some(docs) = &self.docs {
            router = router.merge(
                SwaggerUi::new(docs.swagger_path.clone())
                    .url(docs.openapi_path.clone(), openapi.clone()),
            );
        }

        router = router.fallback(fallback);

        if let Some(timeout) = self.timeout {
            router = router.layer(TimeoutLayer::new(timeout));
        }

        if self.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }

        // Set must wrap propagate so the generated id is already on the request.
        if self.request_id {
            router = router
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        }

        if self.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        (router, openapi)
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.into_parts().0
    }
}

async fn fallback(uri: Uri) -> AppError {
    AppError::not_found(format!("no route for {}", uri.path()))
}
