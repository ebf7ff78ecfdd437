//! Service-level OpenAPI descriptor.
//!
//! Module paths are merged into this document when the router is built. The
//! bearer scheme is declared for documentation only and is not enforced.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme},
    Modify, OpenApi,
};

use crate::modules::books::routes::BOOK_TAG;

/// Name of the security scheme every operation requires.
pub const SECURITY_SCHEME: &str = "bearerAuth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AliStore API",
        description = "REST API for AliStore - Book Management and Selling System",
        version = "1.0.0",
        contact(
            name = "AliStore Team",
            email = "support@alistore.com",
            url = "https://github.com/alivanderlande/alistore"
        ),
        license(name = "MIT License", url = "https://opensource.org/licenses/MIT")
    ),
    tags(
        (name = BOOK_TAG, description = "APIs for managing books"),
        (name = "health", description = "Liveness check")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            SECURITY_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.security = Some(vec![SecurityRequirement::new(
            SECURITY_SCHEME,
            Vec::<String>::new(),
        )]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_metadata() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let info = &doc["info"];

        assert_eq!(info["title"], "AliStore API");
        assert_eq!(
            info["description"],
            "REST API for AliStore - Book Management and Selling System"
        );
        assert_eq!(info["version"], "1.0.0");
        assert_eq!(info["contact"]["name"], "AliStore Team");
        assert_eq!(info["contact"]["email"], "support@alistore.com");
        assert_eq!(
            info["contact"]["url"],
            "https://github.com/alivanderlande/alistore"
        );
        assert_eq!(info["license"]["name"], "MIT License");
        assert_eq!(info["license"]["url"], "https://opensource.org/licenses/MIT");
    }

    #[test]
    fn bearer_scheme_is_declared_and_required_globally() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let scheme = &doc["components"]["securitySchemes"][SECURITY_SCHEME];
        assert_eq!(scheme["type"], "http");
        assert_eq!(scheme["scheme"], "bearer");
        assert_eq!(scheme["bearerFormat"], "JWT");

        assert_eq!(doc["security"], serde_json::json!([{ SECURITY_SCHEME: [] }]));
    }

    #[test]
    fn book_tag_is_described() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let tags = doc["tags"].as_array().unwrap();

        let books = tags.iter().find(|tag| tag["name"] == BOOK_TAG).unwrap();
        assert_eq!(books["description"], "APIs for managing books");
    }
}
