//! OpenAPI documentation configuration

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for the Cafe API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cafe API",
        version = "0.1.0",
        description = "Cafe ordering backend: catalog, customers, orders, payments, and staff authentication",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_catalog::ApiDoc),
        (path = "/api", api = domain_customers::ApiDoc),
        (path = "/api", api = domain_orders::ApiDoc),
        (path = "/api", api = domain_users::ApiDoc)
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
