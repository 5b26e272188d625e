//! OpenAPI document served under `/docs`.

use crate::api::error::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::home::home,
        crate::api::handlers::login::login,
        crate::api::handlers::callback::callback,
        crate::api::handlers::follow::follow,
        crate::api::handlers::health::health,
    ),
    components(schemas(ErrorResponse)),
    tags(
        (name = "gate", description = "OAuth2 follow gate flow"),
        (name = "health", description = "Service metadata")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for route in ["/", "/login", "/callback", "/follow", "/health"] {
            assert!(
                paths.iter().any(|p| p.as_str() == route),
                "missing route {route} in OpenAPI document"
            );
        }
    }
}
