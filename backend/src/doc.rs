//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the shopping-list routes, the health probes and the
//! create form schema. The generated document backs Swagger UI in debug
//! builds and is printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::items::AddItemForm;

/// OpenAPI document for the HTTP interface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shopping list",
        description = "Server-rendered shopping list with form-driven mutations and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::items::list_items,
        crate::inbound::http::items::add_item,
        crate::inbound::http::items::update_quantity,
        crate::inbound::http::items::toggle_purchased,
        crate::inbound::http::items::delete_item,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(AddItemForm)),
    tags(
        (name = "items", description = "Shopping-list page and item mutations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
