//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use shopping_list::Trace;
#[cfg(debug_assertions)]
use shopping_list::doc::ApiDoc;
use shopping_list::domain::ShoppingListService;
use shopping_list::inbound::http::error::not_found;
use shopping_list::inbound::http::health::{HealthState, live, ready};
use shopping_list::inbound::http::items;
use shopping_list::inbound::http::state::HttpState;
use shopping_list::outbound::persistence::DieselItemRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(items::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}

/// Construct an Actix HTTP server over the Diesel-backed shopping-list
/// service.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener. The
/// readiness probe reports ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { bind_addr, db_pool } = config;
    let service = ShoppingListService::new(Arc::new(DieselItemRepository::new(db_pool)));
    let http_state = web::Data::new(HttpState::from_service(Arc::new(service)));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
