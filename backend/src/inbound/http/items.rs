//! Shopping-list HTTP handlers.
//!
//! ```text
//! GET  /                            rendered list page
//! POST /add                         form: name, quantity, category
//! POST /update/{id}?action=increase|decrease
//! POST /toggle/{id}
//! POST /delete/{id}
//! ```
//!
//! Mutations answer `302 Location: /` whenever the store call succeeds or the
//! input is rejected, including bodies and query strings that fail to decode.
//! Only store failures surface, as `500` with a fixed message per endpoint.

use actix_web::error::{InternalError, QueryPayloadError, UrlencodedError};
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{AddItemOutcome, AddItemRequest};
use crate::domain::{ItemId, QuantityAdjustment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::store_failure;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::view::render_shopping_list;

pub const LIST_FAILURE: &str = "Erro ao consultar o banco de dados.";
pub const ADD_FAILURE: &str = "Erro ao adicionar item.";
pub const UPDATE_FAILURE: &str = "Erro ao atualizar item.";
pub const TOGGLE_FAILURE: &str = "Erro ao atualizar status do item.";
pub const DELETE_FAILURE: &str = "Erro ao deletar item.";

/// Create form body for `POST /add`.
///
/// Every field is optional at the wire level; emptiness and registry
/// membership are checked behind the command port. The Portuguese field
/// names used by older clients are accepted as aliases.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddItemForm {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "quantidade")]
    pub quantity: Option<String>,
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
}

impl From<AddItemForm> for AddItemRequest {
    fn from(form: AddItemForm) -> Self {
        Self {
            name: form.name.unwrap_or_default(),
            quantity: form.quantity.unwrap_or_default(),
            category: form.category.unwrap_or_default(),
        }
    }
}

/// Query string for `POST /update/{id}`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdjustQuery {
    /// `increase` or `decrease`; anything else is ignored.
    pub action: Option<String>,
}

fn redirect_to_list() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

fn redirect_on_form_error(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "ignoring undecodable form body");
    InternalError::from_response(err, redirect_to_list()).into()
}

fn redirect_on_query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "ignoring undecodable query string");
    InternalError::from_response(err, redirect_to_list()).into()
}

fn parse_item_id(raw: &str) -> Option<ItemId> {
    match raw.parse::<ItemId>() {
        Ok(id) => Some(id),
        Err(reason) => {
            debug!(raw, %reason, "ignoring request for malformed item id");
            None
        }
    }
}

/// Register the shopping-list routes and their extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use shopping_list::inbound::http::items::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(redirect_on_form_error))
        .app_data(web::QueryConfig::default().error_handler(redirect_on_query_error))
        .service(list_items)
        .service(add_item)
        .service(update_quantity)
        .service(toggle_purchased)
        .service(delete_item);
}

/// Render the shopping list.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Rendered list page", content_type = "text/html", body = String),
        (status = 500, description = "Store failure", content_type = "text/plain", body = String)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let list = state
        .query
        .shopping_list()
        .await
        .map_err(|err| store_failure(err, LIST_FAILURE))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(render_shopping_list(&list)))
}

/// Add an item. Invalid input is dropped silently.
#[utoipa::path(
    post,
    path = "/add",
    request_body(content = AddItemForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to the list, whether or not the item was added"),
        (status = 500, description = "Store failure", content_type = "text/plain", body = String)
    ),
    tags = ["items"],
    operation_id = "addItem"
)]
#[post("/add")]
pub async fn add_item(
    state: web::Data<HttpState>,
    form: web::Form<AddItemForm>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .command
        .add_item(form.into_inner().into())
        .await
        .map_err(|err| store_failure(err, ADD_FAILURE))?;

    if let AddItemOutcome::Added(id) = outcome {
        debug!(item_id = %id, "redirecting after add");
    }
    Ok(redirect_to_list())
}

/// Increase or decrease an item's quantity by one, never below one.
#[utoipa::path(
    post,
    path = "/update/{id}",
    params(
        ("id" = String, Path, description = "Item identifier"),
        AdjustQuery
    ),
    responses(
        (status = 302, description = "Redirect to the list"),
        (status = 500, description = "Store failure", content_type = "text/plain", body = String)
    ),
    tags = ["items"],
    operation_id = "updateQuantity"
)]
#[post("/update/{id}")]
pub async fn update_quantity(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<AdjustQuery>,
) -> ApiResult<HttpResponse> {
    let Some(id) = parse_item_id(&path) else {
        return Ok(redirect_to_list());
    };
    let action = query.into_inner().action.unwrap_or_default();
    let Some(adjustment) = QuantityAdjustment::from_action(&action) else {
        debug!(item_id = %id, action = %action, "ignoring unknown quantity action");
        return Ok(redirect_to_list());
    };

    state
        .command
        .adjust_quantity(id, adjustment)
        .await
        .map_err(|err| store_failure(err, UPDATE_FAILURE))?;
    Ok(redirect_to_list())
}

/// Flip an item between pending and purchased.
#[utoipa::path(
    post,
    path = "/toggle/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 302, description = "Redirect to the list"),
        (status = 500, description = "Store failure", content_type = "text/plain", body = String)
    ),
    tags = ["items"],
    operation_id = "togglePurchased"
)]
#[post("/toggle/{id}")]
pub async fn toggle_purchased(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = parse_item_id(&path) else {
        return Ok(redirect_to_list());
    };

    state
        .command
        .toggle_purchased(id)
        .await
        .map_err(|err| store_failure(err, TOGGLE_FAILURE))?;
    Ok(redirect_to_list())
}

/// Remove an item. Unknown ids are not an error.
#[utoipa::path(
    post,
    path = "/delete/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 302, description = "Redirect to the list"),
        (status = 500, description = "Store failure", content_type = "text/plain", body = String)
    ),
    tags = ["items"],
    operation_id = "deleteItem"
)]
#[post("/delete/{id}")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = parse_item_id(&path) else {
        return Ok(redirect_to_list());
    };

    state
        .command
        .delete_item(id)
        .await
        .map_err(|err| store_failure(err, DELETE_FAILURE))?;
    Ok(redirect_to_list())
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;
