//! Tests for shopping-list HTTP handlers.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockShoppingListCommand, MockShoppingListQuery};
use crate::domain::{
    Error, Item, ItemValidationError, Quantity, ShoppingList, TRACE_ID_HEADER,
};
use crate::middleware::Trace;
use actix_web::http::StatusCode;
use actix_web::{App, body::to_bytes, test as actix_test};
use mockall::predicate::eq;
use rstest::rstest;

fn state(query: MockShoppingListQuery, command: MockShoppingListCommand) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(query), Arc::new(command)))
}

async fn call(
    query: MockShoppingListQuery,
    command: MockShoppingListCommand,
    request: actix_test::TestRequest,
) -> actix_web::dev::ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(state(query, command))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    actix_test::call_service(&app, request.to_request()).await
}

fn id(value: i32) -> ItemId {
    ItemId::new(value).expect("valid id")
}

fn assert_redirects_home(response: &actix_web::dev::ServiceResponse) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/")
    );
}

async fn body_text(response: actix_web::dev::ServiceResponse) -> String {
    let bytes = to_bytes(response.into_body()).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[actix_web::test]
async fn list_renders_html() {
    let mut query = MockShoppingListQuery::new();
    query.expect_shopping_list().times(1).return_once(|| {
        Ok(ShoppingList::from_items(vec![Item {
            id: id(1),
            name: "Leite".to_owned(),
            quantity: Quantity::new(2).expect("valid quantity"),
            category: "Laticínios".to_owned(),
            purchased: false,
        }]))
    });

    let response = call(
        query,
        MockShoppingListCommand::new(),
        actix_test::TestRequest::get().uri("/"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/html"))
    );
    let body = body_text(response).await;
    assert!(body.contains("Leite"));
    assert!(body.contains("Pendentes (1)"));
}

#[actix_web::test]
async fn list_failure_returns_fixed_message_with_trace() {
    let mut query = MockShoppingListQuery::new();
    query
        .expect_shopping_list()
        .times(1)
        .return_once(|| Err(Error::internal("relation \"items\" does not exist")));

    let response = call(
        query,
        MockShoppingListCommand::new(),
        actix_test::TestRequest::get().uri("/"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(TRACE_ID_HEADER).is_some());
    assert_eq!(body_text(response).await, LIST_FAILURE);
}

#[actix_web::test]
async fn add_forwards_form_fields_and_redirects() {
    let mut command = MockShoppingListCommand::new();
    command
        .expect_add_item()
        .with(eq(AddItemRequest {
            name: "Milk".to_owned(),
            quantity: "2".to_owned(),
            category: "Laticínios".to_owned(),
        }))
        .times(1)
        .return_once(|_| Ok(AddItemOutcome::Added(id(1))));

    let response = call(
        MockShoppingListQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/add")
            .set_form([("name", "Milk"), ("quantity", "2"), ("category", "Laticínios")]),
    )
    .await;

    assert_redirects_home(&response);
}

#[actix_web::test]
async fn add_accepts_portuguese_field_names() {
    let mut command = MockShoppingListCommand::new();
    command
        .expect_add_item()
        .withf(|request| request.name == "Pão" && request.category == "Padaria")
        .times(1)
        .return_once(|_| Ok(AddItemOutcome::Added(id(2))));

    let response = call(
        MockShoppingListQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/add")
            .set_form([("nome", "Pão"), ("quantidade", "1"), ("categoria", "Padaria")]),
    )
    .await;

    assert_redirects_home(&response);
}

#[actix_web::test]
async fn add_with_missing_fields_redirects_silently() {
    let mut command = MockShoppingListCommand::new();
    command
        .expect_add_item()
        .with(eq(AddItemRequest::default()))
        .times(1)
        .return_once(|_| Ok(AddItemOutcome::Rejected(ItemValidationError::EmptyName)));

    let response = call(
        MockShoppingListQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/add")
            .set_form(Vec::<(&str, &str)>::new()),
    )
    .await;

    assert_redirects_home(&response);
}

#[rstest]
#[case::no_body(actix_test::TestRequest::post().uri("/add"))]
#[case::json_body(
    actix_test::TestRequest::post()
        .uri("/add")
        .set_json(serde_json::json!({"name": "Arroz", "quantity": "1", "category": "Outros"}))
)]
#[case::repeated_field(
    actix_test::TestRequest::post()
        .uri("/add")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("name=a&name=b&quantity=1&category=Outros")
)]
#[case::field_and_alias(
    actix_test::TestRequest::post()
        .uri("/add")
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload("name=a&nome=b&quantity=1&category=Outros")
)]
#[actix_web::test]
async fn undecodable_add_body_redirects_without_store_call(
    #[case] request: actix_test::TestRequest,
) {
    let mut command = MockShoppingListCommand::new();
    command.expect_add_item().never();

    let response = call(MockShoppingListQuery::new(), command, request).await;

    assert_redirects_home(&response);
}

#[actix_web::test]
async fn add_failure_returns_fixed_message() {
    let mut command = MockShoppingListCommand::new();
    command
        .expect_add_item()
        .times(1)
        .return_once(|_| Err(Error::internal("duplicate key")));

    let response = call(
        MockShoppingListQuery::new(),
        command,
        actix_test::TestRequest::post()
            .uri("/add")
            .set_form([("name", "Arroz"), ("quantity", "1"), ("category", "Mercearia (Secos)")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, ADD_FAILURE);
}

#[rstest]
#[case("increase", QuantityAdjustment::Increase)]
#[case("decrease", QuantityAdjustment::Decrease)]
#[actix_web::test]
async fn update_dispatches_action(#[case] action: &str, #[case] expected: QuantityAdjustment) {
    let mut command = MockShoppingListCommand::new();
    command
        .expect_adjust_quantity()
        .with(eq(id(5)), eq(expected))
        .times(1)
        .return_once(|_, _| Ok(()));

    let response = call(
        MockShoppingListQuery::new(),
        command,
        actix_test::TestRequest::post().uri(&format!("/update/5?action={action}")),
    )
    .await;

    assert_redirects_home(&response);
}

#[rstest]
#[case("/update/5?action=double")]
#[case("/update/5")]
#[case("/update/5?action=increase&action=decrease")]
#[case("/update/abc?action=increase")]
#[case("/update/0?action=increase")]
#[case("/toggle/abc")]
#[case("/toggle/-3")]
#[case("/delete/abc")]
#[actix_web::test]
async fn malformed_mutations_redirect_without_store_calls(#[case] uri: &str) {
    let mut command = MockShoppingListCommand::new();
    command.expect_adjust_quantity().never();
    command.expect_toggle_purchased().never();
    command.expect_delete_item().never();

    let response = call(
        MockShoppingListQuery::new(),
        command,
        actix_test::TestRequest::post().uri(uri),
    )
    .await;

    assert_redirects_home(&response);
}

#[actix_web::test]
async fn toggle_and_delete_redirect() {
    let mut command = MockShoppingListCommand::new();
    command
        .expect_toggle_purchased()
        .with(eq(id(8)))
        .times(1)
        .return_once(|_| Ok(()));
    command
        .expect_delete_item()
        .with(eq(id(8)))
        .times(1)
        .return_once(|_| Ok(()));

    let app = actix_test::init_service(
        App::new()
            .app_data(state(MockShoppingListQuery::new(), command))
            .configure(configure),
    )
    .await;

    for uri in ["/toggle/8", "/delete/8"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post().uri(uri).to_request(),
        )
        .await;
        assert_redirects_home(&response);
    }
}

#[rstest]
#[case("/update/1?action=increase", UPDATE_FAILURE)]
#[case("/toggle/1", TOGGLE_FAILURE)]
#[case("/delete/1", DELETE_FAILURE)]
#[actix_web::test]
async fn mutation_failures_return_fixed_messages(#[case] uri: &str, #[case] message: &str) {
    let mut command = MockShoppingListCommand::new();
    command
        .expect_adjust_quantity()
        .returning(|_, _| Err(Error::internal("connection reset")));
    command
        .expect_toggle_purchased()
        .returning(|_| Err(Error::internal("connection reset")));
    command
        .expect_delete_item()
        .returning(|_| Err(Error::internal("connection reset")));

    let response = call(
        MockShoppingListQuery::new(),
        command,
        actix_test::TestRequest::post().uri(uri),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert_eq!(body, message);
    assert!(!body.contains("connection reset"));
}

#[actix_web::test]
async fn get_on_mutation_route_is_not_routed() {
    let response = call(
        MockShoppingListQuery::new(),
        MockShoppingListCommand::new(),
        actix_test::TestRequest::get().uri("/delete/1"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
