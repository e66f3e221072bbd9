//! Tests for the todo HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockTodoCommand, MockTodoQuery, MockTodoRepository, TodoCommand, TodoQuery, TodoRepositoryError,
};
use crate::domain::{Error, TodoService};
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::outbound::memory::InMemoryTodoRepository;

fn memory_state() -> HttpState {
    let service = Arc::new(TodoService::new(
        Arc::new(InMemoryTodoRepository::default()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(service.clone(), service)
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .configure(configure)
}

async fn create(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    title: &str,
) -> TodoBody {
    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .set_json(json!({ "title": title }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    actix_test::read_body_json(response).await
}

fn titles(todos: &[TodoBody]) -> Vec<&str> {
    todos.iter().map(|todo| todo.title.as_str()).collect()
}

#[actix_web::test]
async fn create_returns_created_todo_with_trimmed_title() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .set_json(json!({ "title": "  Buy milk  " }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["completed"], false);
    assert_eq!(body["order"], 1);
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[rstest]
#[case(json!({}), "Title is required")]
#[case(json!({ "title": "   " }), "Title is required")]
#[case(json!({ "title": 7 }), "title must be a string")]
#[actix_web::test]
async fn create_rejects_invalid_titles(#[case] payload: Value, #[case] message: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], message);
}

#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "malformed_json");
}

#[actix_web::test]
async fn list_returns_todos_in_position_order() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    create(&app, "first").await;
    create(&app, "second").await;

    let request = actix_test::TestRequest::get().uri("/todos").to_request();
    let todos: Vec<TodoBody> = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(titles(&todos), ["first", "second"]);
    assert_eq!(
        todos.iter().map(|todo| todo.order).collect::<Vec<_>>(),
        [1, 2]
    );
}

#[actix_web::test]
async fn update_changes_only_supplied_fields() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let created = create(&app, "Buy milk").await;

    let request = actix_test::TestRequest::patch()
        .uri("/todos/1")
        .set_json(json!({ "completed": true }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated: TodoBody = actix_test::read_body_json(response).await;
    assert_eq!(updated.title, "Buy milk");
    assert!(updated.completed);
    assert_eq!(updated.created_at, created.created_at);
    assert_ne!(updated.updated_at, created.updated_at);
}

#[rstest]
#[case(json!({}), "No valid fields to update")]
#[case(json!({ "completed": "yes" }), "completed must be a boolean")]
#[case(json!({ "title": "" }), "Title is required")]
#[actix_web::test]
async fn update_rejects_invalid_bodies(#[case] payload: Value, #[case] message: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    create(&app, "Buy milk").await;

    let request = actix_test::TestRequest::patch()
        .uri("/todos/1")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], message);
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-3")]
#[actix_web::test]
async fn non_positive_or_non_numeric_ids_are_rejected(#[case] raw: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/todos/{raw}/toggle"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_id");
}

#[actix_web::test]
async fn toggle_flips_completion_twice() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    create(&app, "Buy milk").await;

    for expected in [true, false] {
        let request = actix_test::TestRequest::patch()
            .uri("/todos/1/toggle")
            .to_request();
        let todo: TodoBody = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(todo.completed, expected);
    }
}

#[actix_web::test]
async fn delete_removes_todo_and_compacts_positions() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    create(&app, "a").await;
    create(&app, "b").await;
    create(&app, "c").await;

    let request = actix_test::TestRequest::delete().uri("/todos/1").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = actix_test::TestRequest::get().uri("/todos").to_request();
    let todos: Vec<TodoBody> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(titles(&todos), ["b", "c"]);
    assert_eq!(
        todos.iter().map(|todo| todo.order).collect::<Vec<_>>(),
        [1, 2]
    );

    let request = actix_test::TestRequest::delete().uri("/todos/1").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!([3, 1]))]
#[case(json!([{ "id": 3, "title": "c" }, { "id": 1 }]))]
#[actix_web::test]
async fn reorder_accepts_ids_or_todo_objects(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    create(&app, "a").await;
    create(&app, "b").await;
    create(&app, "c").await;

    let request = actix_test::TestRequest::post()
        .uri("/todos/reorder")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let todos: Vec<TodoBody> = actix_test::read_body_json(response).await;
    assert_eq!(titles(&todos), ["c", "a", "b"]);
    assert_eq!(
        todos.iter().map(|todo| todo.order).collect::<Vec<_>>(),
        [1, 2, 3]
    );
}

#[rstest]
#[case(json!([1, 1]), StatusCode::BAD_REQUEST)]
#[case(json!([0]), StatusCode::BAD_REQUEST)]
#[case(json!(["one"]), StatusCode::BAD_REQUEST)]
#[case(json!([2, 42]), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn reorder_rejects_bad_id_lists_without_changes(
    #[case] payload: Value,
    #[case] status: StatusCode,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    create(&app, "a").await;
    create(&app, "b").await;

    let request = actix_test::TestRequest::post()
        .uri("/todos/reorder")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), status);

    let request = actix_test::TestRequest::get().uri("/todos").to_request();
    let todos: Vec<TodoBody> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(titles(&todos), ["a", "b"]);
}

#[rstest]
#[case(TodoRepositoryError::connection(
    "password authentication failed for user \"todo_admin\" at db.internal:5432"
))]
#[case(TodoRepositoryError::query("relation \"todos\" does not exist"))]
#[actix_web::test]
async fn store_failures_reach_clients_without_detail(#[case] failure: TodoRepositoryError) {
    let mut repo = MockTodoRepository::new();
    repo.expect_list().times(1).return_once(move || Err(failure));
    let service = Arc::new(TodoService::new(Arc::new(repo), Arc::new(DefaultClock)));
    let app =
        actix_test::init_service(test_app(HttpState::new(service.clone(), service))).await;

    let request = actix_test::TestRequest::get().uri("/todos").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
    let raw = body.to_string();
    for store_text in ["todo_admin", "db.internal", "relation", "repository"] {
        assert!(!raw.contains(store_text), "leaked {store_text}: {raw}");
    }
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let mut command = MockTodoCommand::new();
    command
        .expect_create_todo()
        .times(1)
        .return_once(|_| Err(Error::internal("relation \"todos\" does not exist")));
    let command: Arc<dyn TodoCommand> = Arc::new(command);
    let query: Arc<dyn TodoQuery> = Arc::new(MockTodoQuery::new());
    let app = actix_test::init_service(test_app(HttpState::new(command, query))).await;

    let request = actix_test::TestRequest::post()
        .uri("/todos")
        .set_json(json!({ "title": "Buy milk" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[case(ReorderItem::Id(4), 4)]
#[case(ReorderItem::Todo(TodoRef { id: 9 }), 9)]
fn reorder_item_exposes_raw_id(#[case] item: ReorderItem, #[case] expected: i64) {
    assert_eq!(item.raw_id(), expected);
}
