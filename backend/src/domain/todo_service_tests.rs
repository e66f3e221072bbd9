//! Tests for the todo service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockTodoRepository;
use crate::domain::{ErrorCode, TodoDraft};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn id(value: i64) -> TodoId {
    TodoId::new(value).expect("positive id")
}

#[fixture]
fn clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

#[fixture]
fn stored() -> Todo {
    let created_at = fixture_timestamp();
    Todo::new(TodoDraft {
        id: id(1),
        title: TodoTitle::new("Buy milk").expect("valid title"),
        completed: false,
        order: 1,
        created_at,
        updated_at: created_at,
    })
    .expect("valid todo")
}

fn service(repo: MockTodoRepository, clock: Arc<dyn Clock>) -> TodoService<MockTodoRepository> {
    TodoService::new(Arc::new(repo), clock)
}

#[rstest]
#[tokio::test]
async fn create_trims_title_before_insert(clock: Arc<dyn Clock>, stored: Todo) {
    let mut repo = MockTodoRepository::new();
    repo.expect_insert()
        .withf(|draft| draft.title.as_ref() == "Buy milk")
        .times(1)
        .return_once(move |_| Ok(stored));

    let response = service(repo, clock)
        .create_todo(CreateTodoRequest {
            title: "  Buy milk  ".to_owned(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(response.todo.title, "Buy milk");
    assert!(!response.todo.completed);
    assert_eq!(response.todo.order, 1);
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn create_rejects_blank_titles_without_touching_store(
    clock: Arc<dyn Clock>,
    #[case] title: &str,
) {
    let mut repo = MockTodoRepository::new();
    repo.expect_insert().times(0);

    let error = service(repo, clock)
        .create_todo(CreateTodoRequest {
            title: title.to_owned(),
        })
        .await
        .expect_err("blank title");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "Title is required");
}

#[rstest]
#[tokio::test]
async fn update_without_fields_is_rejected(clock: Arc<dyn Clock>) {
    let mut repo = MockTodoRepository::new();
    repo.expect_find_by_id().times(0);

    let error = service(repo, clock)
        .update_todo(UpdateTodoRequest {
            id: id(1),
            title: None,
            completed: None,
        })
        .await
        .expect_err("empty patch");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "No valid fields to update");
}

#[rstest]
#[tokio::test]
async fn update_applies_only_present_fields(clock: Arc<dyn Clock>, stored: Todo) {
    let mut repo = MockTodoRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_update()
        .withf(|todo| todo.completed() && todo.title().as_ref() == "Buy milk")
        .times(1)
        .return_once(|_| Ok(true));

    let response = service(repo, clock)
        .update_todo(UpdateTodoRequest {
            id: id(1),
            title: None,
            completed: Some(true),
        })
        .await
        .expect("update succeeds");

    assert!(response.todo.completed);
    assert!(response.todo.updated_at > response.todo.created_at);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_todo_is_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockTodoRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_update().times(0);

    let error = service(repo, clock)
        .update_todo(UpdateTodoRequest {
            id: id(9),
            title: Some("Renamed".to_owned()),
            completed: None,
        })
        .await
        .expect_err("missing todo");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn toggle_flips_completion(clock: Arc<dyn Clock>, stored: Todo) {
    let mut repo = MockTodoRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_update()
        .withf(|todo| todo.completed())
        .times(1)
        .return_once(|_| Ok(true));

    let response = service(repo, clock)
        .toggle_todo(TodoIdRequest { id: id(1) })
        .await
        .expect("toggle succeeds");

    assert!(response.todo.completed);
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_todo_is_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockTodoRepository::new();
    repo.expect_delete().times(1).return_once(|_| Ok(false));

    let error = service(repo, clock)
        .delete_todo(TodoIdRequest { id: id(4) })
        .await
        .expect_err("missing todo");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn reorder_rejects_duplicates_before_store(clock: Arc<dyn Clock>) {
    let mut repo = MockTodoRepository::new();
    repo.expect_reorder().times(0);

    let error = service(repo, clock)
        .reorder_todos(ReorderTodosRequest {
            ids: vec![id(2), id(1), id(2)],
        })
        .await
        .expect_err("duplicate ids");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn reorder_maps_unknown_ids_to_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockTodoRepository::new();
    repo.expect_reorder()
        .withf(|ids, _| *ids == [id(3), id(77)])
        .times(1)
        .return_once(|_, _| Err(TodoRepositoryError::unknown_todo(id(77))));

    let error = service(repo, clock)
        .reorder_todos(ReorderTodosRequest {
            ids: vec![id(3), id(77)],
        })
        .await
        .expect_err("unknown id");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "todo 77 not found");
}

#[rstest]
#[case(
    TodoRepositoryError::connection("password authentication failed for user \"todo_admin\""),
    "todo_admin"
)]
#[case(
    TodoRepositoryError::query("relation \"todos\" does not exist"),
    "relation"
)]
#[tokio::test]
async fn list_hides_repository_failure_detail(
    clock: Arc<dyn Clock>,
    #[case] failure: TodoRepositoryError,
    #[case] store_text: &str,
) {
    let mut repo = MockTodoRepository::new();
    repo.expect_list().times(1).return_once(move || Err(failure));

    let error = service(repo, clock)
        .list_todos()
        .await
        .expect_err("repository failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert!(!error.message().contains(store_text), "{}", error.message());
}
