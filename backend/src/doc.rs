//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the todo and health endpoints together with the
//! request/response bodies and the error envelope ([`ErrorSchema`],
//! [`ErrorCodeSchema`]). The document is served by Swagger UI in debug builds
//! and printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::health::HealthStatusBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::todos::{
    CreateTodoRequestBody, ReorderItem, TodoBody, TodoRef, UpdateTodoRequestBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo backend API",
        description = "Create, edit, complete, reorder and delete todos."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::create_todo,
        crate::inbound::http::todos::reorder_todos,
        crate::inbound::http::todos::update_todo,
        crate::inbound::http::todos::toggle_todo,
        crate::inbound::http::todos::delete_todo,
        crate::inbound::http::health::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TodoBody,
        CreateTodoRequestBody,
        UpdateTodoRequestBody,
        ReorderItem,
        TodoRef,
        HealthStatusBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "todos", description = "Todo list operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
