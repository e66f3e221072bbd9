//! Todo API port and its reqwest adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::model::{CreateTodoBody, ErrorBody, HealthStatus, Todo, TodoUpdate};

/// One method per backend endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// `GET /todos`.
    async fn list(&self) -> Result<Vec<Todo>, ClientError>;
    /// `POST /todos`.
    async fn create(&self, title: &str) -> Result<Todo, ClientError>;
    /// `PATCH /todos/{id}`.
    async fn update(&self, id: i64, update: &TodoUpdate) -> Result<Todo, ClientError>;
    /// `PATCH /todos/{id}/toggle`.
    async fn toggle(&self, id: i64) -> Result<Todo, ClientError>;
    /// `DELETE /todos/{id}`.
    async fn delete(&self, id: i64) -> Result<(), ClientError>;
    /// `POST /todos/reorder`; returns the whole list in its new order.
    async fn reorder(&self, ids: &[i64]) -> Result<Vec<Todo>, ClientError>;
    /// `GET /health`.
    async fn health(&self) -> Result<HealthStatus, ClientError>;
}

/// [`TodoApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    client: Client,
    base: Url,
}

impl HttpTodoApi {
    /// Build an adapter for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when the URL does not parse or
    /// cannot carry a path, and [`ClientError::Unreachable`] when the HTTP
    /// client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl {
            message: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                message: format!("{base_url} cannot be a base"),
            });
        }
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| map_transport_error(&err))?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|err| ClientError::InvalidBaseUrl {
                message: err.to_string(),
            })
    }
}

fn map_transport_error(error: &reqwest::Error) -> ClientError {
    ClientError::Unreachable {
        message: error.to_string(),
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> ClientError {
    if status.is_server_error() {
        return ClientError::Server {
            status: status.as_u16(),
        };
    }
    let message = serde_json::from_slice::<ErrorBody>(body).map_or_else(
        |_| {
            status
                .canonical_reason()
                .unwrap_or("request rejected")
                .to_owned()
        },
        |envelope| envelope.message,
    );
    ClientError::Rejected {
        status: status.as_u16(),
        message,
    }
}

async fn read_body(response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(|err| map_transport_error(&err))?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(body.to_vec())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = read_body(response).await?;
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode {
        message: err.to_string(),
    })
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list(&self) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .client
            .get(self.endpoint("todos")?)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        read_json(response).await
    }

    async fn create(&self, title: &str) -> Result<Todo, ClientError> {
        let response = self
            .client
            .post(self.endpoint("todos")?)
            .json(&CreateTodoBody { title })
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        read_json(response).await
    }

    async fn update(&self, id: i64, update: &TodoUpdate) -> Result<Todo, ClientError> {
        let response = self
            .client
            .patch(self.endpoint(&format!("todos/{id}"))?)
            .json(update)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        read_json(response).await
    }

    async fn toggle(&self, id: i64) -> Result<Todo, ClientError> {
        let response = self
            .client
            .patch(self.endpoint(&format!("todos/{id}/toggle"))?)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        read_json(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("todos/{id}"))?)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        read_body(response).await.map(drop)
    }

    async fn reorder(&self, ids: &[i64]) -> Result<Vec<Todo>, ClientError> {
        let response = self
            .client
            .post(self.endpoint("todos/reorder")?)
            .json(ids)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        read_json(response).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(self.endpoint("health")?)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        read_json(response).await
    }
}
