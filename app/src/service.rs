//! The todo service the list screen talks to, and its HTTP implementation.
//!
//! `HttpTodoService` pairs the sans-IO `TodoClient` with a `Transport` that
//! performs the round-trip. The default transport runs `ureq` on tokio's
//! blocking pool so the UI task never waits on a socket.

use std::time::Duration;

use async_trait::async_trait;
use todo_core::{
    ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, TodoClient, TodoId, TodoItem,
    UpdateTodo,
};
use tracing::debug;

#[async_trait]
pub trait TodoService: Send + Sync {
    async fn list(&self) -> Result<Vec<TodoItem>, ApiError>;

    /// The server assigns the id and starts the item as not completed.
    async fn add(&self, input: CreateTodo) -> Result<TodoItem, ApiError>;

    /// Fails with `ApiError::NotFound` for an unknown id.
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<TodoItem, ApiError>;

    /// Returns the item as it was just before deletion.
    async fn delete(&self, id: TodoId) -> Result<TodoItem, ApiError>;
}

/// Executes one HTTP exchange. 4xx/5xx responses are returned as data; only
/// failures to get any response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || send(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn send(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = %req.method, path = %req.path, "sending request");
    let result = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.path), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.path), &req.headers).call(),
        HttpMethod::Post => {
            let builder = with_headers(agent.post(&req.path), &req.headers);
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
        HttpMethod::Put => {
            let builder = with_headers(agent.put(&req.path), &req.headers);
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    debug!(status, "received response");
    Ok(HttpResponse::new(status, body))
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

pub struct HttpTodoService<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl HttpTodoService<UreqTransport> {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self::with_transport(TodoClient::new(base_url), UreqTransport::new(timeout))
    }
}

impl<T: Transport> HttpTodoService<T> {
    pub fn with_transport(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }
}

#[async_trait]
impl<T: Transport> TodoService for HttpTodoService<T> {
    async fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn add(&self, input: CreateTodo) -> Result<TodoItem, ApiError> {
        let request = self.client.build_add_todo(&input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_add_todo(response)
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<TodoItem, ApiError> {
        let request = self.client.build_update_todo(&id, &input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    async fn delete(&self, id: TodoId) -> Result<TodoItem, ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(&id)).await?;
        self.client.parse_delete_todo(response)
    }
}
