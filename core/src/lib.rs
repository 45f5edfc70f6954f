//! Core of the todo list client.
//!
//! # Overview
//! - `client` builds `HttpRequest` values and parses `HttpResponse` values
//!   without touching the network (host-does-IO pattern).
//! - `view` holds the todo list screen as a reducer: actions in, commands out.
//!   The host executes commands against the todo service and feeds the
//!   results back as actions.
//!
//! # Design
//! - Nothing here performs I/O or needs an async runtime, so every behavior
//!   is testable with plain values.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, TodoId, TodoItem, UpdateTodo};
pub use view::{Action, Command, Screen, TodoListView};
