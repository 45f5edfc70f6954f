//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Ids are opaque on this side of the wire: the server mints them, the client
//! only compares and echoes them back. Integration tests catch any schema
//! drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo. The server assigns the id and
/// starts every item as not completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
}

impl CreateTodo {
    /// Returns `None` for an empty title; such submissions are never sent.
    pub fn new(title: &str) -> Option<Self> {
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
        })
    }
}

/// Request payload for toggling completion of an existing todo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_is_a_bare_json_string() {
        let item = TodoItem {
            id: TodoId::new("abc"),
            title: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn create_todo_rejects_empty_title() {
        assert!(CreateTodo::new("").is_none());
    }

    #[test]
    fn create_todo_keeps_whitespace_titles() {
        let input = CreateTodo::new("  ").unwrap();
        assert_eq!(input.title, "  ");
    }

    #[test]
    fn todo_item_rejects_missing_completed() {
        let result: Result<TodoItem, _> = serde_json::from_str(r#"{"id":"1","title":"x"}"#);
        assert!(result.is_err());
    }
}
