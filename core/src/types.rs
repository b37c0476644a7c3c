//! Domain DTOs for the todo collection API.
//!
//! # Design
//! These types mirror the collection service's schema but are defined
//! independently from the mock-server crate. Integration tests catch any
//! schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the server.
///
/// The client never generates or interprets ids. Services differ in what they
/// send (a hex object id, an integer key), so both JSON strings and JSON
/// integers are accepted and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TodoId {
    fn from(n: u64) -> Self {
        TodoId::Number(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub description: String,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
}
