//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.
//!
//! The collection service routes list and create differently: `GET /todos`
//! but `POST /todos/`. The trailing slash on create is load-bearing.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodo, TodoItem};

/// Synchronous, stateless client for the todo collection endpoint.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos/", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
    }
}

/// Map any non-2xx status to `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
