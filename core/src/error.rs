//! Error types for the todo list client.
//!
//! # Design
//! Every failure the list can observe lands here: bad statuses and bodies from
//! the server, transport failures reported by whoever executed the request,
//! and the two local refusals (an empty draft, a torn-down view). None of them
//! are retried; callers log and move on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The draft is empty or whitespace, so there is nothing to submit.
    #[error("draft text is empty")]
    EmptyDraft,

    /// The controller was dropped while the request was in flight.
    #[error("view was torn down before the response arrived")]
    Unmounted,
}

impl ApiError {
    /// HTTP status carried by the error, if the server got to answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
