//! Client core for a remote todo list.
//!
//! # Overview
//! Holds the list of todo items and the draft of the next one, and keeps both
//! in sync with a collection endpoint that can list and append. The core
//! never touches the network itself: it builds `HttpRequest` values and
//! parses `HttpResponse` values (host-does-IO pattern).
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - `TodoList` is the state machine: `begin_*` hands out a request,
//!   `finish_*` applies whatever came back. The FFI crate drives it directly.
//! - `TodoListController` drives a `TodoList` over any async `Transport`
//!   on a single thread and notifies subscribed views.
//! - `ViewModel` is derived on demand; nothing renders from stored flags.

pub mod client;
pub mod composer;
pub mod controller;
pub mod error;
pub mod http;
pub mod list;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use composer::Composer;
pub use controller::{SubscriptionId, TodoListController, Transport};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{Change, LoadState, TodoList};
pub use types::{NewTodo, TodoId, TodoItem};
pub use view::{count_label, ViewModel, EMPTY_STATE_TEXT};
