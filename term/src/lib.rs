//! Terminal front end for a remote todo list.
//!
//! Reads one todo per line from stdin, submits it through a
//! `TodoListController` over reqwest, and redraws the list on stdout as
//! responses land.

pub mod app;
pub mod config;
pub mod render;
pub mod transport;

pub use config::Config;
pub use transport::ReqwestTransport;
