use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tokio::task::LocalSet;
use todo_core::{TodoClient, TodoListController};
use todo_term::{app, Config, ReqwestTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log)),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;

    info!(base_url = %config.base_url, "starting");
    let controller = TodoListController::new(
        TodoClient::new(&config.base_url),
        ReqwestTransport::new(),
    );
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = Rc::new(RefCell::new(std::io::stdout()));

    LocalSet::new().block_on(&runtime, app::run(controller, stdin, stdout))
}
