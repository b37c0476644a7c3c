//! The interactive loop: one line of input is one submission.
//!
//! Must run inside a `tokio::task::LocalSet`; the load and every create are
//! spawned as local tasks so input keeps flowing while requests are pending.

use std::cell::RefCell;
use std::future::Future;
use std::io::Write;
use std::rc::Rc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{spawn_local, JoinHandle};
use todo_core::{ApiError, Change, TodoItem, TodoListController, Transport, ViewModel};
use tracing::{debug, warn};

use crate::render::{render, BLANK_HINT, CREATE_HEADING, PROMPT};

const QUIT: &str = "/quit";

/// Drive `controller` from `input` until EOF or `/quit`.
///
/// The list is redrawn on `out` whenever its items or loading state change.
/// On EOF, submissions still in flight are awaited before returning; `/quit`
/// returns immediately and drops them.
pub async fn run<T, R, W>(
    controller: TodoListController<T>,
    input: R,
    out: Rc<RefCell<W>>,
) -> anyhow::Result<()>
where
    T: Transport + 'static,
    R: AsyncBufRead + Unpin,
    W: Write + 'static,
{
    controller.subscribe(redraw_on_change(Rc::clone(&out)));
    let mut pending: Vec<JoinHandle<()>> = vec![spawn_local(report_failure(
        controller.activate(),
        Rc::clone(&out),
        "Could not load todos",
    ))];

    writeln!(
        out.borrow_mut(),
        "{CREATE_HEADING}\n{PROMPT} (empty line is ignored, {QUIT} exits)"
    )?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading input")? {
        if line.trim() == QUIT {
            debug!(in_flight = pending.len(), "quit requested");
            return Ok(());
        }
        controller.set_draft_text(line);
        if !controller.can_submit() {
            writeln!(out.borrow_mut(), "{BLANK_HINT}")?;
            continue;
        }
        pending.push(spawn_local(report_failure(
            controller.create_item(),
            Rc::clone(&out),
            "Could not add todo",
        )));
        pending.retain(|task| !task.is_finished());
    }

    for task in pending {
        task.await.context("submission task")?;
    }
    let view = controller.view();
    write!(out.borrow_mut(), "{}", render(&view))?;
    out.borrow_mut().flush()?;
    Ok(())
}

/// Observer that redraws only when what the list section shows has moved.
fn redraw_on_change<W: Write + 'static>(
    out: Rc<RefCell<W>>,
) -> impl Fn(&ViewModel) + 'static {
    let last: RefCell<Option<(Vec<TodoItem>, bool)>> = RefCell::new(None);
    move |view: &ViewModel| {
        let shown = (view.items.clone(), view.loading);
        if last.borrow().as_ref() == Some(&shown) {
            return;
        }
        *last.borrow_mut() = Some(shown);

        let mut out = out.borrow_mut();
        if let Err(err) = write!(out, "{}", render(view)).and_then(|()| out.flush()) {
            warn!(error = %err, "failed to redraw");
        }
    }
}

async fn report_failure<W: Write>(
    request: impl Future<Output = Result<Change, ApiError>>,
    out: Rc<RefCell<W>>,
    what: &'static str,
) {
    match request.await {
        Ok(_) | Err(ApiError::Unmounted) => {}
        Err(err) => {
            if let Err(write_err) = writeln!(out.borrow_mut(), "{what}: {err}") {
                warn!(error = %write_err, "failed to report error");
            }
        }
    }
}
