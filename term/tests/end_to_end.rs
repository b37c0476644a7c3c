//! The terminal front end against the live mock server over reqwest.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tokio::task::LocalSet;
use todo_core::{ApiError, Change, LoadState, TodoClient, TodoListController};
use todo_term::{app, ReqwestTransport};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn controller(base_url: &str) -> TodoListController<ReqwestTransport> {
    TodoListController::new(TodoClient::new(base_url), ReqwestTransport::new())
}

fn descriptions(controller: &TodoListController<ReqwestTransport>) -> Vec<String> {
    controller
        .items()
        .iter()
        .map(|t| t.description.clone())
        .collect()
}

#[tokio::test]
async fn create_is_visible_to_a_second_view() {
    let base_url = start_server();
    let first = controller(&base_url);

    assert_eq!(first.activate().await.unwrap(), Change::Loaded);
    assert!(first.view().show_empty_state);

    first.set_draft_text("write tests");
    assert_eq!(first.create_item().await.unwrap(), Change::ItemAdded);
    assert_eq!(first.draft_text(), "");
    assert_eq!(first.view().count_label.as_deref(), Some("1 item"));

    let second = controller(&base_url);
    second.activate().await.unwrap();
    assert_eq!(descriptions(&second), ["write tests"]);
    assert_eq!(second.items()[0].id, first.items()[0].id);
}

#[tokio::test]
async fn unreachable_service_keeps_the_draft() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let controller = controller(&format!("http://{addr}"));

    assert!(matches!(
        controller.activate().await,
        Err(ApiError::Transport(_))
    ));
    assert_eq!(controller.load_state(), LoadState::Failed);

    controller.set_draft_text("offline");
    assert!(matches!(
        controller.create_item().await,
        Err(ApiError::Transport(_))
    ));
    assert_eq!(controller.draft_text(), "offline");
    assert!(controller.items().is_empty());
}

#[tokio::test]
async fn piped_input_becomes_todos() {
    let base_url = start_server();
    let out = Rc::new(RefCell::new(Vec::<u8>::new()));

    LocalSet::new()
        .run_until(app::run(
            controller(&base_url),
            "buy milk\n   \n".as_bytes(),
            Rc::clone(&out),
        ))
        .await
        .unwrap();

    let output = String::from_utf8(out.borrow().clone()).unwrap();
    assert!(output.contains("  • buy milk\n"));
    assert!(output.contains("Your TODOs (1 item)"));
    assert!(output.contains(todo_term::render::BLANK_HINT));

    let check = controller(&base_url);
    check.activate().await.unwrap();
    assert_eq!(descriptions(&check), ["buy milk"]);
}
