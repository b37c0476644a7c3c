//! Async driver that runs a `TodoList` against a real transport.
//!
//! # Design
//! The controller lives on a single thread. State sits behind `Rc<RefCell<_>>`
//! and is only borrowed between await points, never across one. Futures
//! returned by `activate` and `create_item` are `'static`: they own the
//! transport handle and hold only a `Weak` to the state. Dropping the
//! controller is how a view unmounts; any response that lands afterwards finds
//! the state gone and is discarded instead of applied.
//!
//! In-flight requests are neither cancelled nor timed out. Several creates may
//! be pending at once; each applies when its response arrives.

use std::cell::{Cell, Ref, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::list::{Change, LoadState, TodoList};
use crate::types::TodoItem;
use crate::view::ViewModel;

/// Executes one HTTP round-trip. A returned `Err` means no response was
/// received at all; any status the server answered with belongs in `Ok`.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>>;
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> {
        (**self).execute(request)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&ViewModel)>;

struct Shared {
    list: RefCell<TodoList>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Cell<u64>,
}

impl Shared {
    /// Run one state transition and notify observers if anything changed.
    fn apply(
        &self,
        op: impl FnOnce(&mut TodoList) -> Result<Change, ApiError>,
    ) -> Result<Change, ApiError> {
        let result = op(&mut self.list.borrow_mut());
        if matches!(result, Ok(change) if change != Change::Unchanged) {
            self.notify();
        }
        result
    }

    fn notify(&self) {
        let view = self.list.borrow().view();
        // Snapshot so observers may subscribe or unsubscribe while notified.
        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(&view);
        }
    }
}

fn upgrade(shared: &Weak<Shared>) -> Result<Rc<Shared>, ApiError> {
    shared.upgrade().ok_or_else(|| {
        debug!("view torn down; discarding response");
        ApiError::Unmounted
    })
}

pub struct TodoListController<T> {
    transport: Rc<T>,
    shared: Rc<Shared>,
}

impl<T: Transport + 'static> TodoListController<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            transport: Rc::new(transport),
            shared: Rc::new(Shared {
                list: RefCell::new(TodoList::new(client)),
                observers: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
            }),
        }
    }

    /// Fetch the full list. Only the first call issues a request; later calls
    /// resolve to `Change::Unchanged` immediately.
    pub fn activate(&self) -> impl Future<Output = Result<Change, ApiError>> + 'static {
        let request = self.shared.list.borrow_mut().begin_load();
        if request.is_some() {
            self.shared.notify();
        }
        let transport = Rc::clone(&self.transport);
        let shared = Rc::downgrade(&self.shared);
        async move {
            let Some(request) = request else {
                return Ok(Change::Unchanged);
            };
            let outcome = transport.execute(request).await;
            upgrade(&shared)?.apply(|list| list.finish_load(outcome))
        }
    }

    pub fn set_draft_text(&self, text: impl Into<String>) {
        let text = text.into();
        // Infallible; the result only drives notification.
        let _ = self.shared.apply(|list| Ok(list.set_draft_text(text)));
    }

    /// Submit the current draft.
    ///
    /// The request is built from the draft as it is now; edits made while it
    /// is in flight are cleared along with it on success.
    pub fn create_item(&self) -> impl Future<Output = Result<Change, ApiError>> + 'static {
        let request = self.shared.list.borrow().begin_create();
        let transport = Rc::clone(&self.transport);
        let shared = Rc::downgrade(&self.shared);
        async move {
            let request = request?;
            let outcome = transport.execute(request).await;
            upgrade(&shared)?.apply(|list| list.finish_create(outcome))
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&ViewModel) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.shared.next_subscription.get());
        self.shared.next_subscription.set(id.0 + 1);
        self.shared
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.shared.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }
}

impl<T> TodoListController<T> {
    pub fn items(&self) -> Ref<'_, [TodoItem]> {
        Ref::map(self.shared.list.borrow(), |list| list.items())
    }

    pub fn draft_text(&self) -> String {
        self.shared.list.borrow().draft_text().to_string()
    }

    pub fn can_submit(&self) -> bool {
        self.shared.list.borrow().can_submit()
    }

    pub fn load_state(&self) -> LoadState {
        self.shared.list.borrow().load_state()
    }

    pub fn view(&self) -> ViewModel {
        self.shared.list.borrow().view()
    }
}
