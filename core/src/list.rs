//! The todo list state machine.
//!
//! # Design
//! `TodoList` owns the items, the composer draft and the progress of the one
//! initial load. It never performs I/O: `begin_*` methods hand out the
//! `HttpRequest` to execute and `finish_*` methods take whatever came back
//! (a response, or the transport error that replaced it). Drivers such as
//! `TodoListController` or the C host decide how requests travel.
//!
//! Ordering: the load's order first, then local creations in the order their
//! responses were applied. Ids are unique across the held list; a server item
//! whose id is already held is dropped rather than rendered twice.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::client::TodoClient;
use crate::composer::Composer;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{TodoId, TodoItem};
use crate::view::{count_label, ViewModel};

/// Progress of the single full-list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    Loading,
    Loaded,
    Failed,
}

/// What a successful operation changed, so drivers know whether to notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    Loaded,
    /// An item was appended and the draft cleared.
    ItemAdded,
    DraftChanged,
}

#[derive(Debug, Clone)]
pub struct TodoList {
    client: TodoClient,
    items: Vec<TodoItem>,
    ids: HashSet<TodoId>,
    composer: Composer,
    load: LoadState,
}

impl TodoList {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            ids: HashSet::new(),
            composer: Composer::default(),
            load: LoadState::NotStarted,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn draft_text(&self) -> &str {
        self.composer.text()
    }

    pub fn can_submit(&self) -> bool {
        self.composer.can_submit()
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) -> Change {
        self.composer.set_text(text);
        Change::DraftChanged
    }

    /// The list request, handed out exactly once per `TodoList`.
    pub fn begin_load(&mut self) -> Option<HttpRequest> {
        if self.load != LoadState::NotStarted {
            debug!(state = ?self.load, "load already attempted; not fetching again");
            return None;
        }
        self.load = LoadState::Loading;
        Some(self.client.build_list_todos())
    }

    /// Apply the outcome of the request returned by `begin_load`.
    ///
    /// Failures are logged and leave the items as they were. Items created
    /// while the load was in flight are kept after the server's items.
    pub fn finish_load(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<Change, ApiError> {
        if self.load != LoadState::Loading {
            warn!(state = ?self.load, "list response without a pending load; ignoring");
            return Ok(Change::Unchanged);
        }

        let fetched = match outcome.and_then(|response| self.client.parse_list_todos(response)) {
            Ok(items) => items,
            Err(err) => {
                error!(error = %err, "failed to load todos");
                self.load = LoadState::Failed;
                return Err(err);
            }
        };

        let created_meanwhile = std::mem::take(&mut self.items);
        self.ids.clear();
        for item in fetched.into_iter().chain(created_meanwhile) {
            self.push_unique(item);
        }
        self.load = LoadState::Loaded;
        info!(count = self.items.len(), "loaded todos");
        Ok(Change::Loaded)
    }

    /// The create request for the current draft.
    ///
    /// Refuses with `ApiError::EmptyDraft` when the trimmed draft is empty.
    /// The draft itself is sent untrimmed.
    pub fn begin_create(&self) -> Result<HttpRequest, ApiError> {
        let Some(input) = self.composer.submission() else {
            debug!("submit refused: draft is empty");
            return Err(ApiError::EmptyDraft);
        };
        self.client.build_create_todo(&input)
    }

    /// Apply the outcome of a request returned by `begin_create`.
    ///
    /// All or nothing: on failure neither the items nor the draft change.
    pub fn finish_create(
        &mut self,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<Change, ApiError> {
        let created = match outcome.and_then(|response| self.client.parse_create_todo(response)) {
            Ok(item) => item,
            Err(err) => {
                error!(error = %err, status = ?err.status(), "failed to create todo");
                return Err(err);
            }
        };

        let id = created.id.clone();
        let appended = self.push_unique(created);
        self.composer.clear();
        if appended {
            info!(%id, count = self.items.len(), "created todo");
            Ok(Change::ItemAdded)
        } else {
            Ok(Change::DraftChanged)
        }
    }

    pub fn view(&self) -> ViewModel {
        ViewModel {
            items: self.items.clone(),
            count_label: count_label(self.items.len()),
            show_empty_state: self.items.is_empty(),
            draft: self.composer.text().to_string(),
            submit_enabled: self.composer.can_submit(),
            loading: self.load == LoadState::Loading,
        }
    }

    fn push_unique(&mut self, item: TodoItem) -> bool {
        if !self.ids.insert(item.id.clone()) {
            warn!(id = %item.id, "server returned an id that is already listed; skipping");
            return false;
        }
        self.items.push(item);
        true
    }
}
