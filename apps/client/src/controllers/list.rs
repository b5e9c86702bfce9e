//! List views over a server collection.
//!
//! The local collection only changes after the server confirms a mutation.
//! Each activation supersedes any earlier one still in flight, so the last
//! activation always wins. After a teardown the list is frozen: nothing in
//! flight may change it and new mutations are refused until the next
//! activation.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::navigation::{Route, Surface};
use crate::entities::{Event, FieldErrors, Resource};
use crate::errors::ApiError;
use crate::http::AuthorizedClient;
use crate::services::events::{ADMIN_EVENTS_PATH, EVENTS_PATH};
use crate::services::item_path;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState<R> {
    /// Never activated, torn down mid-load, or redirected away.
    Idle,
    Loading,
    Loaded(Vec<R>),
    Errored(String),
}

/// Result of one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Loaded { count: usize },
    Errored { message: String },
    Redirect(Route),
    /// A newer activation or a teardown made this result irrelevant.
    Superseded,
}

/// Result of a create, edit, or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied { message: String },
    Failed {
        message: String,
        field_errors: FieldErrors,
    },
    Redirect(Route),
}

impl MutationOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            field_errors: FieldErrors::new(),
        }
    }
}

struct Inner<R> {
    state: ListState<R>,
    generation: u64,
    in_flight: Option<CancellationToken>,
    torn_down: bool,
    // Bumped by every teardown; a mutation only lands in the view it started in.
    view: u64,
}

pub struct ResourceListController<R: Resource> {
    client: AuthorizedClient,
    collection_path: String,
    surface: Surface,
    noun: String,
    inner: Arc<Mutex<Inner<R>>>,
}

impl<R: Resource> Clone for ResourceListController<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            collection_path: self.collection_path.clone(),
            surface: self.surface,
            noun: self.noun.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl ResourceListController<Event> {
    /// End-user event list.
    pub fn events(client: AuthorizedClient) -> Self {
        Self::new(client, EVENTS_PATH, Surface::User).with_noun("Event")
    }

    /// Admin event catalog.
    pub fn admin_events(client: AuthorizedClient) -> Self {
        Self::new(client, ADMIN_EVENTS_PATH, Surface::Admin).with_noun("Event")
    }
}

impl<R: Resource> ResourceListController<R> {
    pub fn new(client: AuthorizedClient, collection_path: impl Into<String>, surface: Surface) -> Self {
        Self {
            client,
            collection_path: collection_path.into(),
            surface,
            noun: "Item".to_string(),
            inner: Arc::new(Mutex::new(Inner {
                state: ListState::Idle,
                generation: 0,
                in_flight: None,
                torn_down: false,
                view: 0,
            })),
        }
    }

    /// Capitalized name used in notification messages.
    pub fn with_noun(mut self, noun: impl Into<String>) -> Self {
        self.noun = noun.into();
        self
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }

    pub fn snapshot(&self) -> ListState<R> {
        self.inner.lock().state.clone()
    }

    /// Loaded items in server order; empty unless loaded.
    pub fn items(&self) -> Vec<R> {
        match &self.inner.lock().state {
            ListState::Loaded(items) => items.clone(),
            _ => Vec::new(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        match &self.inner.lock().state {
            ListState::Loaded(items) => items.iter().any(|item| item.id() == id),
            _ => false,
        }
    }

    /// Fetch the collection, replacing local state.
    pub async fn activate(&self) -> Activation {
        let (generation, cancel) = {
            let mut inner = self.inner.lock();
            if let Some(previous) = inner.in_flight.take() {
                previous.cancel();
            }
            inner.generation += 1;
            inner.torn_down = false;
            inner.state = ListState::Loading;
            let token = CancellationToken::new();
            inner.in_flight = Some(token.clone());
            (inner.generation, token)
        };
        debug!(path = %self.collection_path, generation, "list activation started");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(path = %self.collection_path, generation, "list activation cancelled");
                return Activation::Superseded;
            }
            result = self.client.get::<Option<Vec<R>>>(&self.collection_path) => result,
        };

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            debug!(path = %self.collection_path, generation, "dropping stale list result");
            return Activation::Superseded;
        }
        inner.in_flight = None;

        match result {
            Ok(items) => {
                let items = items.unwrap_or_default();
                let count = items.len();
                inner.state = ListState::Loaded(items);
                info!(path = %self.collection_path, count, "list loaded");
                Activation::Loaded { count }
            }
            Err(ApiError::Unauthorized(reason)) => {
                inner.state = ListState::Idle;
                let route = self.surface.unauthorized_route();
                info!(path = %self.collection_path, %reason, %route, "list requires navigation");
                Activation::Redirect(route)
            }
            Err(e) => {
                let message = e.user_message();
                warn!(path = %self.collection_path, error = %e, "list failed to load");
                inner.state = ListState::Errored(message.clone());
                Activation::Errored { message }
            }
        }
    }

    /// Cancel any in-flight fetch and ignore its result. Loaded data stays but
    /// is frozen until the next activation.
    pub fn teardown(&self) {
        let mut inner = self.inner.lock();
        if let Some(token) = inner.in_flight.take() {
            token.cancel();
        }
        inner.generation += 1;
        inner.torn_down = true;
        inner.view += 1;
        if matches!(inner.state, ListState::Loading) {
            inner.state = ListState::Idle;
        }
    }

    /// Delete an item that is present in the loaded list. The item is removed
    /// locally only after the server confirms.
    pub async fn delete(&self, id: &str) -> MutationOutcome {
        let view = match self.open_view(Some(id)) {
            Ok(view) => view,
            Err(refused) => return refused,
        };

        match self.client.delete(&item_path(&self.collection_path, id)).await {
            Ok(()) => {
                self.apply(view, |items| items.retain(|item| item.id() != id));
                info!(path = %self.collection_path, id, "item deleted");
                MutationOutcome::Applied {
                    message: format!("{} deleted successfully", self.noun),
                }
            }
            Err(e) => self.mutation_failure("delete", e),
        }
    }

    /// Create an item; the server's copy is appended once confirmed.
    pub async fn create<P>(&self, payload: &P) -> MutationOutcome
    where
        P: Serialize + ?Sized,
    {
        let view = match self.open_view(None) {
            Ok(view) => view,
            Err(refused) => return refused,
        };

        match self.client.post::<P, R>(&self.collection_path, payload).await {
            Ok(created) => {
                info!(path = %self.collection_path, id = created.id(), "item created");
                self.apply(view, |items| items.push(created));
                MutationOutcome::Applied {
                    message: format!("{} created successfully", self.noun),
                }
            }
            Err(e) => self.mutation_failure("create", e),
        }
    }

    /// Edit an item in place; its position in the list is kept.
    pub async fn update<P>(&self, id: &str, payload: &P) -> MutationOutcome
    where
        P: Serialize + ?Sized,
    {
        let view = match self.open_view(Some(id)) {
            Ok(view) => view,
            Err(refused) => return refused,
        };

        let path = item_path(&self.collection_path, id);
        match self.client.put::<P, R>(&path, payload).await {
            Ok(updated) => {
                self.apply(view, |items| {
                    if let Some(slot) = items.iter_mut().find(|item| item.id() == id) {
                        *slot = updated;
                    }
                });
                info!(path = %self.collection_path, id, "item updated");
                MutationOutcome::Applied {
                    message: format!("{} updated successfully", self.noun),
                }
            }
            Err(e) => self.mutation_failure("update", e),
        }
    }

    /// Check a mutation may start and return the view it belongs to.
    fn open_view(&self, id: Option<&str>) -> Result<u64, MutationOutcome> {
        let inner = self.inner.lock();
        if inner.torn_down {
            return Err(MutationOutcome::failed("List is closed"));
        }
        let ListState::Loaded(items) = &inner.state else {
            return Err(MutationOutcome::failed("List is not loaded"));
        };
        if let Some(id) = id {
            if !items.iter().any(|item| item.id() == id) {
                return Err(MutationOutcome::failed(format!(
                    "{} {id} is not in the list",
                    self.noun
                )));
            }
        }
        Ok(inner.view)
    }

    /// Change the loaded items, unless the list was torn down since `view`.
    fn apply(&self, view: u64, change: impl FnOnce(&mut Vec<R>)) {
        let mut inner = self.inner.lock();
        if inner.torn_down || inner.view != view {
            debug!(path = %self.collection_path, "list torn down; confirmed mutation not applied locally");
            return;
        }
        if let ListState::Loaded(items) = &mut inner.state {
            change(items);
        }
    }

    fn mutation_failure(&self, action: &str, error: ApiError) -> MutationOutcome {
        if let ApiError::Unauthorized(reason) = error {
            let route = self.surface.unauthorized_route();
            info!(path = %self.collection_path, action, %reason, %route, "mutation requires navigation");
            return MutationOutcome::Redirect(route);
        }
        warn!(path = %self.collection_path, action, error = %error, "mutation failed");
        MutationOutcome::Failed {
            message: format!(
                "Failed to {action} {}: {}",
                self.noun.to_lowercase(),
                error.user_message()
            ),
            field_errors: error.field_errors(),
        }
    }
}
