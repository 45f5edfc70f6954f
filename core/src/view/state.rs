//! The todo list screen as a reducer.
//!
//! `TodoListView::update` takes one `Action` (a user event or a service
//! response) and returns at most one `Command` for the host to run against
//! the todo service. The screen is always in exactly one `Phase`; the list
//! only exists inside `Phase::Ready`, so a loading indicator and a list can
//! never be shown together.
//!
//! Every command carries a fresh `RequestId`. Responses are accepted only for
//! ids still outstanding, and `Action::Unmount` forgets them all, so a call
//! that resolves after teardown cannot touch state.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, warn};

use super::cache::TodoCache;
use crate::error::ApiError;
use crate::types::{CreateTodo, TodoId, TodoItem, UpdateTodo};

/// Identifies one call issued by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A call the view wants made against the todo service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        request: RequestId,
    },
    Add {
        request: RequestId,
        input: CreateTodo,
    },
    Update {
        request: RequestId,
        id: TodoId,
        input: UpdateTodo,
    },
    Delete {
        request: RequestId,
        id: TodoId,
    },
}

impl Command {
    pub fn request(&self) -> RequestId {
        match self {
            Command::List { request }
            | Command::Add { request, .. }
            | Command::Update { request, .. }
            | Command::Delete { request, .. } => *request,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The screen appears (or is reloaded after an error): fetch the list.
    Mount,
    /// The screen goes away. Outstanding responses are ignored from now on.
    Unmount,
    DraftChanged(String),
    Submit,
    Toggle { id: TodoId, completed: bool },
    /// First step of a delete: ask the user to confirm.
    RequestDelete(TodoId),
    ConfirmDelete,
    CancelDelete,
    DismissNotice,
    Listed {
        request: RequestId,
        result: Result<Vec<TodoItem>, ApiError>,
    },
    Added {
        request: RequestId,
        result: Result<TodoItem, ApiError>,
    },
    Updated {
        request: RequestId,
        result: Result<TodoItem, ApiError>,
    },
    Deleted {
        request: RequestId,
        result: Result<TodoItem, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Failed { message: String },
    Ready(Ready),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ready {
    pub items: TodoCache,
    /// Item awaiting a yes/no answer before it is deleted.
    pub confirm: Option<TodoId>,
    /// Last failed mutation, shown until dismissed or superseded.
    pub notice: Option<String>,
}

/// What an outstanding request was for.
#[derive(Debug, Clone)]
enum Pending {
    List,
    Add { title: String },
    Update { id: TodoId },
    Delete { id: TodoId },
}

#[derive(Debug)]
pub struct TodoListView {
    draft: String,
    phase: Phase,
    mounted: bool,
    next_request: u64,
    pending: HashMap<RequestId, Pending>,
    latest_list: Option<RequestId>,
}

impl Default for TodoListView {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoListView {
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            phase: Phase::Loading,
            mounted: false,
            next_request: 0,
            pending: HashMap::new(),
            latest_list: None,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Items currently displayed; `None` unless the list is loaded.
    pub fn items(&self) -> Option<&TodoCache> {
        match &self.phase {
            Phase::Ready(ready) => Some(&ready.items),
            _ => None,
        }
    }

    /// Number of calls issued and not yet answered.
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub fn update(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Mount => Some(self.mount()),
            Action::Unmount => {
                self.unmount();
                None
            }
            Action::DraftChanged(text) => {
                self.draft = text;
                None
            }
            Action::Submit => self.submit(),
            Action::Toggle { id, completed } => self.toggle(id, completed),
            Action::RequestDelete(id) => {
                if let Phase::Ready(ready) = &mut self.phase {
                    if ready.items.contains(&id) {
                        ready.confirm = Some(id);
                    }
                }
                None
            }
            Action::ConfirmDelete => self.confirm_delete(),
            Action::CancelDelete => {
                if let Phase::Ready(ready) = &mut self.phase {
                    ready.confirm = None;
                }
                None
            }
            Action::DismissNotice => {
                if let Phase::Ready(ready) = &mut self.phase {
                    ready.notice = None;
                }
                None
            }
            Action::Listed { request, result } => {
                let pending = self.take_pending(request)?;
                self.on_listed(request, pending, result);
                None
            }
            Action::Added { request, result } => {
                let Pending::Add { title } = self.take_pending(request)? else {
                    debug!(%request, "add response for a different request kind");
                    return None;
                };
                self.on_added(title, result)
            }
            Action::Updated { request, result } => {
                let Pending::Update { id } = self.take_pending(request)? else {
                    debug!(%request, "update response for a different request kind");
                    return None;
                };
                self.on_updated(id, result);
                None
            }
            Action::Deleted { request, result } => {
                let Pending::Delete { id } = self.take_pending(request)? else {
                    debug!(%request, "delete response for a different request kind");
                    return None;
                };
                self.on_deleted(id, result);
                None
            }
        }
    }

    fn mount(&mut self) -> Command {
        self.mounted = true;
        self.phase = Phase::Loading;
        self.list()
    }

    fn unmount(&mut self) {
        if !self.pending.is_empty() {
            debug!(outstanding = self.pending.len(), "unmounting with calls in flight");
        }
        self.mounted = false;
        self.pending.clear();
        self.latest_list = None;
        self.phase = Phase::Loading;
    }

    fn list(&mut self) -> Command {
        let request = self.issue(Pending::List);
        self.latest_list = Some(request);
        info!(%request, "listing todos");
        Command::List { request }
    }

    fn submit(&mut self) -> Option<Command> {
        if !matches!(self.phase, Phase::Ready(_)) {
            debug!("submit ignored while the list is not shown");
            return None;
        }
        let input = CreateTodo::new(&self.draft)?;
        let request = self.issue(Pending::Add {
            title: input.title.clone(),
        });
        info!(%request, title = %input.title, "adding todo");
        Some(Command::Add { request, input })
    }

    fn toggle(&mut self, id: TodoId, completed: bool) -> Option<Command> {
        let Phase::Ready(ready) = &self.phase else {
            return None;
        };
        if !ready.items.contains(&id) {
            debug!(%id, "toggle ignored for an item not in the list");
            return None;
        }
        let request = self.issue(Pending::Update { id: id.clone() });
        info!(%request, %id, completed, "updating todo");
        Some(Command::Update {
            request,
            id,
            input: UpdateTodo { completed },
        })
    }

    fn confirm_delete(&mut self) -> Option<Command> {
        let Phase::Ready(ready) = &mut self.phase else {
            return None;
        };
        let id = ready.confirm.take()?;
        let request = self.issue(Pending::Delete { id: id.clone() });
        info!(%request, %id, "deleting todo");
        Some(Command::Delete { request, id })
    }

    fn on_listed(&mut self, request: RequestId, pending: Pending, result: Result<Vec<TodoItem>, ApiError>) {
        if !matches!(pending, Pending::List) {
            debug!(%request, "list response for a different request kind");
            return;
        }
        if self.latest_list != Some(request) {
            debug!(%request, "dropping superseded list response");
            return;
        }
        self.latest_list = None;
        match result {
            Ok(items) => {
                let items = TodoCache::from_items(items);
                match &mut self.phase {
                    Phase::Ready(ready) => {
                        ready.items = items;
                        if ready.confirm.as_ref().is_some_and(|id| !ready.items.contains(id)) {
                            ready.confirm = None;
                        }
                    }
                    phase => {
                        *phase = Phase::Ready(Ready {
                            items,
                            ..Ready::default()
                        })
                    }
                }
            }
            Err(err) => {
                warn!(%request, error = %err, "listing todos failed");
                self.phase = Phase::Failed {
                    message: err.to_string(),
                };
            }
        }
    }

    fn on_added(&mut self, title: String, result: Result<TodoItem, ApiError>) -> Option<Command> {
        match result {
            Ok(item) => {
                if let Phase::Ready(ready) = &mut self.phase {
                    ready.items.upsert(item);
                    ready.notice = None;
                }
                self.draft.clear();
                Some(self.list())
            }
            Err(err) => {
                warn!(%title, error = %err, "adding todo failed");
                self.notify(format!("Could not add \"{title}\": {err}"));
                None
            }
        }
    }

    fn on_updated(&mut self, id: TodoId, result: Result<TodoItem, ApiError>) {
        let Phase::Ready(ready) = &mut self.phase else {
            return;
        };
        match result {
            Ok(item) => {
                if !ready.items.merge(item) {
                    debug!(%id, "updated todo is no longer listed");
                }
                ready.notice = None;
            }
            Err(err) => {
                warn!(%id, error = %err, "updating todo failed");
                let label = label(&ready.items, &id);
                ready.notice = Some(format!("Could not update {label}: {err}"));
            }
        }
    }

    fn on_deleted(&mut self, id: TodoId, result: Result<TodoItem, ApiError>) {
        let Phase::Ready(ready) = &mut self.phase else {
            return;
        };
        match result {
            Ok(item) => {
                if ready.items.remove(&item.id).is_none() {
                    debug!(id = %item.id, "deleted todo was already gone");
                }
                ready.notice = None;
            }
            Err(err) => {
                warn!(%id, error = %err, "deleting todo failed");
                let label = label(&ready.items, &id);
                ready.notice = Some(format!("Could not delete {label}: {err}"));
            }
        }
    }

    fn notify(&mut self, message: String) {
        if let Phase::Ready(ready) = &mut self.phase {
            ready.notice = Some(message);
        }
    }

    fn issue(&mut self, pending: Pending) -> RequestId {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.pending.insert(request, pending);
        request
    }

    fn take_pending(&mut self, request: RequestId) -> Option<Pending> {
        let pending = self.pending.remove(&request);
        if pending.is_none() {
            debug!(%request, mounted = self.mounted, "ignoring response nobody is waiting for");
        }
        pending
    }
}

fn label(items: &TodoCache, id: &TodoId) -> String {
    match items.get(id) {
        Some(item) => format!("\"{}\"", item.title),
        None => format!("todo {id}"),
    }
}
