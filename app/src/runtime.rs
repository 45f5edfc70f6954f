//! Runs the list screen's commands against a `TodoService`.
//!
//! The driver owns the `TodoListView`. Each command the view emits is spawned
//! as its own task; the result comes back as an `Action` on a channel the
//! caller polls with `Responses::recv` and feeds to `Driver::apply`. The UI
//! keeps handling input while calls are in flight.
//!
//! Teardown unmounts the view (so late answers are dropped by request id)
//! and aborts every task still running. Dropping the driver aborts them too.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use todo_core::view::{Action, Command, Screen, TodoListView};
use tracing::{debug, info};

use crate::service::TodoService;

pub struct Driver {
    view: TodoListView,
    service: Arc<dyn TodoService>,
    tasks: JoinSet<()>,
    tx: mpsc::UnboundedSender<Action>,
}

/// Receiving end for completed calls.
pub struct Responses {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Responses {
    /// Next completed call. Pending forever once the driver is gone and the
    /// channel is drained, so it can sit in a `select!` safely.
    pub async fn recv(&mut self) -> Action {
        match self.rx.recv().await {
            Some(action) => action,
            None => std::future::pending().await,
        }
    }

    pub fn try_recv(&mut self) -> Option<Action> {
        self.rx.try_recv().ok()
    }
}

impl Driver {
    pub fn new(service: Arc<dyn TodoService>) -> (Self, Responses) {
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = Self {
            view: TodoListView::new(),
            service,
            tasks: JoinSet::new(),
            tx,
        };
        (driver, Responses { rx })
    }

    pub fn view(&self) -> &TodoListView {
        &self.view
    }

    pub fn screen(&self) -> Screen {
        self.view.screen()
    }

    /// Feed one action to the view and start whatever call it asks for.
    pub fn apply(&mut self, action: Action) {
        if let Some(command) = self.view.update(action) {
            self.spawn(command);
        }
        // Reap finished tasks so the set does not grow without bound.
        while self.tasks.try_join_next().is_some() {}
    }

    pub fn mount(&mut self) {
        self.apply(Action::Mount);
    }

    pub fn in_flight(&self) -> usize {
        self.view.outstanding()
    }

    /// Process responses until the view has nothing outstanding.
    pub async fn settle(&mut self, responses: &mut Responses) {
        while self.view.outstanding() > 0 {
            let action = responses.recv().await;
            self.apply(action);
        }
    }

    pub fn shutdown(&mut self) {
        info!(in_flight = self.view.outstanding(), "tearing down todo list");
        self.view.update(Action::Unmount);
        self.tasks.abort_all();
    }

    fn spawn(&mut self, command: Command) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.tasks.spawn(async move {
            let action = execute(service.as_ref(), command).await;
            if tx.send(action).is_err() {
                debug!("response arrived after the receiver closed");
            }
        });
    }
}

/// Perform `command` and wrap its outcome as the matching response action.
pub async fn execute(service: &dyn TodoService, command: Command) -> Action {
    match command {
        Command::List { request } => Action::Listed {
            request,
            result: service.list().await,
        },
        Command::Add { request, input } => Action::Added {
            request,
            result: service.add(input).await,
        },
        Command::Update { request, id, input } => Action::Updated {
            request,
            result: service.update(id, input).await,
        },
        Command::Delete { request, id } => Action::Deleted {
            request,
            result: service.delete(id).await,
        },
    }
}
