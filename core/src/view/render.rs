//! Plain-data description of what the screen shows.
//!
//! Front-ends draw a `Screen` and nothing else, so they cannot show a list
//! while loading or an error next to items.

use super::state::{Phase, TodoListView};
use crate::types::{TodoId, TodoItem};

pub const HEADING: &str = "Todo List";
pub const ADD_LABEL: &str = "Add";
pub const LOADING_TEXT: &str = "Loading...";
pub const DELETE_GLYPH: &str = "🗑️";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Error { message: String },
    List(ListScreen),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListScreen {
    pub draft: String,
    pub rows: Vec<Row>,
    pub confirm: Option<ConfirmPrompt>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Done,
    Pending,
}

impl Marker {
    pub fn glyph(self) -> &'static str {
        match self {
            Marker::Done => "✅",
            Marker::Pending => "👀",
        }
    }
}

/// One list entry: marker, title (struck through when done), checkbox and
/// the id its delete control acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: TodoId,
    pub marker: Marker,
    pub title: String,
    pub struck: bool,
    pub checked: bool,
}

impl From<&TodoItem> for Row {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id.clone(),
            marker: if item.completed {
                Marker::Done
            } else {
                Marker::Pending
            },
            title: item.title.clone(),
            struck: item.completed,
            checked: item.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub id: TodoId,
    pub title: String,
}

impl ConfirmPrompt {
    pub fn question(&self) -> String {
        format!("Delete \"{}\"?", self.title)
    }
}

impl TodoListView {
    pub fn screen(&self) -> Screen {
        match self.phase() {
            Phase::Loading => Screen::Loading,
            Phase::Failed { message } => Screen::Error {
                message: message.clone(),
            },
            Phase::Ready(ready) => Screen::List(ListScreen {
                draft: self.draft().to_string(),
                rows: ready.items.iter().map(Row::from).collect(),
                confirm: ready.confirm.as_ref().and_then(|id| {
                    ready.items.get(id).map(|item| ConfirmPrompt {
                        id: id.clone(),
                        title: item.title.clone(),
                    })
                }),
                notice: ready.notice.clone(),
            }),
        }
    }
}

impl Screen {
    /// Single-line rendering used by logs and tests.
    pub fn summary(&self) -> String {
        match self {
            Screen::Loading => LOADING_TEXT.to_string(),
            Screen::Error { message } => format!("Error: {message}"),
            Screen::List(list) => format!("{HEADING} ({} items)", list.rows.len()),
        }
    }
}
