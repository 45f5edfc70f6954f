//! The todo list screen: reducer, id-keyed cache and render model.

pub mod cache;
pub mod render;
pub mod state;

pub use cache::TodoCache;
pub use render::{ConfirmPrompt, ListScreen, Marker, Row, Screen};
pub use state::{Action, Command, Phase, Ready, RequestId, TodoListView};
