//! Terminal client for the todo list.
//!
//! - `service`: the `TodoService` collaborator and its HTTP implementation.
//! - `runtime`: executes the list screen's commands and routes results back.
//! - `tui`: ratatui front-end drawing the screen and mapping keys to actions.
//! - `config`: TOML + environment configuration.

pub mod config;
pub mod runtime;
pub mod service;
pub mod tui;
