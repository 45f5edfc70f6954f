//! Keyboard handling.
//!
//! Translates crossterm key events into view `Action`s, or into local
//! `UiState` changes (mode switches, cursor movement). What a key does
//! depends on the current `Screen`, so a list key can never fire while the
//! list is not shown.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use todo_core::view::{Action, ListScreen, Screen};

use super::{Mode, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do.
    Ignored,
    /// Handled by changing `UiState` only.
    Local,
    Dispatch(Action),
    Quit,
}

pub fn handle_key(key: KeyEvent, ui: &mut UiState, screen: &Screen) -> Outcome {
    // crossterm reports releases on some platforms; act on presses only.
    if key.kind != KeyEventKind::Press {
        return Outcome::Ignored;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Outcome::Quit;
    }

    match screen {
        Screen::Loading => match key.code {
            KeyCode::Char('q') => Outcome::Quit,
            _ => Outcome::Ignored,
        },
        Screen::Error { .. } => match key.code {
            KeyCode::Char('q') => Outcome::Quit,
            KeyCode::Char('r') => Outcome::Dispatch(Action::Mount),
            _ => Outcome::Ignored,
        },
        Screen::List(list) if list.confirm.is_some() => handle_confirm(key),
        Screen::List(list) => match ui.mode {
            Mode::Editing => handle_editing(key, ui, list),
            Mode::Normal => handle_normal(key, ui, list),
        },
    }
}

fn handle_confirm(key: KeyEvent) -> Outcome {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Outcome::Dispatch(Action::ConfirmDelete),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Outcome::Dispatch(Action::CancelDelete),
        _ => Outcome::Ignored,
    }
}

fn handle_editing(key: KeyEvent, ui: &mut UiState, list: &ListScreen) -> Outcome {
    match key.code {
        KeyCode::Esc => {
            ui.mode = Mode::Normal;
            Outcome::Local
        }
        KeyCode::Enter => Outcome::Dispatch(Action::Submit),
        KeyCode::Backspace => {
            let mut draft = list.draft.clone();
            if draft.pop().is_none() {
                return Outcome::Ignored;
            }
            Outcome::Dispatch(Action::DraftChanged(draft))
        }
        KeyCode::Char(c) => {
            let mut draft = list.draft.clone();
            draft.push(c);
            Outcome::Dispatch(Action::DraftChanged(draft))
        }
        _ => Outcome::Ignored,
    }
}

fn handle_normal(key: KeyEvent, ui: &mut UiState, list: &ListScreen) -> Outcome {
    // The list may have shrunk since the cursor last moved.
    ui.cursor = ui.selected(list.rows.len()).unwrap_or(0);
    let selected = ui.selected(list.rows.len()).map(|i| &list.rows[i]);
    match key.code {
        KeyCode::Char('q') => Outcome::Quit,
        KeyCode::Char('a') | KeyCode::Char('i') => {
            ui.mode = Mode::Editing;
            Outcome::Local
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if ui.cursor + 1 < list.rows.len() {
                ui.cursor += 1;
            }
            Outcome::Local
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.cursor = ui.cursor.saturating_sub(1);
            Outcome::Local
        }
        KeyCode::Char(' ') => match selected {
            Some(row) => Outcome::Dispatch(Action::Toggle {
                id: row.id.clone(),
                completed: !row.checked,
            }),
            None => Outcome::Ignored,
        },
        KeyCode::Char('d') | KeyCode::Delete => match selected {
            Some(row) => Outcome::Dispatch(Action::RequestDelete(row.id.clone())),
            None => Outcome::Ignored,
        },
        KeyCode::Char('x') if list.notice.is_some() => Outcome::Dispatch(Action::DismissNotice),
        _ => Outcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use todo_core::view::{ConfirmPrompt, Marker, Row};
    use todo_core::TodoId;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn row(id: &str, checked: bool) -> Row {
        Row {
            id: TodoId::new(id),
            marker: if checked { Marker::Done } else { Marker::Pending },
            title: format!("item {id}"),
            struck: checked,
            checked,
        }
    }

    fn list(draft: &str, rows: Vec<Row>) -> Screen {
        Screen::List(ListScreen {
            draft: draft.to_string(),
            rows,
            confirm: None,
            notice: None,
        })
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut ui = UiState::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key, &mut ui, &Screen::Loading), Outcome::Quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut ui = UiState::default();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key(key, &mut ui, &list("", vec![])), Outcome::Ignored);
    }

    #[test]
    fn typing_edits_the_draft_and_enter_submits() {
        let mut ui = UiState::default();
        let screen = list("Buy mil", vec![]);
        assert_eq!(handle_key(press(KeyCode::Char('a')), &mut ui, &screen), Outcome::Local);
        assert_eq!(ui.mode, Mode::Editing);

        assert_eq!(
            handle_key(press(KeyCode::Char('k')), &mut ui, &screen),
            Outcome::Dispatch(Action::DraftChanged("Buy milk".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Backspace), &mut ui, &screen),
            Outcome::Dispatch(Action::DraftChanged("Buy mi".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut ui, &screen),
            Outcome::Dispatch(Action::Submit)
        );
    }

    #[test]
    fn space_toggles_the_selected_row() {
        let mut ui = UiState::default();
        let screen = list("", vec![row("1", false), row("2", true)]);
        handle_key(press(KeyCode::Down), &mut ui, &screen);
        assert_eq!(
            handle_key(press(KeyCode::Char(' ')), &mut ui, &screen),
            Outcome::Dispatch(Action::Toggle {
                id: TodoId::new("2"),
                completed: false,
            })
        );
    }

    #[test]
    fn cursor_stays_on_the_last_row() {
        let mut ui = UiState::default();
        let screen = list("", vec![row("1", false)]);
        handle_key(press(KeyCode::Down), &mut ui, &screen);
        handle_key(press(KeyCode::Down), &mut ui, &screen);
        assert_eq!(ui.selected(1), Some(0));
    }

    #[test]
    fn cursor_follows_a_shrunken_list() {
        let mut ui = UiState::default();
        let long = list("", vec![row("1", false), row("2", false), row("3", false)]);
        handle_key(press(KeyCode::Down), &mut ui, &long);
        handle_key(press(KeyCode::Down), &mut ui, &long);
        assert_eq!(ui.cursor, 2);

        let short = list("", vec![row("1", false), row("2", false)]);
        handle_key(press(KeyCode::Up), &mut ui, &short);
        assert_eq!(ui.cursor, 0);
        assert_eq!(
            handle_key(press(KeyCode::Char(' ')), &mut ui, &short),
            Outcome::Dispatch(Action::Toggle {
                id: TodoId::new("1"),
                completed: true,
            })
        );
    }

    #[test]
    fn reload_is_only_offered_on_the_error_screen() {
        let mut ui = UiState::default();
        let screen = list("", vec![row("1", false)]);
        assert_eq!(handle_key(press(KeyCode::Char('r')), &mut ui, &screen), Outcome::Ignored);
    }

    #[test]
    fn delete_asks_first_and_confirm_keys_answer() {
        let mut ui = UiState::default();
        let screen = list("", vec![row("1", false)]);
        assert_eq!(
            handle_key(press(KeyCode::Char('d')), &mut ui, &screen),
            Outcome::Dispatch(Action::RequestDelete(TodoId::new("1")))
        );

        let confirming = Screen::List(ListScreen {
            draft: String::new(),
            rows: vec![row("1", false)],
            confirm: Some(ConfirmPrompt {
                id: TodoId::new("1"),
                title: "item 1".to_string(),
            }),
            notice: None,
        });
        assert_eq!(
            handle_key(press(KeyCode::Char('q')), &mut ui, &confirming),
            Outcome::Ignored
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('n')), &mut ui, &confirming),
            Outcome::Dispatch(Action::CancelDelete)
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('y')), &mut ui, &confirming),
            Outcome::Dispatch(Action::ConfirmDelete)
        );
    }

    #[test]
    fn toggle_on_empty_list_does_nothing() {
        let mut ui = UiState::default();
        assert_eq!(
            handle_key(press(KeyCode::Char(' ')), &mut ui, &list("", vec![])),
            Outcome::Ignored
        );
    }

    #[test]
    fn error_screen_reloads_on_r() {
        let mut ui = UiState::default();
        let screen = Screen::Error {
            message: "boom".to_string(),
        };
        assert_eq!(
            handle_key(press(KeyCode::Char('r')), &mut ui, &screen),
            Outcome::Dispatch(Action::Mount)
        );
        assert_eq!(handle_key(press(KeyCode::Char(' ')), &mut ui, &screen), Outcome::Ignored);
    }
}
