use crossterm::event::KeyCode;
use uuid::Uuid;

use crate::app::AppState;

/// Work the key handler cannot do itself because it touches storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Quit,
    Reload,
    Delete(Uuid),
}

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Action {
    if state.delete_confirmation_id.is_some() {
        return handle_delete_confirmation(key, state);
    }
    if state.show_help {
        if matches!(key, KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc) {
            state.show_help = false;
        }
        return Action::None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => state.move_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_selection_up(),
        KeyCode::Char('l') | KeyCode::Right => state.move_selection(1),
        KeyCode::Char('h') | KeyCode::Left => state.move_selection(-1),
        KeyCode::Char('g') => state.selected_index = 0,
        KeyCode::Char('G') => state.move_selection(isize::MAX / 2),
        KeyCode::Char('v') => state.cycle_view_mode(),
        KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Char('r') => return Action::Reload,
        KeyCode::Char('x') => request_delete(state),
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
    Action::None
}

fn request_delete(state: &mut AppState) {
    if let Some(item) = state.selected_item() {
        state.delete_confirmation_id = Some(item.id);
    }
}

fn handle_delete_confirmation(key: KeyCode, state: &mut AppState) -> Action {
    match key {
        KeyCode::Char('y') | KeyCode::Enter => match state.delete_confirmation_id.take() {
            Some(id) => Action::Delete(id),
            None => Action::None,
        },
        KeyCode::Char('n') | KeyCode::Esc => {
            state.delete_confirmation_id = None;
            Action::None
        }
        _ => Action::None,
    }
}
