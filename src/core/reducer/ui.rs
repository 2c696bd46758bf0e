use super::{CoreState, UiAction};
use crate::app::UiFocus;
use crate::core::effects::CoreEffects;
use crate::messages::app::AppCommand;

pub(super) fn handle_ui(cmd: &AppCommand, state: &mut CoreState, effects: &mut CoreEffects) -> UiAction {
    match cmd {
        AppCommand::FocusNext => {
            state.app.ui_focus = next_focus(state.app.ui_focus);
            state.emit_state(effects);
            UiAction::Handled
        }
        AppCommand::MoveUp => {
            let selected = selected_mut(state);
            *selected = selected.saturating_sub(1);
            state.emit_state(effects);
            UiAction::Handled
        }
        AppCommand::MoveDown => {
            let len = focused_len(state);
            let selected = selected_mut(state);
            if *selected + 1 < len {
                *selected += 1;
            }
            state.emit_state(effects);
            UiAction::Handled
        }
        AppCommand::Quit => UiAction::Quit,
        _ => UiAction::NotHandled,
    }
}

fn next_focus(focus: UiFocus) -> UiFocus {
    match focus {
        UiFocus::Folders => UiFocus::Playlist,
        UiFocus::Playlist => UiFocus::Folders,
    }
}

fn focused_len(state: &CoreState) -> usize {
    match state.app.ui_focus {
        UiFocus::Folders => state.app.folders.len(),
        UiFocus::Playlist => state.catalog.len(),
    }
}

fn selected_mut(state: &mut CoreState) -> &mut usize {
    match state.app.ui_focus {
        UiFocus::Folders => &mut state.app.folders_selected,
        UiFocus::Playlist => &mut state.app.playlist_selected,
    }
}
