//! Session and navigation reducer.

use crate::messages::{Command, Message};
use crate::session::Session;
use crate::state::{AppState, Page};
use crate::toast::ToastKind;

pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    match msg {
        Message::NavigateTo(page) => {
            // Anonymous sessions only ever see the login screen.
            let target = if state.session.is_authenticated() {
                *page
            } else {
                Page::Login
            };
            if target != Page::Workflows {
                state.editor = None;
            }
            state.active_page = target;
            if target == Page::Workflows {
                state.workflows_loading = true;
                commands.push(Command::FetchWorkflows);
            }
            commands.push(Command::RenderPage);
            true
        }

        Message::LoggedIn { token } => {
            state.session = Session::with_token(token.clone());
            commands.push(Command::PersistToken(token.clone()));
            commands.push(Command::SendMessage(Message::NavigateTo(Page::Home)));
            true
        }

        Message::Logout => {
            reset_session(state, commands);
            true
        }

        Message::SessionExpired => {
            reset_session(state, commands);
            commands.push(Command::ShowToast {
                kind: ToastKind::Error,
                message: "Session expired, please log in again".to_string(),
            });
            true
        }

        _ => false,
    }
}

fn reset_session(state: &mut AppState, commands: &mut Vec<Command>) {
    state.session.clear();
    state.workflows.clear();
    state.workflows_loading = false;
    state.editor = None;
    commands.push(Command::ClearToken);
    commands.push(Command::SendMessage(Message::NavigateTo(Page::Login)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn logged_in_state() -> AppState {
        let mut state = AppState::new();
        state.session = Session::with_token("tok".to_string());
        state
    }

    #[test]
    fn anonymous_navigation_always_lands_on_login() {
        let mut state = AppState::new();
        let mut commands = Vec::new();
        assert!(update(
            &mut state,
            &Message::NavigateTo(Page::Workflows),
            &mut commands
        ));
        assert_eq!(state.active_page, Page::Login);
        assert!(!state.workflows_loading);
    }

    #[test]
    fn navigating_to_workflows_triggers_a_fetch() {
        let mut state = logged_in_state();
        let mut commands = Vec::new();
        update(&mut state, &Message::NavigateTo(Page::Workflows), &mut commands);
        assert_eq!(state.active_page, Page::Workflows);
        assert!(state.workflows_loading);
        assert!(commands
            .iter()
            .any(|c| matches!(c, Command::FetchWorkflows)));
    }

    #[test]
    fn session_expiry_clears_everything() {
        let mut state = logged_in_state();
        state.workflows.push(crate::models::Workflow::new());
        let mut commands = Vec::new();
        update(&mut state, &Message::SessionExpired, &mut commands);
        assert!(!state.session.is_authenticated());
        assert!(state.workflows.is_empty());
        assert!(state.editor.is_none());
        assert!(commands.iter().any(|c| matches!(c, Command::ClearToken)));
    }
}
