//! Message router. Each domain reducer gets a look at the message and
//! returns `true` once it has consumed it; unhandled messages are logged so
//! a forgotten wiring shows up in the console instead of failing silently.

use crate::messages::{Command, Message};
use crate::reducers;
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    let handled = reducers::auth::update(state, &msg, &mut commands)
        || reducers::workflows::update(state, &msg, &mut commands)
        || reducers::document::update(state, &msg, &mut commands)
        || reducers::canvas::update(state, &msg, &mut commands);

    if !handled {
        web_sys::console::warn_1(&format!("Unhandled message: {:?}", msg).into());
    }

    commands
}
