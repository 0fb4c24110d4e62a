//! Domain reducers. Each one mutates `AppState` for the messages it owns and
//! pushes the side effects it wants as `Command`s; none of them touches the
//! DOM or the network directly, so all of them run under native unit tests.

pub mod auth;
pub mod canvas;
pub mod document;
pub mod workflows;
