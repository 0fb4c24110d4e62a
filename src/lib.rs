//! CMS admin front-end compiled to WebAssembly. State lives in a global
//! `AppState`; events flow through `Message`, side effects through
//! `Command`, and pages are rebuilt imperatively from state.

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod components;
pub mod constants;
pub mod dom_utils;
pub mod layout;
pub mod messages;
pub mod models;
pub mod network;
pub mod pages;
pub mod reducers;
pub mod session;
pub mod state;
pub mod toast;
pub mod update;
pub mod utils;
pub mod views;

use messages::Message;
use session::{BrowserTokenStore, Session, TokenStore};
use state::{dispatch_global_message, Page, APP_STATE};

/// Called by the host page before `start()` when the backend does not run
/// on the default origin.
#[wasm_bindgen]
pub fn set_api_base_url(base_url: &str) {
    network::init_api_config(base_url);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // A persisted token survives reloads; navigation still re-validates it
    // because the first 401 routes through SessionExpired.
    let landing = match BrowserTokenStore.load() {
        Some(token) => {
            APP_STATE.with(|state| {
                state.borrow_mut().session = Session::with_token(token);
            });
            Page::Home
        }
        None => Page::Login,
    };
    dispatch_global_message(Message::NavigateTo(landing));

    Ok(())
}
