use gloo_console::info;
use keepup_lib::session::{check_session, GuardState};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

use crate::{api, navigate, storage::BrowserStore, CONFIG};

/// Session check run once when a protected page mounts. Sends the visitor to
/// login when it fails.
#[hook]
pub fn use_session_guard() -> GuardState {
    let guard = use_state(GuardState::default);
    let navigator = use_navigator();

    {
        let guard = guard.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = check_session(&api::client(), &BrowserStore, CONFIG.auth_mode).await;
                if let Err(err) = &result {
                    info!(format!("Not signed in: {err}"));
                }

                let state = GuardState::from_check(&result);
                if let Some(redirect) = state.redirect() {
                    navigate(&navigator, redirect);
                }
                guard.set(state);
            });
        });
    }

    (*guard).clone()
}
