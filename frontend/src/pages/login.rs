use gloo_console::error;
use keepup_lib::{api::LoginRequest, session};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;

use crate::{api, storage::BrowserStore, Route};

const LOGIN_FAILED: &str = "Login failed";

#[function_component]
pub fn LoginPage() -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let loading = use_state(|| false);
    let error_text = use_state(|| None::<String>);
    let navigator = use_navigator();

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let error_text = error_text.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            loading.set(true);
            error_text.set(None);

            let request = LoginRequest {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let loading = loading.clone();
            let error_text = error_text.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                match session::login(&api::client(), &BrowserStore, &request).await {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(err) => {
                        error!(format!("Login failed: {err}"));
                        error_text.set(Some(err.message_or(LOGIN_FAILED)));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="page narrow">
            <div class="card">
                <h1>{"Sign in"}</h1>
                <form onsubmit={on_submit}>
                    if let Some(text) = &*error_text {
                        <div class="form-error">{text.clone()}</div>
                    }
                    <label for="email">{"Email"}</label>
                    <input id="email" type="email" required=true value={(*email).clone()} oninput={on_email} disabled={*loading} />
                    <label for="password">{"Password"}</label>
                    <input id="password" type="password" required=true value={(*password).clone()} oninput={on_password} disabled={*loading} />
                    <button type="submit" class="button wide" disabled={*loading}>
                        {if *loading { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
