use gloo_console::error;
use keepup_lib::{
    api::ApiError,
    create_trip::{submit_trip, CreateTrip},
    session::{check_session, GuardState, SessionError},
    user::User,
    validation::{DESCRIPTION_MAX, NAME_MAX, PASSWORD_MAX, PASSWORD_MIN},
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::{components::Link, scope_ext::RouterScopeExt};

use crate::{api, storage::BrowserStore, Route, CONFIG};

pub enum Field {
    Name,
    Description,
    Password,
}

pub enum Msg {
    SessionChecked(Result<Option<User>, SessionError>),
    Input(Field, String),
    Submit,
    Submitted(Result<i64, ApiError>),
    Cancel,
}

pub struct CreateTripPage {
    guard: GuardState,
    create: CreateTrip,
}

impl Component for CreateTripPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let cb = ctx.link().callback(Msg::SessionChecked);
        spawn_local(async move {
            cb.emit(check_session(&api::client(), &BrowserStore, CONFIG.auth_mode).await);
        });

        Self {
            guard: GuardState::Checking,
            create: CreateTrip::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChecked(result) => {
                self.guard = GuardState::from_check(&result);
                if let Some(redirect) = self.guard.redirect() {
                    crate::navigate(&ctx.link().navigator(), redirect);
                }
            }
            Msg::Input(field, value) => {
                let form = &mut self.create.form;
                match field {
                    Field::Name => form.name = value,
                    Field::Description => form.description = value,
                    Field::Password => form.password = value,
                }
            }
            Msg::Submit => {
                let Some(request) = self.create.begin_submit() else {
                    return true;
                };
                let cb = ctx.link().callback(Msg::Submitted);
                spawn_local(async move {
                    cb.emit(submit_trip(&api::client(), &request).await);
                });
            }
            Msg::Submitted(result) => {
                if let Err(err) = &result {
                    error!(format!("Failed to create trip: {err}"));
                }
                if let Some(redirect) = self.create.finish(result) {
                    crate::navigate(&ctx.link().navigator(), redirect);
                }
            }
            Msg::Cancel => {
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.back();
                }
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.guard {
            GuardState::Checking => {
                return html! {
                    <div class="page-center">
                        <p>{"Loading..."}</p>
                    </div>
                };
            }
            GuardState::Redirecting => return html! {},
            GuardState::Authenticated(_) => {}
        }

        let link = ctx.link();
        let form = &self.create.form;
        let disabled = self.create.submitting;

        let on_name = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Input(Field::Name, input.value())
        });
        let on_description = link.callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::Input(Field::Description, input.value())
        });
        let on_password = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Input(Field::Password, input.value())
        });
        let on_submit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let on_cancel = link.callback(|_| Msg::Cancel);

        html! {
            <div class="page narrow">
                <Link<Route> to={Route::Dashboard} classes="button outline">{"← Back to Dashboard"}</Link<Route>>
                <h1>{"Create New Trip"}</h1>
                <p class="muted">{"Set up your trip and invite others to join with the trip password."}</p>

                <div class="card">
                    <h2>{"Trip Details"}</h2>
                    <p class="muted">{"Provide basic information about your trip"}</p>
                    <form onsubmit={on_submit}>
                        if let Some(text) = &self.create.error {
                            <div class="form-error">{text.clone()}</div>
                        }

                        <label for="name">{"Trip Name *"}</label>
                        <input
                            id="name"
                            type="text"
                            placeholder="Weekend Camping Trip"
                            value={form.name.clone()}
                            oninput={on_name}
                            required=true
                            maxlength={NAME_MAX.to_string()}
                            {disabled}
                        />

                        <label for="description">{"Description (Optional)"}</label>
                        <textarea
                            id="description"
                            placeholder="A fun weekend camping trip in the mountains..."
                            value={form.description.clone()}
                            oninput={on_description}
                            maxlength={DESCRIPTION_MAX.to_string()}
                            rows="3"
                            {disabled}
                        />
                        <p class="muted small">{form.description_counter()}</p>

                        <label for="password">{"Trip Password *"}</label>
                        <input
                            id="password"
                            type="text"
                            placeholder="Enter a password for others to join"
                            value={form.password.clone()}
                            oninput={on_password}
                            required=true
                            minlength={PASSWORD_MIN.to_string()}
                            maxlength={PASSWORD_MAX.to_string()}
                            {disabled}
                        />
                        <p class="muted small">{"Share this password with friends so they can join your trip"}</p>

                        <div class="form-actions">
                            <button type="button" class="button outline" onclick={on_cancel} {disabled}>{"Cancel"}</button>
                            <button type="submit" class="button" {disabled}>
                                {if disabled { "Creating trip..." } else { "Create Trip" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        }
    }
}
