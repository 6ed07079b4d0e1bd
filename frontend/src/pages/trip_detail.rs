use gloo_console::{error, info};
use gloo_utils::window;
use keepup_lib::{
    session::{check_session, GuardState, Redirect, SessionError},
    trip_detail::{fetch_trip, run_action, ActionOutcome, DetailState, Effect, FetchOutcome, TripAction, TripDetail},
    user::User,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::scope_ext::RouterScopeExt;

use crate::{
    api,
    components::{
        dropdown::{DropdownItem, DropdownMenu},
        map_component::MapComponent,
        status_badge::StatusBadge,
    },
    navigate,
    storage::BrowserStore,
    CONFIG,
};

pub enum Msg {
    SessionChecked(Result<Option<User>, SessionError>),
    Fetched(i64, FetchOutcome),
    Retry,
    Start,
    End,
    ActionDone(i64, ActionOutcome),
    ToggleMenu,
    BackToDashboard,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub id: i64,
}

pub struct TripPage {
    guard: GuardState,
    detail: TripDetail,
}

impl TripPage {
    fn fetch(ctx: &Context<Self>) {
        let trip_id = ctx.props().id;
        let cb = ctx.link().callback(move |outcome: FetchOutcome| Msg::Fetched(trip_id, outcome));
        spawn_local(async move {
            cb.emit(fetch_trip(&api::client(), trip_id).await);
        });
    }

    fn run(ctx: &Context<Self>, trip_id: i64, action: TripAction) {
        info!(format!("{action:?} trip {trip_id}"));
        let cb = ctx.link().callback(move |outcome: ActionOutcome| Msg::ActionDone(trip_id, outcome));
        spawn_local(async move {
            cb.emit(run_action(&api::client(), trip_id, action).await);
        });
    }

    fn apply(ctx: &Context<Self>, effect: Effect) {
        if let Some(err) = &effect.error {
            error!(format!("Trip {}: {err}", ctx.props().id));
        }
        if let Some(message) = &effect.alert {
            let _ = window().alert_with_message(message);
        }
        if let Some(redirect) = effect.redirect {
            navigate(&ctx.link().navigator(), redirect);
        }
    }

    fn view_start_prompt(&self, ctx: &Context<Self>) -> Html {
        if !self.detail.shows_start() {
            return html! {};
        }

        let starting = self.detail.busy == Some(TripAction::Start);
        let onclick = ctx.link().callback(|_| Msg::Start);

        html! {
            <div class="start-overlay">
                <div class="card start-card">
                    <div class="start-icon">{"🧭"}</div>
                    <h2>{"Ready to Start Your Trip?"}</h2>
                    <p class="muted">
                        {"Click the button below to start tracking your location and begin your adventure!"}
                    </p>
                    <button class="button wide large" {onclick} disabled={starting}>
                        if starting {
                            <><span class="spinner small"></span>{"Starting Trip..."}</>
                        } else {
                            {"Start Trip"}
                        }
                    </button>
                </div>
            </div>
        }
    }
}

impl Component for TripPage {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let cb = ctx.link().callback(Msg::SessionChecked);
        spawn_local(async move {
            cb.emit(check_session(&api::client(), &BrowserStore, CONFIG.auth_mode).await);
        });

        Self {
            guard: GuardState::Checking,
            detail: TripDetail::new(ctx.props().id),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().id != old_props.id {
            self.detail = TripDetail::new(ctx.props().id);
            if matches!(self.guard, GuardState::Authenticated(_)) {
                Self::fetch(ctx);
            }
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChecked(result) => {
                if let Err(err) = &result {
                    info!(format!("Not signed in: {err}"));
                }
                self.guard = GuardState::from_check(&result);
                match self.guard.redirect() {
                    Some(redirect) => navigate(&ctx.link().navigator(), redirect),
                    None => Self::fetch(ctx),
                }
            }
            Msg::Fetched(trip_id, outcome) => {
                let effect = self.detail.apply_fetch(trip_id, outcome);
                Self::apply(ctx, effect);
            }
            Msg::Retry => {
                self.detail.retry();
                Self::fetch(ctx);
            }
            Msg::Start => {
                let Some(trip_id) = self.detail.begin_start() else {
                    return false;
                };
                Self::run(ctx, trip_id, TripAction::Start);
            }
            Msg::End => {
                let confirm = |question: &str| window().confirm_with_message(question).unwrap_or(false);
                let Some(trip_id) = self.detail.begin_end(confirm) else {
                    return false;
                };
                Self::run(ctx, trip_id, TripAction::End);
            }
            Msg::ActionDone(trip_id, outcome) => {
                let effect = self.detail.finish(trip_id, outcome);
                Self::apply(ctx, effect);
            }
            Msg::ToggleMenu => self.detail.toggle_menu(),
            Msg::BackToDashboard => {
                self.detail.close_menu();
                navigate(&ctx.link().navigator(), Redirect::Dashboard);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.guard {
            GuardState::Checking => {
                return html! {
                    <div class="page-center">
                        <p>{"Loading trip..."}</p>
                    </div>
                };
            }
            GuardState::Redirecting => return html! {},
            GuardState::Authenticated(_) => {}
        }

        let trip = match &self.detail.state {
            DetailState::Loading => {
                return html! {
                    <div class="page-center">
                        <p>{"Loading trip..."}</p>
                    </div>
                };
            }
            DetailState::NotFound => {
                return html! {
                    <div class="page-center">
                        <p>{"Trip not found"}</p>
                    </div>
                };
            }
            DetailState::Unavailable(message) => {
                let onclick = ctx.link().callback(|_| Msg::Retry);
                return html! {
                    <div class="page-center">
                        <div class="center">
                            <p class="error-text">{message.clone()}</p>
                            <button class="button" {onclick}>{"Try again"}</button>
                        </div>
                    </div>
                };
            }
            DetailState::Loaded(trip) => trip,
        };

        let link = ctx.link();
        let ending = self.detail.busy == Some(TripAction::End);

        html! {
            <div class="trip-page">
                <div class="trip-header">
                    <div class="trip-title">
                        <h1>{trip.name.clone()}</h1>
                        <p class="small">{"Status: "}<StatusBadge status={trip.status} /></p>
                    </div>

                    <DropdownMenu
                        open={self.detail.menu_open}
                        on_toggle={link.callback(|_| Msg::ToggleMenu)}
                        trigger={html! { "☰" }}
                    >
                        <DropdownItem onselect={link.callback(|_| Msg::BackToDashboard)}>
                            {"Back to Dashboard"}
                        </DropdownItem>
                        if self.detail.shows_end() {
                            <DropdownItem destructive=true disabled={ending} onselect={link.callback(|_| Msg::End)}>
                                {if ending { "Ending Trip..." } else { "End Trip" }}
                            </DropdownItem>
                        }
                    </DropdownMenu>
                </div>

                <div class="trip-map">
                    <MapComponent class="fill" />
                    {self.view_start_prompt(ctx)}
                </div>
            </div>
        }
    }
}
