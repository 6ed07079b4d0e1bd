use gloo_console::error;
use keepup_lib::{
    dashboard::{load_trips, TripCard, TripListState},
    session::{self, GuardState, Redirect},
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::{components::Link, hooks::use_navigator};

use crate::{api, components::status_badge::StatusBadge, guard::use_session_guard, navigate, storage::BrowserStore, Route};

#[derive(PartialEq, Properties, Clone)]
struct TripCardProps {
    card: TripCard,
}

#[function_component]
fn TripCardView(props: &TripCardProps) -> Html {
    let card = &props.card;
    html! {
        <div class="card trip-card">
            <div class="trip-card-header">
                <h3>{card.name.clone()}</h3>
                <StatusBadge status={card.status} pill=true />
            </div>
            if let Some(description) = &card.description {
                <p class="muted">{description.clone()}</p>
            }
            <div class="trip-card-footer">
                <span class="muted small">{format!("Created {}", card.created)}</span>
                <Link<Route> to={Route::Trip { id: card.id }} classes="button outline small">{"View Trip"}</Link<Route>>
            </div>
        </div>
    }
}

#[function_component]
fn TripList(props: &TripListProps) -> Html {
    match &props.state {
        TripListState::Loading => html! {
            <div class="card">
                <p class="center muted">{"Loading trips..."}</p>
            </div>
        },
        TripListState::Empty => html! {
            <div class="card empty-state">
                <div class="empty-icon">{"📍"}</div>
                <h3>{"No trips yet"}</h3>
                <p class="muted">{"Create your first trip to start tracking your adventures!"}</p>
                <Link<Route> to={Route::CreateTrip} classes="button">{"+ Create Your First Trip"}</Link<Route>>
            </div>
        },
        TripListState::Populated(cards) => html! {
            <div class="card-grid three">
                {for cards.iter().map(|card| html! {
                    <TripCardView key={card.id} card={card.clone()} />
                })}
            </div>
        },
    }
}

#[derive(PartialEq, Properties, Clone)]
struct TripListProps {
    state: TripListState,
}

#[function_component]
pub fn DashboardPage() -> Html {
    let guard = use_session_guard();
    let trips = use_state(TripListState::default);
    let navigator = use_navigator();

    {
        let trips = trips.clone();
        let navigator = navigator.clone();
        let authenticated = matches!(guard, GuardState::Authenticated(_));
        use_effect_with(authenticated, move |authenticated| {
            if *authenticated {
                spawn_local(async move {
                    let client = api::client();
                    let load = load_trips(&client).await;
                    if let Some(err) = &load.error {
                        error!(format!("Failed to fetch trips: {err}"));
                    }
                    if let Some(redirect) = load.redirect {
                        navigate(&navigator, redirect);
                    }
                    trips.set(load.state);
                });
            }
        });
    }

    let on_logout = {
        let navigator = navigator.clone();
        Callback::from(move |_| {
            let navigator = navigator.clone();
            spawn_local(async move {
                if let Err(err) = session::logout(&api::client(), &BrowserStore).await {
                    error!(format!("Logout request failed: {err}"));
                }
                navigate(&navigator, Redirect::Login);
            });
        })
    };

    match &guard {
        GuardState::Checking => html! {
            <div class="page-center">
                <p>{"Loading..."}</p>
            </div>
        },
        GuardState::Redirecting => html! {},
        GuardState::Authenticated(user) => html! {
            <div class="page">
                <div class="page-header">
                    <div>
                        <h1>{"Dashboard"}</h1>
                        <p class="muted">
                            if let Some(user) = user {
                                <>{"Welcome back, "}<b>{user.username.clone()}</b>{"!"}</>
                            } else {
                                {"Welcome back!"}
                            }
                        </p>
                    </div>
                    <button class="button outline" onclick={on_logout}>{"Logout"}</button>
                </div>

                <div class="section-header">
                    <h2>{"My Trips"}</h2>
                    <Link<Route> to={Route::CreateTrip} classes="button">{"+ Create Trip"}</Link<Route>>
                </div>

                <TripList state={(*trips).clone()} />
            </div>
        },
    }
}
