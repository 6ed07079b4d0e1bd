use std::sync::LazyLock;

use gloo_console::{error, info};
use keepup_lib::{config::ClientConfig, session::Redirect};
use yew::prelude::*;
use yew_router::{prelude::Navigator, BrowserRouter, Routable, Switch};

use crate::pages::{
    create_trip::CreateTripPage, dashboard::DashboardPage, landing::LandingPage, login::LoginPage,
    trip_detail::TripPage,
};

mod api;
mod components;
mod guard;
mod pages;
mod storage;

pub static CONFIG: LazyLock<ClientConfig> = LazyLock::new(|| match ClientConfig::from_build_env() {
    Ok(config) => config,
    Err(err) => {
        error!(format!("Bad build configuration, using defaults: {err}"));
        ClientConfig::default()
    }
});

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Landing,
    #[at("/auth/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/trips/create")]
    CreateTrip,
    #[at("/trips/:id")]
    Trip { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<Redirect> for Route {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Login => Route::Login,
            Redirect::Dashboard => Route::Dashboard,
            Redirect::Trip(id) => Route::Trip { id },
        }
    }
}

pub fn navigate(navigator: &Option<Navigator>, redirect: Redirect) {
    match navigator {
        Some(navigator) => navigator.push(&Route::from(redirect)),
        None => error!(format!("No router available, cannot go to {redirect:?}")),
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Landing => html! { <LandingPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::CreateTrip => html! { <CreateTripPage /> },
        Route::Trip { id } => html! { <TripPage {id} /> },
        Route::NotFound => html! {
            <div class="page-center">
                <p>{"Page not found"}</p>
            </div>
        },
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    info!(format!("Starting KeepUp against {}", CONFIG.api_base));
    yew::Renderer::<App>::new().render();
}
