use yew::prelude::*;
use yew_router::components::Link;

use crate::Route;

#[derive(PartialEq, Properties, Clone)]
struct FeatureProps {
    icon: &'static str,
    title: &'static str,
    text: &'static str,
}

#[function_component]
fn Feature(props: &FeatureProps) -> Html {
    html! {
        <div class="feature">
            <div class="feature-icon">{props.icon}</div>
            <h3>{props.title}</h3>
            <p>{props.text}</p>
        </div>
    }
}

#[function_component]
pub fn LandingPage() -> Html {
    html! {
        <div class="landing">
            <h1 class="brand">{"Keep"}<span class="brand-accent">{"Up"}</span></h1>
            <p class="tagline">{"Track and share your trips in real-time. Never lose your group again."}</p>

            <div class="card-grid two">
                <div class="card">
                    <h2>{"Create a Trip"}</h2>
                    <p class="muted">{"Start tracking your journey and invite friends to join"}</p>
                    <Link<Route> to={Route::Login} classes="button wide">{"Get Started"}</Link<Route>>
                </div>
                <div class="card">
                    <h2>{"Join a Trip"}</h2>
                    <p class="muted">{"Have a trip code? Join your friends and start tracking"}</p>
                    <Link<Route> to={Route::Login} classes="button outline wide">{"Sign In to Join"}</Link<Route>>
                </div>
            </div>

            <div class="card-grid three">
                <Feature icon="📍" title="Live locations" text="See where everyone in the group is while the trip is running." />
                <Feature icon="🔒" title="Private trips" text="Only people with the trip password can join." />
                <Feature icon="🗺️" title="One map" text="Everybody on the same map, no more group chat screenshots." />
            </div>
        </div>
    }
}
