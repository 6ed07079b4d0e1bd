use keepup_lib::trip::TripStatus;
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct StatusBadgeProps {
    pub status: TripStatus,
    #[prop_or_default]
    pub pill: bool,
}

#[function_component]
pub fn StatusBadge(props: &StatusBadgeProps) -> Html {
    html! {
        <span class={classes!(props.status.tier().css_class(), props.pill.then_some("pill"))}>
            {props.status.label()}
        </span>
    }
}
