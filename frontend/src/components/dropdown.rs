use yew::prelude::*;

/// Controlled popover. The owner keeps the `open` flag and decides when to
/// close it, including after an item was picked.
#[derive(PartialEq, Properties, Clone)]
pub struct DropdownProps {
    pub open: bool,
    pub on_toggle: Callback<()>,
    /// Content of the trigger button
    pub trigger: Html,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component]
pub fn DropdownMenu(props: &DropdownProps) -> Html {
    let on_toggle = props.on_toggle.clone();
    let onclick = Callback::from(move |_| on_toggle.emit(()));

    html! {
        <div class={classes!("dropdown", props.class.clone())}>
            <button class="dropdown-trigger" aria-expanded={props.open.to_string()} {onclick}>
                {props.trigger.clone()}
            </button>
            if props.open {
                <div class="dropdown-content">
                    {for props.children.iter()}
                </div>
            }
        </div>
    }
}

#[derive(PartialEq, Properties, Clone)]
pub struct DropdownItemProps {
    pub onselect: Callback<()>,
    #[prop_or_default]
    pub destructive: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub children: Children,
}

#[function_component]
pub fn DropdownItem(props: &DropdownItemProps) -> Html {
    let onselect = props.onselect.clone();
    let disabled = props.disabled;
    let onclick = Callback::from(move |_| {
        if !disabled {
            onselect.emit(());
        }
    });

    html! {
        <div
            class={classes!("dropdown-item", props.destructive.then_some("destructive"), disabled.then_some("disabled"))}
            {onclick}
        >
            {for props.children.iter()}
        </div>
    }
}
