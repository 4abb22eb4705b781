//! Toast host with per-toast auto-dismiss.
//!
//! # Design
//! - Each toast owns its own timeout, keyed on its id, so new arrivals do not
//!   reset the countdown of toasts already on screen.
//! - Unmounting a toast drops its timeout.

use crate::models::Toast;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub(crate) toasts: Vec<Toast>,
    pub(crate) on_dismiss: Callback<u64>,
    #[prop_or_default]
    pub(crate) class: Classes,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    html! {
        <div class={classes!("toast-host", props.class.clone())} aria-live="polite" aria-atomic="true">
            {for props.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={props.on_dismiss.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;
    {
        let on_dismiss = props.on_dismiss.clone();
        let ttl_ms = props.toast.ttl_ms;
        use_effect_with_deps(
            move |id: &u64| {
                let id = *id;
                let handle = Timeout::new(ttl_ms, move || on_dismiss.emit(id));
                move || drop(handle)
            },
            id,
        );
    }
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={classes!("toast", props.toast.kind.class())} role="status">
            <div class="toast-body">
                <strong>{props.toast.title.clone()}</strong>
                <span>{props.toast.message.clone()}</span>
            </div>
            <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"\u{2715}"}</button>
        </div>
    }
}
