//! Notification bell and popup panel.
//!
//! # Design
//! - Pure view over `PanelState`; every action is a callback into the app shell.
//! - Bubbles and detailed entries emit the same mark-read callback.

use crate::components::empty_state::EmptyState;
use crate::core::panel::{PanelBody, PanelState};
use justice_api_models::{Notification, NotificationId};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct NotificationBellProps {
    /// Unread count from the latest completed poll.
    pub(crate) count: u64,
    /// Whether the panel is currently shown.
    pub(crate) open: bool,
    pub(crate) on_toggle: Callback<MouseEvent>,
}

#[function_component(NotificationBell)]
pub(crate) fn notification_bell(props: &NotificationBellProps) -> Html {
    let label = format!("Notifications ({})", props.count);
    html! {
        <button
            class={classes!("notif-bell", "ghost", props.open.then_some("active"))}
            type="button"
            aria-label={label}
            aria-expanded={props.open.to_string()}
            onclick={props.on_toggle.clone()}
        >
            <span class="bell-icon">{"\u{1F514}"}</span>
            if props.count > 0 {
                <span class="badge">{props.count.to_string()}</span>
            }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct NotificationPanelProps {
    pub(crate) panel: PanelState,
    pub(crate) on_mark_read: Callback<NotificationId>,
    pub(crate) on_mark_all: Callback<MouseEvent>,
}

#[function_component(NotificationPanel)]
pub(crate) fn notification_panel(props: &NotificationPanelProps) -> Html {
    let body = match &props.panel.body {
        PanelBody::Loading => html! { <p class="muted">{"Loading\u{2026}"}</p> },
        PanelBody::Items(items) => {
            let bubbles = props.panel.compact_indicators().into_iter().map(|indicator| {
                let on_click = mark_read(&props.on_mark_read, indicator.id.clone());
                html! {
                    <button
                        key={indicator.id.to_string()}
                        class="notif-bubble"
                        type="button"
                        title={indicator.tooltip}
                        onclick={on_click}
                    />
                }
            });
            html! {
                <>
                    <div class="notif-bubbles">{for bubbles}</div>
                    <ul class="notif-list">
                        {for items.iter().map(|item| render_entry(item, &props.on_mark_read))}
                    </ul>
                </>
            }
        }
        PanelBody::Empty | PanelBody::Error => {
            let title = props.panel.placeholder().unwrap_or_default();
            let class = matches!(props.panel.body, PanelBody::Error).then_some("error");
            html! { <EmptyState title={title} class={classes!(class)} /> }
        }
    };

    html! {
        <section class="notif-panel" aria-label="Notifications">
            <header class="notif-panel-header">
                <h3>{"Notifications"}</h3>
                <button class="ghost" type="button" onclick={props.on_mark_all.clone()}>
                    {"Mark all read"}
                </button>
            </header>
            {body}
        </section>
    }
}

fn render_entry(item: &Notification, on_mark_read: &Callback<NotificationId>) -> Html {
    html! {
        <li key={item.id.to_string()} class="notif-entry">
            <div class="notif-text">
                <span class="notif-message">{item.message.clone()}</span>
                <small class="muted">{item.display_time()}</small>
            </div>
            <button class="ghost" type="button" onclick={mark_read(on_mark_read, item.id.clone())}>
                {"Mark"}
            </button>
        </li>
    }
}

fn mark_read(on_mark_read: &Callback<NotificationId>, id: NotificationId) -> Callback<MouseEvent> {
    let on_mark_read = on_mark_read.clone();
    Callback::from(move |_| on_mark_read.emit(id.clone()))
}
