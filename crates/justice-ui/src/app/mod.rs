//! Yew application shell.
//!
//! # Design
//! - One `ApiCtx` per boot; every async path spawns, awaits, then commits
//!   through a single synchronous store reducer.
//! - The poller lives as long as the root component and is stopped in the
//!   effect cleanup.
//! - Mark-read actions trigger an immediate poll so the badge converges
//!   without waiting for the next tick.

mod api;
mod media;
mod poller;
mod preferences;

use crate::app::api::ApiCtx;
use crate::app::poller::{BrowserPoller, poll_now};
use crate::components::notifications::{NotificationBell, NotificationPanel};
use crate::components::referral::ReferralDashboard;
use crate::components::toast::ToastHost;
use crate::core::panel::PanelToggle;
use crate::core::referral::{referrer_from_query, should_record_click};
use crate::core::store::AppStore;
use crate::models::ToastKind;
use gloo::console;
use justice_api_models::NotificationId;
use justice_client::referral_link;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(JusticeApp)]
fn justice_app() -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let api_ctx = use_memo(|_| ApiCtx::new(preferences::load_settings()), ());

    let badge = use_selector(|store: &AppStore| store.notifications.badge);
    let panel = use_selector(|store: &AppStore| store.notifications.panel.clone());
    let toasts = use_selector(|store: &AppStore| store.toasts.items().to_vec());
    let referral = use_selector(|store: &AppStore| store.referral.clone());

    {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                let mut handle =
                    BrowserPoller::start(api_ctx.client.clone(), dispatch, api_ctx.poller);
                move || {
                    handle.stop();
                }
            },
            (),
        );
    }
    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                media::bootstrap_media(api_ctx.client.clone());
                || ()
            },
            (),
        );
    }
    {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                load_referrals(api_ctx, dispatch);
                || ()
            },
            (),
        );
    }

    let on_toggle_panel = {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        Callback::from(move |_: MouseEvent| {
            let mut request = None;
            dispatch.reduce_mut(|store| {
                let panel = &mut store.notifications.panel;
                if panel.toggle() == PanelToggle::Fetch {
                    request = Some((panel.limit, panel.generation()));
                }
            });
            let Some((limit, generation)) = request else {
                return;
            };
            let dispatch = dispatch.clone();
            let client = api_ctx.client.clone();
            yew::platform::spawn_local(async move {
                let fetched = client.notifications(limit).await;
                if let Err(err) = &fetched {
                    console::error!("notification list failed", err.to_string());
                }
                let mut fetched = Some(fetched);
                dispatch.reduce_mut(|store| {
                    if let Some(fetched) = fetched.take()
                        && !store.notifications.panel.apply_fetch(generation, fetched)
                    {
                        console::debug!("dropped notification list from an earlier open");
                    }
                });
            });
        })
    };

    let on_mark_read = {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        Callback::from(move |id: NotificationId| {
            let dispatch = dispatch.clone();
            let api_ctx = api_ctx.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.mark_read(&id).await {
                    Ok(_) => {
                        dispatch.reduce_mut(|store| {
                            store.notifications.panel.remove(&id);
                        });
                        poll_now(api_ctx.client.clone(), dispatch, api_ctx.poller);
                    }
                    Err(err) => {
                        console::error!("mark read failed", err.to_string());
                        report_failure(&dispatch, &api_ctx, "Could not mark notification read");
                    }
                }
            });
        })
    };

    let on_mark_all = {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        Callback::from(move |_: MouseEvent| {
            let dispatch = dispatch.clone();
            let api_ctx = api_ctx.clone();
            yew::platform::spawn_local(async move {
                match api_ctx.client.mark_all_read().await {
                    Ok(_) => {
                        dispatch.reduce_mut(|store| store.notifications.panel.clear_all());
                        poll_now(api_ctx.client.clone(), dispatch, api_ctx.poller);
                    }
                    Err(err) => {
                        console::error!("mark all read failed", err.to_string());
                        report_failure(&dispatch, &api_ctx, "Could not mark notifications read");
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: u64| {
            dispatch.reduce_mut(|store| {
                store.toasts.dismiss(id);
            });
        })
    };

    html! {
        <div class="justice-app">
            <header class="app-header">
                <NotificationBell count={*badge} open={panel.open} on_toggle={on_toggle_panel} />
            </header>
            if panel.open {
                <NotificationPanel
                    panel={(*panel).clone()}
                    on_mark_read={on_mark_read}
                    on_mark_all={on_mark_all}
                />
            }
            <ReferralDashboard referral={(*referral).clone()} />
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </div>
    }
}

fn report_failure(dispatch: &Dispatch<AppStore>, api_ctx: &ApiCtx, message: &'static str) {
    let ttl = api_ctx.poller.toast_ttl;
    dispatch.reduce_mut(|store| {
        store.toasts.push(ToastKind::Error, "Notifications", message, ttl);
    });
}

/// Record an incoming referral click, then load stats, leaderboard, and link.
fn load_referrals(api_ctx: ApiCtx, dispatch: Dispatch<AppStore>) {
    let user_id = api_ctx.client.identity().user_id().map(str::to_string);
    let referrer = referrer_from_query(&preferences::page_query());
    let link = preferences::page_origin()
        .zip(user_id.as_deref())
        .map(|(origin, user)| referral_link(&origin, user));

    yew::platform::spawn_local(async move {
        if let Some(referrer) = referrer
            .as_deref()
            .filter(|referrer| should_record_click(Some(*referrer), user_id.as_deref()))
        {
            api_ctx.fetchers.record_referral_click(referrer).await;
        }
        let stats = api_ctx.fetchers.fetch_referral_stats().await;
        let leaderboard = api_ctx.fetchers.fetch_leaderboard().await;
        dispatch.reduce_mut(|store| {
            store.referral.stats = stats;
            store.referral.leaderboard = leaderboard;
            store.referral.link = link;
        });
    });
}

/// Mount the app into `#root`, or the document body when it is missing.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<JusticeApp>::with_root(root).render();
    } else {
        yew::Renderer::<JusticeApp>::new().render();
    }
}
