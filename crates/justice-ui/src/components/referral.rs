//! Referral stats, shareable link, and leaderboard.

use crate::components::empty_state::EmptyState;
use crate::core::store::ReferralSlice;
use justice_api_models::{ANONYMOUS_USERNAME, LeaderboardEntry};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ReferralDashboardProps {
    pub(crate) referral: ReferralSlice,
}

#[function_component(ReferralDashboard)]
pub(crate) fn referral_dashboard(props: &ReferralDashboardProps) -> Html {
    let referral = &props.referral;
    let stats = referral.stats.as_ref().map_or_else(
        || html! { <EmptyState title="Stats unavailable" /> },
        |stats| {
            let name = stats.username.as_deref().unwrap_or(ANONYMOUS_USERNAME);
            html! {
                <dl class="referral-stats">
                    <dt>{"User"}</dt><dd>{name.to_string()}</dd>
                    <dt>{"Referrals"}</dt><dd>{stats.referrals.to_string()}</dd>
                    <dt>{"Balance"}</dt><dd>{format!("{:.2}", stats.balance)}</dd>
                </dl>
            }
        },
    );
    let link = referral
        .link
        .clone()
        .or_else(|| referral.stats.as_ref().and_then(|s| s.referral_link.clone()));

    html! {
        <section class="referral-dashboard">
            <h3>{"Your referrals"}</h3>
            {stats}
            if let Some(link) = link {
                <p class="referral-link">
                    <span class="muted">{"Share: "}</span>
                    <a href={link.clone()}>{link}</a>
                </p>
            }
            <h3>{"Leaderboard"}</h3>
            {render_leaderboard(&referral.leaderboard)}
        </section>
    }
}

fn render_leaderboard(entries: &[LeaderboardEntry]) -> Html {
    if entries.is_empty() {
        return html! { <EmptyState title="No referrals yet" /> };
    }
    html! {
        <ol class="leaderboard">
            {for entries.iter().map(|entry| html! {
                <li>
                    <span class="leader-name">{entry.username.clone()}</span>
                    <span class="leader-count">{entry.referrals.to_string()}</span>
                    <span class="leader-balance">{format!("{:.2}", entry.balance)}</span>
                </li>
            })}
        </ol>
    }
}
