//! Referral capture helpers.

/// Referrer named by a `?ref=` query parameter.
#[must_use]
pub fn referrer_from_query(query: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "ref")
        .map(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .map_or_else(|_| value.to_string(), |decoded| decoded.into_owned())
        })
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Whether a click should be recorded for `referrer`.
///
/// Self-referrals are skipped.
#[must_use]
pub fn should_record_click(referrer: Option<&str>, user_id: Option<&str>) -> bool {
    matches!((referrer, user_id), (Some(referrer), Some(user)) if referrer != user)
}
