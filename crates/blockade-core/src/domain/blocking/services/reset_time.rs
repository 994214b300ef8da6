// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::warn;

/// Derives when a rate-limited run may continue.
///
/// `hint` is the raw reset header (unix seconds) of the rate-limited response. It is only
/// trusted if it lies after `now` and no further than `max_cooldown` ahead. Anything else,
/// including a missing hint, yields `now + default_cooldown`.
pub fn resume_time(
    hint: Option<&str>,
    now: DateTime<Utc>,
    default_cooldown: Duration,
    max_cooldown: Duration,
) -> DateTime<Utc> {
    let fallback = offset(now, default_cooldown);

    let Some(hint) = hint else {
        return fallback;
    };

    let Some(reset_at) = hint
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| *secs > 0)
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    else {
        warn!("Ignoring malformed rate limit reset hint '{hint}'.");
        return fallback;
    };

    if reset_at <= now || reset_at > offset(now, max_cooldown) {
        warn!("Ignoring out-of-range rate limit reset hint {reset_at} (now is {now}).");
        return fallback;
    }

    reset_at
}

/// `now + duration`, saturating at one day for durations chrono cannot represent.
fn offset(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|duration| now.checked_add_signed(duration))
        .unwrap_or_else(|| now + chrono::Duration::days(1))
}
