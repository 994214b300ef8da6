// blockade/blockade-core
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// Result of a single block mutation, as classified by the adapter wrapping the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Blocked,
    /// The remote API refuses further mutations until its window resets. `reset_hint` is the
    /// raw, untrusted unix-seconds value of the reset header, if any.
    RateLimited { reset_hint: Option<String> },
    /// The remote API reported that one of its upstreams is unavailable.
    UpstreamUnavailable,
    /// The capability was rejected as expired or invalid.
    AuthExpired,
    Failed {
        status: Option<u16>,
        message: String,
    },
}

/// Result of a multi-target block mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchBlockOutcome {
    /// Every target of the batch was blocked.
    Blocked,
    RateLimited { reset_hint: Option<String> },
    /// The batch failed as a whole or in part. Its members are retried one by one.
    Failed { message: String },
}

impl BlockOutcome {
    /// Classifies a failed HTTP-style response.
    ///
    /// Rate limits are signalled by status 429 or a `RateLimitExceeded` error name, upstream
    /// outages by 502/503/504 or an `UpstreamFailure` error name, and expired credentials by
    /// 401 or an `ExpiredToken`/`InvalidToken` error name.
    pub fn from_error_response(
        status: Option<u16>,
        message: impl Into<String>,
        reset_hint: Option<String>,
    ) -> Self {
        let message = message.into();

        if status == Some(429) || message.contains("RateLimitExceeded") {
            return BlockOutcome::RateLimited { reset_hint };
        }
        if matches!(status, Some(502..=504)) || message.contains("UpstreamFailure") {
            return BlockOutcome::UpstreamUnavailable;
        }
        if status == Some(401) || message.contains("ExpiredToken") || message.contains("InvalidToken")
        {
            return BlockOutcome::AuthExpired;
        }

        BlockOutcome::Failed { status, message }
    }
}
