//! Shared HTTP client with process-wide timeouts.
//!
//! Every backend call goes through one pooled client so no request can
//! hang a control indefinitely: requests are bounded by
//! [`DEFAULT_TIMEOUT_SECS`] end to end, connects by a shorter limit.

use once_cell::sync::OnceCell;
use std::time::Duration;

/// Request timeout applied to every backend call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connect timeout (fail fast when the backend is unreachable)
const CONNECT_TIMEOUT_SECS: u64 = 10;

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Get the shared HTTP client, building it on first use.
pub fn get_http_client() -> Result<&'static reqwest::Client, reqwest::Error> {
    HTTP_CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
    })
}
