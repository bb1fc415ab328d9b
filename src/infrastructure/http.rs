//! Shared HTTP client plumbing for the upstream adapters.

use reqwest::Client;

use crate::domain::errors::LookupError;
use crate::infrastructure::config::HttpConfig;

/// Builds a client with the configured user agent and timeout.
///
/// # Errors
/// Returns error if the TLS backend cannot be initialised.
pub fn build_client(http: &HttpConfig) -> Result<Client, LookupError> {
    Client::builder()
        .user_agent(&http.user_agent)
        .timeout(http.timeout())
        .build()
        .map_err(|e| LookupError::unexpected(format!("failed to create HTTP client: {e}")))
}

/// Maps a transport-level reqwest failure.
#[must_use]
pub fn map_transport_error(e: &reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::network("request timed out")
    } else if e.is_connect() {
        LookupError::network("failed to connect")
    } else if e.is_decode() {
        LookupError::decode(e.to_string())
    } else {
        LookupError::network(e.to_string())
    }
}
