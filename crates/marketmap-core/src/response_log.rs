//! Logging of provider responses.
//!
//! Every vision and company-data response is recorded under the
//! `marketmap::responses` target so the CLI can route it to the API log
//! file. Bodies are only written when explicitly enabled.

/// Log target for provider responses.
pub const RESPONSE_TARGET: &str = "marketmap::responses";

/// Record a provider response.
pub(crate) fn log_response(source: &str, status: u16, body: &str, include_body: bool) {
    if include_body {
        tracing::info!(target: RESPONSE_TARGET, source, status, "{source} response: {body}");
    } else {
        tracing::info!(
            target: RESPONSE_TARGET,
            source,
            status,
            bytes = body.len(),
            "{source} response received"
        );
    }
}
