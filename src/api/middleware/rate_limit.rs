//! Rate limiting middleware using token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Per-client key: the socket peer address, or the forwarded client address
/// when running behind a trusted proxy.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates the per-IP rate limiter applied to every route.
///
/// # Limits
///
/// - **Rate**: `per_second` requests replenished per second, one every
///   `1000 / per_second` milliseconds (at most 1000 per second)
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Errors
///
/// Returns an error if either limit is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/users", get(list_users_handler))
///     .layer(rate_limit::layer(5, 50, false)?);
/// ```
pub fn layer(
    per_second: u64,
    burst: u32,
    behind_proxy: bool,
) -> anyhow::Result<
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>,
> {
    if per_second == 0 {
        anyhow::bail!("Rate limit and burst size must be greater than 0");
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_interval_ms(per_second))
        .burst_size(burst)
        .key_extractor(ClientIpKeyExtractor::new(behind_proxy))
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Rate limit and burst size must be greater than 0"))?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Milliseconds between two replenished requests for a per-second rate.
fn replenish_interval_ms(per_second: u64) -> u64 {
    (1000 / per_second.max(1)).max(1)
}
