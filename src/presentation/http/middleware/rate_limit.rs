// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// One token replenished every this many seconds, per client IP.
const REPLENISH_INTERVAL_SECS: u64 = 2;
const BURST_SIZE: u32 = 30;

pub type ViewRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-IP limiter for view counting. The client address comes from
/// forwarding headers or the peer address, so the server must be run with
/// connect info.
pub fn rate_limit_layer() -> Option<ViewRateLimitLayer> {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(REPLENISH_INTERVAL_SECS);
    builder.burst_size(BURST_SIZE);
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(config))
}
