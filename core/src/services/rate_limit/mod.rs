//! Per-client admission control module
//!
//! A token-bucket gate sits in front of every inbound request. Each client
//! key gets an independent bucket; the decision is O(1) and never fails,
//! it only allows or denies.

mod limiter;
mod token_bucket;

pub use limiter::RateLimiter;
pub use token_bucket::TokenBucket;
