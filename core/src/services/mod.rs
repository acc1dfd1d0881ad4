//! Business services containing domain logic and use cases.

pub mod delivery;
pub mod rate_limit;
pub mod verification;

// Re-export commonly used types
pub use delivery::{DeliveryPolicy, Dispatcher, DispatcherConfig};
pub use rate_limit::{RateLimiter, TokenBucket};
pub use verification::{
    CodeStore, JobQueue, Mailer, VerificationConfig, VerificationService,
};
