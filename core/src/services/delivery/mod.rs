//! Background delivery worker module
//!
//! The dispatcher drains the delivery queue for the lifetime of the process
//! and hands each job to a delivery task. A task looks up the staged code
//! for its address and pushes it through the mail transport; failures stay
//! inside the iteration and are handled by the configured delivery policy.

mod config;
mod dispatcher;
mod task;

#[cfg(test)]
mod tests;

pub use config::{DeliveryPolicy, DispatcherConfig};
pub use dispatcher::Dispatcher;
