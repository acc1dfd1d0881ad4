//! Queue module - Redis-list delivery queue

pub mod redis_queue;

pub use redis_queue::RedisJobQueue;
