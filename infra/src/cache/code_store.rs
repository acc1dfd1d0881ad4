//! Redis-backed verification code store
//!
//! Stores one live code per address under `verification:code:{address}`
//! with a TTL evaluated server-side; re-staging overwrites the entry and
//! resets the expiry.

use async_trait::async_trait;
use tracing::debug;

use vr_core::services::verification::CodeStore;
use vr_shared::utils::validation::mask_email;

use super::redis_client::RedisClient;

/// Verification code store backed by Redis
#[derive(Clone)]
pub struct RedisCodeStore {
    client: RedisClient,
}

impl RedisCodeStore {
    /// Create a new code store over an existing Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn format_code_key(address: &str) -> String {
        format!("verification:code:{}", address)
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn store_code(
        &self,
        address: &str,
        code: &str,
        ttl_seconds: u64,
    ) -> Result<(), String> {
        debug!(
            address = %mask_email(address),
            ttl_seconds = ttl_seconds,
            "Storing verification code"
        );
        self.client
            .set_with_expiry(&Self::format_code_key(address), code, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get_code(&self, address: &str) -> Result<Option<String>, String> {
        self.client
            .get(&Self::format_code_key(address))
            .await
            .map_err(|e| e.to_string())
    }

    async fn remove_code(&self, address: &str) -> Result<bool, String> {
        debug!(address = %mask_email(address), "Removing verification code");
        self.client
            .delete(&Self::format_code_key(address))
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_key_format() {
        assert_eq!(
            RedisCodeStore::format_code_key("a@x.com"),
            "verification:code:a@x.com"
        );
    }
}
