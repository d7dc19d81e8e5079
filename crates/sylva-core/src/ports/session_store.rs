use async_trait::async_trait;

/// Keys under which the session is persisted.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER: &str = "user";

    pub const ALL: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER];
}

/// Durable client-side storage for session data.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get a stored value.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
