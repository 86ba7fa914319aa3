use std::collections::HashMap;

#[cfg(any(feature = "tokio", test))]
use std::sync::Arc;

use p256::SecretKey;
use u2f_types::U2fError;

/// A key pair created during registration, together with the application it is scoped to.
#[derive(Clone)]
pub struct KeyEntry {
    /// SHA-256 of the application id the key pair was registered for
    pub application: [u8; 32],
    /// The private half of the user key pair
    pub private_key: SecretKey,
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry")
            .field("application", &u2f_types::encoding::hex(&self.application))
            .finish_non_exhaustive()
    }
}

/// Use this on a type that enables storage and fetching of the token's key pairs and counter.
#[async_trait::async_trait]
pub trait KeyStore {
    /// Save a new key pair under its key handle.
    async fn store_key(&mut self, key_handle: Vec<u8>, entry: KeyEntry) -> Result<(), U2fError>;

    /// Find the key pair of a key handle, `None` when this token never issued it.
    async fn get_key(&self, key_handle: &[u8]) -> Result<Option<KeyEntry>, U2fError>;

    /// Increment the device global counter and return its new value.
    ///
    /// The counter must never wrap around.
    async fn increment_counter(&mut self) -> Result<u32, U2fError>;
}

/// In-memory store for key pairs
///
/// Useful for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    keys: HashMap<Vec<u8>, KeyEntry>,
    counter: u32,
}

impl MemoryStore {
    /// Create an empty store with its counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose counter starts at `counter`.
    pub fn with_counter(counter: u32) -> Self {
        Self {
            keys: HashMap::new(),
            counter,
        }
    }

    /// Current value of the global counter.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Number of key pairs held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key pair was registered yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait::async_trait]
impl KeyStore for MemoryStore {
    async fn store_key(&mut self, key_handle: Vec<u8>, entry: KeyEntry) -> Result<(), U2fError> {
        self.keys.insert(key_handle, entry);
        Ok(())
    }

    async fn get_key(&self, key_handle: &[u8]) -> Result<Option<KeyEntry>, U2fError> {
        Ok(self.keys.get(key_handle).cloned())
    }

    async fn increment_counter(&mut self) -> Result<u32, U2fError> {
        self.counter = self
            .counter
            .checked_add(1)
            .ok_or_else(|| U2fError::Storage("counter exhausted".into()))?;
        Ok(self.counter)
    }
}

#[cfg(any(feature = "tokio", test))]
#[async_trait::async_trait]
impl<S: KeyStore + Send + Sync> KeyStore for Arc<tokio::sync::Mutex<S>> {
    async fn store_key(&mut self, key_handle: Vec<u8>, entry: KeyEntry) -> Result<(), U2fError> {
        self.lock().await.store_key(key_handle, entry).await
    }

    async fn get_key(&self, key_handle: &[u8]) -> Result<Option<KeyEntry>, U2fError> {
        self.lock().await.get_key(key_handle).await
    }

    async fn increment_counter(&mut self) -> Result<u32, U2fError> {
        self.lock().await.increment_counter().await
    }
}

#[cfg(any(feature = "tokio", test))]
#[async_trait::async_trait]
impl<S: KeyStore + Send + Sync> KeyStore for tokio::sync::Mutex<S> {
    async fn store_key(&mut self, key_handle: Vec<u8>, entry: KeyEntry) -> Result<(), U2fError> {
        self.get_mut().store_key(key_handle, entry).await
    }

    async fn get_key(&self, key_handle: &[u8]) -> Result<Option<KeyEntry>, U2fError> {
        self.lock().await.get_key(key_handle).await
    }

    async fn increment_counter(&mut self) -> Result<u32, U2fError> {
        self.get_mut().increment_counter().await
    }
}
