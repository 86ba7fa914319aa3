use std::collections::HashMap;

use tokio::sync::Mutex;
use u2f_types::{encoding, rand::random_vec, SecurityKeyData, SessionData, U2fError};

/// Use this on a type that enables storage of sessions and enrolled security keys.
///
/// Every method takes `&self`: a relying party serves concurrent requests, so implementations
/// synchronize internally. Two operations must be atomic with respect to each other:
/// [`DataStore::take_session_data`] and [`DataStore::update_security_key_counter`].
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait DataStore {
    /// Save a session and mint the id under which it can be taken back.
    async fn store_session_data(&self, session: SessionData) -> Result<String, U2fError>;

    /// Look at a session without consuming it.
    async fn get_session_data(&self, session_id: &str) -> Result<Option<SessionData>, U2fError>;

    /// Remove and return a session. A session can be taken at most once; every later call
    /// returns `None`.
    async fn take_session_data(&self, session_id: &str) -> Result<Option<SessionData>, U2fError>;

    /// Enroll a security key for an account.
    async fn add_security_key(
        &self,
        account_name: &str,
        key: SecurityKeyData,
    ) -> Result<(), U2fError>;

    /// All security keys enrolled for an account, in enrollment order.
    async fn get_security_keys(&self, account_name: &str)
        -> Result<Vec<SecurityKeyData>, U2fError>;

    /// Remove the security key owning `public_key`. Returns whether a key was removed.
    async fn remove_security_key(
        &self,
        account_name: &str,
        public_key: &[u8],
    ) -> Result<bool, U2fError>;

    /// Raise the counter of the security key owning `public_key` to `counter` and return the
    /// updated record.
    ///
    /// Fails with [`U2fError::CounterRegression`] unless `counter` is strictly greater than the
    /// stored one, and with [`U2fError::UnknownKeyHandle`] when no such key is enrolled.
    async fn update_security_key_counter(
        &self,
        account_name: &str,
        public_key: &[u8],
        counter: u32,
    ) -> Result<SecurityKeyData, U2fError>;
}

#[derive(Debug, Default)]
struct Tables {
    sessions: HashMap<String, SessionData>,
    keys: HashMap<String, Vec<SecurityKeyData>>,
}

/// In-memory [`DataStore`]
///
/// All tables sit behind a single lock, so each operation is atomic.
#[derive(Debug, Default)]
pub struct MemoryDataStore {
    tables: Mutex<Tables>,
}

impl MemoryDataStore {
    /// Length in bytes of the random session ids.
    pub const SESSION_ID_LEN: usize = 16;

    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions issued and not taken yet.
    pub async fn pending_sessions(&self) -> usize {
        self.tables.lock().await.sessions.len()
    }
}

#[async_trait::async_trait]
impl DataStore for MemoryDataStore {
    async fn store_session_data(&self, session: SessionData) -> Result<String, U2fError> {
        let mut tables = self.tables.lock().await;
        let session_id = loop {
            let id = encoding::base64url(&random_vec(Self::SESSION_ID_LEN));
            if !tables.sessions.contains_key(&id) {
                break id;
            }
        };
        tables.sessions.insert(session_id.clone(), session);
        Ok(session_id)
    }

    async fn get_session_data(&self, session_id: &str) -> Result<Option<SessionData>, U2fError> {
        Ok(self.tables.lock().await.sessions.get(session_id).cloned())
    }

    async fn take_session_data(&self, session_id: &str) -> Result<Option<SessionData>, U2fError> {
        Ok(self.tables.lock().await.sessions.remove(session_id))
    }

    async fn add_security_key(
        &self,
        account_name: &str,
        key: SecurityKeyData,
    ) -> Result<(), U2fError> {
        self.tables
            .lock()
            .await
            .keys
            .entry(account_name.to_owned())
            .or_default()
            .push(key);
        Ok(())
    }

    async fn get_security_keys(
        &self,
        account_name: &str,
    ) -> Result<Vec<SecurityKeyData>, U2fError> {
        Ok(self
            .tables
            .lock()
            .await
            .keys
            .get(account_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn remove_security_key(
        &self,
        account_name: &str,
        public_key: &[u8],
    ) -> Result<bool, U2fError> {
        let mut tables = self.tables.lock().await;
        let Some(keys) = tables.keys.get_mut(account_name) else {
            return Ok(false);
        };
        let before = keys.len();
        keys.retain(|key| key.public_key.as_slice() != public_key);
        Ok(keys.len() != before)
    }

    async fn update_security_key_counter(
        &self,
        account_name: &str,
        public_key: &[u8],
        counter: u32,
    ) -> Result<SecurityKeyData, U2fError> {
        let mut tables = self.tables.lock().await;
        let key = tables
            .keys
            .get_mut(account_name)
            .and_then(|keys| {
                keys.iter_mut()
                    .find(|key| key.public_key.as_slice() == public_key)
            })
            .ok_or(U2fError::UnknownKeyHandle)?;
        if counter <= key.counter {
            return Err(U2fError::CounterRegression {
                stored: key.counter,
                received: counter,
            });
        }
        key.counter = counter;
        Ok(key.clone())
    }
}
