use serde::{Deserialize, Serialize};

use crate::Bytes;

/// A security key enrolled for an account.
///
/// The key handle and public key never change once enrolled; only the counter moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityKeyData {
    /// Key handle issued by the authenticator
    pub key_handle: Bytes,
    /// Raw 65 byte uncompressed user public key
    pub public_key: Bytes,
    /// DER encoded attestation certificate presented at enrollment
    pub attestation_certificate: Bytes,
    /// Highest counter value accepted so far
    pub counter: u32,
    /// Enrollment time in milliseconds since the Unix epoch
    pub enrollment_time: u64,
}

/// What a session was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum SessionKind {
    /// Enrollment of a new key
    Enroll,
    /// Authentication with the enrolled key owning `public_key`
    #[serde(rename_all = "camelCase")]
    Sign {
        /// Raw public key of the challenged key
        public_key: Bytes,
    },
}

/// Ephemeral binding of a challenge to an account, consumed by exactly one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Account the session belongs to
    pub account_name: String,
    /// Application id of the request
    pub app_id: String,
    /// Challenge issued to the client
    pub challenge: Bytes,
    /// Registration or authentication
    pub kind: SessionKind,
}

impl SessionData {
    /// Session for enrolling a new key.
    pub fn enroll(
        account_name: impl Into<String>,
        app_id: impl Into<String>,
        challenge: Bytes,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            app_id: app_id.into(),
            challenge,
            kind: SessionKind::Enroll,
        }
    }

    /// Session for authenticating with the key owning `public_key`.
    pub fn sign(
        account_name: impl Into<String>,
        app_id: impl Into<String>,
        challenge: Bytes,
        public_key: Bytes,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            app_id: app_id.into(),
            challenge,
            kind: SessionKind::Sign { public_key },
        }
    }

    /// The public key this session challenges, for authentication sessions.
    pub fn public_key(&self) -> Option<&Bytes> {
        match &self.kind {
            SessionKind::Enroll => None,
            SessionKind::Sign { public_key } => Some(public_key),
        }
    }
}
