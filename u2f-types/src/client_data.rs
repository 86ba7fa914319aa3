use p256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{encoding, FormatError};

/// The request a [`ClientData`] was produced for.
#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientDataType {
    /// Client data of a registration
    #[serde(rename = "navigator.id.finishEnrollment")]
    Registration,
    /// Client data of an authentication
    #[serde(rename = "navigator.id.getAssertion")]
    Authentication,
}

/// The public key of a TLS channel id, as a JSON web key.
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId {
    /// Key type, always `EC`
    pub kty: String,
    /// Curve, always `P-256`
    pub crv: String,
    /// Websafe base64 of the x coordinate
    pub x: String,
    /// Websafe base64 of the y coordinate
    pub y: String,
}

impl From<&VerifyingKey> for ChannelId {
    fn from(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        Self {
            kty: "EC".into(),
            crv: "P-256".into(),
            x: point.x().map(|x| encoding::base64url(x)).unwrap_or_default(),
            y: point.y().map(|y| encoding::base64url(y)).unwrap_or_default(),
        }
    }
}

/// The JSON structure a client builds to bind the server challenge to the calling origin. Its
/// SHA-256 is the challenge parameter of raw U2F requests.
///
/// Servers must hash the exact bytes they receive, never a re-serialization.
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    /// Request type
    pub typ: ClientDataType,
    /// Websafe base64 challenge issued by the server
    pub challenge: String,
    /// TLS channel id, when the browser supports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid_pubkey: Option<ChannelId>,
    /// Origin of the calling page
    pub origin: String,
}

impl ClientData {
    /// Serialize to the JSON string that gets hashed and transmitted.
    pub fn to_json(&self) -> Result<String, FormatError> {
        serde_json::to_string(self).map_err(|_| FormatError::InvalidClientData)
    }

    /// Parse client data exactly as received from the client.
    pub fn from_json(data: &[u8]) -> Result<Self, FormatError> {
        serde_json::from_slice(data).map_err(|_| FormatError::InvalidClientData)
    }

    /// Decode the websafe base64 challenge.
    pub fn challenge_bytes(&self) -> Result<Vec<u8>, FormatError> {
        encoding::try_from_base64url(&self.challenge).ok_or(FormatError::InvalidBase64)
    }
}
