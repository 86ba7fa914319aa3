//! JSON messages exchanged between a relying party and a browser-style client.

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::Bytes;

/// Protocol version announced in every request.
pub const U2F_VERSION: &str = "U2F_V2";

/// Request to enroll a new security key.
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Always [`U2F_VERSION`]
    pub version: String,
    /// Random challenge issued by the server
    pub challenge: Bytes,
    /// Application id the key will be registered for
    pub app_id: String,
    /// Opaque id of the server side session
    pub session_id: String,
}

/// Answer of the client to a [`RegistrationRequest`].
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Raw registration response of the key
    pub registration_data: Bytes,
    /// The exact client data bytes whose hash the key signed
    pub client_data: Bytes,
    /// Session id copied from the request
    pub session_id: String,
}

/// Request to authenticate with one enrolled security key.
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    /// Always [`U2F_VERSION`]
    pub version: String,
    /// Random challenge issued by the server
    pub challenge: Bytes,
    /// Application id the key was registered for
    pub app_id: String,
    /// Key handle of the enrolled key
    pub key_handle: Bytes,
    /// Opaque id of the server side session
    pub session_id: String,
}

/// Answer of the client to a [`SignRequest`].
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    /// Key handle copied from the request
    pub key_handle: Bytes,
    /// Raw authentication response of the key
    pub signature_data: Bytes,
    /// The exact client data bytes whose hash the key signed
    pub client_data: Bytes,
    /// Session id copied from the request
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_response_uses_camel_case_and_websafe_base64() {
        let response = SignResponse {
            key_handle: Bytes::from(vec![0xfb, 0xff]),
            signature_data: Bytes::from(vec![0x01]),
            client_data: Bytes::from(b"{}".to_vec()),
            session_id: "42".into(),
        };
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(
            json,
            r#"{"keyHandle":"-_8","signatureData":"AQ","clientData":"e30","sessionId":"42"}"#
        );
        assert_eq!(serde_json::from_str::<SignResponse>(&json).unwrap(), response);
    }

    #[test]
    fn registration_request_accepts_padded_challenge() {
        let json = r#"{"version":"U2F_V2","challenge":"AAEC","appId":"https://a.com","sessionId":"1"}"#;
        let request: RegistrationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.version, U2F_VERSION);
        assert_eq!(request.challenge, Bytes::from(vec![0, 1, 2]));

        let padded = json.replace("AAEC", "AAE=");
        let request: RegistrationRequest = serde_json::from_str(&padded).unwrap();
        assert_eq!(request.challenge, Bytes::from(vec![0, 1]));
    }
}
