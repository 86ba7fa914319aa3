use std::sync::Arc;

use p256::ecdsa::SigningKey;
use u2f_authenticator::{Attestation, Authenticator, MemoryStore, MockUserPresence};
use u2f_server::{MemoryDataStore, Server, TrustStore};
use u2f_types::{
    encoding::try_from_hex, test_vectors, Bytes, ChannelId, ClientData, ClientDataType,
    ControlFlags, RegistrationRequest, SecurityKeyData, SignRequest, U2fError,
};

use crate::{relying_party::MockRelyingParty, Client, OriginVerifier};

const ORIGIN: &str = "https://example.com";

fn vector(hex: &str) -> Vec<u8> {
    try_from_hex(hex).unwrap()
}

fn attestation() -> Attestation {
    Attestation::from_bytes(
        &vector(test_vectors::VENDOR_CERTIFICATE_HEX),
        &vector(test_vectors::VENDOR_PRIVATE_KEY_HEX),
    )
    .unwrap()
}

fn token() -> Authenticator<MemoryStore, ControlFlags> {
    Authenticator::new(attestation(), MemoryStore::new(), ControlFlags::USER_PRESENCE)
}

fn server_for(origin: &str) -> Arc<Server<MemoryDataStore>> {
    let mut trust_store = TrustStore::new();
    trust_store
        .add_trusted_certificate(vector(test_vectors::VENDOR_CERTIFICATE_HEX))
        .unwrap();
    Arc::new(Server::new(MemoryDataStore::new(), [origin]).with_trust_store(trust_store))
}

fn registration_request(version: &str, app_id: &str) -> RegistrationRequest {
    RegistrationRequest {
        version: version.into(),
        challenge: Bytes::from(vec![7; 32]),
        app_id: app_id.into(),
        session_id: "session".into(),
    }
}

#[tokio::test]
async fn register_then_authenticate() {
    // Arrange
    let server = server_for(ORIGIN);
    let mut client = Client::new(server.clone(), token());

    // Act
    let enrolled = client.register(ORIGIN, "alice").await.unwrap();

    // Assert
    assert_eq!(enrolled.counter, 0);
    assert!(enrolled.enrollment_time > 0);
    assert_eq!(
        enrolled.attestation_certificate,
        Bytes::from(vector(test_vectors::VENDOR_CERTIFICATE_HEX))
    );

    for expected in 1..=2 {
        // Act
        let key = client.authenticate(ORIGIN, "alice").await.unwrap();

        // Assert
        assert_eq!(key.key_handle, enrolled.key_handle);
        assert_eq!(key.counter, expected);
    }
    assert_eq!(server.get_all_security_keys("alice").await.unwrap()[0].counter, 2);
}

#[tokio::test]
async fn handles_of_other_tokens_are_skipped() {
    let server = server_for(ORIGIN);
    let mut first = Client::new(server.clone(), token());
    let mut second = Client::new(server.clone(), token());
    let first_key = first.register(ORIGIN, "alice").await.unwrap();
    let second_key = second.register(ORIGIN, "alice").await.unwrap();

    // The first sign request names the key of the first token
    let key = second.authenticate(ORIGIN, "alice").await.unwrap();

    assert_eq!(key.public_key, second_key.public_key);
    assert_eq!(key.counter, 1);
    let keys = server.get_all_security_keys("alice").await.unwrap();
    assert_eq!(keys[0].public_key, first_key.public_key);
    assert_eq!(keys[0].counter, 0);
}

#[tokio::test]
async fn unknown_tokens_and_accounts_fail() {
    let server = server_for(ORIGIN);
    let mut enrolled = Client::new(server.clone(), token());
    enrolled.register(ORIGIN, "alice").await.unwrap();
    let mut stranger = Client::new(server.clone(), token());

    assert_eq!(
        stranger.authenticate(ORIGIN, "alice").await,
        Err(U2fError::UnknownKeyHandle)
    );
    assert_eq!(
        stranger.authenticate(ORIGIN, "bob").await,
        Err(U2fError::NoRegisteredKeys)
    );
}

#[tokio::test]
async fn absent_user_aborts_registration() {
    let server = server_for(ORIGIN);
    let token = Authenticator::new(attestation(), MemoryStore::new(), MockUserPresence::absent(1));
    let mut client = Client::new(server.clone(), token);

    let result = client.register(ORIGIN, "alice").await;

    assert_eq!(result, Err(U2fError::UserPresenceDenied));
    assert!(server.get_all_security_keys("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_versions_are_refused() {
    let mut server = MockRelyingParty::new();
    server
        .expect_get_registration_request()
        .returning(|_, app_id| Ok(registration_request("U2F_V1", app_id)))
        .times(1);
    server
        .expect_get_sign_request()
        .returning(|_, app_id| {
            Ok(vec![SignRequest {
                version: "U2F_V3".into(),
                challenge: Bytes::from(vec![7; 32]),
                app_id: app_id.into(),
                key_handle: Bytes::from(vec![1; 32]),
                session_id: "session".into(),
            }])
        })
        .times(1);
    let mut client = Client::new(server, token());

    assert_eq!(
        client.register(ORIGIN, "alice").await,
        Err(U2fError::UnsupportedVersion("U2F_V1".into()))
    );
    assert_eq!(
        client.authenticate(ORIGIN, "alice").await,
        Err(U2fError::UnsupportedVersion("U2F_V3".into()))
    );
}

#[tokio::test]
async fn foreign_app_ids_are_refused() {
    let mut server = MockRelyingParty::new();
    server
        .expect_get_registration_request()
        .returning(|_, _| Ok(registration_request("U2F_V2", "https://other.com")))
        .times(1);
    let mut client = Client::new(server, token());

    let result = client.register(ORIGIN, "alice").await;

    assert_eq!(
        result,
        Err(U2fError::OriginMismatch {
            origin: ORIGIN.into(),
            app_id: "https://other.com".into(),
        })
    );
}

#[tokio::test]
async fn client_data_carries_the_channel_id() {
    // Arrange
    let channel_key = SigningKey::random(&mut rand::thread_rng());
    let channel_id = ChannelId::from(channel_key.verifying_key());
    let expected = channel_id.clone();
    let mut server = MockRelyingParty::new();
    server
        .expect_get_registration_request()
        .returning(|_, app_id| Ok(registration_request("U2F_V2", app_id)))
        .times(1);
    server
        .expect_process_registration_response()
        .withf(move |response, _| {
            let client_data = ClientData::from_json(&response.client_data).unwrap();
            client_data.typ == ClientDataType::Registration
                && client_data.origin == ORIGIN
                && client_data.challenge_bytes() == Ok(vec![7; 32])
                && client_data.cid_pubkey.as_ref() == Some(&expected)
                && response.session_id == "session"
        })
        .returning(|_, now| {
            Ok(SecurityKeyData {
                key_handle: Bytes::from(vec![1]),
                public_key: Bytes::from(vec![4; 65]),
                attestation_certificate: Bytes::from(vec![0x30]),
                counter: 0,
                enrollment_time: now,
            })
        })
        .times(1);
    let mut client = Client::new(server, token()).with_channel_id(channel_id);

    // Act
    let result = client.register(ORIGIN, "alice").await;

    // Assert
    assert!(result.unwrap().enrollment_time > 0);
}

#[tokio::test]
async fn localhost_needs_to_be_allowed() {
    let origin = "http://localhost:8080";
    let server = server_for(origin);

    let mut strict = Client::new(server.clone(), token());
    assert!(matches!(
        strict.register(origin, "alice").await,
        Err(U2fError::OriginMismatch { .. })
    ));

    let mut relaxed = Client::new(server.clone(), token()).allows_insecure_localhost(true);
    assert!(relaxed.register(origin, "alice").await.is_ok());
    assert!(relaxed.authenticate(origin, "alice").await.is_ok());
}

struct SameOriginOnly;

impl OriginVerifier for SameOriginOnly {
    fn validate_origin(&self, app_id: &str, origin: &str) -> Result<(), U2fError> {
        if app_id == origin {
            Ok(())
        } else {
            Err(U2fError::OriginMismatch {
                origin: origin.into(),
                app_id: app_id.into(),
            })
        }
    }
}

#[tokio::test]
async fn origin_verifier_is_pluggable() {
    // The test vector origin is plain http, which the default verifier refuses
    let server = server_for(test_vectors::ORIGIN);
    let mut client = Client::new(server, token()).with_origin_verifier(SameOriginOnly);

    client.register(test_vectors::ORIGIN, "alice").await.unwrap();
    let key = client.authenticate(test_vectors::ORIGIN, "alice").await.unwrap();

    assert_eq!(key.counter, 1);
}
