use hmac::{Hmac, Mac};
use p256::ecdsa::SigningKey;
use sha2::Sha256;
use u2f_types::{
    crypto, encoding::try_from_hex, test_vectors, u2f::PublicKey, ControlFlags, U2fError,
};

use super::{Attestation, Authenticator};
use crate::MemoryStore;

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

#[test]
fn attestation_accepts_the_certified_key() {
    let attestation = attestation();
    assert_eq!(
        attestation.certificate(),
        vector(test_vectors::VENDOR_CERTIFICATE_HEX).as_slice()
    );

    let signature = attestation.sign(b"attested");
    assert!(
        crypto::verify_with_certificate(attestation.certificate(), b"attested", &signature)
            .unwrap()
    );
}

#[test]
fn attestation_rejects_a_foreign_key() {
    let foreign = SigningKey::random(&mut rand::thread_rng());

    let result = Attestation::new(vector(test_vectors::VENDOR_CERTIFICATE_HEX), foreign);

    assert!(matches!(result, Err(U2fError::InvalidKey)));
}

#[test]
fn attestation_rejects_garbage() {
    assert!(matches!(
        Attestation::from_bytes(
            &[0x30, 0x00],
            &vector(test_vectors::VENDOR_PRIVATE_KEY_HEX)
        ),
        Err(U2fError::Format(_))
    ));
    assert!(matches!(
        Attestation::from_bytes(&vector(test_vectors::VENDOR_CERTIFICATE_HEX), &[0; 32]),
        Err(U2fError::InvalidKey)
    ));
}

#[test]
fn key_handle_is_keyed_by_the_device_secret() {
    // Arrange
    let secret = [0x42; 32];
    let authenticator =
        Authenticator::new(attestation(), MemoryStore::new(), ControlFlags::USER_PRESENCE)
            .with_key_handle_secret(secret);
    let public_key = PublicKey::decode(&vector(test_vectors::USER_PUBLIC_KEY_ENROLL_HEX)).unwrap();
    let application = [3; 32];

    // Act
    let handle = authenticator.key_handle(&application, &public_key).unwrap();

    // Assert
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&secret).unwrap();
    mac.update(&application);
    mac.update(&vector(test_vectors::USER_PUBLIC_KEY_ENROLL_HEX));
    assert_eq!(handle, mac.finalize().into_bytes().to_vec());

    let other =
        Authenticator::new(attestation(), MemoryStore::new(), ControlFlags::USER_PRESENCE);
    assert_ne!(other.key_handle(&application, &public_key).unwrap(), handle);
    assert_ne!(authenticator.key_handle(&[4; 32], &public_key).unwrap(), handle);
}
