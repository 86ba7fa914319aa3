//! Collection of the cryptographic primitives U2F is built on: SHA-256, ECDSA over P-256 with
//! DER encoded signatures, and the few X.509 operations needed to verify attestation.

use p256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use sha2::{Digest, Sha256};
use x509_parser::{certificate::X509Certificate, parse_x509_certificate};

use crate::{FormatError, U2fError};

/// Length of an uncompressed SEC1 encoded P-256 point, `0x04 | x | y`.
pub const PUBLIC_KEY_LEN: usize = 65;

const UNCOMPRESSED_POINT: u8 = 0x04;

/// Compute the SHA-256 of the given `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Sign `data` with ECDSA P-256 over its SHA-256 digest, returning the DER encoded signature.
pub fn sign(key: &SigningKey, data: &[u8]) -> Vec<u8> {
    let signature: Signature = key.sign(data);
    signature.to_der().as_bytes().to_vec()
}

/// Verify a DER encoded signature over `data`.
///
/// A signature that does not verify, or that is not even DER, is reported as `false`.
pub fn verify(key: &VerifyingKey, data: &[u8], signature: &[u8]) -> bool {
    let Ok(signature) = Signature::from_der(signature) else {
        return false;
    };
    key.verify(data, &signature).is_ok()
}

/// Interpret a raw 65 byte uncompressed point as a P-256 public key.
///
/// Compressed points and points which are not on the curve are rejected.
pub fn decode_public_key(raw: &[u8]) -> Result<VerifyingKey, U2fError> {
    if raw.len() != PUBLIC_KEY_LEN || raw[0] != UNCOMPRESSED_POINT {
        return Err(FormatError::InvalidPublicKey.into());
    }
    VerifyingKey::from_sec1_bytes(raw).map_err(|_| FormatError::InvalidPublicKey.into())
}

/// Encode a public key as the raw 65 byte uncompressed point used on the wire.
pub fn encode_public_key(key: &VerifyingKey) -> Vec<u8> {
    key.to_encoded_point(false).as_bytes().to_vec()
}

fn parse_certificate(der: &[u8]) -> Result<(&[u8], X509Certificate<'_>), U2fError> {
    parse_x509_certificate(der).map_err(|_| FormatError::InvalidCertificate.into())
}

/// Length of the DER encoded certificate at the start of `bytes`.
///
/// The certificate is parsed greedily, so whatever follows it is left untouched.
pub fn certificate_length(bytes: &[u8]) -> Result<usize, U2fError> {
    let (remaining, _) = parse_certificate(bytes)?;
    Ok(bytes.len() - remaining.len())
}

/// Extract the P-256 public key of a DER encoded certificate.
pub fn certificate_public_key(der: &[u8]) -> Result<VerifyingKey, U2fError> {
    let (_, certificate) = parse_certificate(der)?;
    VerifyingKey::from_sec1_bytes(certificate.public_key().subject_public_key.data.as_ref())
        .map_err(|_| FormatError::InvalidCertificate.into())
}

/// Verify a DER encoded signature over `data` with the public key of a DER encoded certificate.
///
/// Fails only when the certificate itself cannot be used.
pub fn verify_with_certificate(
    certificate: &[u8],
    data: &[u8],
    signature: &[u8],
) -> Result<bool, U2fError> {
    let key = certificate_public_key(certificate)?;
    Ok(verify(&key, data, signature))
}

/// Whether `certificate` names `issuer` as its issuer and carries a valid signature from the
/// issuer's key. Any signature algorithm x509-parser can verify is accepted, so RSA and P-384
/// roots work as well as P-256 ones. Certificates that cannot be parsed are never issued by
/// anything.
pub fn is_issued_by(certificate: &[u8], issuer: &[u8]) -> bool {
    let (Ok((_, child)), Ok((_, parent))) =
        (parse_certificate(certificate), parse_certificate(issuer))
    else {
        return false;
    };
    child.issuer().as_raw() == parent.subject().as_raw()
        && child.verify_signature(Some(parent.public_key())).is_ok()
}
