use p256::ecdsa::VerifyingKey;

use super::{length_prefixed, read_signature, Reader};
use crate::{crypto, FormatError, U2fError};

/// Request payload to register a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// SHA-256 of the client data, which embeds the challenge issued by the relying party
    pub challenge: [u8; 32],
    /// SHA-256 of the application identity
    pub application: [u8; 32],
}

impl RegisterRequest {
    /// Length of an encoded registration request.
    pub const LEN: usize = 64;

    /// Encode as `challenge | application`.
    pub fn encode(&self) -> Vec<u8> {
        self.challenge
            .iter()
            .chain(self.application.iter())
            .copied()
            .collect()
    }

    /// Decode exactly [`Self::LEN`] bytes.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(data);
        let challenge = reader.array()?;
        let application = reader.array()?;
        reader.finish()?;
        Ok(Self {
            challenge,
            application,
        })
    }
}

impl TryFrom<&[u8]> for RegisterRequest {
    type Error = FormatError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::decode(data)
    }
}

/// Register response payload
///
/// This message is output by the U2F token once it created a new keypair in response to the
/// registration request message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterResponse {
    // Reserved byte, value 0x05 which is added in the `encode` method
    /// The user's new public key, an uncompressed point on the P-256 curve.
    pub public_key: PublicKey,

    // Key handle length byte, unsigned (0-255), added in the `encode` method
    /// Handle that allows the U2F token to identify the generated key pair.
    pub key_handle: Vec<u8>,

    /// Certificate in X.509 DER format. Parsing the certificate unambiguously establishes its
    /// ending.
    pub attestation_certificate: Vec<u8>,

    /// DER encoded ECDSA signature by the attestation key over
    /// [`encode_registration_signed_bytes`].
    pub signature: Vec<u8>,
}

/// Reserved first byte of every registration response.
pub const REGISTER_RESPONSE_RESERVED: u8 = 0x05;

impl RegisterResponse {
    /// Encode the response to its raw message format.
    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        Ok([REGISTER_RESPONSE_RESERVED]
            .into_iter()
            .chain(self.public_key.encode())
            .chain(length_prefixed(&self.key_handle)?)
            .chain(self.attestation_certificate.iter().copied())
            .chain(self.signature.iter().copied())
            .collect())
    }

    /// Decode a raw registration response.
    ///
    /// The attestation certificate is parsed greedily, everything after it is the signature.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(data);
        let reserved = reader.byte()?;
        if reserved != REGISTER_RESPONSE_RESERVED {
            return Err(FormatError::InvalidReservedByte(reserved));
        }
        let public_key = PublicKey::decode(reader.take(PublicKey::LEN)?)?;
        let key_handle = reader.length_prefixed()?.to_vec();

        let remaining = reader.rest();
        let certificate_len =
            crypto::certificate_length(remaining).map_err(|_| FormatError::InvalidCertificate)?;
        let mut reader = Reader::new(remaining);
        let attestation_certificate = reader.take(certificate_len)?.to_vec();
        let signature = read_signature(&mut reader)?;
        reader.finish()?;

        Ok(Self {
            public_key,
            key_handle,
            attestation_certificate,
            signature,
        })
    }
}

/// U2F public key is the concatenation of `0x04 | x | y` where `0x04` signifies ecc uncompressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    // magic 0x04 byte which is added in the `encode` method
    /// X coordinate of the ECC public key
    pub x: [u8; 32],
    /// Y coordinate of the ECC public key
    pub y: [u8; 32],
}

impl PublicKey {
    /// Length of the encoded public key.
    pub const LEN: usize = crypto::PUBLIC_KEY_LEN;

    /// Encode a Public key into an iterator
    pub fn encode(self) -> impl Iterator<Item = u8> {
        [0x04].into_iter().chain(self.x).chain(self.y)
    }

    /// The 65 raw bytes of this point.
    pub fn to_vec(self) -> Vec<u8> {
        self.encode().collect()
    }

    /// Decode the raw point. Only the framing is checked here, see [`PublicKey::verifying_key`]
    /// for the curve check.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(data);
        if reader.byte()? != 0x04 {
            return Err(FormatError::InvalidPublicKey);
        }
        let x = reader.array()?;
        let y = reader.array()?;
        reader.finish()?;
        Ok(Self { x, y })
    }

    /// Interpret this point as a P-256 verifying key, rejecting points that are not on the curve.
    pub fn verifying_key(&self) -> Result<VerifyingKey, U2fError> {
        crypto::decode_public_key(&self.to_vec())
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut x = [0; 32];
        let mut y = [0; 32];
        // An uncompressed point always carries both coordinates
        if let (Some(px), Some(py)) = (point.x(), point.y()) {
            x.copy_from_slice(px);
            y.copy_from_slice(py);
        }
        Self { x, y }
    }
}

/// Build the byte string signed by the attestation key during registration:
///
/// 1. A byte reserved for future use [1 byte] with the value 0x00.
/// 2. The application parameter [32 bytes] from the registration request message.
/// 3. The challenge parameter [32 bytes] from the registration request message.
/// 4. The key handle [variable length]. Its length is not included, all other fields being
///    fixed length.
/// 5. The user public key [65 bytes].
pub fn encode_registration_signed_bytes(
    application: &[u8; 32],
    challenge: &[u8; 32],
    key_handle: &[u8],
    public_key: &PublicKey,
) -> Vec<u8> {
    [0x00]
        .into_iter()
        .chain(application.iter().copied())
        .chain(challenge.iter().copied())
        .chain(key_handle.iter().copied())
        .chain(public_key.encode())
        .collect()
}
