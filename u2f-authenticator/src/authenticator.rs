use hmac::{Hmac, Mac};
use p256::ecdsa::SigningKey;
use sha2::Sha256;
use u2f_types::{crypto, u2f::PublicKey, U2fError};
use zeroize::Zeroizing;

use crate::{KeyStore, UserPresence};

#[cfg(test)]
mod tests;

/// The attestation certificate of a token together with its private key.
///
/// Every token of a batch shares the same attestation key pair, which allows relying parties to
/// tell genuine hardware apart without being able to tell two tokens of a batch apart.
pub struct Attestation {
    certificate: Vec<u8>,
    signing_key: SigningKey,
}

impl Attestation {
    /// Pair a DER encoded certificate with its private key.
    ///
    /// Returns [`U2fError::InvalidKey`] when the key is not the one certified.
    pub fn new(certificate: Vec<u8>, signing_key: SigningKey) -> Result<Self, U2fError> {
        let certified = crypto::certificate_public_key(&certificate)?;
        if &certified != signing_key.verifying_key() {
            return Err(U2fError::InvalidKey);
        }
        Ok(Self {
            certificate,
            signing_key,
        })
    }

    /// Same as [`Attestation::new`] with the private key given as a raw 32 byte scalar.
    pub fn from_bytes(certificate: &[u8], private_key: &[u8]) -> Result<Self, U2fError> {
        let signing_key = SigningKey::from_slice(private_key).map_err(|_| U2fError::InvalidKey)?;
        Self::new(certificate.to_vec(), signing_key)
    }

    /// The DER encoded attestation certificate.
    pub fn certificate(&self) -> &[u8] {
        &self.certificate
    }

    pub(crate) fn sign(&self, data: &[u8]) -> Vec<u8> {
        crypto::sign(&self.signing_key, data)
    }
}

/// A virtual U2F token with all the necessary state and information.
pub struct Authenticator<S, U> {
    /// Batch attestation used to sign registrations
    attestation: Attestation,
    /// Provides key pair and counter storage capabilities
    store: S,
    /// Provider of the test of user presence
    user_presence: U,
    /// Device secret keying the key handle derivation
    key_handle_secret: Zeroizing<[u8; 32]>,
}

impl<S, U> Authenticator<S, U>
where
    S: KeyStore,
    U: UserPresence,
{
    /// Create a token with an attestation, a backing storage and a user presence sensor.
    ///
    /// The device secret is random, so key handles issued by one instance are meaningless to
    /// another unless [`Authenticator::with_key_handle_secret`] is used.
    pub fn new(attestation: Attestation, store: S, user_presence: U) -> Self {
        Self {
            attestation,
            store,
            user_presence,
            key_handle_secret: Zeroizing::new(u2f_types::rand::random_array()),
        }
    }

    /// Builder method for setting the device secret from which key handles are derived.
    pub fn with_key_handle_secret(self, secret: [u8; 32]) -> Self {
        Self {
            key_handle_secret: Zeroizing::new(secret),
            ..self
        }
    }

    /// Access the [`KeyStore`] to look into what is stored.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Exclusively access the [`KeyStore`] to look into what is stored and modify it if needed.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Access the token's [`Attestation`].
    pub fn attestation(&self) -> &Attestation {
        &self.attestation
    }

    pub(crate) fn user_presence(&self) -> &U {
        &self.user_presence
    }

    /// Derive the key handle of a new key pair: `HMAC-SHA256(secret, application | public key)`.
    pub(crate) fn key_handle(
        &self,
        application: &[u8; 32],
        public_key: &PublicKey,
    ) -> Result<Vec<u8>, U2fError> {
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&*self.key_handle_secret)
            .map_err(|_| U2fError::InvalidKey)?;
        mac.update(application);
        mac.update(&public_key.to_vec());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
