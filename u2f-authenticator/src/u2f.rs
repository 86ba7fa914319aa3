//! Follows U2F 1.2 <https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html>

use p256::{ecdsa::SigningKey, SecretKey};
use u2f_types::{
    crypto,
    encoding::hex,
    u2f::{
        encode_authentication_signed_bytes, encode_registration_signed_bytes,
        AuthenticationParameter, AuthenticationRequest, AuthenticationResponse, PublicKey,
        RegisterRequest, RegisterResponse, Request, RequestPayload, ResponseStatusWords, Version,
    },
    U2fError,
};

use crate::{Authenticator, KeyEntry, KeyStore, PresenceHint, UserPresence};


/// Provides the U2F Authenticator API
#[async_trait::async_trait]
pub trait U2fApi {
    /// Create a key pair scoped to the request's application and attest it.
    async fn register(&mut self, request: RegisterRequest) -> Result<RegisterResponse, U2fError>;

    /// Sign the request's challenge with the key pair identified by its key handle.
    ///
    /// A [`AuthenticationParameter::CheckOnly`] request for a known key handle answers
    /// [`U2fError::TestOfUserPresenceRequired`], which signals success.
    async fn authenticate(
        &mut self,
        request: AuthenticationRequest,
    ) -> Result<AuthenticationResponse, U2fError>;
}

#[async_trait::async_trait]
impl<S: KeyStore + Sync + Send, U: UserPresence + Sync + Send> U2fApi for Authenticator<S, U> {
    async fn register(&mut self, request: RegisterRequest) -> Result<RegisterResponse, U2fError> {
        log::info!(">> register");
        log::debug!(
            "application: {}, challenge: {}",
            hex(&request.application),
            hex(&request.challenge)
        );

        let presence = self
            .user_presence()
            .check_user_presence(PresenceHint::Registration, request.application)
            .await;
        if !presence.user_present() {
            log::info!("<< register: user presence denied");
            return Err(U2fError::UserPresenceDenied);
        }

        let private_key = {
            let mut rng = rand::thread_rng();
            SecretKey::random(&mut rng)
        };
        let signing_key = SigningKey::from(&private_key);
        let public_key = PublicKey::from(signing_key.verifying_key());
        let key_handle = self.key_handle(&request.application, &public_key)?;

        self.store_mut()
            .store_key(
                key_handle.clone(),
                KeyEntry {
                    application: request.application,
                    private_key,
                },
            )
            .await?;

        let signed_bytes = encode_registration_signed_bytes(
            &request.application,
            &request.challenge,
            &key_handle,
            &public_key,
        );
        log::debug!("signed bytes: {}", hex(&signed_bytes));
        let signature = self.attestation().sign(&signed_bytes);

        log::info!("<< register: key handle {}", hex(&key_handle));
        Ok(RegisterResponse {
            public_key,
            key_handle,
            attestation_certificate: self.attestation().certificate().to_vec(),
            signature,
        })
    }

    async fn authenticate(
        &mut self,
        request: AuthenticationRequest,
    ) -> Result<AuthenticationResponse, U2fError> {
        log::info!(">> authenticate ({:?})", request.parameter);
        log::debug!(
            "application: {}, challenge: {}, key handle: {}",
            hex(&request.application),
            hex(&request.challenge),
            hex(&request.key_handle)
        );

        // A handle issued for another application is indistinguishable from a foreign one.
        let entry = self
            .store()
            .get_key(&request.key_handle)
            .await?
            .filter(|entry| entry.application == request.application)
            .ok_or_else(|| {
                log::warn!("unknown key handle {}", hex(&request.key_handle));
                U2fError::UnknownKeyHandle
            })?;

        if request.parameter == AuthenticationParameter::CheckOnly {
            log::info!("<< authenticate: key handle is known");
            return Err(U2fError::TestOfUserPresenceRequired);
        }

        let counter = self.store_mut().increment_counter().await?;

        let user_presence = self
            .user_presence()
            .check_user_presence(PresenceHint::Authentication, request.application)
            .await;
        if request.parameter == AuthenticationParameter::EnforceUserPresence
            && !user_presence.user_present()
        {
            log::info!("<< authenticate: user presence denied");
            return Err(U2fError::UserPresenceDenied);
        }

        let signed_bytes = encode_authentication_signed_bytes(
            &request.application,
            user_presence,
            counter,
            &request.challenge,
        );
        log::debug!("signed bytes: {}", hex(&signed_bytes));
        let signature = crypto::sign(&SigningKey::from(&entry.private_key), &signed_bytes);

        log::info!("<< authenticate: counter {counter}");
        Ok(AuthenticationResponse {
            user_presence,
            counter,
            signature,
        })
    }
}

impl<S: KeyStore + Sync + Send, U: UserPresence + Sync + Send> Authenticator<S, U> {
    /// Process a raw ISO 7816-4 command APDU and produce the response APDU, status words
    /// included.
    ///
    /// Errors never escape: they are reported through the status words, as a token would.
    pub async fn handle_apdu(&mut self, apdu: &[u8]) -> Vec<u8> {
        let request = match Request::try_from(apdu) {
            Ok(request) => request,
            Err(status) => {
                log::warn!("malformed apdu: {}", hex(apdu));
                return status.append_to(Vec::new());
            }
        };

        let result = match request.data {
            RequestPayload::Register(request) => self
                .register(request)
                .await
                .and_then(|response| response.encode().map_err(U2fError::from)),
            RequestPayload::Authenticate(request) => self
                .authenticate(request)
                .await
                .map(|response| response.encode()),
            RequestPayload::Version => return Version.encode(),
        };

        match result {
            Ok(payload) => ResponseStatusWords::NoError.append_to(payload),
            Err(error) => ResponseStatusWords::from(&error).append_to(Vec::new()),
        }
    }
}
