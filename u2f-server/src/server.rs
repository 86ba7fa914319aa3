use std::collections::BTreeSet;

use u2f_types::{
    crypto,
    encoding::hex,
    u2f::{
        encode_authentication_signed_bytes, encode_registration_signed_bytes,
        AuthenticationResponse, RegisterResponse,
    },
    ClientData, ClientDataType, FormatError, RegistrationRequest, RegistrationResponse,
    SecurityKeyData, SessionData, SessionKind, SignRequest, SignResponse, U2fError, U2F_VERSION,
};

use crate::{canonical_origin, ChallengeGenerator, DataStore, RandomChallengeGenerator, TrustStore};


/// What to do with a registration whose attestation certificate is not trusted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AttestationPolicy {
    /// Reject it with [`U2fError::UntrustedAttestation`].
    #[default]
    Enforce,
    /// Accept it and log a warning.
    Warn,
}

/// A U2F relying party.
pub struct Server<D, C = RandomChallengeGenerator> {
    store: D,
    challenge_generator: C,
    trust_store: TrustStore,
    attestation_policy: AttestationPolicy,
    allowed_origins: BTreeSet<String>,
}

impl<D: DataStore> Server<D> {
    /// Create a relying party accepting client data from `allowed_origins`.
    ///
    /// Origins are compared after reduction to `scheme://host[:port]`. Entries which are not
    /// URLs are ignored with a warning.
    pub fn new<I, O>(store: D, allowed_origins: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: AsRef<str>,
    {
        let allowed_origins = allowed_origins
            .into_iter()
            .filter_map(|origin| {
                let canonical = canonical_origin(origin.as_ref());
                if canonical.is_none() {
                    log::warn!("ignoring allowed origin {:?}", origin.as_ref());
                }
                canonical
            })
            .collect();
        Self {
            store,
            challenge_generator: RandomChallengeGenerator,
            trust_store: TrustStore::new(),
            attestation_policy: AttestationPolicy::default(),
            allowed_origins,
        }
    }
}

impl<D, C> Server<D, C> {
    /// Builder method for replacing the source of challenges.
    pub fn with_challenge_generator<G: ChallengeGenerator>(self, generator: G) -> Server<D, G> {
        Server {
            store: self.store,
            challenge_generator: generator,
            trust_store: self.trust_store,
            attestation_policy: self.attestation_policy,
            allowed_origins: self.allowed_origins,
        }
    }

    /// Builder method for setting how untrusted attestation certificates are handled.
    pub fn with_attestation_policy(self, attestation_policy: AttestationPolicy) -> Self {
        Self {
            attestation_policy,
            ..self
        }
    }

    /// Builder method for replacing the trust store.
    pub fn with_trust_store(self, trust_store: TrustStore) -> Self {
        Self {
            trust_store,
            ..self
        }
    }

    /// Access the [`TrustStore`].
    pub fn trust_store(&self) -> &TrustStore {
        &self.trust_store
    }

    /// Exclusively access the [`TrustStore`] to add certificates.
    pub fn trust_store_mut(&mut self) -> &mut TrustStore {
        &mut self.trust_store
    }

    /// Access the [`DataStore`].
    pub fn store(&self) -> &D {
        &self.store
    }

    /// The canonical origins client data may come from.
    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins.iter().map(String::as_str)
    }
}

impl<D, C> Server<D, C>
where
    D: DataStore + Sync,
    C: ChallengeGenerator + Sync,
{
    /// Issue a challenge for enrolling a new security key for `account_name`.
    pub async fn get_registration_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<RegistrationRequest, U2fError> {
        log::info!(">> get_registration_request {account_name}");

        let challenge = self.challenge_generator.generate_challenge(account_name);
        let session_id = self
            .store
            .store_session_data(SessionData::enroll(
                account_name,
                app_id,
                challenge.clone().into(),
            ))
            .await?;
        log::debug!("session id: {session_id}, challenge: {}", hex(&challenge));

        log::info!("<< get_registration_request {account_name}");
        Ok(RegistrationRequest {
            version: U2F_VERSION.into(),
            challenge: challenge.into(),
            app_id: app_id.into(),
            session_id,
        })
    }

    /// Verify a registration and enroll the security key. `now` is the enrollment time in
    /// milliseconds since the Unix epoch.
    pub async fn process_registration_response(
        &self,
        response: &RegistrationResponse,
        now: u64,
    ) -> Result<SecurityKeyData, U2fError> {
        log::info!(">> process_registration_response");

        // A sign session sent here stays pending
        let is_enrollment = self
            .store
            .get_session_data(&response.session_id)
            .await?
            .is_some_and(|session| session.kind == SessionKind::Enroll);
        if !is_enrollment {
            return Err(U2fError::UnknownSession);
        }
        let session = self
            .store
            .take_session_data(&response.session_id)
            .await?
            .filter(|session| session.kind == SessionKind::Enroll)
            .ok_or(U2fError::UnknownSession)?;
        log::debug!(
            "account: {}, challenge: {}, registration data: {}",
            session.account_name,
            hex(&session.challenge),
            hex(&response.registration_data)
        );

        let client_data = ClientData::from_json(&response.client_data)?;
        let registration = RegisterResponse::decode(&response.registration_data)?;
        // A point off the curve could never verify an authentication
        registration.public_key.verifying_key()?;

        self.verify_client_data(&client_data, ClientDataType::Registration, &session)?;

        if !self
            .trust_store
            .is_trusted(&registration.attestation_certificate)
        {
            match self.attestation_policy {
                AttestationPolicy::Enforce => return Err(U2fError::UntrustedAttestation),
                AttestationPolicy::Warn => log::warn!(
                    "attestation certificate is not trusted: {}",
                    hex(&registration.attestation_certificate)
                ),
            }
        }

        let signed_bytes = encode_registration_signed_bytes(
            &crypto::sha256(session.app_id.as_bytes()),
            &crypto::sha256(&response.client_data),
            &registration.key_handle,
            &registration.public_key,
        );
        log::debug!("verifying signature of bytes {}", hex(&signed_bytes));
        if !crypto::verify_with_certificate(
            &registration.attestation_certificate,
            &signed_bytes,
            &registration.signature,
        )? {
            return Err(U2fError::InvalidSignature);
        }

        // The counter of a real token is unknown at this point but never below zero.
        let key = SecurityKeyData {
            key_handle: registration.key_handle.into(),
            public_key: registration.public_key.to_vec().into(),
            attestation_certificate: registration.attestation_certificate.into(),
            counter: 0,
            enrollment_time: now,
        };
        self.store
            .add_security_key(&session.account_name, key.clone())
            .await?;

        log::info!("<< process_registration_response");
        Ok(key)
    }

    /// Issue one sign request per security key enrolled for `account_name`, all sharing a
    /// single challenge but each with its own session.
    pub async fn get_sign_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<Vec<SignRequest>, U2fError> {
        log::info!(">> get_sign_request {account_name}");

        let keys = self.store.get_security_keys(account_name).await?;
        if keys.is_empty() {
            return Err(U2fError::NoRegisteredKeys);
        }

        let challenge = self.challenge_generator.generate_challenge(account_name);
        log::debug!("challenge: {}", hex(&challenge));

        let mut requests = Vec::with_capacity(keys.len());
        for key in keys {
            let session_id = self
                .store
                .store_session_data(SessionData::sign(
                    account_name,
                    app_id,
                    challenge.clone().into(),
                    key.public_key,
                ))
                .await?;
            log::debug!("session id: {session_id}, key handle: {}", hex(&key.key_handle));
            requests.push(SignRequest {
                version: U2F_VERSION.into(),
                challenge: challenge.clone().into(),
                app_id: app_id.into(),
                key_handle: key.key_handle,
                session_id,
            });
        }

        log::info!("<< get_sign_request {account_name}");
        Ok(requests)
    }

    /// Verify an authentication and advance the counter of the security key which produced
    /// it. Returns the updated record.
    pub async fn process_sign_response(
        &self,
        response: &SignResponse,
    ) -> Result<SecurityKeyData, U2fError> {
        log::info!(">> process_sign_response");

        let is_sign = self
            .store
            .get_session_data(&response.session_id)
            .await?
            .is_some_and(|session| session.public_key().is_some());
        if !is_sign {
            return Err(U2fError::UnknownSession);
        }
        let session = self
            .store
            .take_session_data(&response.session_id)
            .await?
            .ok_or(U2fError::UnknownSession)?;
        let public_key = session.public_key().ok_or(U2fError::UnknownSession)?;

        let key = self
            .store
            .get_security_keys(&session.account_name)
            .await?
            .into_iter()
            .find(|key| key.public_key == *public_key)
            .filter(|key| key.key_handle == response.key_handle)
            .ok_or_else(|| {
                log::warn!("unknown key handle {}", hex(&response.key_handle));
                U2fError::UnknownKeyHandle
            })?;
        log::debug!(
            "account: {}, public key: {}, challenge: {}, signature data: {}",
            session.account_name,
            hex(&key.public_key),
            hex(&session.challenge),
            hex(&response.signature_data)
        );

        let client_data = ClientData::from_json(&response.client_data)?;
        self.verify_client_data(&client_data, ClientDataType::Authentication, &session)?;

        let authentication = AuthenticationResponse::decode(&response.signature_data)
            .map_err(|error| signature_framing_error(&response.signature_data, error))?;
        if !authentication.user_presence.user_present() {
            return Err(U2fError::UserPresenceDenied);
        }

        let signed_bytes = encode_authentication_signed_bytes(
            &crypto::sha256(session.app_id.as_bytes()),
            authentication.user_presence,
            authentication.counter,
            &crypto::sha256(&response.client_data),
        );
        log::debug!("verifying signature of bytes {}", hex(&signed_bytes));
        let verifying_key = crypto::decode_public_key(&key.public_key)?;
        if !crypto::verify(&verifying_key, &signed_bytes, &authentication.signature) {
            return Err(U2fError::InvalidSignature);
        }

        let key = self
            .store
            .update_security_key_counter(
                &session.account_name,
                &key.public_key,
                authentication.counter,
            )
            .await
            .map_err(|error| {
                if let U2fError::CounterRegression { stored, received } = &error {
                    log::warn!("counter went from {stored} to {received}, the key may be cloned");
                }
                error
            })?;

        log::info!("<< process_sign_response");
        Ok(key)
    }

    /// All security keys enrolled for `account_name`.
    pub async fn get_all_security_keys(
        &self,
        account_name: &str,
    ) -> Result<Vec<SecurityKeyData>, U2fError> {
        self.store.get_security_keys(account_name).await
    }

    /// Revoke the security key owning `public_key`. Returns whether it was enrolled.
    pub async fn remove_security_key(
        &self,
        account_name: &str,
        public_key: &[u8],
    ) -> Result<bool, U2fError> {
        log::info!("removing security key {} of {account_name}", hex(public_key));
        self.store
            .remove_security_key(account_name, public_key)
            .await
    }

    fn verify_client_data(
        &self,
        client_data: &ClientData,
        expected: ClientDataType,
        session: &SessionData,
    ) -> Result<(), U2fError> {
        if client_data.typ != expected {
            return Err(U2fError::ClientDataMismatch("typ"));
        }
        if client_data.challenge_bytes()? != *session.challenge {
            return Err(U2fError::ClientDataMismatch("challenge"));
        }
        let allowed = canonical_origin(&client_data.origin)
            .is_some_and(|origin| self.allowed_origins.contains(&origin));
        if !allowed {
            return Err(U2fError::OriginMismatch {
                origin: client_data.origin.clone(),
                app_id: session.app_id.clone(),
            });
        }
        Ok(())
    }
}

/// Once the presence byte and the counter are read only the signature is left, so a framing
/// error past them is a signature which cannot verify.
fn signature_framing_error(signature_data: &[u8], error: FormatError) -> U2fError {
    if signature_data.len() > AuthenticationResponse::HEADER_LEN {
        U2fError::InvalidSignature
    } else {
        error.into()
    }
}
