//! # U2F Client
//!
//! This crate defines a [`Client`] type, the browser side of the FIDO U2F protocol. The
//! [`Client`] fetches requests from a [`RelyingParty`], checks that the calling origin may use the
//! requested application id, binds the challenge to the origin in a [`ClientData`] structure and
//! has a token sign the result through the [`U2fApi`].
//!
//! This crate does not provide any code to perform networking requests to and from relying
//! parties.

mod origin_verifier;
mod relying_party;

#[cfg(test)]
mod tests;

use std::time::{SystemTime, UNIX_EPOCH};

use u2f_authenticator::U2fApi;
use u2f_types::{
    crypto::sha256,
    encoding,
    u2f::{AuthenticationParameter, AuthenticationRequest, RegisterRequest},
    ChannelId, ClientData, ClientDataType, RegistrationResponse, SecurityKeyData, SignResponse,
    U2fError, U2F_VERSION,
};

pub use self::{
    origin_verifier::{DomainOriginVerifier, OriginVerifier},
    relying_party::RelyingParty,
};

#[cfg(feature = "testable")]
pub use self::relying_party::MockRelyingParty;

/// A `Client` represents a U2F client, the part of a browser which lets web pages use security
/// keys. Users of this struct should supply a [`RelyingParty`] and a token implementing
/// [`U2fApi`], usually a [`u2f_authenticator::Authenticator`].
pub struct Client<R, K, V = DomainOriginVerifier> {
    server: R,
    key: K,
    origin_verifier: V,
    channel_id: Option<ChannelId>,
}

impl<R, K> Client<R, K>
where
    R: RelyingParty + Sync,
    K: U2fApi + Send,
{
    /// Create a `Client` with the default [`DomainOriginVerifier`] and no channel id.
    pub fn new(server: R, key: K) -> Self {
        Self {
            server,
            key,
            origin_verifier: DomainOriginVerifier::new(),
            channel_id: None,
        }
    }

    /// Allows the internal [`DomainOriginVerifier`] to pass through localhost requests.
    pub fn allows_insecure_localhost(mut self, is_allowed: bool) -> Self {
        self.origin_verifier = self.origin_verifier.allows_insecure_localhost(is_allowed);
        self
    }
}

impl<R, K, V> Client<R, K, V>
where
    R: RelyingParty + Sync,
    K: U2fApi + Send,
    V: OriginVerifier,
{
    /// Builder method for replacing the [`OriginVerifier`].
    pub fn with_origin_verifier<W: OriginVerifier>(self, origin_verifier: W) -> Client<R, K, W> {
        Client {
            server: self.server,
            key: self.key,
            origin_verifier,
            channel_id: self.channel_id,
        }
    }

    /// Builder method for setting the TLS channel id reported in the client data.
    pub fn with_channel_id(self, channel_id: ChannelId) -> Self {
        Self {
            channel_id: Some(channel_id),
            ..self
        }
    }

    /// Read access to the Client's [`RelyingParty`].
    pub fn server(&self) -> &R {
        &self.server
    }

    /// Read access to the Client's token.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Write access to the Client's token.
    pub fn key_mut(&mut self) -> &mut K {
        &mut self.key
    }

    /// Enroll the token for `account_name` on behalf of a page at `origin`, which is also used
    /// as the application id.
    ///
    /// Returns the security key as recorded by the relying party.
    pub async fn register(
        &mut self,
        origin: &str,
        account_name: &str,
    ) -> Result<SecurityKeyData, U2fError> {
        log::info!(">> register {account_name} from {origin}");

        let request = self
            .server
            .get_registration_request(account_name, origin)
            .await?;
        check_version(&request.version)?;
        self.origin_verifier.validate_origin(&request.app_id, origin)?;

        let client_data =
            self.client_data(ClientDataType::Registration, &request.challenge, origin)?;
        let response = self
            .key
            .register(RegisterRequest {
                challenge: sha256(client_data.as_bytes()),
                application: sha256(request.app_id.as_bytes()),
            })
            .await?;

        let response = RegistrationResponse {
            registration_data: response.encode()?.into(),
            client_data: client_data.into_bytes().into(),
            session_id: request.session_id,
        };
        let key = self
            .server
            .process_registration_response(&response, now_millis())
            .await?;

        log::info!("<< register {account_name}");
        Ok(key)
    }

    /// Authenticate `account_name` with the token on behalf of a page at `origin`.
    ///
    /// The relying party issues one request per enrolled key. They are tried in order and the
    /// ones the token does not recognize are skipped; any other failure ends the attempt.
    pub async fn authenticate(
        &mut self,
        origin: &str,
        account_name: &str,
    ) -> Result<SecurityKeyData, U2fError> {
        log::info!(">> authenticate {account_name} from {origin}");

        let requests = self.server.get_sign_request(account_name, origin).await?;
        for request in requests {
            check_version(&request.version)?;
            self.origin_verifier.validate_origin(&request.app_id, origin)?;

            let client_data =
                self.client_data(ClientDataType::Authentication, &request.challenge, origin)?;
            let result = self
                .key
                .authenticate(AuthenticationRequest {
                    parameter: AuthenticationParameter::EnforceUserPresence,
                    challenge: sha256(client_data.as_bytes()),
                    application: sha256(request.app_id.as_bytes()),
                    key_handle: request.key_handle.to_vec(),
                })
                .await;
            let response = match result {
                Ok(response) => response,
                Err(U2fError::UnknownKeyHandle) => {
                    log::debug!(
                        "token does not own key handle {}",
                        encoding::hex(&request.key_handle)
                    );
                    continue;
                }
                Err(error) => return Err(error),
            };

            let response = SignResponse {
                key_handle: request.key_handle,
                signature_data: response.encode().into(),
                client_data: client_data.into_bytes().into(),
                session_id: request.session_id,
            };
            let key = self.server.process_sign_response(&response).await?;

            log::info!("<< authenticate {account_name}");
            return Ok(key);
        }

        Err(U2fError::UnknownKeyHandle)
    }

    fn client_data(
        &self,
        typ: ClientDataType,
        challenge: &[u8],
        origin: &str,
    ) -> Result<String, U2fError> {
        let client_data = ClientData {
            typ,
            challenge: encoding::base64url(challenge),
            cid_pubkey: self.channel_id.clone(),
            origin: origin.to_owned(),
        }
        .to_json()?;
        log::debug!("client data: {client_data}");
        Ok(client_data)
    }
}

fn check_version(version: &str) -> Result<(), U2fError> {
    if version == U2F_VERSION {
        Ok(())
    } else {
        Err(U2fError::UnsupportedVersion(version.to_owned()))
    }
}

/// Milliseconds since the Unix epoch, zero for a clock set before it.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
