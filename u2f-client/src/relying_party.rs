use std::sync::Arc;

use u2f_server::{ChallengeGenerator, DataStore, Server};
use u2f_types::{
    RegistrationRequest, RegistrationResponse, SecurityKeyData, SignRequest, SignResponse, U2fError,
};

#[cfg(doc)]
use crate::Client;

/// The relying party a [`Client`] talks to.
///
/// This is where a network transport would plug in; [`Server`] implements it directly for
/// in-process use.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait RelyingParty {
    /// Ask for a registration challenge.
    async fn get_registration_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<RegistrationRequest, U2fError>;

    /// Submit the answer to a registration challenge.
    async fn process_registration_response(
        &self,
        response: &RegistrationResponse,
        now: u64,
    ) -> Result<SecurityKeyData, U2fError>;

    /// Ask for one sign request per enrolled key.
    async fn get_sign_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<Vec<SignRequest>, U2fError>;

    /// Submit the answer to a sign request.
    async fn process_sign_response(
        &self,
        response: &SignResponse,
    ) -> Result<SecurityKeyData, U2fError>;
}

#[async_trait::async_trait]
impl<D, C> RelyingParty for Server<D, C>
where
    D: DataStore + Send + Sync,
    C: ChallengeGenerator + Send + Sync,
{
    async fn get_registration_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<RegistrationRequest, U2fError> {
        Server::get_registration_request(self, account_name, app_id).await
    }

    async fn process_registration_response(
        &self,
        response: &RegistrationResponse,
        now: u64,
    ) -> Result<SecurityKeyData, U2fError> {
        Server::process_registration_response(self, response, now).await
    }

    async fn get_sign_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<Vec<SignRequest>, U2fError> {
        Server::get_sign_request(self, account_name, app_id).await
    }

    async fn process_sign_response(
        &self,
        response: &SignResponse,
    ) -> Result<SecurityKeyData, U2fError> {
        Server::process_sign_response(self, response).await
    }
}

#[async_trait::async_trait]
impl<R: RelyingParty + Send + Sync> RelyingParty for Arc<R> {
    async fn get_registration_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<RegistrationRequest, U2fError> {
        self.as_ref()
            .get_registration_request(account_name, app_id)
            .await
    }

    async fn process_registration_response(
        &self,
        response: &RegistrationResponse,
        now: u64,
    ) -> Result<SecurityKeyData, U2fError> {
        self.as_ref()
            .process_registration_response(response, now)
            .await
    }

    async fn get_sign_request(
        &self,
        account_name: &str,
        app_id: &str,
    ) -> Result<Vec<SignRequest>, U2fError> {
        self.as_ref().get_sign_request(account_name, app_id).await
    }

    async fn process_sign_response(
        &self,
        response: &SignResponse,
    ) -> Result<SecurityKeyData, U2fError> {
        self.as_ref().process_sign_response(response).await
    }
}
