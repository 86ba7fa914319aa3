use u2f_types::ControlFlags;

#[cfg(doc)]
use crate::Authenticator;

/// The operation the user is asked to approve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceHint {
    /// A new key pair is about to be created.
    Registration,
    /// An existing key pair is about to sign a challenge.
    Authentication,
}

/// Pluggable trait for the [`Authenticator`] to test the presence of the user, usually a touch
/// of the token.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait UserPresence {
    /// Test for the presence of the user.
    ///
    /// * `hint` - The operation which requires the test.
    /// * `application` - SHA-256 of the application id the operation is for.
    ///
    /// The returned flags are copied into the authentication response as is.
    async fn check_user_presence(
        &self,
        hint: PresenceHint,
        application: [u8; 32],
    ) -> ControlFlags;
}

/// A fixed answer, useful for unattended tokens and tests.
#[async_trait::async_trait]
impl UserPresence for ControlFlags {
    async fn check_user_presence(
        &self,
        _hint: PresenceHint,
        _application: [u8; 32],
    ) -> ControlFlags {
        *self
    }
}

#[cfg(any(test, feature = "testable"))]
impl MockUserPresence {
    /// Sets up the mock for returning a present user `times` times.
    pub fn present(times: usize) -> Self {
        let mut user_mock = MockUserPresence::new();
        user_mock
            .expect_check_user_presence()
            .return_const(ControlFlags::USER_PRESENCE)
            .times(times);
        user_mock
    }

    /// Sets up the mock for returning an absent user `times` times.
    pub fn absent(times: usize) -> Self {
        let mut user_mock = MockUserPresence::new();
        user_mock
            .expect_check_user_presence()
            .return_const(ControlFlags::empty())
            .times(times);
        user_mock
    }

    /// Sets up the mock for approving registrations and leaving authentications unattended.
    pub fn present_for_registration_only() -> Self {
        let mut user_mock = MockUserPresence::new();
        user_mock
            .expect_check_user_presence()
            .withf(|hint, _| *hint == PresenceHint::Registration)
            .return_const(ControlFlags::USER_PRESENCE)
            .times(..);
        user_mock
            .expect_check_user_presence()
            .withf(|hint, _| *hint == PresenceHint::Authentication)
            .return_const(ControlFlags::empty())
            .times(..);
        user_mock
    }
}
