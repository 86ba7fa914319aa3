//! Error taxonomy shared by the Key, the Server and the Client.

/// Errors raised while decoding or encoding raw U2F messages and their JSON wrappers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The message ended in the middle of a field.
    #[error("message is truncated")]
    TruncatedMessage,
    /// The message was fully decoded but bytes were left over.
    #[error("message ends with unexpected data")]
    UnexpectedTrailingData,
    /// Key handles are prefixed by a single length byte.
    #[error("key handle of {0} bytes cannot be longer than 255 bytes")]
    KeyHandleTooLong(usize),
    /// The reserved byte of a registration response must be `0x05`.
    #[error("incorrect value of reserved byte, expected 0x05 but was {0:#04x}")]
    InvalidReservedByte(u8),
    /// The user public key is not an uncompressed point on the P-256 curve.
    #[error("user public key is not an uncompressed P-256 point")]
    InvalidPublicKey,
    /// The attestation certificate could not be parsed as X.509 DER.
    #[error("attestation certificate is not a valid X.509 certificate")]
    InvalidCertificate,
    /// The signature is not framed as a DER sequence.
    #[error("signature is not DER encoded")]
    InvalidSignature,
    /// The control byte of an authentication request is not defined by the protocol.
    #[error("unknown control byte {0:#04x}")]
    InvalidControlByte(u8),
    /// The client data is not the expected JSON object.
    #[error("client data has the wrong format")]
    InvalidClientData,
    /// A field expected to be websafe base64 could not be decoded.
    #[error("value is not base64 encoded")]
    InvalidBase64,
}

/// Terminal outcome of a failed U2F operation. None of these are retried: a failed registration
/// or authentication must restart from a fresh challenge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum U2fError {
    /// Malformed, truncated or over-length wire bytes.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The session id is unknown or was already consumed.
    #[error("unknown session id")]
    UnknownSession,
    /// The attestation certificate is not in the trust store.
    #[error("attestation certificate is not trusted")]
    UntrustedAttestation,
    /// A signature did not verify over the expected signed bytes.
    #[error("signature is invalid")]
    InvalidSignature,
    /// The counter returned by the authenticator did not increase, the key may be cloned.
    #[error("counter value {received} is not greater than the stored value {stored}")]
    CounterRegression {
        /// Counter currently persisted for the key
        stored: u32,
        /// Counter presented in the authentication response
        received: u32,
    },
    /// The key handle was not created by this authenticator, or not for this application.
    #[error("unknown key handle")]
    UnknownKeyHandle,
    /// The user did not confirm presence.
    #[error("user presence could not be verified")]
    UserPresenceDenied,
    /// The account has no enrolled security keys.
    #[error("no security keys registered for this account")]
    NoRegisteredKeys,
    /// The app id may not be claimed by the calling origin, or the origin is not recognized.
    #[error("origin {origin} is not allowed for app id {app_id}")]
    OriginMismatch {
        /// The origin making the request
        origin: String,
        /// The app id being claimed, or the expected origin set of the server
        app_id: String,
    },
    /// The request names a protocol version other than `U2F_V2`.
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(String),
    /// The key handle is known for a check-only request. Despite the name this is the success
    /// signal of a check-only authentication.
    #[error("test of user presence required")]
    TestOfUserPresenceRequired,
    /// The client data does not bind the expected request type or challenge.
    #[error("client data mismatch: {0}")]
    ClientDataMismatch(&'static str),
    /// Key material handed to the engine could not be used.
    #[error("invalid key material")]
    InvalidKey,
    /// A datastore failed to persist or load data.
    #[error("storage error: {0}")]
    Storage(String),
}
