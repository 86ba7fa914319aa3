//! # U2F Types
//!
//! Rust type definitions for the [FIDO U2F Raw Message Formats] and the JSON messages a
//! relying party exchanges with a browser-style client.
//!
//! The [`u2f`] module is the only place where byte ordering and length-prefix rules live. Every
//! decoder in it is strict: a message that runs out of bytes fails with
//! [`FormatError::TruncatedMessage`] and a message with bytes left over fails with
//! [`FormatError::UnexpectedTrailingData`].
//!
//! [FIDO U2F Raw Message Formats]: https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html

#[macro_use]
mod utils;

mod client_data;
mod data;
mod error;
mod flags;
mod messages;

pub mod u2f;

#[cfg(any(test, feature = "testable"))]
pub mod test_vectors;

pub use self::{
    client_data::{ChannelId, ClientData, ClientDataType},
    data::{SecurityKeyData, SessionData, SessionKind},
    error::{FormatError, U2fError},
    flags::ControlFlags,
    messages::{
        RegistrationRequest, RegistrationResponse, SignRequest, SignResponse, U2F_VERSION,
    },
};

// Re-exports
pub use utils::{bytes::Bytes, crypto, encoding, rand};
