//! # U2F Authenticator
//!
//! This crate defines an [`Authenticator`] type, a virtual FIDO U2F token implementing the
//! [U2F Raw Message Formats]. Like a hardware token it owns an attestation key pair, a device
//! secret from which key handles are derived, and a single global signature counter. Storage of
//! the per-application key pairs and the user presence test are defined through traits, so that
//! only the parts that vary between vendors need to be provided.
//!
//! Requests can either be given as decoded messages through the [`U2fApi`] trait, or as raw
//! ISO 7816-4 APDUs through [`Authenticator::handle_apdu`].
//!
//! [U2F Raw Message Formats]: https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html

mod authenticator;
mod key_store;
mod u2f;
mod user_presence;

pub use self::{
    authenticator::{Attestation, Authenticator},
    key_store::{KeyEntry, KeyStore, MemoryStore},
    u2f::U2fApi,
    user_presence::{PresenceHint, UserPresence},
};

#[cfg(feature = "testable")]
pub use self::user_presence::MockUserPresence;
