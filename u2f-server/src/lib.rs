//! # U2F Server
//!
//! This crate defines a [`Server`] type, the relying party side of the FIDO U2F protocol. It
//! issues registration and sign requests, then verifies the responses produced by a client and a
//! token: the client data binding to the challenge and origin, the attestation certificate
//! against a [`TrustStore`], the signatures, and the anti-cloning counter.
//!
//! Persistence is defined through the [`DataStore`] trait. [`MemoryDataStore`] keeps everything
//! in memory and is safe to share between concurrent requests.

mod challenge;
mod data_store;
mod origin;
mod server;
mod trust_store;

pub use self::{
    challenge::{ChallengeGenerator, RandomChallengeGenerator},
    data_store::{DataStore, MemoryDataStore},
    origin::canonical_origin,
    server::{AttestationPolicy, Server},
    trust_store::TrustStore,
};

#[cfg(feature = "testable")]
pub use self::data_store::MockDataStore;
