//! # U2F-RS
//!
//! The `u2f-rs` library is a collection of Rust libraries implementing the three roles of the
//! [FIDO U2F][u2f-overview] protocol: the relying party, the client and the token. It is
//! comprised of four sub-libraries:
//!
//! - `u2f-server` - a library, usable as [`server`], which issues challenges and verifies the
//!   answers of tokens on behalf of a website.
//! - `u2f-client` - a library, usable as [`client`], which plays the part of the browser: it
//!   checks origins, builds the client data and talks to a token.
//! - `u2f-authenticator` - a library, usable as [`authenticator`], which implements a virtual
//!   token following the [U2F Raw Message Formats][raw-messages].
//! - `u2f-types` - type definitions and the byte level codec, usable as [`types`], shared by the
//!   other three libraries.
//!
//! Developers should be familiar with the [U2F Raw Message Formats][raw-messages] and the
//! [U2F JavaScript API][js-api]. Type naming follows the terms of these documents.
//!
//! It is not within the scope of these libraries to transport messages between a relying party
//! and a client, nor to persist anything beyond memory. Both are defined through traits:
//! [`client::RelyingParty`] and [`server::DataStore`] for the relying party side,
//! [`authenticator::KeyStore`] for the token side.
//!
//! ## Basic Concepts
//!
//! A relying party enrolls a token for an account by sending it a random challenge together with
//! its application id. The token creates a key pair for that application, and answers with the
//! public key, an opaque key handle and a signature by its attestation key. Later, the relying
//! party authenticates the account by sending a new challenge and the key handle; the token signs
//! the challenge with the application key and a counter which never goes backwards.
//!
//! You can think of these libraries as a chain that interacts in the following way:
//!
//! [`Server`](server::Server) <-> [`Client`](client::Client) <->
//! [`Authenticator`](authenticator::Authenticator) <-> [`KeyStore`](authenticator::KeyStore)
//!
//! The [`Server`](server::Server) provides the following API:
//!
//! - [`get_registration_request()`](server::Server::get_registration_request()) and
//!   [`process_registration_response()`](server::Server::process_registration_response())
//! - [`get_sign_request()`](server::Server::get_sign_request()) and
//!   [`process_sign_response()`](server::Server::process_sign_response())
//!
//! The [`Client`](client::Client) drives both round trips with
//! [`register()`](client::Client::register()) and
//! [`authenticate()`](client::Client::authenticate()), relying on a token implementing
//! [`U2fApi`](authenticator::U2fApi) for the cryptographic operations.
//!
//! A runnable demonstration binary is provided in `u2f/examples/usage.rs`.
//!
//! [u2f-overview]: https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-overview-v1.2-ps-20170411.html
//! [raw-messages]: https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html
//! [js-api]: https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-javascript-api-v1.2-ps-20170411.html
//!
//! ### Example: Enrolling and authenticating with a Client
//!
//! ```
//! use std::sync::Arc;
//!
//! use u2f::{
//!     authenticator::{Attestation, Authenticator, MemoryStore},
//!     client::Client,
//!     server::{MemoryDataStore, Server},
//!     types::{encoding::try_from_hex, test_vectors, ControlFlags},
//! };
//!
//! # tokio_test::block_on(async {
//! let origin = "https://example.com";
//!
//! // The token is identified by a vendor attestation certificate and its private key.
//! let certificate = try_from_hex(test_vectors::VENDOR_CERTIFICATE_HEX).unwrap();
//! let private_key = try_from_hex(test_vectors::VENDOR_PRIVATE_KEY_HEX).unwrap();
//! let attestation = Attestation::from_bytes(&certificate, &private_key).unwrap();
//! // `ControlFlags::USER_PRESENCE` is a user who always touches the token.
//! let token = Authenticator::new(attestation, MemoryStore::new(), ControlFlags::USER_PRESENCE);
//!
//! // The relying party trusts the vendor's certificate.
//! let mut server = Server::new(MemoryDataStore::new(), [origin]);
//! server.trust_store_mut().add_trusted_certificate(certificate).unwrap();
//!
//! let mut client = Client::new(Arc::new(server), token);
//! let enrolled = client.register(origin, "jdoe@example.com").await.unwrap();
//! assert_eq!(enrolled.counter, 0);
//!
//! let authenticated = client.authenticate(origin, "jdoe@example.com").await.unwrap();
//! assert_eq!(authenticated.counter, 1);
//! # })
//! ```

pub use u2f_authenticator as authenticator;
pub use u2f_client as client;
pub use u2f_server as server;
pub use u2f_types as types;
