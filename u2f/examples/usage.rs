//! Sample App for U2F
use std::sync::Arc;

use u2f::{
    authenticator::{Attestation, Authenticator, MemoryStore, U2fApi},
    client::Client,
    server::{MemoryDataStore, Server},
    types::{
        crypto::sha256,
        encoding::{hex, try_from_hex},
        test_vectors,
        u2f::{Command, RegisterRequest, Request, RequestPayload},
        ControlFlags, SecurityKeyData, U2fError,
    },
};

const ORIGIN: &str = "https://u2f.example.com";
const ACCOUNT: &str = "jdoe@example.com";

// Create a token which identifies as the test vector vendor and always finds a user touching it.
fn token_setup() -> Result<Authenticator<MemoryStore, ControlFlags>, U2fError> {
    let certificate = try_from_hex(test_vectors::VENDOR_CERTIFICATE_HEX).unwrap_or_default();
    let private_key = try_from_hex(test_vectors::VENDOR_PRIVATE_KEY_HEX).unwrap_or_default();
    let attestation = Attestation::from_bytes(&certificate, &private_key)?;

    Ok(Authenticator::new(
        attestation,
        MemoryStore::new(),
        ControlFlags::USER_PRESENCE,
    ))
}

// Create a relying party which trusts the vendor of the token.
fn server_setup() -> Result<Server<MemoryDataStore>, U2fError> {
    let certificate = try_from_hex(test_vectors::VENDOR_CERTIFICATE_HEX).unwrap_or_default();
    let mut server = Server::new(MemoryDataStore::new(), [ORIGIN]);
    server.trust_store_mut().add_trusted_certificate(certificate)?;
    Ok(server)
}

// Example of how to set up, register and authenticate with a `Client`.
async fn client_setup() -> Result<(SecurityKeyData, SecurityKeyData), U2fError> {
    let server = Arc::new(server_setup()?);
    let mut my_client = Client::new(server, token_setup()?);

    let enrolled = my_client.register(ORIGIN, ACCOUNT).await?;
    let authenticated = my_client.authenticate(ORIGIN, ACCOUNT).await?;

    Ok((enrolled, authenticated))
}

// The same token spoken to with raw APDUs, as a USB transport would.
async fn token_apdus() -> Result<(), U2fError> {
    let mut my_token = token_setup()?;

    let version = Request {
        cla: 0,
        ins: Command::Version,
        p1: 0,
        data_len: 0,
        data: RequestPayload::Version,
    }
    .encode()?;
    println!("U2F version response: {}", hex(&my_token.handle_apdu(&version).await));

    // The token can also be called directly
    let response = my_token
        .register(RegisterRequest {
            challenge: sha256(b"client data"),
            application: sha256(ORIGIN.as_bytes()),
        })
        .await?;
    println!("U2F registration response: {}", hex(&response.encode()?));

    Ok(())
}

fn print_key(label: &str, key: &SecurityKeyData) {
    println!(
        "{label}:\n  key handle: {}\n  public key: {}\n  counter: {}\n",
        hex(&key.key_handle),
        hex(&key.public_key),
        key.counter
    );
}

#[tokio::main]
async fn main() -> Result<(), U2fError> {
    // Set up a client, enroll and authenticate a security key, then report results.
    let (enrolled, authenticated) = client_setup().await?;
    print_key("U2F security key enrolled", &enrolled);
    print_key("U2F security key authenticated", &authenticated);

    token_apdus().await
}
