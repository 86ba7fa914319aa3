use super::{length_prefixed, read_signature, Reader};
use crate::{ControlFlags, FormatError};

repr_enum! {
    /// Control byte of an [`AuthenticationRequest`], carried in P1 of the APDU.
    AuthenticationParameter: u8 {
        /// Only tell whether the key handle belongs to this token and application. A token that
        /// owns it answers with the test-of-user-presence-required error, which means yes.
        CheckOnly = 0x07,
        /// Sign only once the user has proven presence.
        EnforceUserPresence = 0x03,
        /// Sign, whether or not the user proved presence.
        DontEnforceUserPresence = 0x08,
    }
}

impl AuthenticationParameter {
    fn decode(byte: u8) -> Result<Self, FormatError> {
        Self::try_from(byte).map_err(|_| FormatError::InvalidControlByte(byte))
    }
}

/// Raw authentication request message, sent by the client once it holds a challenge from the
/// relying party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    /// [`AuthenticationParameter::CheckOnly`] probes for a key, the other two ask for a signature
    pub parameter: AuthenticationParameter,
    /// SHA-256 of the client data
    pub challenge: [u8; 32],
    /// SHA-256 of the application id
    pub application: [u8; 32],
    /// Key handle returned by the token at registration
    pub key_handle: Vec<u8>,
}

impl AuthenticationRequest {
    /// Encode as `control | challenge | application | L | key handle`.
    ///
    /// Fails when the key handle does not fit its single byte length prefix.
    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let mut encoded = vec![u8::from(self.parameter)];
        encoded.extend_from_slice(&self.encode_payload()?);
        Ok(encoded)
    }

    /// Encode everything but the control byte, which APDU framing carries in `P1`.
    pub fn encode_payload(&self) -> Result<Vec<u8>, FormatError> {
        Ok(self
            .challenge
            .iter()
            .chain(self.application.iter())
            .copied()
            .chain(length_prefixed(&self.key_handle)?)
            .collect())
    }

    /// Decode a raw authentication request including its control byte.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        let (&control, payload) = data.split_first().ok_or(FormatError::TruncatedMessage)?;
        Self::decode_payload(control, payload)
    }

    /// Decode a data payload into an authentication request with the given control byte taken
    /// from the u2f message frame.
    pub fn decode_payload(control: u8, payload: &[u8]) -> Result<Self, FormatError> {
        let parameter = AuthenticationParameter::decode(control)?;
        let mut reader = Reader::new(payload);
        let challenge = reader.array()?;
        let application = reader.array()?;
        let key_handle = reader.length_prefixed()?.to_vec();
        reader.finish()?;
        Ok(Self {
            parameter,
            challenge,
            application,
            key_handle,
        })
    }
}

/// Raw authentication response message: presence flags, counter and signature, concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResponse {
    /// Flags reported by the token, bit 0 is user presence
    pub user_presence: ControlFlags,
    /// Token counter after this authentication, big endian on the wire
    pub counter: u32,
    /// DER encoded ECDSA signature by the user key over [`encode_authentication_signed_bytes`].
    pub signature: Vec<u8>,
}

impl AuthenticationResponse {
    /// Length of the presence byte and the counter which precede the signature.
    pub const HEADER_LEN: usize = 5;

    /// Encode the response to its raw message format.
    pub fn encode(&self) -> Vec<u8> {
        [u8::from(self.user_presence)]
            .into_iter()
            .chain(self.counter.to_be_bytes())
            .chain(self.signature.iter().copied())
            .collect()
    }

    /// Decode a raw authentication response.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        let mut reader = Reader::new(data);
        let user_presence = ControlFlags::from(reader.byte()?);
        let counter = u32::from_be_bytes(reader.array()?);
        let signature = read_signature(&mut reader)?;
        reader.finish()?;
        Ok(Self {
            user_presence,
            counter,
            signature,
        })
    }
}

/// Build the byte string signed by the user key during authentication:
///
/// 1. The application parameter [32 bytes] from the authentication request message.
/// 2. The user presence byte [1 byte].
/// 3. The counter [4 bytes, big endian].
/// 4. The challenge parameter [32 bytes] from the authentication request message.
pub fn encode_authentication_signed_bytes(
    application: &[u8; 32],
    user_presence: ControlFlags,
    counter: u32,
    challenge: &[u8; 32],
) -> Vec<u8> {
    application
        .iter()
        .copied()
        .chain([u8::from(user_presence)])
        .chain(counter.to_be_bytes())
        .chain(challenge.iter().copied())
        .collect()
}
