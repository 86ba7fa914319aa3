//! U2F raw message formats
//!
//! Byte exact encoders and decoders for the four raw messages exchanged with a U2F token, the two
//! signed byte strings, and the ISO 7816-4 APDU framing which carries them.
mod authenticate;
mod commands;
mod register;
mod version;

#[cfg(test)]
mod tests;

pub use {authenticate::*, commands::*, register::*, version::*};

use crate::{FormatError, U2fError};

repr_enum! {
    /// ISO 7816-4 status words ending every response APDU.
    ///
    /// See <https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html#h3_status-codes>
    ResponseStatusWords: u16 {
        /// `SW_NO_ERROR`
        NoError = 0x9000,
        /// `SW_CONDITIONS_NOT_SATISFIED`, user presence is required
        ConditionsNotSatisfied = 0x6985,
        /// `SW_WRONG_DATA`, usually an unknown key handle
        WrongData = 0x6A80,
        /// `SW_WRONG_LENGTH`
        WrongLength = 0x6700,
        /// `SW_CLA_NOT_SUPPORTED`, CLA must be zero
        ClaNotSupported = 0x6E00,
        /// `SW_INS_NOT_SUPPORTED`
        InsNotSupported = 0x6D00,
    }
}

impl ResponseStatusWords {
    /// The status words as a number.
    pub fn as_primitive(self) -> u16 {
        self.into()
    }

    /// Append these status words to a response payload.
    pub fn append_to(self, mut payload: Vec<u8>) -> Vec<u8> {
        payload.extend_from_slice(&self.as_primitive().to_be_bytes());
        payload
    }
}

impl From<&U2fError> for ResponseStatusWords {
    fn from(error: &U2fError) -> Self {
        match error {
            U2fError::UserPresenceDenied | U2fError::TestOfUserPresenceRequired => {
                ResponseStatusWords::ConditionsNotSatisfied
            }
            U2fError::Format(FormatError::TruncatedMessage)
            | U2fError::Format(FormatError::UnexpectedTrailingData)
            | U2fError::Format(FormatError::KeyHandleTooLong(_)) => {
                ResponseStatusWords::WrongLength
            }
            _ => ResponseStatusWords::WrongData,
        }
    }
}

/// Cursor over a raw message which refuses to read past the end and to stop before it.
struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        if self.data.len() < len {
            return Err(FormatError::TruncatedMessage);
        }
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        Ok(head)
    }

    fn byte(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?[0])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        self.take(N)?
            .try_into()
            .map_err(|_| FormatError::TruncatedMessage)
    }

    /// Read a single byte length prefix followed by that many bytes.
    fn length_prefixed(&mut self) -> Result<&'a [u8], FormatError> {
        let len = self.byte()?;
        self.take(usize::from(len))
    }

    fn rest(&mut self) -> &'a [u8] {
        std::mem::take(&mut self.data)
    }

    fn finish(self) -> Result<(), FormatError> {
        if self.data.is_empty() {
            Ok(())
        } else {
            Err(FormatError::UnexpectedTrailingData)
        }
    }
}

/// Encode a key handle with its single byte length prefix.
fn length_prefixed(key_handle: &[u8]) -> Result<impl Iterator<Item = u8> + '_, FormatError> {
    let len = u8::try_from(key_handle.len())
        .map_err(|_| FormatError::KeyHandleTooLong(key_handle.len()))?;
    Ok(std::iter::once(len).chain(key_handle.iter().copied()))
}

const DER_SEQUENCE: u8 = 0x30;

/// A signature is the last field of both responses and has no explicit length. It is an
/// ASN.1 DER `SEQUENCE`, so its own header says where the message must end.
fn read_signature(reader: &mut Reader<'_>) -> Result<Vec<u8>, FormatError> {
    let signature = reader.rest();
    let (tag, len) = match signature {
        [] | [_] => return Err(FormatError::TruncatedMessage),
        [tag, len, ..] => (*tag, *len),
    };
    if tag != DER_SEQUENCE {
        return Err(FormatError::InvalidSignature);
    }
    let (header, body) = match len {
        0x00..=0x7f => (2, usize::from(len)),
        0x81 => match signature.get(2) {
            Some(len) => (3, usize::from(*len)),
            None => return Err(FormatError::TruncatedMessage),
        },
        0x82 => match signature.get(2..4) {
            Some(&[hi, lo]) => (4, usize::from(u16::from_be_bytes([hi, lo]))),
            _ => return Err(FormatError::TruncatedMessage),
        },
        _ => return Err(FormatError::InvalidSignature),
    };
    match signature.len().cmp(&(header + body)) {
        std::cmp::Ordering::Less => Err(FormatError::TruncatedMessage),
        std::cmp::Ordering::Greater => Err(FormatError::UnexpectedTrailingData),
        std::cmp::Ordering::Equal => Ok(signature.to_vec()),
    }
}
