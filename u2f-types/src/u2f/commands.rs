use super::{authenticate::AuthenticationRequest, register::RegisterRequest, ResponseStatusWords};
use crate::FormatError;

/// Instruction byte of a U2F APDU.
///
/// Values `0x40..=0xbf` are reserved for vendors and end up in [`Command::Unsupported`] along
/// with every other unknown instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `U2F_REGISTER`, INS `0x01`
    Register,
    /// `U2F_AUTHENTICATE`, INS `0x02`, the control byte travels in P1
    Authenticate,
    /// `U2F_VERSION`, INS `0x03`
    Version,
    /// Any other instruction
    Unsupported(u8),
}

const INS_REGISTER: u8 = 0x01;
const INS_AUTHENTICATE: u8 = 0x02;
const INS_VERSION: u8 = 0x03;

impl From<u8> for Command {
    fn from(ins: u8) -> Self {
        match ins {
            INS_REGISTER => Command::Register,
            INS_AUTHENTICATE => Command::Authenticate,
            INS_VERSION => Command::Version,
            other => Command::Unsupported(other),
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        match command {
            Command::Register => INS_REGISTER,
            Command::Authenticate => INS_AUTHENTICATE,
            Command::Version => INS_VERSION,
            Command::Unsupported(ins) => ins,
        }
    }
}

/// Decoded command data, one variant per supported [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    /// Challenge and application parameters
    Register(RegisterRequest),
    /// Control byte, parameters and key handle
    Authenticate(AuthenticationRequest),
    /// No data
    Version,
}

/// A U2F command APDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Class byte, always 0
    pub cla: u8,
    /// Instruction byte
    pub ins: Command,
    /// First parameter byte, the control byte of an authentication
    pub p1: u8,
    /// Length of the command data
    pub data_len: usize,
    /// Decoded command data
    pub data: RequestPayload,
}

impl Request {
    /// Frame a request as an extended length APDU, `CLA INS P1 P2 00 Lc1 Lc2 data`.
    pub fn encode(&self) -> Result<Vec<u8>, FormatError> {
        let (p1, payload) = match &self.data {
            RequestPayload::Register(request) => (0x00, request.encode()),
            RequestPayload::Authenticate(request) => {
                (u8::from(request.parameter), request.encode_payload()?)
            }
            RequestPayload::Version => (0x00, Vec::new()),
        };
        let mut frame = vec![self.cla, u8::from(self.ins), p1, 0x00];
        if !payload.is_empty() {
            let len = u16::try_from(payload.len())
                .map_err(|_| FormatError::KeyHandleTooLong(payload.len()))?;
            frame.push(0x00);
            frame.extend_from_slice(&len.to_be_bytes());
            frame.extend_from_slice(&payload);
        }
        Ok(frame)
    }
}

/// Split the APDU body into the command data, accepting short and extended length encodings with
/// an optional trailing `Le`.
fn command_data(body: &[u8]) -> Result<&[u8], ResponseStatusWords> {
    let (data_len, data, le_len) = match body {
        // no data, with or without a short Le
        [] | [_] => return Ok(&[]),
        // extended Le only
        [0x00, _, _] => return Ok(&[]),
        [0x00, hi, lo, rest @ ..] => (usize::from(u16::from_be_bytes([*hi, *lo])), rest, 2),
        [lc, rest @ ..] => (usize::from(*lc), rest, 1),
    };
    if data.len() < data_len {
        return Err(ResponseStatusWords::WrongLength);
    }
    let (data, le) = data.split_at(data_len);
    if !le.is_empty() && le.len() != le_len {
        return Err(ResponseStatusWords::WrongLength);
    }
    Ok(data)
}

impl TryFrom<&[u8]> for Request {
    type Error = ResponseStatusWords;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let &[cla, ins, p1, _p2, ref body @ ..] = value else {
            return Err(ResponseStatusWords::WrongLength);
        };
        if cla != 0 {
            return Err(ResponseStatusWords::ClaNotSupported);
        }
        let ins = Command::from(ins);
        let payload = command_data(body)?;

        let data = match ins {
            Command::Register => RequestPayload::Register(
                payload
                    .try_into()
                    // Wrong length because it must be two SHA256's which are 32 bytes each
                    .map_err(|_| ResponseStatusWords::WrongLength)?,
            ),
            Command::Authenticate => RequestPayload::Authenticate(
                AuthenticationRequest::decode_payload(p1, payload).map_err(|e| match e {
                    FormatError::InvalidControlByte(_) => ResponseStatusWords::WrongData,
                    _ => ResponseStatusWords::WrongLength,
                })?,
            ),
            Command::Version => RequestPayload::Version,
            Command::Unsupported(_) => return Err(ResponseStatusWords::InsNotSupported),
        };

        Ok(Request {
            cla,
            ins,
            p1,
            data_len: payload.len(),
            data,
        })
    }
}
