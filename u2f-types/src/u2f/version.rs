use super::ResponseStatusWords;
use crate::U2F_VERSION;

/// The u2f version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version;

impl Version {
    /// Encode this version into its byte representation, status words included.
    pub fn encode(self) -> Vec<u8> {
        ResponseStatusWords::NoError.append_to(U2F_VERSION.as_bytes().to_vec())
    }
}
