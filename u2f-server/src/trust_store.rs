use u2f_types::{crypto, FormatError, U2fError};

/// The set of attestation certificates a relying party trusts.
///
/// A certificate is trusted when it is in the set, or when it was issued and signed by a
/// certificate in the set. Longer chains are not followed.
#[derive(Debug, Default, Clone)]
pub struct TrustStore {
    certificates: Vec<Vec<u8>>,
}

impl TrustStore {
    /// Create an empty trust store, which trusts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust a DER encoded certificate and everything it directly issues.
    pub fn add_trusted_certificate(&mut self, certificate: Vec<u8>) -> Result<(), U2fError> {
        if crypto::certificate_length(&certificate)? != certificate.len() {
            return Err(FormatError::InvalidCertificate.into());
        }
        if !self.certificates.contains(&certificate) {
            self.certificates.push(certificate);
        }
        Ok(())
    }

    /// Whether a DER encoded attestation certificate is trusted.
    pub fn is_trusted(&self, certificate: &[u8]) -> bool {
        self.certificates.iter().any(|trusted| {
            trusted.as_slice() == certificate || crypto::is_issued_by(certificate, trusted)
        })
    }

    /// The trusted certificates.
    pub fn certificates(&self) -> impl Iterator<Item = &[u8]> {
        self.certificates.iter().map(Vec::as_slice)
    }

    /// Number of trusted certificates.
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Whether nothing is trusted.
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}
