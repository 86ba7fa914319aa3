use public_suffix::{EffectiveTLDProvider, PublicSuffixList, DEFAULT_PROVIDER};
use u2f_types::U2fError;
use url::Url;

#[cfg(doc)]
use crate::Client;

/// Decides whether a page at some origin may use an application id.
pub trait OriginVerifier {
    /// Fails with [`U2fError::OriginMismatch`] when `origin` may not act for `app_id`.
    fn validate_origin(&self, app_id: &str, origin: &str) -> Result<(), U2fError>;
}

/// The default [`OriginVerifier`] of a [`Client`].
///
/// An origin may use an application id with the same scheme whose host is its own host or one
/// of its parent domains, as long as that parent is a registrable domain: an application id on a
/// public suffix such as `co.uk` or `github.io` is refused. Public suffixes are looked up through
/// a [`public_suffix::EffectiveTLDProvider`], the Mozilla Public Suffix List by default.
///
/// Only `https` is accepted, unless [`Self::allows_insecure_localhost`] lets `http://localhost`
/// through.
pub struct DomainOriginVerifier<P = PublicSuffixList> {
    tld_provider: P,
    allows_insecure_localhost: bool,
}

impl DomainOriginVerifier {
    /// Create a verifier backed by [`public_suffix::DEFAULT_PROVIDER`] which only accepts
    /// `https` origins.
    pub fn new() -> Self {
        Self::with_tld_provider(DEFAULT_PROVIDER)
    }
}

impl Default for DomainOriginVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DomainOriginVerifier<P> {
    /// Create a verifier with a custom list of effective top level domains.
    pub fn with_tld_provider(tld_provider: P) -> Self {
        Self {
            tld_provider,
            allows_insecure_localhost: false,
        }
    }

    /// Allows `http://localhost` origins to pass through.
    pub fn allows_insecure_localhost(mut self, is_allowed: bool) -> Self {
        self.allows_insecure_localhost = is_allowed;
        self
    }
}

impl<P> OriginVerifier for DomainOriginVerifier<P>
where
    P: EffectiveTLDProvider,
{
    fn validate_origin(&self, app_id: &str, origin: &str) -> Result<(), U2fError> {
        let mismatch = || U2fError::OriginMismatch {
            origin: origin.to_owned(),
            app_id: app_id.to_owned(),
        };
        let (Ok(origin_url), Ok(app_id_url)) = (Url::parse(origin), Url::parse(app_id)) else {
            return Err(mismatch());
        };
        let (Some(origin_host), Some(app_id_host)) = (origin_url.host_str(), app_id_url.host_str())
        else {
            return Err(mismatch());
        };

        if origin_url.scheme() != app_id_url.scheme() {
            return Err(mismatch());
        }

        if origin_host == "localhost" {
            return if self.allows_insecure_localhost && app_id_host == origin_host {
                Ok(())
            } else {
                Err(mismatch())
            };
        }
        if origin_url.scheme() != "https" {
            return Err(mismatch());
        }

        // The application id has to be a registrable domain shared with the origin
        let Ok(registrable) = self.tld_provider.effective_tld_plus_one(app_id_host) else {
            return Err(mismatch());
        };
        if self.tld_provider.effective_tld_plus_one(origin_host) != Ok(registrable) {
            return Err(mismatch());
        }

        let is_parent = origin_host
            .strip_suffix(app_id_host)
            .is_some_and(|subdomain| subdomain.ends_with('.'));
        if origin_host != app_id_host && !is_parent {
            return Err(mismatch());
        }
        Ok(())
    }
}
