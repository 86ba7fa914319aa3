use url::{Origin, Url};

/// Reduce a URL to its origin, `scheme://host[:port]`, dropping path, query and fragment as
/// well as a default port.
///
/// Returns `None` for strings which are not URLs or have an opaque origin, such as `data:` URLs.
pub fn canonical_origin(url: &str) -> Option<String> {
    let origin = Url::parse(url).ok()?.origin();
    match origin {
        Origin::Tuple(..) => Some(origin.ascii_serialization()),
        Origin::Opaque(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::canonical_origin;

    #[test]
    fn drops_everything_after_the_authority() {
        for url in [
            "http://example.com",
            "http://example.com/",
            "http://example.com/foo",
            "http://example.com/foo?bar=b",
            "http://example.com/foo#fragment",
            "http://example.com:80/foo",
        ] {
            assert_eq!(canonical_origin(url).as_deref(), Some("http://example.com"));
        }
        assert_eq!(
            canonical_origin("https://example.com/foo").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            canonical_origin("https://example.com:8443").as_deref(),
            Some("https://example.com:8443")
        );
    }

    #[test]
    fn rejects_non_origins() {
        assert_eq!(canonical_origin("example.com"), None);
        assert_eq!(canonical_origin("data:text/plain,hello"), None);
    }
}
