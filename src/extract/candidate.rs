// src/extract/candidate.rs
// =============================================================================
// CandidateUrl: a site discovered on the results page.
//
// It is always an absolute URL with just a scheme and a host (path "/", the
// scheme's default port). Two candidates are equal when their normalized
// string forms are equal, which is what makes the candidate set a real set:
// "Example.COM" and "example.com" collapse to one entry.
// =============================================================================

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

#[derive(Debug, Clone)]
pub struct CandidateUrl {
    url: Url,
}

impl CandidateUrl {
    /// Builds `scheme://host/` on the scheme's default port.
    ///
    /// Fails when `host` is not a valid host name (e.g. it contains spaces
    /// or is bad punycode).
    ///
    /// Example:
    ///   from_host("Example.com", "http") -> "http://example.com/"
    pub fn from_host(host: &str, scheme: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(&format!("{}://{}/", scheme, host))?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(url::ParseError::EmptyHost);
        }
        Ok(Self { url })
    }

    /// Wraps an arbitrary absolute http(s) URL.
    ///
    /// The fragment is dropped and a default port is removed; path and query
    /// are kept. Useful for feeding the fetcher URLs that did not come from a
    /// results page.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let mut url = Url::parse(raw)?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(url::ParseError::EmptyHost);
        }
        // Url::parse already drops a port equal to the scheme default
        url.set_fragment(None);
        Ok(Self { url })
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Explicit port, or the scheme default
    pub fn port(&self) -> Option<u16> {
        self.url.port_or_known_default()
    }
}

// Identity is the normalized string, nothing else.
impl PartialEq for CandidateUrl {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for CandidateUrl {}

impl Hash for CandidateUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for CandidateUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CandidateUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn builds_root_url_on_default_port() {
        let candidate = CandidateUrl::from_host("example.com", "http").unwrap();
        assert_eq!(candidate.as_str(), "http://example.com/");
        assert_eq!(candidate.host(), "example.com");
        assert_eq!(candidate.port(), Some(80));

        let secure = CandidateUrl::from_host("example.com", "https").unwrap();
        assert_eq!(secure.port(), Some(443));
    }

    #[test]
    fn host_is_lowercased() {
        let candidate = CandidateUrl::from_host("WWW.Example.COM", "http").unwrap();
        assert_eq!(candidate.host(), "www.example.com");
    }

    #[test]
    fn rejects_invalid_host() {
        assert!(CandidateUrl::from_host("exa mple.com", "http").is_err());
        assert!(CandidateUrl::from_host("", "http").is_err());
    }

    #[test]
    fn equal_when_normalized_forms_match() {
        let a = CandidateUrl::from_host("Example.com", "http").unwrap();
        let b = CandidateUrl::parse("http://example.com:80/#top").unwrap();
        assert_eq!(a, b);

        let set: BTreeSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn parse_keeps_explicit_port_and_path() {
        let candidate = CandidateUrl::parse("http://127.0.0.1:8080/page?x=1").unwrap();
        assert_eq!(candidate.as_str(), "http://127.0.0.1:8080/page?x=1");
        assert_eq!(candidate.port(), Some(8080));
    }

    #[test]
    fn serializes_as_plain_string() {
        let candidate = CandidateUrl::from_host("example.com", "http").unwrap();
        let json = serde_json::to_string(&candidate).unwrap();
        assert_eq!(json, r#""http://example.com/""#);
    }
}
