//! Media reference parsing.

use mediaref_error::{MediaRefResult, ReferenceError};
use regex::Regex;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

static AUTHORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Valid authority regex"));

// Fragments may also list parts, e.g. `#1,2,5-7`.
static FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_,-]+$").expect("Valid fragment regex"));

/// URI scheme of a media reference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Scheme {
    /// Human readable reference, e.g. `ref:Fuer-Elise`
    #[display("ref")]
    Ref,
    /// Universally unique identifier, e.g. `uuid:c262fe9b-...`
    #[display("uuid")]
    Uuid,
}

impl Scheme {
    /// Textual form used in URIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Ref => "ref",
            Scheme::Uuid => "uuid",
        }
    }
}

impl std::str::FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ref" => Ok(Scheme::Ref),
            "uuid" => Ok(Scheme::Uuid),
            _ => Err(format!("Unknown media reference scheme: {}", s)),
        }
    }
}

/// A parsed media URI such as `ref:Beethoven_Ludwig-van#complete`.
///
/// Identity is the canonical key (`scheme:authority`); the fragment selects
/// a sample inside the asset and does not take part in equality or hashing.
///
/// # Examples
///
/// ```
/// use mediaref_core::{MediaReference, Scheme};
///
/// let a = MediaReference::parse("ref:Alla-Turca#complete").unwrap();
/// let b = MediaReference::parse("ref:Alla-Turca").unwrap();
///
/// assert_eq!(a.scheme(), Scheme::Ref);
/// assert_eq!(a.fragment(), Some("complete"));
/// assert_eq!(a.canonical_key(), "ref:Alla-Turca");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct MediaReference {
    raw: String,
    scheme: Scheme,
    authority: String,
    fragment: Option<String>,
    canonical_key: String,
}

impl MediaReference {
    /// Parse `scheme:authority` or `scheme:authority#fragment`.
    ///
    /// # Errors
    ///
    /// Returns a malformed reference error if the scheme is neither `ref`
    /// nor `uuid`, the authority is empty, or the authority or fragment
    /// contain characters outside their charsets.
    pub fn parse(raw: &str) -> MediaRefResult<Self> {
        let (scheme, rest) = raw
            .split_once(':')
            .ok_or_else(|| ReferenceError::malformed(format!("{} (missing scheme)", raw)))?;
        let scheme: Scheme = scheme
            .parse()
            .map_err(|e: String| ReferenceError::malformed(format!("{} ({})", raw, e)))?;

        let (authority, fragment) = match rest.split_once('#') {
            Some((authority, fragment)) => (authority, Some(fragment)),
            None => (rest, None),
        };

        if !AUTHORITY.is_match(authority) {
            return Err(ReferenceError::malformed(format!("{} (invalid authority)", raw)).into());
        }
        if let Some(fragment) = fragment
            && !FRAGMENT.is_match(fragment)
        {
            return Err(ReferenceError::malformed(format!("{} (invalid fragment)", raw)).into());
        }

        Ok(Self {
            raw: raw.to_string(),
            scheme,
            authority: authority.to_string(),
            fragment: fragment.map(str::to_string),
            canonical_key: format!("{}:{}", scheme, authority),
        })
    }

    /// Build a reference from its parts.
    pub fn compose(scheme: Scheme, authority: &str, fragment: Option<&str>) -> MediaRefResult<Self> {
        match fragment {
            Some(fragment) => Self::parse(&format!("{}:{}#{}", scheme, authority, fragment)),
            None => Self::parse(&format!("{}:{}", scheme, authority)),
        }
    }

    /// Check whether `raw` is a valid media reference.
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// The string this reference was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// URI scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Scheme-specific identifier.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Sample selector, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// `scheme:authority` without the fragment; the cache key of an asset.
    pub fn canonical_key(&self) -> &str {
        &self.canonical_key
    }

    /// The same reference with its fragment removed.
    pub fn without_fragment(&self) -> Self {
        Self {
            raw: self.canonical_key.clone(),
            scheme: self.scheme,
            authority: self.authority.clone(),
            fragment: None,
            canonical_key: self.canonical_key.clone(),
        }
    }

    /// The same reference selecting `fragment`.
    pub fn with_fragment(&self, fragment: &str) -> MediaRefResult<Self> {
        Self::compose(self.scheme, &self.authority, Some(fragment))
    }
}

impl PartialEq for MediaReference {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key == other.canonical_key
    }
}

impl Eq for MediaReference {}

impl Hash for MediaReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key.hash(state);
    }
}

impl std::fmt::Display for MediaReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fragment {
            Some(fragment) => write!(f, "{}#{}", self.canonical_key, fragment),
            None => write!(f, "{}", self.canonical_key),
        }
    }
}

impl std::str::FromStr for MediaReference {
    type Err = mediaref_error::MediaRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_with_part_list() {
        let r = MediaReference::parse("uuid:c262fe9b-c705-43fd-a5d4-4bb38178d9e7#1,2,5-7").unwrap();
        assert_eq!(r.scheme(), Scheme::Uuid);
        assert_eq!(r.authority(), "c262fe9b-c705-43fd-a5d4-4bb38178d9e7");
        assert_eq!(r.fragment(), Some("1,2,5-7"));
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let err = MediaReference::parse("id:Haydn_Joseph").unwrap_err();
        assert!(err.is_malformed_reference());
        assert!(MediaReference::parse("Haydn_Joseph").is_err());
    }

    #[test]
    fn test_rejects_bad_charsets() {
        assert!(MediaReference::parse("ref:").is_err());
        assert!(MediaReference::parse("ref:with space").is_err());
        assert!(MediaReference::parse("ref:a.b").is_err());
        assert!(MediaReference::parse("ref:A#").is_err());
        assert!(MediaReference::parse("ref:A#b#c").is_err());
        assert!(MediaReference::parse("ref:A#b.c").is_err());
    }

    #[test]
    fn test_without_fragment_is_canonical() {
        let r = MediaReference::parse("ref:Yesterday#complete").unwrap();
        let bare = r.without_fragment();
        assert_eq!(bare.raw(), "ref:Yesterday");
        assert_eq!(bare.fragment(), None);
        assert_eq!(r.to_string(), "ref:Yesterday#complete");
        assert_eq!(bare.to_string(), "ref:Yesterday");
    }
}
