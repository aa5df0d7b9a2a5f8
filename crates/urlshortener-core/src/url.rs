//! URL syntax checks and redirect target normalization.
//!
//! Validation is about plausibility, not reachability: the long URL must look
//! like something a browser could navigate to. A missing scheme is accepted
//! and treated as `http`, as long as the host has a dot or an explicit port.

use std::borrow::Cow;
use ::url::{Host, Url};

/// Length, in characters, at which a URL is rejected as too long.
pub const MAX_URL_LENGTH: usize = 2083;
/// Inputs of this many characters or fewer are never URLs.
pub const MIN_URL_LENGTH: usize = 3;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "ftp"];
const DEFAULT_SCHEME_PREFIX: &str = "http://";
const SCHEME_SEPARATOR: &str = "://";
const MAX_LABEL_LENGTH: usize = 63;

/// Returns whether `raw` is a syntactically valid absolute or scheme-less URL.
///
/// # Examples
///
/// ```
/// use urlshortener_core::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com"));
/// assert!(is_valid_url("example.com/some/path"));
/// assert!(!is_valid_url("https://notanurl!"));
/// assert!(!is_valid_url("not a url!!"));
/// assert!(!is_valid_url("localhost"));
/// ```
pub fn is_valid_url(raw: &str) -> bool {
    let length = raw.chars().count();
    if length <= MIN_URL_LENGTH
        || length >= MAX_URL_LENGTH
        || raw.starts_with('.')
        || raw.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        return false;
    }

    let has_scheme = raw.contains(SCHEME_SEPARATOR);

    let Ok(parsed) = Url::parse(&with_default_scheme(raw)) else {
        return false;
    };

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return false;
    }

    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => {
            // a bare word like `foo` is a path, not a host
            if !has_scheme && !domain.contains('.') && !has_explicit_port(raw) {
                return false;
            }
            is_valid_domain(domain)
        }
        None => false,
    }
}

/// Prefixes `http://` when `url` carries no scheme separator.
///
/// Used to build redirect targets out of stored values like `example.com`.
pub fn with_default_scheme(url: &str) -> Cow<'_, str> {
    if url.contains(SCHEME_SEPARATOR) {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{DEFAULT_SCHEME_PREFIX}{url}"))
    }
}

/// Whether the authority part of a scheme-less `raw` carries a `:port`.
fn has_explicit_port(raw: &str) -> bool {
    let authority = raw.split(['/', '?', '#']).next().unwrap_or_default();
    authority
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()))
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.is_empty() {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if !labels.iter().all(|label| is_valid_label(label)) {
        return false;
    }

    // a numeric top-level label is an IP typo, not a domain
    match labels.as_slice() {
        [_] => true,
        [.., tld] => !tld.chars().all(|c| c.is_ascii_digit()),
        [] => false,
    }
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
