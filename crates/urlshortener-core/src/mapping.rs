use crate::error::InvalidInput;
use crate::url::{is_valid_url, with_default_scheme};
use std::borrow::Cow;
use std::fmt::Display;

/// A validated short URL to long URL pair, ready to be stored.
///
/// Construction runs the same checks, in the same order, that guard every
/// insert: the short URL must be non-empty, the long URL must be non-empty,
/// and the long URL must be syntactically valid. The first failure wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    short_url: String,
    long_url: String,
}

impl UrlMapping {
    pub fn new(
        short_url: impl Into<String>,
        long_url: impl Into<String>,
    ) -> std::result::Result<Self, InvalidInput> {
        let short_url = short_url.into();
        let long_url = long_url.into();

        if short_url.is_empty() {
            return Err(InvalidInput::EmptyShortUrl);
        }

        if long_url.is_empty() {
            return Err(InvalidInput::EmptyLongUrl);
        }

        if !is_valid_url(&long_url) {
            return Err(InvalidInput::MalformedLongUrl);
        }

        Ok(Self {
            short_url,
            long_url,
        })
    }

    pub fn short_url(&self) -> &str {
        &self.short_url
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    /// The location a client is redirected to, with `http://` defaulted.
    pub fn redirect_target(&self) -> Cow<'_, str> {
        with_default_scheme(&self.long_url)
    }
}

impl Display for UrlMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.short_url, self.long_url)
    }
}
