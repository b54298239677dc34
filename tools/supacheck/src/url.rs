//! Provides more specific types for URLs.

use url::Url;

/// A URL that is explicitly parsed as a base.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct BaseUrl(Url);

/// Errors encountered when parsing [`BaseUrl`].
#[derive(Debug, thiserror::Error)]
pub enum ParseBaseUrlError {
    /// Encountered when the underlying URL fails to parse at all.
    #[error("parse url")]
    ParseUrl(#[from] url::ParseError),

    /// Encountered when the URL parses, but is not a base.
    #[error("parsed URL '{0}' is not a base")]
    NotBaseUrl(Url),

    /// Encountered when the URL uses a scheme other than `http` or `https`.
    #[error("unsupported scheme '{0}', expected 'http' or 'https'")]
    UnsupportedScheme(String),
}

impl BaseUrl {
    /// Parse a [`BaseUrl`] from a string.
    ///
    /// The URL must be an `http` or `https` URL that can act as a base.
    /// Project URLs are usually given without a trailing slash
    /// (`https://abc.supabase.co`); a trailing slash is added to the path
    /// when missing so that routes always join beneath the full path
    /// instead of replacing its last segment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use supacheck::url::BaseUrl;
    ///
    /// let base = BaseUrl::parse("https://abc.supabase.co").expect("valid base url");
    /// assert_eq!(base.as_str(), "https://abc.supabase.co/");
    ///
    /// let base = BaseUrl::parse("http://localhost:54321/proxy").expect("valid base url");
    /// assert_eq!(base.as_str(), "http://localhost:54321/proxy/");
    ///
    /// BaseUrl::parse("abc.supabase.co").expect_err("relative url");
    /// BaseUrl::parse("mailto:someone@example.com").expect_err("not a base");
    /// ```
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ParseBaseUrlError> {
        let mut parsed = Url::parse(input.as_ref().trim())?;
        if parsed.cannot_be_a_base() {
            return Err(ParseBaseUrlError::NotBaseUrl(parsed));
        }
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ParseBaseUrlError::UnsupportedScheme(parsed.scheme().to_owned()));
        }
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self(parsed))
    }

    /// Join self to the provided string, parsed as a URL.
    ///
    /// # Errors
    ///
    /// If the function can not parse a [`Url`] from the given string
    /// with this URL as the base URL, a [`url::ParseError`] variant is returned.
    pub fn join(&self, other: impl AsRef<str>) -> Result<Url, url::ParseError> {
        self.0.join(other.as_ref())
    }

    /// Render self as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
