use std::fmt;

/// Error types for fetching, shaping and rendering GA4 reports
#[derive(Debug)]
pub enum Ga4Error {
    /// Credentials missing, unreadable or rejected
    Authentication(String),

    /// Malformed request, API-side rejection, undecodable response or timeout
    Request(String),

    /// A column expected by a table policy is absent
    Schema(String),

    /// Configuration error
    Config(String),

    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// HTTP client error
    Http(reqwest::Error),

    /// JSON encoding/decoding error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Signing the service account assertion failed
    Jwt(jsonwebtoken::errors::Error),
}

impl Ga4Error {
    /// Map a transport error to the request/authentication taxonomy.
    ///
    /// Timeouts and connection failures are request errors; the raw
    /// `reqwest::Error` is kept only for errors that carry no better meaning.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Ga4Error::Request(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Ga4Error::Request(format!("could not connect: {err}"))
        } else if err.is_decode() {
            Ga4Error::Request(format!("could not decode response: {err}"))
        } else {
            Ga4Error::Http(err)
        }
    }
}

impl fmt::Display for Ga4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ga4Error::Authentication(msg) => write!(f, "Authentication error: {msg}"),
            Ga4Error::Request(msg) => write!(f, "Request error: {msg}"),
            Ga4Error::Schema(msg) => write!(f, "Schema error: {msg}"),
            Ga4Error::Config(msg) => write!(f, "Configuration error: {msg}"),
            Ga4Error::Io(err) => write!(f, "IO error: {err}"),
            Ga4Error::Http(err) => write!(f, "HTTP error: {err}"),
            Ga4Error::Json(err) => write!(f, "JSON error: {err}"),
            Ga4Error::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            Ga4Error::Jwt(err) => write!(f, "JWT error: {err}"),
        }
    }
}

impl std::error::Error for Ga4Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Ga4Error::Io(err) => Some(err),
            Ga4Error::Http(err) => Some(err),
            Ga4Error::Json(err) => Some(err),
            Ga4Error::TomlParsing(err) => Some(err),
            Ga4Error::Jwt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Ga4Error {
    fn from(err: std::io::Error) -> Self {
        Ga4Error::Io(err)
    }
}

impl From<reqwest::Error> for Ga4Error {
    fn from(err: reqwest::Error) -> Self {
        Ga4Error::from_transport(err)
    }
}

impl From<serde_json::Error> for Ga4Error {
    fn from(err: serde_json::Error) -> Self {
        Ga4Error::Json(err)
    }
}

impl From<toml::de::Error> for Ga4Error {
    fn from(err: toml::de::Error) -> Self {
        Ga4Error::TomlParsing(err)
    }
}

impl From<jsonwebtoken::errors::Error> for Ga4Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Ga4Error::Jwt(err)
    }
}

/// Type alias for Results using Ga4Error
pub type Result<T> = std::result::Result<T, Ga4Error>;
