use std::fmt;

use thiserror::Error;

/// Fallback code for failures where the controller's own code is unknown.
pub const UNKNOWN_ERROR_CODE: i64 = 99_999;

/// Code reported when the signed-in user has no privilege on a named site.
pub const UNKNOWN_SITE_CODE: i64 = 99_001;

/// A controller-reported error: the `errorCode` / `msg` pair of an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "errorCode={}, msg={:?}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Coarse classification of [`Error`] so callers can branch without
/// matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network, TLS, URL or non-2xx HTTP failure.
    Transport,
    /// The envelope decoded cleanly and carried a nonzero `errorCode`.
    Envelope,
    /// The body was not a usable envelope, or `result` had the wrong shape.
    Decode,
    /// Client-side domain failure (e.g. unknown site).
    Domain,
    /// Caller misuse detected before any network I/O.
    Precondition,
}

/// Top-level error type for the `omada-api` crate.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The controller answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// URL construction failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Envelope ────────────────────────────────────────────────────
    /// Nonzero `errorCode` in a well-formed envelope.
    #[error("Omada API error: {0}")]
    Api(ApiError),

    // ── Decode ──────────────────────────────────────────────────────
    /// The body could not be interpreted. `body` keeps the raw text.
    #[error("Decode error ({code}): {message}")]
    Decode {
        code: i64,
        message: String,
        body: String,
    },

    // ── Domain ──────────────────────────────────────────────────────
    /// The signed-in user's privilege list has no site with this name.
    #[error("Current user does not have privilege to site \"{name}\"")]
    UnknownSite { name: String },

    // ── Precondition ────────────────────────────────────────────────
    /// An authenticated call was attempted while logged out.
    #[error("Not logged in")]
    NotAuthenticated,

    /// Login was called with an empty username or password.
    #[error("Missing credential: {field} must not be empty")]
    MissingCredential { field: &'static str },
}

impl Error {
    /// The taxonomy bucket this error falls in.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::HttpStatus { .. } | Self::InvalidUrl(_) | Self::Tls(_) => {
                ErrorKind::Transport
            }
            Self::Api(_) => ErrorKind::Envelope,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::UnknownSite { .. } => ErrorKind::Domain,
            Self::NotAuthenticated | Self::MissingCredential { .. } => ErrorKind::Precondition,
        }
    }

    /// The numeric Omada error code, when the error carries one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Api(err) => Some(err.code),
            Self::Decode { code, .. } => Some(*code),
            Self::UnknownSite { .. } => Some(UNKNOWN_SITE_CODE),
            _ => None,
        }
    }

    /// Build a decode error from a serde failure, keeping a body preview
    /// in the message and the full text in `body`.
    pub(crate) fn decode(err: &serde_json::Error, body: &str) -> Self {
        let preview: String = body.chars().take(200).collect();
        Self::Decode {
            code: UNKNOWN_ERROR_CODE,
            message: format!("{err} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    }

    /// Returns `true` if re-authenticating might resolve this error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::HttpStatus { status: 401, .. })
    }

    /// Returns `true` if the transport layer gave up on time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the controller could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}
