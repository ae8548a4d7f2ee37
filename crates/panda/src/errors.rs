//! Error types for the encoding cloud client.
//!
//! Two layers exist:
//!
//! - [`TransportError`] is what a [`crate::RestClient`] implementation reports.
//!   It describes the HTTP exchange (status, network, local I/O) and nothing
//!   about resources.
//! - [`PandaError`] is what [`crate::CloudClient`] returns. Transport failures
//!   are carried through verbatim; the only failures the facade adds itself are
//!   undecodable responses and resources that lack the identifier a call
//!   needs.
//!
//! Business-rule validation (unknown profile, invalid video URL, ...) is the
//! service's job. Those failures arrive as [`TransportError::Status`] with the
//! service's error payload in `body`.

use thiserror::Error;

use crate::ResourceKind;

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failure reported by a [`crate::RestClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service answered with a non-success HTTP status.
    ///
    /// `body` holds the raw response text, which for this service is usually a
    /// JSON object with `error` and `message` keys.
    #[error("Service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Network failure: {0}")]
    Network(String),

    /// A local file named in the request parameters could not be read.
    #[error("Cannot read '{path}': {message}")]
    Io {
        /// Path of the file that failed.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },

    /// The request could not be built (bad URL, invalid header value).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Returns the HTTP status code if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Facade errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::CloudClient`] operations.
#[derive(Debug, Error)]
pub enum PandaError {
    /// The transport failed. The inner error is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded into the expected resource.
    #[error("Malformed {kind} response: {source}")]
    Decode {
        /// Resource kind the response was decoded as.
        kind: ResourceKind,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A response returned untransformed (upload session, metadata) was not
    /// valid JSON.
    #[error("Malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The operation needs a service-assigned identifier the resource does not
    /// carry (for example updating a profile that was never fetched).
    #[error("{kind} has no identifier")]
    MissingId {
        /// Resource kind that lacked an identifier.
        kind: ResourceKind,
    },
}

impl PandaError {
    pub(crate) fn decode(kind: ResourceKind, source: serde_json::Error) -> Self {
        Self::Decode { kind, source }
    }

    /// Returns the transport failure behind this error, if any.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, PandaError>;
