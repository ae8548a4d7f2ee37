//! Shared value types: job status, timestamps, paginated envelopes and the
//! option structs that replace optional trailing arguments.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Processing state of a video or an encoding.
///
/// Transitions are driven by the service; the client only reads them and
/// uses them as filter values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// Waiting for a worker.
    Queued,
    /// Being transcoded.
    Processing,
    /// Finished successfully.
    Success,
    /// Finished with an error. Sent as `fail`; `error` is also accepted.
    Error,
    /// Cancelled before completion.
    Cancelled,
    /// A status this client does not know about, kept verbatim.
    Other(String),
}

impl Status {
    /// Returns the wire representation used in responses and filters.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Error => "fail",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// Returns `true` once the service will no longer change this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error | Self::Cancelled)
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "queued" => Self::Queued,
            "processing" => Self::Processing,
            "success" => Self::Success,
            "fail" | "error" => Self::Error,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        match value {
            Status::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC timestamp reported by the service.
///
/// The service emits `2009/10/13 19:11:26 +0000`; RFC 3339 is accepted too.
/// Serialises as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp(DateTime<Utc>);

const SERVICE_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S %z";

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Parses either supported representation.
    pub fn parse(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .or_else(|_| DateTime::parse_from_str(value, SERVICE_TIME_FORMAT))
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unrecognised timestamp '{s}'"))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// Field deserialiser for optional timestamps: anything that is not a
/// recognisable timestamp string becomes `None`.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(Timestamp::parse))
}

/// Reads an explicit `null` as the field's default, like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One page of a collection, fetched with `include_root=true`.
///
/// `items` holds the transformed resources. `envelope` holds every other
/// top-level field of the response exactly as the service sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    /// Resources on this page.
    pub items: Vec<T>,
    /// Remaining envelope fields (`total`, `page`, `per_page`, ...).
    pub envelope: Map<String, Value>,
}

impl<T> Paginated<T> {
    /// Total number of resources across all pages, if reported.
    pub fn total(&self) -> Option<u64> {
        self.envelope_u64("total")
    }

    /// Page number of this page, if reported.
    pub fn page(&self) -> Option<u64> {
        self.envelope_u64("page")
    }

    /// Page size used by the service, if reported.
    pub fn per_page(&self) -> Option<u64> {
        self.envelope_u64("per_page")
    }

    // Counts come back as numbers or numeric strings depending on endpoint.
    fn envelope_u64(&self, key: &str) -> Option<u64> {
        match self.envelope.get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Call options
// ---------------------------------------------------------------------------

/// Arguments for registering a resumable upload session.
///
/// Defaults: no explicit profile list, `use_all_profiles = false`.
/// An explicit profile list always wins over `use_all_profiles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Name of the file being uploaded.
    pub file_name: String,
    /// Size of the file in bytes.
    pub file_size: u64,
    /// Profile names to encode with once the upload completes.
    pub profiles: Option<Vec<String>>,
    /// Encode with every profile of the cloud. Ignored when `profiles` is set.
    pub use_all_profiles: bool,
}

impl UploadRequest {
    /// Creates a request with default profile selection.
    pub fn new(file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_size,
            profiles: None,
            use_all_profiles: false,
        }
    }

    /// Encodes with exactly these profile names.
    #[must_use]
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = Some(profiles.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the `use_all_profiles` flag.
    #[must_use]
    pub fn use_all_profiles(mut self, enabled: bool) -> Self {
        self.use_all_profiles = enabled;
        self
    }
}

/// Optional extras when submitting a video for encoding.
///
/// The default sends nothing beyond the source, letting the cloud apply its
/// default profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Profile names to encode with; empty means the cloud's defaults.
    pub profiles: Vec<String>,
    /// Output path template, e.g. `my-videos/:id`.
    pub path_format: Option<String>,
    /// Opaque string echoed back in notifications.
    pub payload: Option<String>,
}
