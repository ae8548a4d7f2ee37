//! Domain objects returned by the encoding cloud.
//!
//! Each struct is a best-effort view of the service's JSON: unknown keys are
//! ignored and missing keys fall back to `None` or an empty collection. The
//! JSON key for each field is the field name unless a `rename` says otherwise.
//!
//! None of these types are mutated by the client after construction; every
//! facade call returns a freshly decoded value.

use serde::{Deserialize, Serialize};

use crate::identifiers::optional_id;
use crate::types::{lenient_timestamp, null_as_default};
use crate::{CloudId, EncodingId, ProfileId, Status, Timestamp, VideoId};

/// A source video uploaded to, or fetched by, the cloud.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    #[serde(deserialize_with = "optional_id")]
    pub id: Option<VideoId>,
    pub original_filename: Option<String>,
    pub source_url: Option<String>,
    pub extname: Option<String>,
    pub path: Option<String>,
    pub mime_type: Option<String>,
    /// Duration in milliseconds.
    pub duration: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Size in bytes.
    pub file_size: Option<u64>,
    pub video_bitrate: Option<u32>,
    pub audio_bitrate: Option<u32>,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    pub fps: Option<f64>,
    pub audio_channels: Option<u32>,
    pub audio_sample_rate: Option<u32>,
    pub status: Option<Status>,
    pub error_message: Option<String>,
    pub error_class: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

/// An encoding job: one [`Video`] converted under one [`Profile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encoding {
    #[serde(deserialize_with = "optional_id")]
    pub id: Option<EncodingId>,
    #[serde(deserialize_with = "optional_id")]
    pub video_id: Option<VideoId>,
    #[serde(deserialize_with = "optional_id")]
    pub profile_id: Option<ProfileId>,
    pub profile_name: Option<String>,
    pub status: Option<Status>,
    pub extname: Option<String>,
    pub path: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub file_size: Option<u64>,
    /// Completion percentage, `0..=100`.
    pub encoding_progress: Option<f64>,
    /// Wall-clock seconds spent encoding.
    pub encoding_time: Option<f64>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub started_encoding_at: Option<Timestamp>,
    /// Output file URLs, one per generated file (several for HLS, thumbnails).
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<String>,
    pub error_message: Option<String>,
    pub error_class: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

/// An encoding preset.
///
/// Either built from a named preset (`preset_name`) or fully specified via
/// codec settings and an optional raw `command`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "optional_id")]
    pub id: Option<ProfileId>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub preset_name: Option<String>,
    pub extname: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub upscale: Option<bool>,
    /// One of `letterbox`, `pad`, `crop`, `preserve`, `constrain`.
    pub aspect_mode: Option<String>,
    pub audio_bitrate: Option<u32>,
    pub video_bitrate: Option<u32>,
    pub audio_sample_rate: Option<u32>,
    pub audio_channels: Option<u32>,
    pub fps: Option<f64>,
    pub keyframe_interval: Option<u32>,
    pub command: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

/// Settings of one cloud.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cloud {
    #[serde(deserialize_with = "optional_id")]
    pub id: Option<CloudId>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub s3_videos_bucket: Option<String>,
    pub s3_private_access: Option<bool>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<Timestamp>,
}

/// Webhook configuration of a cloud.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifications {
    /// Callback URL receiving event POSTs.
    pub url: Option<String>,
    /// Seconds to wait before delivering.
    pub delay: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub events: NotificationEvents,
}

/// Which events trigger a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationEvents {
    pub video_created: Option<bool>,
    pub video_encoded: Option<bool>,
    pub encoding_progress: Option<bool>,
    pub encoding_completed: Option<bool>,
}
