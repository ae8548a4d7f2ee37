//! Lookup from [`ResourceKind`] to its [`Transformer`].

use crate::transformer::{Resource, ResourceKind, Transformer};

const VIDEO_FIELDS: &[&str] = &["source_url"];

const ENCODING_FIELDS: &[&str] = &["video_id", "profile_id", "profile_name"];

const PROFILE_FIELDS: &[&str] = &[
    "name",
    "title",
    "preset_name",
    "extname",
    "width",
    "height",
    "upscale",
    "aspect_mode",
    "audio_bitrate",
    "video_bitrate",
    "audio_sample_rate",
    "audio_channels",
    "fps",
    "keyframe_interval",
    "command",
];

const CLOUD_FIELDS: &[&str] = &["name", "s3_videos_bucket", "s3_private_access"];

const NOTIFICATION_FIELDS: &[&str] = &["url", "delay", "events"];

/// Immutable table of the five transformers.
///
/// Built once and shared by reference; lookups cannot fail because
/// [`ResourceKind`] is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformerRegistry {
    table: [Transformer; 5],
}

impl TransformerRegistry {
    /// Builds the registry with the service's field mappings.
    pub fn new() -> Self {
        Self {
            table: [
                Transformer::new(ResourceKind::Video, "videos", VIDEO_FIELDS),
                Transformer::new(ResourceKind::Encoding, "encodings", ENCODING_FIELDS),
                Transformer::new(ResourceKind::Profile, "profiles", PROFILE_FIELDS),
                Transformer::new(ResourceKind::Cloud, "clouds", CLOUD_FIELDS),
                Transformer::new(
                    ResourceKind::Notifications,
                    "notifications",
                    NOTIFICATION_FIELDS,
                ),
            ],
        }
    }

    /// Returns the transformer for `kind`.
    pub fn get(&self, kind: ResourceKind) -> &Transformer {
        &self.table[kind.index()]
    }

    /// Returns the transformer producing `T`.
    pub fn for_resource<T: Resource>(&self) -> &Transformer {
        self.get(T::KIND)
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
