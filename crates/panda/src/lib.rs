//! Typed client for the Panda video-encoding cloud.
//!
//! This crate maps each endpoint of the cloud's REST API (videos, encodings,
//! profiles, cloud settings, notifications) onto a method of [`CloudClient`],
//! and converts the JSON responses into domain objects.
//!
//! ## Architectural Layer
//!
//! **Domain mapping + port definitions.** This crate has no I/O dependencies.
//! It decides *which* verb, path and parameters each operation uses; the
//! [`RestClient`] port it consumes decides *how* the request travels. The
//! `rest` crate supplies the HTTPS implementation.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype resource identifiers (`VideoId`, `EncodingId`, etc.) |
//! | [`models`] | Domain objects (`Video`, `Encoding`, `Profile`, `Cloud`, `Notifications`) |
//! | [`types`] | Shared value types (`Status`, `Timestamp`, `Paginated`, call options) |
//! | [`transport`] | The [`RestClient`] port and request [`Params`] |
//! | [`transformer`] | JSON ↔ domain object conversion per [`ResourceKind`] |
//! | [`registry`] | [`TransformerRegistry`], the kind → transformer lookup |
//! | [`client`] | [`CloudClient`], the public facade |
//! | [`errors`] | [`TransportError`] and [`PandaError`] |

pub mod client;
pub mod errors;
pub mod identifiers;
pub mod models;
pub mod registry;
pub mod transformer;
pub mod transport;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::CloudClient;
pub use errors::{PandaError, Result, TransportError};
pub use identifiers::{CloudId, EmptyIdentifier, EncodingId, ProfileId, VideoId};
pub use models::{Cloud, Encoding, NotificationEvents, Notifications, Profile, Video};
pub use registry::TransformerRegistry;
pub use transformer::{Resource, ResourceKind, Transformer};
pub use transport::{ParamValue, Params, RestClient};
pub use types::{EncodeOptions, Paginated, Status, Timestamp, UploadRequest};
