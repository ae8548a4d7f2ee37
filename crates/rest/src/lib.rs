//! HTTPS transport for the Panda encoding cloud.
//!
//! Implements the [`panda::RestClient`] port over `reqwest`, signing every
//! request with the cloud's access and secret keys.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection pooling, timeouts, request signing,
//! form/multipart encoding and status-code handling all live here. The
//! [`panda`] crate sees only [`panda::RestClient`].
//!
//! ## Usage
//!
//! ```ignore
//! use panda::CloudClient;
//! use rest::HttpRestClient;
//!
//! let transport = HttpRestClient::from_env()?;
//! let cloud = CloudClient::with_client(transport);
//! for profile in cloud.get_profiles().await? {
//!     println!("{:?}", profile.name);
//! }
//! ```

mod client;
mod config;
pub mod signing;

pub use client::HttpRestClient;
pub use config::{
    RestConfig, RestConfigError, DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_API_VERSION,
};
pub use signing::Signer;
