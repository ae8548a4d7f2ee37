//! HMAC-SHA256 request signing.
//!
//! Every request carries `access_key`, `cloud_id`, `timestamp` and a
//! `signature` computed over
//!
//! ```text
//! {VERB}\n{host}\n{path}\n{canonical query string}
//! ```
//!
//! where the canonical query string is every text parameter (file parts
//! excluded) sorted by key, percent-encoded per RFC 3986 and joined with `&`.
//! `path` is the resource path without the API version prefix.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use panda::{ParamValue, Params, TransportError};
use sha2::Sha256;
use url::form_urlencoded;

type HmacSha256 = Hmac<Sha256>;

/// Signs requests for one cloud.
#[derive(Clone)]
pub struct Signer {
    access_key: String,
    secret_key: String,
    cloud_id: String,
    host: String,
}

impl Signer {
    /// Creates a signer for `cloud_id` that signs requests sent to `host`.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        cloud_id: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            cloud_id: cloud_id.into(),
            host: host.into(),
        }
    }

    /// Returns `params` extended with the authentication parameters and the
    /// signature for a `method` request to `path`.
    ///
    /// Caller-supplied values for the authentication keys are overwritten.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        params: &Params,
        timestamp: &str,
    ) -> Result<Params, TransportError> {
        let mut signed = params.clone();
        signed.remove("signature");
        signed.insert("access_key", self.access_key.as_str());
        signed.insert("cloud_id", self.cloud_id.as_str());
        signed.insert("timestamp", timestamp);

        let to_sign = string_to_sign(method, &self.host, path, &signed);
        let signature = self.signature(&to_sign)?;
        signed.insert("signature", signature);
        Ok(signed)
    }

    fn signature(&self, to_sign: &str) -> Result<String, TransportError> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("Invalid HMAC key: {e}")))?;
        mac.update(to_sign.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("access_key", &self.access_key)
            .field("cloud_id", &self.cloud_id)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Builds the string the signature is computed over.
pub fn string_to_sign(method: &str, host: &str, path: &str, params: &Params) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.to_uppercase(),
        host.to_lowercase(),
        path,
        canonical_query_string(params)
    )
}

/// Sorted, RFC 3986-encoded `key=value` pairs of all text parameters.
pub fn canonical_query_string(params: &Params) -> String {
    params
        .iter()
        .filter_map(|(key, value)| match value {
            ParamValue::Text(text) => Some(format!("{}={}", escape(key), escape(text))),
            ParamValue::File(_) => None,
        })
        .collect::<Vec<_>>()
        .join("&")
}

// form_urlencoded writes spaces as `+`, escapes `~` and leaves `*` literal.
// RFC 3986 keeps only `A-Za-z0-9-._~` unescaped.
fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}
