//! Conversion between raw service JSON and domain objects.
//!
//! The set of resource kinds is closed, so a transformer is plain data: the
//! kind it serves, the key under which the service wraps collections of that
//! kind, and the fields a client may write on create/update. The JSON key to
//! struct field correspondence itself is declared on the models via serde.

use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_json::Value;

use crate::{Cloud, Encoding, Notifications, PandaError, Params, Profile, Result, Video};

// ---------------------------------------------------------------------------
// Resource kinds
// ---------------------------------------------------------------------------

/// The resource kinds exposed by the encoding cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Video,
    Encoding,
    Profile,
    Cloud,
    Notifications,
}

impl ResourceKind {
    /// Every kind, in registry order.
    pub const ALL: [ResourceKind; 5] = [
        Self::Video,
        Self::Encoding,
        Self::Profile,
        Self::Cloud,
        Self::Notifications,
    ];

    /// Position of this kind in [`ResourceKind::ALL`].
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Video => 0,
            Self::Encoding => 1,
            Self::Profile => 2,
            Self::Cloud => 3,
            Self::Notifications => 4,
        }
    }

    /// Lower-case singular name, used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Encoding => "encoding",
            Self::Profile => "profile",
            Self::Cloud => "cloud",
            Self::Notifications => "notifications",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain object that a [`Transformer`] can produce.
pub trait Resource: Serialize + DeserializeOwned {
    /// The kind whose transformer handles this type.
    const KIND: ResourceKind;
}

impl Resource for Video {
    const KIND: ResourceKind = ResourceKind::Video;
}

impl Resource for Encoding {
    const KIND: ResourceKind = ResourceKind::Encoding;
}

impl Resource for Profile {
    const KIND: ResourceKind = ResourceKind::Profile;
}

impl Resource for Cloud {
    const KIND: ResourceKind = ResourceKind::Cloud;
}

impl Resource for Notifications {
    const KIND: ResourceKind = ResourceKind::Notifications;
}

// ---------------------------------------------------------------------------
// Transformer
// ---------------------------------------------------------------------------

/// Converts raw JSON into one kind of domain object and back into request
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformer {
    kind: ResourceKind,
    collection_key: &'static str,
    writable: &'static [&'static str],
}

impl Transformer {
    pub(crate) const fn new(
        kind: ResourceKind,
        collection_key: &'static str,
        writable: &'static [&'static str],
    ) -> Self {
        Self {
            kind,
            collection_key,
            writable,
        }
    }

    /// The kind this transformer serves.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Key wrapping collections of this kind in root-included responses.
    pub fn collection_key(&self) -> &'static str {
        self.collection_key
    }

    /// Fields emitted by [`Transformer::to_request_params`].
    pub fn writable_fields(&self) -> &'static [&'static str] {
        self.writable
    }

    /// Decodes a single resource from a raw response body.
    pub fn from_json<T: Resource>(&self, raw: &str) -> Result<T> {
        let value = self.parse(raw)?;
        self.from_object(value)
    }

    /// Decodes a collection from a raw response body.
    ///
    /// Accepts a bare array or an object wrapping the array under
    /// [`Transformer::collection_key`].
    pub fn from_json_collection<T: Resource>(&self, raw: &str) -> Result<Vec<T>> {
        let value = self.parse(raw)?;
        self.from_collection(value)
    }

    /// Decodes a single resource from an already parsed value.
    pub fn from_object<T: Resource>(&self, value: Value) -> Result<T> {
        debug_assert_eq!(T::KIND, self.kind, "transformer used with the wrong resource type");
        serde_json::from_value(value).map_err(|e| PandaError::decode(self.kind, e))
    }

    /// Decodes a collection from an already parsed value.
    pub fn from_collection<T: Resource>(&self, value: Value) -> Result<Vec<T>> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove(self.collection_key) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(self.malformed(format!(
                        "expected an array under '{}'",
                        self.collection_key
                    )))
                }
            },
            other => return Err(self.malformed(format!("expected an array, found {other}"))),
        };

        items.into_iter().map(|item| self.from_object(item)).collect()
    }

    /// Serialises the client-writable fields of `resource` into request
    /// parameters.
    ///
    /// `null` fields are skipped. Booleans become `true`/`false`, arrays are
    /// comma-joined and nested objects are flattened as `key[sub]`.
    /// Service-assigned fields (identifier, status, timestamps) are never
    /// emitted.
    pub fn to_request_params<T: Resource>(&self, resource: &T) -> Result<Params> {
        debug_assert_eq!(T::KIND, self.kind, "transformer used with the wrong resource type");
        let value = serde_json::to_value(resource).map_err(|e| PandaError::decode(self.kind, e))?;

        let mut params = Params::new();
        if let Value::Object(fields) = value {
            for key in self.writable {
                if let Some(field) = fields.get(*key) {
                    flatten_into(&mut params, (*key).to_owned(), field);
                }
            }
        }
        Ok(params)
    }

    fn parse(&self, raw: &str) -> Result<Value> {
        serde_json::from_str(raw).map_err(|e| PandaError::decode(self.kind, e))
    }

    fn malformed(&self, message: String) -> PandaError {
        PandaError::decode(self.kind, serde_json::Error::custom(message))
    }
}

fn flatten_into(params: &mut Params, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(fields) => {
            for (sub, nested) in fields {
                flatten_into(params, format!("{key}[{sub}]"), nested);
            }
        }
        Value::Array(items) => {
            let joined: Vec<String> = items.iter().filter_map(scalar_text).collect();
            params.insert(key, joined.join(","));
        }
        scalar => {
            if let Some(text) = scalar_text(scalar) {
                params.insert(key, text);
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Whole floats go out as integers ("30", not "30.0").
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
