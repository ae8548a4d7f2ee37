//! `reqwest`-backed implementation of [`panda::RestClient`].

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use panda::{ParamValue, Params, RestClient, TransportError};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use tracing::{debug, warn};

use crate::config::{RestConfig, RestConfigError};
use crate::signing::Signer;

/// Signed HTTPS transport for one cloud.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpRestClient {
    http: Client,
    base_url: String,
    cloud_id: String,
    signer: Arc<Signer>,
}

impl HttpRestClient {
    /// Creates a client from configuration.
    pub fn new(config: RestConfig) -> Result<Self, RestConfigError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("panda-rust/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http_client(http, config))
    }

    /// Creates a client around an existing `reqwest` client.
    pub fn with_http_client(http: Client, config: RestConfig) -> Self {
        let base_url = config.base_url();
        let cloud_id = config.cloud_id.to_string();
        let signer = Signer::new(
            config.access_key,
            config.secret_key,
            cloud_id.clone(),
            config.api_host,
        );

        Self {
            http,
            base_url,
            cloud_id,
            signer: Arc::new(signer),
        }
    }

    /// Reads configuration from the environment and creates a client.
    pub fn from_env() -> Result<Self, RestConfigError> {
        Self::new(RestConfig::from_env()?)
    }

    /// Root URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<String, TransportError> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let signed = self
            .signer
            .sign(method.as_str(), path, params, &timestamp)?;
        let url = format!("{}{}", self.base_url, path);

        debug!(
            method = %method,
            path = %path,
            params = params.len(),
            multipart = signed.has_files(),
            "Sending signed request"
        );

        let request = self.http.request(method.clone(), &url);
        let request = attach_params(request, &method, &signed).await?;

        let response = request.send().await.map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "Request failed");
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            warn!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                "Service returned an error status"
            );
            Err(TransportError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    async fn get(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        self.send(Method::GET, path, params).await
    }

    async fn post(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        self.send(Method::POST, path, params).await
    }

    async fn put(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        self.send(Method::PUT, path, params).await
    }

    async fn delete(&self, path: &str) -> Result<String, TransportError> {
        self.send(Method::DELETE, path, &Params::new()).await
    }

    fn cloud_id(&self) -> String {
        self.cloud_id.clone()
    }
}

/// GET and DELETE carry parameters in the query string. POST and PUT send a
/// form body, or multipart when a file part is present.
async fn attach_params(
    request: RequestBuilder,
    method: &Method,
    params: &Params,
) -> Result<RequestBuilder, TransportError> {
    if *method == Method::GET || *method == Method::DELETE {
        return Ok(request.query(&text_pairs(params)));
    }

    if params.has_files() {
        Ok(request.multipart(multipart_form(params).await?))
    } else {
        Ok(request.form(&text_pairs(params)))
    }
}

fn text_pairs(params: &Params) -> Vec<(&str, &str)> {
    params
        .iter()
        .filter_map(|(key, value)| value.as_text().map(|text| (key, text)))
        .collect()
}

async fn multipart_form(params: &Params) -> Result<Form, TransportError> {
    let mut form = Form::new();

    for (key, value) in params.iter() {
        form = match value {
            ParamValue::Text(text) => form.text(key.to_owned(), text.clone()),
            ParamValue::File(path) => form.part(key.to_owned(), file_part(path).await?),
        };
    }

    Ok(form)
}

async fn file_part(path: &Path) -> Result<Part, TransportError> {
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| TransportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("video")
        .to_string();

    debug!(file = %path.display(), size = contents.len(), "Attaching file part");

    Part::bytes(contents)
        .file_name(file_name)
        .mime_str(mime_type_for_file(path))
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))
}

/// MIME type for a video file, by extension.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("flv") => "video/x-flv",
        Some("ogv") => "video/ogg",
        Some("mpg") | Some("mpeg") => "video/mpeg",
        _ => "application/octet-stream",
    }
}
