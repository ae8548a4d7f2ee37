//! The public facade: one method per endpoint of the encoding cloud.

use serde::de::Error as _;
use serde_json::Value;
use tracing::debug;

use crate::transformer::{Resource, ResourceKind};
use crate::{
    Cloud, CloudId, EncodeOptions, Encoding, EncodingId, Notifications, Paginated, PandaError,
    Params, Profile, ProfileId, RestClient, Result, Status, TransformerRegistry, UploadRequest,
    Video, VideoId,
};

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Client for one encoding cloud.
///
/// Every method maps to exactly one request on the underlying [`RestClient`]
/// and returns a freshly decoded value. Nothing is cached and no state is
/// kept between calls, so a `CloudClient` is as safe to share between tasks
/// as its transport is.
///
/// Transport failures are returned as [`PandaError::Transport`] with the
/// transport's error unchanged. Nothing is retried.
///
/// # Example
///
/// ```ignore
/// use panda::{CloudClient, Params};
///
/// let cloud = CloudClient::with_client(transport);
/// let video = cloud.encode_video_by_url("https://example.com/clip.mp4").await?;
/// let encodings = cloud
///     .get_encodings_for_video(video.id.as_ref().unwrap(), &Params::new())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct CloudClient<C> {
    client: C,
    registry: TransformerRegistry,
}

impl<C: RestClient> CloudClient<C> {
    /// Creates a facade over `client` using the given transformer lookup.
    pub fn new(client: C, registry: TransformerRegistry) -> Self {
        Self { client, registry }
    }

    /// Creates a facade over `client` with the default transformers.
    pub fn with_client(client: C) -> Self {
        Self::new(client, TransformerRegistry::new())
    }

    /// The underlying transport.
    pub fn rest_client(&self) -> &C {
        &self.client
    }

    /// The transformer lookup in use.
    pub fn registry(&self) -> &TransformerRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Videos
    // -----------------------------------------------------------------------

    /// Lists all videos of the cloud.
    pub async fn get_videos(&self) -> Result<Vec<Video>> {
        self.fetch_all(Method::Get, "/videos.json", &Params::new())
            .await
    }

    /// Lists one page of videos.
    ///
    /// Only the `videos` array is transformed; every other envelope field
    /// (`total`, `page`, `per_page`, ...) is returned untouched.
    pub async fn get_videos_for_pagination(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<Video>> {
        self.fetch_page("/videos.json", page, per_page).await
    }

    /// Fetches one video.
    pub async fn get_video(&self, id: &VideoId) -> Result<Video> {
        self.fetch_one(Method::Get, &format!("/videos/{id}.json"), &Params::new())
            .await
    }

    /// Fetches the raw container metadata the service extracted from a video.
    pub async fn get_video_metadata(&self, id: &VideoId) -> Result<Value> {
        let raw = self
            .call(Method::Get, &format!("/videos/{id}/metadata.json"), &Params::new())
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Deletes a video and its encodings. Returns the raw response body.
    pub async fn delete_video(&self, id: &VideoId) -> Result<String> {
        self.call(Method::Delete, &format!("/videos/{id}.json"), &Params::new())
            .await
    }

    /// Submits a video the service downloads from `url`.
    pub async fn encode_video_by_url(&self, url: &str) -> Result<Video> {
        self.encode_video_by_url_with(url, &EncodeOptions::default())
            .await
    }

    /// Like [`CloudClient::encode_video_by_url`], with explicit options.
    pub async fn encode_video_by_url_with(
        &self,
        url: &str,
        options: &EncodeOptions,
    ) -> Result<Video> {
        let mut params = Params::new().with("source_url", url);
        apply_encode_options(&mut params, options);
        self.fetch_one(Method::Post, "/videos.json", &params).await
    }

    /// Uploads a local file as a new video.
    pub async fn encode_video_file(&self, path: impl AsRef<std::path::Path>) -> Result<Video> {
        self.encode_video_file_with(path, &EncodeOptions::default())
            .await
    }

    /// Like [`CloudClient::encode_video_file`], with explicit options.
    pub async fn encode_video_file_with(
        &self,
        path: impl AsRef<std::path::Path>,
        options: &EncodeOptions,
    ) -> Result<Video> {
        let mut params = Params::new();
        params.insert_file("file", path.as_ref());
        apply_encode_options(&mut params, options);
        self.fetch_one(Method::Post, "/videos.json", &params).await
    }

    /// Opens a resumable upload session.
    ///
    /// An explicit profile list is sent comma-joined as `profiles` and
    /// `use_all_profiles` is then left out. Without one, `use_all_profiles` is
    /// sent as `true`/`false`. The session description is returned as raw
    /// JSON because its shape is specific to the upload endpoint.
    pub async fn register_upload(&self, request: &UploadRequest) -> Result<Value> {
        let mut params = Params::new()
            .with("file_name", request.file_name.as_str())
            .with("file_size", request.file_size.to_string());

        match &request.profiles {
            Some(profiles) => params.insert("profiles", profiles.join(",")),
            None => params.insert("use_all_profiles", request.use_all_profiles.to_string()),
        }

        let raw = self
            .call(Method::Post, "/videos/upload.json", &params)
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    // -----------------------------------------------------------------------
    // Encodings
    // -----------------------------------------------------------------------

    /// Lists encodings matching `filter`.
    pub async fn get_encodings(&self, filter: &Params) -> Result<Vec<Encoding>> {
        self.fetch_all(Method::Get, "/encodings.json", filter)
            .await
    }

    /// Lists encodings in `status`, on top of `filter`.
    pub async fn get_encodings_with_status(
        &self,
        status: &Status,
        filter: &Params,
    ) -> Result<Vec<Encoding>> {
        self.get_encodings(&with_filter(filter, "status", status.as_str()))
            .await
    }

    /// Lists encodings produced with the profile `profile_id`, on top of `filter`.
    pub async fn get_encodings_for_profile(
        &self,
        profile_id: &ProfileId,
        filter: &Params,
    ) -> Result<Vec<Encoding>> {
        self.get_encodings(&with_filter(filter, "profile_id", profile_id.as_str()))
            .await
    }

    /// Lists encodings produced with the profile named `profile_name`, on top
    /// of `filter`.
    pub async fn get_encodings_for_profile_by_name(
        &self,
        profile_name: &str,
        filter: &Params,
    ) -> Result<Vec<Encoding>> {
        self.get_encodings(&with_filter(filter, "profile_name", profile_name))
            .await
    }

    /// Lists encodings of one video, on top of `filter`.
    pub async fn get_encodings_for_video(
        &self,
        video_id: &VideoId,
        filter: &Params,
    ) -> Result<Vec<Encoding>> {
        self.get_encodings(&with_filter(filter, "video_id", video_id.as_str()))
            .await
    }

    /// Fetches one encoding.
    pub async fn get_encoding(&self, id: &EncodingId) -> Result<Encoding> {
        self.fetch_one(Method::Get, &format!("/encodings/{id}.json"), &Params::new())
            .await
    }

    /// Queues an encoding of `video_id` with the profile `profile_id`.
    pub async fn create_encoding(
        &self,
        video_id: &VideoId,
        profile_id: &ProfileId,
    ) -> Result<Encoding> {
        let params = Params::new()
            .with("video_id", video_id.as_str())
            .with("profile_id", profile_id.as_str());
        self.fetch_one(Method::Post, "/encodings.json", &params)
            .await
    }

    /// Queues an encoding of `video_id` with the profile named `profile_name`.
    pub async fn create_encoding_with_profile_name(
        &self,
        video_id: &VideoId,
        profile_name: &str,
    ) -> Result<Encoding> {
        let params = Params::new()
            .with("video_id", video_id.as_str())
            .with("profile_name", profile_name);
        self.fetch_one(Method::Post, "/encodings.json", &params)
            .await
    }

    /// Cancels a queued or running encoding. Returns the raw response body.
    pub async fn cancel_encoding(&self, id: &EncodingId) -> Result<String> {
        self.call(Method::Post, &format!("/encodings/{id}/cancel.json"), &Params::new())
            .await
    }

    /// Re-queues a failed encoding. Returns the raw response body.
    pub async fn retry_encoding(&self, id: &EncodingId) -> Result<String> {
        self.call(Method::Post, &format!("/encodings/{id}/retry.json"), &Params::new())
            .await
    }

    /// Deletes an encoding and its output files. Returns the raw response body.
    pub async fn delete_encoding(&self, id: &EncodingId) -> Result<String> {
        self.call(Method::Delete, &format!("/encodings/{id}.json"), &Params::new())
            .await
    }

    // -----------------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------------

    /// Lists all profiles of the cloud.
    pub async fn get_profiles(&self) -> Result<Vec<Profile>> {
        self.fetch_all(Method::Get, "/profiles.json", &Params::new())
            .await
    }

    /// Fetches one profile.
    pub async fn get_profile(&self, id: &ProfileId) -> Result<Profile> {
        self.fetch_one(Method::Get, &format!("/profiles/{id}.json"), &Params::new())
            .await
    }

    /// Creates a profile from raw settings.
    pub async fn add_profile(&self, data: &Params) -> Result<Profile> {
        self.fetch_one(Method::Post, "/profiles.json", data).await
    }

    /// Creates a profile from one of the service's named presets.
    pub async fn add_profile_from_preset(&self, preset_name: &str) -> Result<Profile> {
        let params = Params::new().with("preset_name", preset_name);
        self.fetch_one(Method::Post, "/profiles.json", &params)
            .await
    }

    /// Updates a profile with its writable fields.
    pub async fn set_profile(&self, profile: &Profile) -> Result<Profile> {
        let id = profile_id(profile)?;
        let params = self
            .registry
            .for_resource::<Profile>()
            .to_request_params(profile)?;
        self.fetch_one(Method::Put, &format!("/profiles/{id}.json"), &params)
            .await
    }

    /// Deletes a profile. Returns the raw response body.
    pub async fn delete_profile(&self, profile: &Profile) -> Result<String> {
        let id = profile_id(profile)?;
        self.call(Method::Delete, &format!("/profiles/{id}.json"), &Params::new())
            .await
    }

    // -----------------------------------------------------------------------
    // Cloud settings
    // -----------------------------------------------------------------------

    /// Fetches cloud settings. `None` means the transport's configured cloud.
    pub async fn get_cloud(&self, id: Option<&CloudId>) -> Result<Cloud> {
        let id = self.resolve_cloud_id(id);
        self.fetch_one(Method::Get, &format!("/clouds/{id}.json"), &Params::new())
            .await
    }

    /// Updates cloud settings. `None` means the transport's configured cloud.
    pub async fn set_cloud(&self, data: &Params, id: Option<&CloudId>) -> Result<Cloud> {
        let id = self.resolve_cloud_id(id);
        self.fetch_one(Method::Put, &format!("/clouds/{id}.json"), data)
            .await
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Fetches the cloud's notification settings.
    pub async fn get_notifications(&self) -> Result<Notifications> {
        self.fetch_one(Method::Get, "/notifications.json", &Params::new())
            .await
    }

    /// Replaces notification settings from raw parameters.
    pub async fn set_notifications(&self, data: &Params) -> Result<Notifications> {
        self.fetch_one(Method::Put, "/notifications.json", data)
            .await
    }

    /// Replaces notification settings from a typed value.
    pub async fn update_notifications(
        &self,
        notifications: &Notifications,
    ) -> Result<Notifications> {
        let params = self
            .registry
            .for_resource::<Notifications>()
            .to_request_params(notifications)?;
        self.set_notifications(&params).await
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    fn resolve_cloud_id(&self, id: Option<&CloudId>) -> String {
        match id {
            Some(id) => id.to_string(),
            None => self.client.cloud_id(),
        }
    }

    async fn call(&self, method: Method, path: &str, params: &Params) -> Result<String> {
        debug!(
            method = method.as_str(),
            path = %path,
            params = params.len(),
            "Calling encoding cloud"
        );

        let response = match method {
            Method::Get => self.client.get(path, params).await,
            Method::Post => self.client.post(path, params).await,
            Method::Put => self.client.put(path, params).await,
            Method::Delete => self.client.delete(path).await,
        };

        response.map_err(|e| {
            debug!(
                method = method.as_str(),
                path = %path,
                error = %e,
                "Encoding cloud call failed"
            );
            PandaError::Transport(e)
        })
    }

    async fn fetch_one<T: Resource>(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<T> {
        let raw = self.call(method, path, params).await?;
        self.registry.for_resource::<T>().from_json(&raw)
    }

    async fn fetch_all<T: Resource>(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<Vec<T>> {
        let raw = self.call(method, path, params).await?;
        self.registry.for_resource::<T>().from_json_collection(&raw)
    }

    async fn fetch_page<T: Resource>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<T>> {
        let params = Params::new()
            .with("include_root", "true")
            .with("page", page.to_string())
            .with("per_page", per_page.to_string());
        let raw = self.call(Method::Get, path, &params).await?;

        let transformer = self.registry.for_resource::<T>();
        let value: Value =
            serde_json::from_str(&raw).map_err(|e| PandaError::decode(T::KIND, e))?;
        let Value::Object(mut envelope) = value else {
            return Err(PandaError::decode(
                T::KIND,
                serde_json::Error::custom("expected a paginated object"),
            ));
        };

        let listed = envelope
            .remove(transformer.collection_key())
            .unwrap_or(Value::Null);
        let items = transformer.from_collection(listed)?;

        Ok(Paginated { items, envelope })
    }
}

fn with_filter(filter: &Params, key: &str, value: &str) -> Params {
    let mut params = filter.clone();
    params.insert(key, value);
    params
}

fn apply_encode_options(params: &mut Params, options: &EncodeOptions) {
    if !options.profiles.is_empty() {
        params.insert("profiles", options.profiles.join(","));
    }
    if let Some(path_format) = &options.path_format {
        params.insert("path_format", path_format.as_str());
    }
    if let Some(payload) = &options.payload {
        params.insert("payload", payload.as_str());
    }
}

fn profile_id(profile: &Profile) -> Result<&ProfileId> {
    profile.id.as_ref().ok_or(PandaError::MissingId {
        kind: ResourceKind::Profile,
    })
}
