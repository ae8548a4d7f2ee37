//! Tests for the CloudClient facade.
//!
//! These tests run the facade against an in-memory transport that records
//! every request and replays canned responses, so they check exactly which
//! verb, path and parameters each operation produces.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use panda::{
    CloudClient, CloudId, EncodeOptions, EncodingId, NotificationEvents, Notifications,
    PandaError, ParamValue, Params, Profile, ProfileId, ResourceKind, RestClient, Status,
    TransportError, UploadRequest, VideoId,
};

// =============================================================================
// Test Helpers
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: &'static str,
    path: String,
    params: Params,
}

struct RecordingClient {
    cloud_id: String,
    cloud_id_reads: AtomicUsize,
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
}

impl RecordingClient {
    fn replying(body: &str) -> Self {
        Self::with_response(Ok(body.to_string()))
    }

    fn failing(error: TransportError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<String, TransportError>) -> Self {
        Self {
            cloud_id: "default-cloud".to_string(),
            cloud_id_reads: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::from([response])),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn only_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {calls:?}");
        calls.into_iter().next().unwrap()
    }

    fn cloud_id_reads(&self) -> usize {
        self.cloud_id_reads.load(Ordering::SeqCst)
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        params: &Params,
    ) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            params: params.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("{}".to_string()))
    }
}

#[async_trait]
impl RestClient for RecordingClient {
    async fn get(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        self.record("GET", path, params)
    }

    async fn post(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        self.record("POST", path, params)
    }

    async fn put(&self, path: &str, params: &Params) -> Result<String, TransportError> {
        self.record("PUT", path, params)
    }

    async fn delete(&self, path: &str) -> Result<String, TransportError> {
        self.record("DELETE", path, &Params::new())
    }

    fn cloud_id(&self) -> String {
        self.cloud_id_reads.fetch_add(1, Ordering::SeqCst);
        self.cloud_id.clone()
    }
}

fn cloud(body: &str) -> CloudClient<RecordingClient> {
    CloudClient::with_client(RecordingClient::replying(body))
}

fn video_id(raw: &str) -> VideoId {
    VideoId::new(raw).unwrap()
}

const ENCODINGS: &str = r#"[
    {"id": "e1", "video_id": "v1", "profile_name": "h264", "status": "success"},
    {"id": "e2", "video_id": "v1", "profile_name": "webm", "status": "processing"}
]"#;

// =============================================================================
// Videos
// =============================================================================

mod videos {
    use super::*;

    #[tokio::test]
    async fn test_get_videos() {
        let cloud = cloud(r#"[{"id": "v1", "status": "success"}, {"id": "v2"}]"#);

        let videos = cloud.get_videos().await.unwrap();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].status, Some(Status::Success));
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "GET");
        assert_eq!(call.path, "/videos.json");
        assert!(call.params.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_transforms_only_items() {
        let cloud = cloud(
            r#"{
                "videos": [{"id": "v1", "original_filename": "a.mp4"}, {"id": "v2"}],
                "total": 120,
                "page": 2,
                "per_page": 50,
                "extra": {"kept": true}
            }"#,
        );

        let page = cloud.get_videos_for_pagination(2, 50).await.unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "GET");
        assert_eq!(call.path, "/videos.json");
        assert_eq!(call.params.get_text("page"), Some("2"));
        assert_eq!(call.params.get_text("per_page"), Some("50"));
        assert_eq!(call.params.get_text("include_root"), Some("true"));

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].original_filename.as_deref(), Some("a.mp4"));
        assert_eq!(page.total(), Some(120));
        assert_eq!(page.page(), Some(2));
        assert_eq!(page.per_page(), Some(50));
        assert_eq!(page.envelope["extra"], serde_json::json!({"kept": true}));
        assert!(!page.envelope.contains_key("videos"));
    }

    #[tokio::test]
    async fn test_pagination_without_items_is_a_decode_error() {
        let cloud = cloud(r#"{"total": 0}"#);

        let err = cloud.get_videos_for_pagination(1, 10).await.unwrap_err();

        assert!(matches!(
            err,
            PandaError::Decode {
                kind: ResourceKind::Video,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_get_video() {
        let cloud = cloud(r#"{"id": "abc123", "width": 1920, "height": 1080}"#);

        let video = cloud.get_video(&video_id("abc123")).await.unwrap();

        assert_eq!(video.id, VideoId::new("abc123"));
        assert_eq!(video.width, Some(1920));
        assert_eq!(cloud.rest_client().only_call().path, "/videos/abc123.json");
    }

    #[tokio::test]
    async fn test_get_video_metadata_is_untransformed() {
        let cloud = cloud(r#"{"format": {"duration": "12.5"}, "streams": []}"#);

        let metadata = cloud.get_video_metadata(&video_id("v1")).await.unwrap();

        assert_eq!(metadata["format"]["duration"], "12.5");
        assert_eq!(
            cloud.rest_client().only_call().path,
            "/videos/v1/metadata.json"
        );
    }

    #[tokio::test]
    async fn test_delete_video_returns_raw_body() {
        let cloud = cloud(r#"{"deleted": true}"#);

        let body = cloud.delete_video(&video_id("v1")).await.unwrap();

        assert_eq!(body, r#"{"deleted": true}"#);
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "DELETE");
        assert_eq!(call.path, "/videos/v1.json");
    }

    #[tokio::test]
    async fn test_encode_video_by_url() {
        let cloud = cloud(r#"{"id": "v9", "source_url": "https://example.com/a.mp4"}"#);

        let video = cloud
            .encode_video_by_url("https://example.com/a.mp4")
            .await
            .unwrap();

        assert_eq!(video.id, VideoId::new("v9"));
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "POST");
        assert_eq!(call.path, "/videos.json");
        assert_eq!(
            call.params.get_text("source_url"),
            Some("https://example.com/a.mp4")
        );
        assert_eq!(call.params.len(), 1);
    }

    #[tokio::test]
    async fn test_encode_video_by_url_with_options() {
        let cloud = cloud(r#"{"id": "v9"}"#);
        let options = EncodeOptions {
            profiles: vec!["h264".into(), "webm".into()],
            path_format: Some("clips/:id".into()),
            payload: Some("order-42".into()),
        };

        cloud
            .encode_video_by_url_with("https://example.com/a.mp4", &options)
            .await
            .unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(call.params.get_text("profiles"), Some("h264,webm"));
        assert_eq!(call.params.get_text("path_format"), Some("clips/:id"));
        assert_eq!(call.params.get_text("payload"), Some("order-42"));
    }

    #[tokio::test]
    async fn test_encode_video_file_sends_file_part() {
        let cloud = cloud(r#"{"id": "v10", "original_filename": "clip.mp4"}"#);

        let video = cloud.encode_video_file("/tmp/clip.mp4").await.unwrap();

        assert_eq!(video.original_filename.as_deref(), Some("clip.mp4"));
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "POST");
        assert_eq!(call.path, "/videos.json");
        assert_eq!(
            call.params.get("file").and_then(ParamValue::as_file),
            Some(Path::new("/tmp/clip.mp4"))
        );
    }
}

// =============================================================================
// Upload registration
// =============================================================================

mod upload {
    use super::*;

    #[tokio::test]
    async fn test_explicit_profiles_win_over_flag() {
        let cloud = cloud(r#"{"location": "https://uploads.example.com/session/1"}"#);
        let request = UploadRequest::new("clip.mp4", 1_048_576)
            .with_profiles(["p1", "p2"])
            .use_all_profiles(true);

        let session = cloud.register_upload(&request).await.unwrap();

        assert_eq!(session["location"], "https://uploads.example.com/session/1");
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "POST");
        assert_eq!(call.path, "/videos/upload.json");
        assert_eq!(call.params.get_text("file_name"), Some("clip.mp4"));
        assert_eq!(call.params.get_text("file_size"), Some("1048576"));
        assert_eq!(call.params.get_text("profiles"), Some("p1,p2"));
        assert!(!call.params.contains_key("use_all_profiles"));
    }

    #[tokio::test]
    async fn test_use_all_profiles_without_list() {
        let cloud = cloud(r#"{"location": "x"}"#);
        let request = UploadRequest::new("clip.mp4", 10).use_all_profiles(true);

        cloud.register_upload(&request).await.unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(call.params.get_text("use_all_profiles"), Some("true"));
        assert!(!call.params.contains_key("profiles"));
    }

    #[tokio::test]
    async fn test_default_sends_flag_false() {
        let cloud = cloud(r#"{"location": "x"}"#);

        cloud
            .register_upload(&UploadRequest::new("clip.mp4", 10))
            .await
            .unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(call.params.get_text("use_all_profiles"), Some("false"));
    }

    #[tokio::test]
    async fn test_malformed_session_is_a_json_error() {
        let cloud = cloud("<html>oops</html>");

        let err = cloud
            .register_upload(&UploadRequest::new("clip.mp4", 10))
            .await
            .unwrap_err();

        assert!(matches!(err, PandaError::Json(_)));
    }
}

// =============================================================================
// Encodings
// =============================================================================

mod encodings {
    use super::*;

    fn base_filter() -> Params {
        Params::new().with("page", "3")
    }

    async fn wrapper_matches_direct_call<F, Fut>(key: &str, value: &str, wrapper: F)
    where
        F: FnOnce(CloudClient<RecordingClient>) -> Fut,
        Fut: std::future::Future<Output = (CloudClient<RecordingClient>, Vec<panda::Encoding>)>,
    {
        let direct = cloud(ENCODINGS);
        let expected = direct
            .get_encodings(&base_filter().with(key, value))
            .await
            .unwrap();

        let (wrapped, actual) = wrapper(cloud(ENCODINGS)).await;

        assert_eq!(actual, expected);
        assert_eq!(wrapped.rest_client().calls(), direct.rest_client().calls());
        let call = wrapped.rest_client().only_call();
        assert_eq!(call.params.get_text("page"), Some("3"));
        assert_eq!(call.params.get_text(key), Some(value));
    }

    #[tokio::test]
    async fn test_get_encodings_passes_filter() {
        let cloud = cloud(ENCODINGS);
        let filter = Params::new().with("status", "success").with("per_page", "5");

        let encodings = cloud.get_encodings(&filter).await.unwrap();

        assert_eq!(encodings.len(), 2);
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "GET");
        assert_eq!(call.path, "/encodings.json");
        assert_eq!(call.params, filter);
    }

    #[tokio::test]
    async fn test_with_status_equals_filtered_call() {
        wrapper_matches_direct_call("status", "processing", |cloud| async move {
            let result = cloud
                .get_encodings_with_status(&Status::Processing, &base_filter())
                .await
                .unwrap();
            (cloud, result)
        })
        .await;
    }

    #[tokio::test]
    async fn test_for_profile_equals_filtered_call() {
        wrapper_matches_direct_call("profile_id", "p1", |cloud| async move {
            let result = cloud
                .get_encodings_for_profile(&ProfileId::new("p1").unwrap(), &base_filter())
                .await
                .unwrap();
            (cloud, result)
        })
        .await;
    }

    #[tokio::test]
    async fn test_for_profile_by_name_equals_filtered_call() {
        wrapper_matches_direct_call("profile_name", "h264", |cloud| async move {
            let result = cloud
                .get_encodings_for_profile_by_name("h264", &base_filter())
                .await
                .unwrap();
            (cloud, result)
        })
        .await;
    }

    #[tokio::test]
    async fn test_for_video_equals_filtered_call() {
        wrapper_matches_direct_call("video_id", "v1", |cloud| async move {
            let result = cloud
                .get_encodings_for_video(&video_id("v1"), &base_filter())
                .await
                .unwrap();
            (cloud, result)
        })
        .await;
    }

    #[tokio::test]
    async fn test_wrapper_overrides_same_key_in_filter() {
        let cloud = cloud(ENCODINGS);
        let filter = Params::new().with("status", "queued");

        cloud
            .get_encodings_with_status(&Status::Error, &filter)
            .await
            .unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(call.params.get_text("status"), Some("fail"));
        // Caller's filter is left as it was.
        assert_eq!(filter.get_text("status"), Some("queued"));
    }

    #[tokio::test]
    async fn test_get_encoding() {
        let cloud = cloud(r#"{"id": "e1", "encoding_progress": 42.5, "files": ["a.mp4"]}"#);

        let encoding = cloud
            .get_encoding(&EncodingId::new("e1").unwrap())
            .await
            .unwrap();

        assert_eq!(encoding.encoding_progress, Some(42.5));
        assert_eq!(encoding.files, vec!["a.mp4".to_string()]);
        assert_eq!(cloud.rest_client().only_call().path, "/encodings/e1.json");
    }

    #[tokio::test]
    async fn test_create_encoding() {
        let cloud = cloud(r#"{"id": "e5", "video_id": "v1", "profile_id": "p1", "status": "queued"}"#);

        let encoding = cloud
            .create_encoding(&video_id("v1"), &ProfileId::new("p1").unwrap())
            .await
            .unwrap();

        assert_eq!(encoding.status, Some(Status::Queued));
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "POST");
        assert_eq!(call.path, "/encodings.json");
        assert_eq!(
            call.params,
            Params::new().with("video_id", "v1").with("profile_id", "p1")
        );
    }

    #[tokio::test]
    async fn test_create_encoding_with_profile_name() {
        let cloud = cloud(r#"{"id": "e6"}"#);

        cloud
            .create_encoding_with_profile_name(&video_id("v1"), "h264")
            .await
            .unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(
            call.params,
            Params::new().with("video_id", "v1").with("profile_name", "h264")
        );
    }

    #[tokio::test]
    async fn test_actions_return_raw_body() {
        let id = EncodingId::new("e1").unwrap();

        let cloud = cloud("cancelled, not json");
        let body = cloud.cancel_encoding(&id).await.unwrap();
        assert_eq!(body, "cancelled, not json");
        let call = cloud.rest_client().only_call();
        assert_eq!((call.method, call.path.as_str()), ("POST", "/encodings/e1/cancel.json"));

        let cloud = super::cloud(r#"{"status": "queued"}"#);
        let body = cloud.retry_encoding(&id).await.unwrap();
        assert_eq!(body, r#"{"status": "queued"}"#);
        let call = cloud.rest_client().only_call();
        assert_eq!((call.method, call.path.as_str()), ("POST", "/encodings/e1/retry.json"));

        let cloud = super::cloud("");
        let body = cloud.delete_encoding(&id).await.unwrap();
        assert_eq!(body, "");
        let call = cloud.rest_client().only_call();
        assert_eq!((call.method, call.path.as_str()), ("DELETE", "/encodings/e1.json"));
    }
}

// =============================================================================
// Profiles
// =============================================================================

mod profiles {
    use super::*;

    #[tokio::test]
    async fn test_get_profiles_and_profile() {
        let cloud = cloud(r#"[{"id": "p1", "name": "h264"}]"#);
        let profiles = cloud.get_profiles().await.unwrap();
        assert_eq!(profiles[0].name.as_deref(), Some("h264"));
        assert_eq!(cloud.rest_client().only_call().path, "/profiles.json");

        let cloud = super::cloud(r#"{"id": "p1", "name": "h264", "width": 1280}"#);
        let profile = cloud
            .get_profile(&ProfileId::new("p1").unwrap())
            .await
            .unwrap();
        assert_eq!(profile.width, Some(1280));
        assert_eq!(cloud.rest_client().only_call().path, "/profiles/p1.json");
    }

    #[tokio::test]
    async fn test_add_profile_sends_data_verbatim() {
        let cloud = cloud(r#"{"id": "p2", "name": "custom"}"#);
        let data = Params::new()
            .with("name", "custom")
            .with("extname", ".mp4")
            .with("command", "ffmpeg -i $input_file$ $output_file$");

        let profile = cloud.add_profile(&data).await.unwrap();

        assert_eq!(profile.id, ProfileId::new("p2"));
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "POST");
        assert_eq!(call.path, "/profiles.json");
        assert_eq!(call.params, data);
    }

    #[tokio::test]
    async fn test_add_profile_from_preset() {
        let cloud = cloud(r#"{"id": "p3", "preset_name": "h264"}"#);

        cloud.add_profile_from_preset("h264").await.unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(call.params, Params::new().with("preset_name", "h264"));
    }

    #[tokio::test]
    async fn test_set_profile_puts_writable_fields() {
        let cloud = cloud(r#"{"id": "p1", "name": "renamed", "height": 480}"#);
        let profile = Profile {
            id: ProfileId::new("p1"),
            name: Some("renamed".into()),
            height: Some(480),
            ..Profile::default()
        };

        let updated = cloud.set_profile(&profile).await.unwrap();

        assert_eq!(updated.name.as_deref(), Some("renamed"));
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "PUT");
        assert_eq!(call.path, "/profiles/p1.json");
        assert_eq!(
            call.params,
            Params::new().with("name", "renamed").with("height", "480")
        );
    }

    #[tokio::test]
    async fn test_profile_without_id_is_rejected_before_sending() {
        let cloud = cloud("{}");
        let profile = Profile {
            name: Some("new".into()),
            ..Profile::default()
        };

        let err = cloud.set_profile(&profile).await.unwrap_err();
        assert!(matches!(
            err,
            PandaError::MissingId {
                kind: ResourceKind::Profile
            }
        ));

        let err = cloud.delete_profile(&profile).await.unwrap_err();
        assert!(matches!(err, PandaError::MissingId { .. }));
        assert!(cloud.rest_client().calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_profile() {
        let cloud = cloud(r#"{"deleted": true}"#);
        let profile = Profile {
            id: ProfileId::new("p1"),
            ..Profile::default()
        };

        let body = cloud.delete_profile(&profile).await.unwrap();

        assert_eq!(body, r#"{"deleted": true}"#);
        let call = cloud.rest_client().only_call();
        assert_eq!((call.method, call.path.as_str()), ("DELETE", "/profiles/p1.json"));
    }
}

// =============================================================================
// Cloud settings
// =============================================================================

mod cloud_settings {
    use super::*;

    #[tokio::test]
    async fn test_get_cloud_uses_configured_id_once() {
        let cloud = cloud(r#"{"id": "default-cloud", "name": "production"}"#);

        let settings = cloud.get_cloud(None).await.unwrap();

        assert_eq!(settings.name.as_deref(), Some("production"));
        assert_eq!(cloud.rest_client().cloud_id_reads(), 1);
        assert_eq!(
            cloud.rest_client().only_call().path,
            "/clouds/default-cloud.json"
        );
    }

    #[tokio::test]
    async fn test_get_cloud_with_explicit_id_skips_lookup() {
        let cloud = cloud(r#"{"id": "abc"}"#);

        cloud
            .get_cloud(Some(&CloudId::new("abc").unwrap()))
            .await
            .unwrap();

        assert_eq!(cloud.rest_client().cloud_id_reads(), 0);
        assert_eq!(cloud.rest_client().only_call().path, "/clouds/abc.json");
    }

    #[tokio::test]
    async fn test_set_cloud() {
        let cloud = cloud(r#"{"id": "default-cloud", "s3_private_access": true}"#);
        let data = Params::new().with("s3_private_access", "true");

        let settings = cloud.set_cloud(&data, None).await.unwrap();

        assert_eq!(settings.s3_private_access, Some(true));
        assert_eq!(cloud.rest_client().cloud_id_reads(), 1);
        let call = cloud.rest_client().only_call();
        assert_eq!(call.method, "PUT");
        assert_eq!(call.path, "/clouds/default-cloud.json");
        assert_eq!(call.params, data);
    }
}

// =============================================================================
// Notifications
// =============================================================================

mod notifications {
    use super::*;

    const SETTINGS: &str = r#"{
        "url": "https://example.com/hook",
        "delay": 1.5,
        "events": {"video_created": true, "video_encoded": false}
    }"#;

    #[tokio::test]
    async fn test_get_notifications() {
        let cloud = cloud(SETTINGS);

        let settings = cloud.get_notifications().await.unwrap();

        assert_eq!(settings.url.as_deref(), Some("https://example.com/hook"));
        assert_eq!(settings.delay, Some(1.5));
        assert_eq!(settings.events.video_created, Some(true));
        assert_eq!(settings.events.encoding_progress, None);
        let call = cloud.rest_client().only_call();
        assert_eq!((call.method, call.path.as_str()), ("GET", "/notifications.json"));
    }

    #[tokio::test]
    async fn test_set_notifications() {
        let cloud = cloud(SETTINGS);
        let data = Params::new().with("url", "https://example.com/hook");

        cloud.set_notifications(&data).await.unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!((call.method, call.path.as_str()), ("PUT", "/notifications.json"));
        assert_eq!(call.params, data);
    }

    #[tokio::test]
    async fn test_update_notifications_flattens_events() {
        let cloud = cloud(SETTINGS);
        let settings = Notifications {
            url: Some("https://example.com/hook".into()),
            delay: Some(1.5),
            events: NotificationEvents {
                video_created: Some(true),
                video_encoded: Some(false),
                ..NotificationEvents::default()
            },
        };

        cloud.update_notifications(&settings).await.unwrap();

        let call = cloud.rest_client().only_call();
        assert_eq!(
            call.params,
            Params::new()
                .with("url", "https://example.com/hook")
                .with("delay", "1.5")
                .with("events[video_created]", "true")
                .with("events[video_encoded]", "false")
        );
    }
}

// =============================================================================
// Error propagation
// =============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_transport_failure_propagates_unchanged() {
        let failure = TransportError::Status {
            status: 404,
            body: r#"{"error": "RecordNotFound", "message": "Couldn't find Video"}"#.into(),
        };
        let cloud = CloudClient::with_client(RecordingClient::failing(failure.clone()));

        let err = cloud.get_video(&video_id("missing")).await.unwrap_err();

        assert_eq!(err.as_transport(), Some(&failure));
        assert_eq!(err.as_transport().and_then(TransportError::status), Some(404));
        assert_eq!(cloud.rest_client().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_raw_operations_propagate_failures_too() {
        let failure = TransportError::Network("connection refused".into());
        let cloud = CloudClient::with_client(RecordingClient::failing(failure.clone()));

        let err = cloud
            .cancel_encoding(&EncodingId::new("e1").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, PandaError::Transport(e) if e == failure));
    }

    #[tokio::test]
    async fn test_malformed_resource_is_a_decode_error() {
        let cloud = cloud(r#"{"id": "e1", "width": "wide"}"#);

        let err = cloud
            .get_encoding(&EncodingId::new("e1").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PandaError::Decode {
                kind: ResourceKind::Encoding,
                ..
            }
        ));
    }
}
