use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tokio::sync::RwLock;
use tower::ServiceExt;

use blr_pulse::application::ports::{
    ChatClient, ChatClientError, FileLoader, SearchClient, SearchClientError, SearchResult,
};
use blr_pulse::application::services::{AssistantService, ContextService, PERSONA};
use blr_pulse::domain::{Message, MessageRole, Session};
use blr_pulse::infrastructure::imaging::PngImageStager;
use blr_pulse::infrastructure::text_processing::{
    CompositeFileLoader, PdfAdapter, PlainTextAdapter,
};
use blr_pulse::presentation::{create_router, AppState};

const BOUNDARY: &str = "test-boundary";

struct RecordedCall {
    messages: Vec<Message>,
    image: Option<PathBuf>,
}

#[derive(Default)]
struct RecordingChatClient {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingChatClient {
    fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .unwrap()
            .pop()
            .expect("chat backend was never called")
    }
}

#[async_trait::async_trait]
impl ChatClient for RecordingChatClient {
    async fn complete(
        &self,
        messages: &[Message],
        image: Option<&Path>,
    ) -> Result<String, ChatClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            image: image.map(Path::to_path_buf),
        });
        Ok("Mock answer".to_string())
    }
}

struct MockSearchClient {
    results: Vec<SearchResult>,
    fail: bool,
}

impl MockSearchClient {
    fn with_results(count: usize) -> Self {
        let results = (1..=count)
            .map(|i| SearchResult {
                title: format!("Result {i}"),
                link: format!("https://example.com/{i}"),
                snippet: format!("Snippet {i}"),
            })
            .collect();
        Self {
            results,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            results: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchClientError> {
        if self.fail {
            return Err(SearchClientError::ApiRequestFailed(
                "HTTP 500: backend down".to_string(),
            ));
        }
        Ok(self.results.clone())
    }
}

fn create_test_app(
    search_client: MockSearchClient,
) -> (axum::Router, Arc<RecordingChatClient>) {
    let file_loader = Arc::new(CompositeFileLoader::new(
        Arc::new(PlainTextAdapter) as Arc<dyn FileLoader>,
        Arc::new(PdfAdapter::new()) as Arc<dyn FileLoader>,
    ));
    let image_stager = Arc::new(PngImageStager::new());
    let chat_client = Arc::new(RecordingChatClient::default());

    let context_service = Arc::new(ContextService::new(file_loader, image_stager));
    let assistant_service = Arc::new(AssistantService::new(Arc::clone(&chat_client)));

    let state = AppState {
        context_service,
        assistant_service,
        search_client: Arc::new(search_client),
        session: Arc::new(RwLock::new(Session::new())),
    };

    (create_router(state), chat_client)
}

fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(filename, content_type, data)))
        .unwrap()
}

fn chat_request(message: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "message": message }).to_string(),
        ))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_jpeg_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_fn(8, 8, |x, y| image::Rgb([x as u8 * 16, y as u8 * 16, 128]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Jpeg,
        )
        .unwrap();
    bytes
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let (app, _) = create_test_app(MockSearchClient::with_results(0));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_text_upload_when_chatting_then_backend_receives_context_and_question() {
    let (app, chat_client) = create_test_app(MockSearchClient::with_results(0));

    let upload = app
        .clone()
        .oneshot(upload_request(
            "ticket.txt",
            "text/plain",
            b"Flight BA123 departs gate 14",
        ))
        .await
        .unwrap();
    assert_eq!(upload.status(), StatusCode::OK);

    let chat = app.oneshot(chat_request("Which gate?")).await.unwrap();
    assert_eq!(chat.status(), StatusCode::OK);

    let call = chat_client.last_call();
    assert_eq!(call.messages.len(), 2);
    assert_eq!(call.messages[0].role, MessageRole::System);
    assert_eq!(call.messages[1].role, MessageRole::User);
    assert!(call.messages[0].content.starts_with(PERSONA));
    assert!(call.messages[0]
        .content
        .ends_with("Context: Flight BA123 departs gate 14"));
    assert_eq!(call.messages[1].content, "Which gate?");
    assert!(call.image.is_none());
}

#[tokio::test]
async fn given_no_upload_when_chatting_then_context_marker_is_empty() {
    let (app, chat_client) = create_test_app(MockSearchClient::with_results(0));

    let chat = app.oneshot(chat_request("Where is gate 14?")).await.unwrap();
    assert_eq!(chat.status(), StatusCode::OK);

    let call = chat_client.last_call();
    assert!(call.messages[0].content.ends_with("Context: "));
}

#[tokio::test]
async fn given_image_upload_when_chatting_then_staged_png_is_attached() {
    let (app, chat_client) = create_test_app(MockSearchClient::with_results(0));

    let upload = app
        .clone()
        .oneshot(upload_request(
            "boarding-pass.jpg",
            "image/jpeg",
            &sample_jpeg_bytes(),
        ))
        .await
        .unwrap();
    assert_eq!(upload.status(), StatusCode::OK);

    let chat = app.clone().oneshot(chat_request("What is my seat?")).await.unwrap();
    assert_eq!(chat.status(), StatusCode::OK);

    let call = chat_client.last_call();
    let image_path = call.image.expect("image should be attached");
    let staged_bytes = std::fs::read(&image_path).unwrap();
    assert_eq!(staged_bytes[..8], *b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn given_new_upload_when_replacing_image_then_context_is_text_only() {
    let (app, chat_client) = create_test_app(MockSearchClient::with_results(0));

    let first = app
        .clone()
        .oneshot(upload_request(
            "boarding-pass.jpg",
            "image/jpeg",
            &sample_jpeg_bytes(),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(upload_request("note.txt", "text/plain", b"Lounge is on level 3"))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    let chat = app.oneshot(chat_request("Where is the lounge?")).await.unwrap();
    assert_eq!(chat.status(), StatusCode::OK);

    let call = chat_client.last_call();
    assert!(call.image.is_none());
    assert!(call.messages[0]
        .content
        .ends_with("Context: Lounge is on level 3"));
}

#[tokio::test]
async fn given_unsupported_file_type_when_uploading_then_returns_unsupported_media_type() {
    let (app, _) = create_test_app(MockSearchClient::with_results(0));

    let response = app
        .oneshot(upload_request("data.bin", "application/zip", b"PK\x03\x04"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn given_invalid_utf8_text_when_uploading_then_returns_bad_request() {
    let (app, _) = create_test_app(MockSearchClient::with_results(0));

    let response = app
        .oneshot(upload_request("bad.txt", "text/plain", &[0xff, 0xfe, 0xfd]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_empty_message_when_chatting_then_returns_bad_request() {
    let (app, _) = create_test_app(MockSearchClient::with_results(0));

    let response = app.oneshot(chat_request("   ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_seven_results_when_searching_then_displays_five_in_order() {
    let (app, _) = create_test_app(MockSearchClient::with_results(7));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/search?q=BLR%20terminal%20map")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["total"], 7);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result["title"], format!("Result {}", i + 1));
    }
}

#[tokio::test]
async fn given_no_matches_when_searching_then_returns_empty_results() {
    let (app, _) = create_test_app(MockSearchClient::with_results(0));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/search?q=nothing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["total"], 0);
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn given_backend_failure_when_searching_then_returns_bad_gateway() {
    let (app, _) = create_test_app(MockSearchClient::failing());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/search?q=terminal")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn given_empty_query_when_searching_then_returns_bad_request() {
    let (app, _) = create_test_app(MockSearchClient::with_results(3));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/search?q=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
