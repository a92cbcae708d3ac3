use base64::Engine as _;
use image::ImageFormat;
use pretty_assertions::assert_eq;
use receipt_ocr::{
    ai::{ExtractionRequest, GeminiOcrClient, MockTextExtractionClient, TextExtractionService},
    app::App,
    error::ResponseShape,
    image::{encode, SourceImage},
    models::{Config, Extraction},
    Error,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash-preview-05-20";

fn create_jpeg() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(16, 32, image::Rgb([250, 250, 245]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

fn config_for(base_url: String) -> Config {
    Config {
        gemini_api_key: "test-key".to_string(),
        gemini_model: MODEL.to_string(),
        gemini_base_url: base_url,
    }
}

async fn mount_reply(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pipeline_returns_extracted_text() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Milk 2 3.50" }] } }]
        }),
    )
    .await;

    let app = App::from_config(&config_for(server.uri())).unwrap();
    let outcome = app.extract(create_jpeg(), "image/jpeg").await.unwrap();

    assert_eq!(outcome, Extraction::Text("Milk 2 3.50".to_string()));
}

#[tokio::test]
async fn test_pipeline_sends_prompt_then_inline_image() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        }),
    )
    .await;

    let jpeg = create_jpeg();
    let app = App::from_config(&config_for(server.uri())).unwrap();
    app.extract(jpeg.clone(), "image/jpg").await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(
        parts[0]["text"].as_str().unwrap(),
        receipt_ocr::prompts::RECEIPT_EXTRACTION
    );
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");

    let data = parts[1]["inlineData"]["data"].as_str().unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(data)
        .unwrap();
    assert_eq!(decoded, jpeg);
}

#[tokio::test]
async fn test_pipeline_empty_candidates_is_shape_failure() {
    let server = MockServer::start().await;
    mount_reply(&server, serde_json::json!({ "candidates": [] })).await;

    let app = App::from_config(&config_for(server.uri())).unwrap();
    let err = app.extract(create_jpeg(), "image/jpeg").await.unwrap_err();

    assert!(matches!(
        err,
        Error::ResponseShape(ResponseShape::NoCandidates { .. })
    ));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_pipeline_empty_text_is_empty_result() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
        }),
    )
    .await;

    let app = App::from_config(&config_for(server.uri())).unwrap();
    let outcome = app.extract(create_jpeg(), "image/jpeg").await.unwrap();

    assert_eq!(outcome, Extraction::Empty);
}

#[tokio::test]
async fn test_pipeline_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let app = App::from_config(&config_for(server.uri())).unwrap();
    let err = app.extract(create_jpeg(), "image/jpeg").await.unwrap_err();

    assert!(err.to_string().contains("429"));
    assert!(err.to_string().contains("quota exceeded"));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_pipeline_connection_error_is_transport() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = App::from_config(&config_for(format!("http://{}", addr))).unwrap();
    let err = app.extract(create_jpeg(), "image/jpeg").await.unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().starts_with("Failed to connect to Gemini API"));
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.hint().is_some());
}

#[tokio::test]
async fn test_corrupt_image_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut jpeg = create_jpeg();
    jpeg.truncate(20);

    let app = App::from_config(&config_for(server.uri())).unwrap();
    let err = app.extract(jpeg, "image/jpeg").await.unwrap_err();
    assert!(matches!(err, Error::Image(_)));
}

#[tokio::test]
async fn test_request_construction_is_idempotent() {
    let source = SourceImage::from_bytes(create_jpeg(), "image/jpeg").unwrap();

    let first = ExtractionRequest::new(&encode(&source));
    let second = ExtractionRequest::new(&encode(&source));
    assert_eq!(first, second);

    let first_payload = serde_json::to_value(GeminiOcrClient::build_request(&first)).unwrap();
    let second_payload = serde_json::to_value(GeminiOcrClient::build_request(&second)).unwrap();
    assert_eq!(first_payload, second_payload);
}

#[tokio::test]
async fn test_app_with_services_is_usable_from_integration_tests() {
    let mock = MockTextExtractionClient::new().with_text("Rice 1 12.00");
    let app = App::with_services(Box::new(mock.clone()));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.jpeg");
    std::fs::write(&path, create_jpeg()).unwrap();

    let outcome = app.extract_file(&path, None).await.unwrap();
    assert_eq!(outcome.text(), Some("Rice 1 12.00"));
    assert_eq!(mock.get_call_count(), 1);
    assert_eq!(mock.requests()[0].mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_gemini_client_behind_trait_object() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Tea 3 1.20" }] } }]
        }),
    )
    .await;

    let client: Box<dyn TextExtractionService> =
        Box::new(GeminiOcrClient::from_config(&config_for(server.uri())).unwrap());
    let request = ExtractionRequest {
        prompt: "prompt".to_string(),
        mime_type: "image/png".to_string(),
        image_data: "AAAA".to_string(),
    };

    let outcome = client.extract_text(&request).await.unwrap();
    assert_eq!(outcome.text(), Some("Tea 3 1.20"));
}
