//! Integration tests for the extraction chain, profile and report flows.
//!
//! A single `wiremock` server plays both the homepage and the model API.
//! Web-fetch model calls are told apart by the `anthropic-beta` header and
//! mounted at a higher priority than plain calls.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brandscan_core::{TextOrList, NOT_PROVIDED};
use brandscan_extract::anthropic::WEB_FETCH_BETA;
use brandscan_extract::{
    generate_report, AnthropicClient, ExtractError, ExtractionMode, Extractor, GuideGenerator,
    PageFetcher, ProfileGenerator,
};

const EXTRACT_MODEL: &str = "extract-model";
const GUIDE_MODEL: &str = "guide-model";

const PAGE_HTML: &str = r#"<html><head>
<script>var secret = "do-not-send";</script>
<style>.hero { color: red; }</style>
</head><body>
<header><img class="site-logo" src="/assets/logo.svg"></header>
<h1>Acme Roofing</h1>
<p>Family owned since 1987. We handle insurance claims.</p>
</body></html>"#;

fn model_client(server: &MockServer, api_key: Option<&str>, timeout_ms: u64) -> AnthropicClient {
    AnthropicClient::new(api_key, &server.uri(), timeout_ms).expect("failed to build test client")
}

fn test_extractor(server: &MockServer) -> Extractor {
    test_extractor_with(model_client(server, Some("test-key"), 5_000))
}

fn test_extractor_with(model: AnthropicClient) -> Extractor {
    let fetcher = PageFetcher::new(5, "brandscan-test/0.1").expect("failed to build fetcher");
    Extractor::new(model, fetcher, EXTRACT_MODEL, 80_000)
}

fn page_url(server: &MockServer) -> String {
    format!("{}/home", server.uri())
}

fn text_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}]
    }))
}

fn tool_error_reply() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "content": [
            {"type": "server_tool_use", "id": "srvtoolu_1", "name": "web_fetch",
             "input": {"url": "https://acme.test"}},
            {"type": "web_fetch_tool_result", "tool_use_id": "srvtoolu_1",
             "content": {"type": "web_fetch_tool_result_error", "error_code": "url_not_accessible"}},
            {"type": "text", "text": "I was unable to fetch that page."}
        ]
    }))
}

async fn mount_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_HTML))
        .mount(server)
        .await;
}

/// Plain (server-fetch or guide) model call for `model`.
fn plain_call(model: &str) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({"model": model})))
}

/// Model call granting the `web_fetch` tool.
fn web_fetch_call() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("anthropic-beta", WEB_FETCH_BETA))
        .and(body_partial_json(json!({
            "tools": [{"type": "web_fetch_20250910", "name": "web_fetch", "max_uses": 5}]
        })))
}

fn request_json(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

// ---------------------------------------------------------------------------
// Server fetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_fetch_sends_sanitized_text_and_normalizes_reply() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(
            r#"Here you go:
```json
{"business_name": "Acme Roofing", "handles_insurance_claims": "Yes", "core_values": [], "year_founded": 1987}
```"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let url = page_url(&server);
    let brand = test_extractor(&server)
        .extract_via_server_fetch(&url)
        .await
        .expect("server fetch should succeed");

    assert_eq!(brand.business_name.as_deref(), Some("Acme Roofing"));
    assert_eq!(brand.handles_insurance_claims, Some(true));
    assert_eq!(brand.core_values, None);

    let requests = server.received_requests().await.unwrap();
    let model_request = requests
        .iter()
        .find(|r| r.url.path() == "/v1/messages")
        .expect("model request");
    let body = request_json(model_request);
    let user = body["messages"][0]["content"].as_str().unwrap();
    assert!(user.starts_with(&format!("Homepage URL: {url}\n\n")));
    assert!(user.contains("Acme Roofing"));
    assert!(!user.contains("do-not-send"), "script content leaked: {user}");
    assert!(!user.contains("color: red"), "style content leaked: {user}");
    assert!(body.get("tools").is_none());
    assert_eq!(body["max_tokens"], 8192);
}

#[tokio::test]
async fn server_fetch_fills_logo_from_markup_when_model_has_none() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(r#"{"business_name": "Acme Roofing", "logo_url": null}"#))
        .mount(&server)
        .await;

    let brand = test_extractor(&server)
        .extract_via_server_fetch(&page_url(&server))
        .await
        .unwrap();

    assert_eq!(
        brand.logo_url,
        Some(format!("{}/assets/logo.svg", server.uri()))
    );
}

#[tokio::test]
async fn server_fetch_keeps_logo_named_by_model() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(
            r#"{"logo_url": "https://cdn.acme.test/brand.png"}"#,
        ))
        .mount(&server)
        .await;

    let brand = test_extractor(&server)
        .extract_via_server_fetch(&page_url(&server))
        .await
        .unwrap();

    assert_eq!(
        brand.logo_url.as_deref(),
        Some("https://cdn.acme.test/brand.png")
    );
}

#[tokio::test]
async fn server_fetch_reports_page_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_extractor(&server)
        .extract_via_server_fetch(&page_url(&server))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ExtractError::PageStatus { status: 404, .. }),
        "expected PageStatus 404, got: {err:?}"
    );
}

#[tokio::test]
async fn server_fetch_reports_unparseable_reply_with_prefix() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    let reply = format!("I cannot produce JSON for this page. {}", "x".repeat(800));
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(&reply))
        .mount(&server)
        .await;

    let err = test_extractor(&server)
        .extract_via_server_fetch(&page_url(&server))
        .await
        .unwrap_err();

    match &err {
        ExtractError::Unparseable { context, raw_prefix } => {
            assert_eq!(context, "Extraction");
            assert_eq!(raw_prefix.chars().count(), 500);
            assert!(raw_prefix.starts_with("I cannot produce JSON"));
        }
        other => panic!("expected Unparseable, got: {other:?}"),
    }
    assert!(err
        .to_string()
        .starts_with("Extraction returned invalid JSON. Raw response (first 500 chars): "));
}

#[tokio::test]
async fn model_error_status_is_surfaced() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    plain_call(EXTRACT_MODEL)
        .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = test_extractor(&server)
        .extract_via_server_fetch(&page_url(&server))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ExtractError::ModelStatus { status: 529, ref body } if body == "overloaded"),
        "expected ModelStatus 529, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_model_call_times_out() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply("{}").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let extractor = test_extractor_with(model_client(&server, Some("test-key"), 200));
    let err = extractor
        .extract_via_server_fetch(&page_url(&server))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ExtractError::Timeout { timeout_ms: 200 }),
        "expected Timeout, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Model fetch with retry and fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn model_fetch_succeeds_first_try_without_fetching_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_HTML))
        .expect(0)
        .mount(&server)
        .await;
    web_fetch_call()
        .respond_with(text_reply(
            r#"{"business_name": "Acme Roofing", "five_step_process": ["Inspect", "Quote"]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let url = page_url(&server);
    let brand = test_extractor(&server)
        .extract_via_model_fetch(&url)
        .await
        .expect("model fetch should succeed");

    assert_eq!(brand.business_name.as_deref(), Some("Acme Roofing"));
    assert_eq!(
        brand.five_step_process,
        Some(TextOrList::List(vec!["Inspect".into(), "Quote".into()]))
    );

    let requests = server.received_requests().await.unwrap();
    let body = request_json(&requests[0]);
    assert!(body["system"]
        .as_str()
        .unwrap()
        .contains("Do not fetch any other URLs"));
    assert!(body["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains(&url));
}

#[tokio::test]
async fn tool_error_is_retried_once() {
    let server = MockServer::start().await;
    web_fetch_call()
        .respond_with(tool_error_reply())
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    web_fetch_call()
        .respond_with(text_reply(r#"{"business_name": "Acme Roofing"}"#))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let brand = test_extractor(&server)
        .extract_via_model_fetch(&page_url(&server))
        .await
        .expect("retry should succeed");

    assert_eq!(brand.business_name.as_deref(), Some("Acme Roofing"));
}

#[tokio::test]
async fn repeated_tool_errors_fall_back_to_server_fetch() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    web_fetch_call()
        .respond_with(tool_error_reply())
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(r#"{"business_name": "Acme (server)"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let brand = test_extractor(&server)
        .extract_via_model_fetch(&page_url(&server))
        .await
        .expect("fallback should succeed");

    assert_eq!(brand.business_name.as_deref(), Some("Acme (server)"));
}

#[tokio::test]
async fn fallback_result_equals_direct_server_fetch() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    web_fetch_call()
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .with_priority(1)
        .mount(&server)
        .await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(
            r#"{"business_name": "Acme Roofing", "offers_financing": "no", "brand_tone": " Warm "}"#,
        ))
        .mount(&server)
        .await;

    let extractor = test_extractor(&server);
    let url = page_url(&server);
    let via_fallback = extractor.extract_via_model_fetch(&url).await.unwrap();
    let direct = extractor.extract_via_server_fetch(&url).await.unwrap();

    assert_eq!(via_fallback, direct);
    assert_eq!(direct.offers_financing, Some(false));
}

#[tokio::test]
async fn final_error_comes_from_fallback_when_everything_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    web_fetch_call()
        .respond_with(text_reply("no json here"))
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;

    let err = test_extractor(&server)
        .extract_via_model_fetch(&page_url(&server))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ExtractError::PageStatus { status: 503, .. }),
        "expected fallback PageStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn missing_api_key_fails_without_any_request() {
    let server = MockServer::start().await;
    mount_page(&server).await;

    let extractor = test_extractor_with(model_client(&server, None, 5_000));
    let err = extractor
        .extract(&page_url(&server), ExtractionMode::Model)
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::MissingApiKey), "got: {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn auto_mode_prefers_server_fetch() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    web_fetch_call()
        .respond_with(text_reply("{}"))
        .with_priority(1)
        .expect(0)
        .mount(&server)
        .await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(r#"{"business_name": "Acme Roofing"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let brand = test_extractor(&server)
        .extract(&page_url(&server), ExtractionMode::Auto)
        .await
        .unwrap();

    assert_eq!(brand.business_name.as_deref(), Some("Acme Roofing"));
}

// ---------------------------------------------------------------------------
// Profile, guide and report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn profile_is_fully_populated() {
    let server = MockServer::start().await;
    web_fetch_call()
        .respond_with(text_reply(
            r#"{"company_name": " Acme Roofing ", "phone_number": "", "extra": "ignored"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let generator = ProfileGenerator::new(
        model_client(&server, Some("test-key"), 5_000),
        EXTRACT_MODEL,
    );
    let profile = generator.generate(&page_url(&server)).await.unwrap();

    assert_eq!(profile.company_name, "Acme Roofing");
    assert_eq!(profile.phone_number, NOT_PROVIDED);
    assert_eq!(profile.call_to_action, NOT_PROVIDED);
}

#[tokio::test]
async fn profile_has_no_retry_or_fallback() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    web_fetch_call()
        .respond_with(text_reply("Sorry, no data."))
        .expect(1)
        .mount(&server)
        .await;

    let generator = ProfileGenerator::new(
        model_client(&server, Some("test-key"), 5_000),
        EXTRACT_MODEL,
    );
    let err = generator.generate(&page_url(&server)).await.unwrap_err();

    assert!(
        matches!(
            err,
            ExtractError::Unparseable { ref context, .. } if context == "Brand profile extraction"
        ),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn guide_markdown_is_trimmed_and_uses_guide_model() {
    let server = MockServer::start().await;
    plain_call(GUIDE_MODEL)
        .respond_with(text_reply("\n\n### Mission Statement\n\nWe keep roofs dry.\n  "))
        .expect(1)
        .mount(&server)
        .await;

    let guide = GuideGenerator::new(model_client(&server, Some("test-key"), 5_000), GUIDE_MODEL);
    let markdown = guide
        .generate_markdown(&brandscan_core::BrandIntelligence::default())
        .await
        .unwrap();

    assert_eq!(markdown, "### Mission Statement\n\nWe keep roofs dry.");

    let requests = server.received_requests().await.unwrap();
    let body = request_json(&requests[0]);
    let user = body["messages"][0]["content"].as_str().unwrap();
    assert!(user.starts_with("Use ONLY the inputs below."));
    assert!(user.contains("--- Inputs ---\n\n"));
}

#[tokio::test]
async fn report_keeps_guide_when_profile_fails() {
    let server = MockServer::start().await;
    mount_page(&server).await;
    plain_call(EXTRACT_MODEL)
        .respond_with(text_reply(r#"{"business_name": "Acme Roofing"}"#))
        .expect(1)
        .mount(&server)
        .await;
    plain_call(GUIDE_MODEL)
        .respond_with(text_reply("### Mission Statement\n\nDry roofs."))
        .expect(1)
        .mount(&server)
        .await;
    web_fetch_call()
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let model = model_client(&server, Some("test-key"), 5_000);
    let extractor = test_extractor_with(model.clone());
    let guide = GuideGenerator::new(model.clone(), GUIDE_MODEL);
    let profile = ProfileGenerator::new(model, EXTRACT_MODEL);

    let report = generate_report(
        &extractor,
        &guide,
        &profile,
        &page_url(&server),
        ExtractionMode::Auto,
    )
    .await;

    assert_eq!(
        report.markdown.as_deref(),
        Some("### Mission Statement\n\nDry roofs.")
    );
    assert!(report.profile.is_none());
    let errors = report.errors.expect("profile error recorded");
    assert!(errors.guide.is_none());
    assert!(errors.profile.unwrap().contains("500"));
}
