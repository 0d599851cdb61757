use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use textlens::error::ErrorBody;
use textlens::nlp::{
    DocumentParser, LexiconSentiment, ParsedDocument, Pipeline, RuleParser, SentimentScorer,
    SentimentScores,
};
use textlens::server::{configure, json_config};
use textlens::{AnalysisResponse, SentimentLabel};

struct CountingScorer {
    calls: Arc<AtomicUsize>,
}

impl SentimentScorer for CountingScorer {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn score(&self, text: &str) -> Result<SentimentScores> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        LexiconSentiment.score(text)
    }
}

struct FailingParser;

impl DocumentParser for FailingParser {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn parse(&self, _text: &str) -> Result<ParsedDocument> {
        Err(anyhow!("model could not be loaded"))
    }
}

fn default_pipeline() -> Pipeline {
    Pipeline::load().unwrap()
}

macro_rules! init_app {
    ($pipeline:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pipeline))
                .app_data(json_config(1024 * 1024))
                .configure(configure),
        )
        .await
    };
}

async fn post_text(text: &str) -> AnalysisResponse {
    let app = init_app!(default_pipeline());
    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "text": text }))
        .to_request();
    test::call_and_read_body_json(&app, req).await
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

#[actix_web::test]
async fn test_positive_review() {
    let resp = post_text("I love this product").await;
    assert_eq!(resp.sentiment.label, SentimentLabel::Positive);
    assert!(resp.sentiment.polarity > 0.0);
    assert!(resp.sentiment.subjectivity > 0.0);
    assert_eq!(resp.processed_text, "I love this product");
}

#[actix_web::test]
async fn test_entities_and_key_phrases() {
    let resp = post_text("Apple was founded by Steve Jobs").await;

    let apple = resp.entities.iter().find(|e| e.text == "Apple").unwrap();
    assert_eq!(apple.label, "ORG");
    assert_eq!((apple.start, apple.end), (0, 5));

    let jobs = resp.entities.iter().find(|e| e.text == "Steve Jobs").unwrap();
    assert_eq!(jobs.label, "PERSON");
    assert_eq!((jobs.start, jobs.end), (21, 31));

    assert_eq!(resp.key_phrases, vec!["Apple", "Steve Jobs"]);
    assert_eq!(resp.sentiment.label, SentimentLabel::Neutral);
    assert_eq!(resp.sentiment.polarity, 0.0);
}

#[actix_web::test]
async fn test_negative_text() {
    let resp = post_text("The delivery was terrible and the support was not helpful.").await;
    assert_eq!(resp.sentiment.label, SentimentLabel::Negative);
    assert!(resp.sentiment.polarity < 0.0);
}

#[actix_web::test]
async fn test_offsets_and_order() {
    let text = "Zoë flew from París to London on Monday, then met Dr. Watson at Google in Tokyo.";
    let resp = post_text(text).await;

    assert!(resp.entities.len() >= 4);
    for entity in &resp.entities {
        assert_eq!(char_slice(&resp.processed_text, entity.start, entity.end), entity.text);
    }
    for pair in resp.entities.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }

    let mut cursor = 0;
    for phrase in &resp.key_phrases {
        let found = text[cursor..].find(phrase.as_str()).unwrap();
        cursor += found + phrase.len();
    }
}

#[actix_web::test]
async fn test_empty_text() {
    let resp = post_text("").await;
    assert!(resp.entities.is_empty());
    assert!(resp.key_phrases.is_empty());
    assert_eq!(resp.sentiment.label, SentimentLabel::Neutral);
    assert_eq!(resp.processed_text, "");
}

#[actix_web::test]
async fn test_whitespace_is_echoed_unchanged() {
    let text = "  \n\t  ";
    let resp = post_text(text).await;
    assert_eq!(resp.processed_text, text);
    assert!(resp.entities.is_empty());
}

#[actix_web::test]
async fn test_response_shape() {
    let app = init_app!(default_pipeline());
    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "text": "Great news from Paris!" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["sentiment"]["polarity"].is_number());
    assert!(body["sentiment"]["subjectivity"].is_number());
    assert_eq!(body["sentiment"]["label"], "positive");
    assert_eq!(body["entities"][0], json!({ "text": "Paris", "label": "GPE", "start": 16, "end": 21 }));
    assert!(body["key_phrases"].is_array());
    assert_eq!(body["processed_text"], "Great news from Paris!");
}

#[actix_web::test]
async fn test_missing_text_is_rejected_before_analysis() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = Pipeline::new(
        Arc::new(CountingScorer { calls: calls.clone() }),
        Arc::new(RuleParser),
    );
    let app = init_app!(pipeline);

    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "content": "hello" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.detail.contains("text"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "text": "counted" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_wrong_type_is_rejected() {
    let app = init_app!(default_pipeline());
    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "text": 42 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_empty_body_is_rejected() {
    let app = init_app!(default_pipeline());
    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("content-type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

#[actix_web::test]
async fn test_non_json_content_type() {
    let app = init_app!(default_pipeline());
    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("content-type", "text/plain"))
        .set_payload("I love this product")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = Pipeline::new(
        Arc::new(CountingScorer { calls: calls.clone() }),
        Arc::new(RuleParser),
    );
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pipeline))
            .app_data(json_config(64))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "text": "I love this product. ".repeat(10) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.detail.contains("64"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_analyzer_failure_is_server_error() {
    let pipeline = Pipeline::new(Arc::new(LexiconSentiment), Arc::new(FailingParser));
    let app = init_app!(pipeline);

    let req = test::TestRequest::post()
        .uri("/analyze")
        .set_json(json!({ "text": "Apple was founded by Steve Jobs" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert!(body.detail.contains("model could not be loaded"));
}

#[actix_web::test]
async fn test_get_is_not_routed() {
    let app = init_app!(default_pipeline());
    let req = test::TestRequest::get().uri("/analyze").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
