use actix_web::{test, web, App};
use async_trait::async_trait;
use pitchmatch_common::{AppConfig, PitchMatchError, Result};
use pitchmatch_llm::{ChatRequest, ProposalWriter, TextGenerator, MISSING_KEY_PLACEHOLDER};
use pitchmatch_server::routes;
use pitchmatch_server::types::{GenerateResponse, MatchResponse};
use pitchmatch_server::{default_proposals, AppState};
use pitchmatch_vector::Document;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

/// Answers according to which sample the prompt embeds
struct ScriptedGenerator;

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: ChatRequest) -> Result<String> {
        let prompt = &request.messages[1].content;
        if prompt.contains("SAMPLE-WEB") {
            Ok("I will build you a fast, modern website with a landing page.".to_string())
        } else if prompt.contains("SAMPLE-BOT") {
            Err(PitchMatchError::upstream(500, r#"{"error":"overloaded"}"#))
        } else {
            Ok("I can automate your stock trading bot with Python.".to_string())
        }
    }

    fn provider(&self) -> &str {
        "deepseek"
    }
}

fn test_state(dir: &TempDir, writer: Option<ProposalWriter>) -> Arc<AppState> {
    let config = AppConfig {
        proposal_store_path: dir.path().join("proposal_store.json"),
        log_dir: dir.path().join("log"),
        ..AppConfig::default()
    };
    let writer = writer.unwrap_or_else(|| ProposalWriter::unconfigured(&config.deepseek_model));
    Arc::new(AppState::with_writer(config, writer))
}

fn write_corpus(dir: &TempDir, docs: &[Document]) {
    std::fs::write(
        dir.path().join("proposal_store.json"),
        serde_json::to_string_pretty(docs).unwrap(),
    )
    .unwrap();
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_list_proposals_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::get().uri("/proposals").to_request();
    let proposals: Vec<Document> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(proposals, default_proposals());
}

#[actix_web::test]
async fn test_upload_proposal_json() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::post()
        .uri("/proposals")
        .set_json(json!({"name": "Shopify", "content": "I build Shopify stores."}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Proposal uploaded successfully.");

    let req = test::TestRequest::get().uri("/proposals").to_request();
    let proposals: Vec<Document> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(proposals.len(), 4);
    assert_eq!(proposals[3], Document::new("Shopify", "I build Shopify stores."));
}

#[actix_web::test]
async fn test_upload_proposal_form() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::post()
        .uri("/proposals")
        .set_form([("name", "Form"), ("content", "Sent as a form.")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_upload_proposal_requires_fields() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    for body in [json!({"name": "Only name"}), json!({"name": "", "content": "x"}), json!({})] {
        let req = test::TestRequest::post()
            .uri("/proposals")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Both name and content are required.");
    }
}

#[actix_web::test]
async fn test_generate_requires_job_description() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    for body in [json!({}), json!({"job_description": "   "})] {
        let req = test::TestRequest::post()
            .uri("/generate")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Job description is required.");
    }
}

#[actix_web::test]
async fn test_generate_placeholder_mode() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({"job_description": "Need an AI voice agent for sales calls"}))
        .to_request();
    let response: GenerateResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.matched_samples.len(), 3);
    assert_eq!(response.results.len(), 3);
    assert!(response
        .results
        .iter()
        .all(|r| r.text == MISSING_KEY_PLACEHOLDER && r.provider == "deepseek"));
    assert_eq!(response.best.sample_index, 0);
}

#[actix_web::test]
async fn test_generate_picks_most_similar_proposal() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        &dir,
        &[
            Document::new("web", "SAMPLE-WEB website landing page design and build"),
            Document::new("bot", "SAMPLE-BOT website build with landing page"),
            Document::new("trading", "SAMPLE-TRADE stock trading bot automation"),
            Document::new("unrelated", "wedding photography portfolio"),
        ],
    );
    let writer = ProposalWriter::new(Arc::new(ScriptedGenerator), "deepseek-chat");
    let app = app!(test_state(&dir, Some(writer)));

    let req = test::TestRequest::post()
        .uri("/generate")
        .set_json(json!({"job_description": "Build a website with a landing page"}))
        .to_request();
    let response: GenerateResponse = test::call_and_read_body_json(&app, req).await;

    let names: Vec<&str> = response
        .matched_samples
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(!names.contains(&"unrelated"));

    let web_index = names.iter().position(|n| *n == "web").unwrap();
    assert_eq!(response.best.sample_index, web_index);
    assert!(response.best.score > 0.0);

    // the failed generation is reported in place, never aborting the request
    let bot_index = names.iter().position(|n| *n == "bot").unwrap();
    assert_eq!(
        response.results[bot_index].text,
        r#"(DeepSeek error 500) {"error":"overloaded"}"#
    );
    assert_eq!(response.ranking.len(), 3);
    assert_eq!(response.ranking[0].sample_index, web_index);
}

#[actix_web::test]
async fn test_match_ranks_proposals() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(
        &dir,
        &[
            Document::new("A", "cats are great pets"),
            Document::new("B", "dogs are loyal pets"),
            Document::new("C", "stock market analysis report"),
        ],
    );
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::post()
        .uri("/match")
        .set_json(json!({"job_description": "I love my pet cat", "top_k": 2}))
        .to_request();
    let response: MatchResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response.count, 2);
    assert_eq!(response.total, 3);
    assert_eq!(response.results[0].name, "A");
    assert_eq!(response.results[1].name, "B");
    assert!(response.results[0].score >= response.results[1].score);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::post()
        .uri("/match")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_health_and_probes() {
    let dir = tempfile::tempdir().unwrap();
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["proposals"], 3);
    assert_eq!(body["generation_configured"], false);

    for uri in ["/favicon.ico", "/.well-known/appspecific/com.chrome.devtools.json"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 204);
    }
}

#[actix_web::test]
async fn test_upload_to_broken_store_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("proposal_store.json");
    let original = r#"[{"name": "A", "content": "a"}, {"name": "B"}, {"name": "C", "content": "c"}]"#;
    std::fs::write(&path, original).unwrap();
    let app = app!(test_state(&dir, None));

    let req = test::TestRequest::post()
        .uri("/proposals")
        .set_json(json!({"name": "New", "content": "Fresh text"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Internal server error.");

    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}
