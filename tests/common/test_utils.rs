use super::MockLlmClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use crisis_coach::{
    assets::ImageStore,
    config::LlmConfig,
    generator::ContentGenerator,
    server::{self, handlers::AppState},
};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

/// Create an LLM configuration pointing at the given base URL
pub fn create_test_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        provider: "gemini".to_string(),
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "gemini-2.0-flash".to_string(),
        temperature: None,
        max_tokens: None,
        system_prompt: None,
    }
}

/// Build the full router around a mock model and an image directory
pub fn create_test_app(llm: Arc<MockLlmClient>, image_dir: &Path) -> Router {
    let generator = ContentGenerator::with_client(llm, &create_test_llm_config(""));
    server::router(AppState {
        generator: Arc::new(generator),
        images: Arc::new(ImageStore::new(image_dir)),
    })
}

/// Send a request and decode the JSON body
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A well-formed scenario reply, optionally wrapped in a markdown fence
pub fn scenario_reply(fenced: bool) -> String {
    let body = json!({
        "scenario": "A sudden flood has washed away the stock in your tailoring shop.",
        "options": [
            "Move the remaining cloth to a neighbour's house",
            "Call your self-help group for a short loan",
            "Close the shop and wait",
            "Sell your sewing machine"
        ]
    })
    .to_string();

    if fenced {
        format!("```json\n{}\n```", body)
    } else {
        body
    }
}

/// A well-formed quiz reply with the given number of questions
pub fn quiz_reply(count: usize) -> String {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("What is step {} of an emergency plan?", i + 1),
                "options": ["Save", "Spend", "Borrow", "Ignore"],
                "answer": "Save"
            })
        })
        .collect();
    Value::Array(items).to_string()
}
