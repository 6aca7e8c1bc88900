use cinematcher_core::ports::{PortError, RecommendationService};
use cinematcher_core::prompt::PARSE_FAILURE_MESSAGE;
use cinematcher_core::TimeBucket;
use cinematcher_lib::adapters::GeminiMatchAdapter;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

fn adapter(server: &MockServer) -> GeminiMatchAdapter {
    let client = GeminiMatchAdapter::client_for(&server.base_url(), "test-key");
    GeminiMatchAdapter::new(client, "gemini-test".to_string())
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gemini-test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30 }
    })
}

fn reply_body() -> String {
    let rec = |title: &str| {
        json!({
            "title": title,
            "originalTitle": "Le Samouraï",
            "year": "1967",
            "type": "Film",
            "country": "Francia",
            "genre": "Noir",
            "totalDuration": "105 min",
            "timeNeeded": "1h 45m",
            "suggestedPacing": "In una sera",
            "reason": "Un noir essenziale",
            "plot": "Un killer solitario a Parigi.",
            "technicalDetails": {
                "director": "Jean-Pierre Melville",
                "cast": ["Alain Delon"],
                "durationOrSeasons": "105 min",
                "rating": "8.0"
            },
            "whereToWatch": "Noleggio",
            "trailerUrl": "https://example.com/t",
            "posterUrl": "https://example.com/p.jpg"
        })
    };
    json!({
        "recommendations": [rec("Frank Costello faccia d'angelo"), rec("Il cerchio rosso"), rec("Lo spione")],
        "comparativeExplanation": "Tre Melville.",
        "timeManagement": "Uno per sera."
    })
    .to_string()
}

#[tokio::test]
async fn sends_prompt_and_schema_and_parses_the_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("Veloce (30-60 min)")
                .body_contains("Noir, Parigi")
                .body_contains("json_schema")
                .body_contains("comparativeExplanation");
            then.status(200).json_body(completion(&reply_body()));
        })
        .await;

    let result = adapter(&server)
        .fetch_match(TimeBucket::Quick, &["Noir".to_string(), "Parigi".to_string()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.recommendations.len(), 3);
    assert_eq!(result.recommendations[1].title, "Il cerchio rosso");
    assert_eq!(
        result.recommendations[0].original_title.as_deref(),
        Some("Le Samouraï")
    );
}

#[tokio::test]
async fn unparsable_content_maps_to_the_parse_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(completion("Ecco tre film che ti piaceranno!"));
        })
        .await;

    let err = adapter(&server)
        .fetch_match(TimeBucket::Flexible, &["Magia".to_string()])
        .await
        .unwrap_err();

    assert_eq!(err, PortError::Service(PARSE_FAILURE_MESSAGE.to_string()));
}

#[tokio::test]
async fn upstream_errors_keep_their_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(400).json_body(json!({
                "error": {
                    "message": "API key not valid. Please pass a valid API key.",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": null
                }
            }));
        })
        .await;

    let err = adapter(&server)
        .fetch_match(TimeBucket::Weekend, &["Vendetta".to_string()])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PortError::Service("API key not valid. Please pass a valid API key.".to_string())
    );
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).json_body(json!({
                "error": {
                    "message": "boom",
                    "type": "server_error",
                    "param": null,
                    "code": null
                }
            }));
        })
        .await;

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        adapter(&server).fetch_match(TimeBucket::Miniseries, &["Paranoia".to_string()]),
    )
    .await
    .expect("a failing call settles without retrying");

    assert_eq!(outcome.unwrap_err(), PortError::Service("boom".to_string()));
    mock.assert_hits_async(1).await;
}
