//! crates/cinematcher_core/src/prompt.rs
//!
//! The provider-independent half of the recommendation client: the instruction
//! sent to the model, the JSON schema its reply must follow, and the parsing of
//! that reply back into a `MatchResult`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::domain::{MatchResult, TimeBucket};
use crate::ports::{PortError, PortResult};

/// Shown when the reply cannot be turned into a `MatchResult`.
pub const PARSE_FAILURE_MESSAGE: &str =
    "Impossibile processare le raccomandazioni cinematografiche.";

/// Name attached to the declared output schema.
pub const SCHEMA_NAME: &str = "cine_match";

const RECOMMENDATION_COUNT: usize = 3;

const PROMPT_TEMPLATE: &str = r#"Sei "CineMatcher AI", un esperto mondiale di cinema.
L'utente ha a disposizione il seguente tempo: "{time}".
Ecco gli elementi di interesse dell'utente: {clues}.

Fornisci 3 raccomandazioni perfette seguendo rigorosamente queste istruzioni:
- Adatta il formato (film, miniserie, serie) alla disponibilità di tempo.
- Spiega SPECIFICAMENTE come gli elementi forniti si collegano alla scelta.
- Sii preciso con le durate e suggerisci un ritmo di visione realistico.
- Includi dettagli tecnici, trama evocativa e link a trailer reali."#;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("code fence pattern is valid")
});

/// Renders the instruction for one request.
pub fn build_prompt(time: TimeBucket, clues: &[String]) -> String {
    PROMPT_TEMPLATE
        .replace("{time}", time.label())
        .replace("{clues}", &clues.join(", "))
}

/// The JSON schema constraining the reply. Every field is required except `originalTitle`.
pub fn match_result_schema() -> Value {
    let string = json!({ "type": "string" });

    json!({
        "type": "object",
        "properties": {
            "recommendations": {
                "type": "array",
                "minItems": RECOMMENDATION_COUNT,
                "maxItems": RECOMMENDATION_COUNT,
                "items": {
                    "type": "object",
                    "properties": {
                        "title": string,
                        "originalTitle": string,
                        "year": string,
                        "type": string,
                        "country": string,
                        "genre": string,
                        "totalDuration": string,
                        "timeNeeded": string,
                        "suggestedPacing": string,
                        "reason": string,
                        "plot": string,
                        "technicalDetails": {
                            "type": "object",
                            "properties": {
                                "director": string,
                                "cast": { "type": "array", "items": string },
                                "durationOrSeasons": string,
                                "rating": string
                            },
                            "required": ["director", "cast", "durationOrSeasons", "rating"]
                        },
                        "whereToWatch": string,
                        "trailerUrl": string,
                        "posterUrl": string
                    },
                    "required": [
                        "title", "year", "type", "country", "genre", "totalDuration",
                        "timeNeeded", "suggestedPacing", "reason", "plot",
                        "technicalDetails", "whereToWatch", "trailerUrl", "posterUrl"
                    ]
                }
            },
            "comparativeExplanation": string,
            "timeManagement": string
        },
        "required": ["recommendations", "comparativeExplanation", "timeManagement"]
    })
}

/// Parses the model's raw text. Any failure becomes `PARSE_FAILURE_MESSAGE`.
pub fn parse_match_result(raw: &str) -> PortResult<MatchResult> {
    let body = match CODE_FENCE.captures(raw).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str(),
        None => raw.trim(),
    };
    let body = if body.is_empty() { "{}" } else { body };

    let result: MatchResult = serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "Failed to parse the recommendation reply");
        PortError::Service(PARSE_FAILURE_MESSAGE.to_string())
    })?;

    if result.recommendations.len() != RECOMMENDATION_COUNT {
        warn!(
            count = result.recommendations.len(),
            "Reply did not contain exactly {} recommendations", RECOMMENDATION_COUNT
        );
    }

    Ok(result)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_reply(titles: [&str; 3]) -> String {
        let recs: Vec<Value> = titles
            .iter()
            .map(|title| {
                json!({
                    "title": title,
                    "year": "1974",
                    "type": "Film",
                    "country": "USA",
                    "genre": "Noir",
                    "totalDuration": "130 min",
                    "timeNeeded": "2h 10m",
                    "suggestedPacing": "Una serata",
                    "reason": "Noir classico",
                    "plot": "Un investigatore privato a Los Angeles.",
                    "technicalDetails": {
                        "director": "Roman Polanski",
                        "cast": ["Jack Nicholson", "Faye Dunaway"],
                        "durationOrSeasons": "130 min",
                        "rating": "8.1"
                    },
                    "whereToWatch": "Noleggio digitale",
                    "trailerUrl": "https://example.com/trailer",
                    "posterUrl": "https://example.com/poster.jpg"
                })
            })
            .collect();

        json!({
            "recommendations": recs,
            "comparativeExplanation": "Tre sfumature di noir.",
            "timeManagement": "Uno per sera."
        })
        .to_string()
    }

    #[test]
    fn prompt_embeds_time_label_and_joined_clues() {
        let prompt = build_prompt(
            TimeBucket::Quick,
            &["Noir".to_string(), "Venezia".to_string()],
        );
        assert!(prompt.contains("\"Veloce (30-60 min)\""));
        assert!(prompt.contains("Noir, Venezia."));
        assert!(prompt.contains("3 raccomandazioni"));
    }

    #[test]
    fn schema_leaves_only_original_title_optional() {
        let schema = match_result_schema();
        let item = &schema["properties"]["recommendations"]["items"];
        let required: Vec<&str> = item["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let properties = item["properties"].as_object().unwrap();

        assert_eq!(properties.len(), required.len() + 1);
        assert!(!required.contains(&"originalTitle"));
        assert_eq!(schema["properties"]["recommendations"]["maxItems"], 3);
    }

    #[test]
    fn parses_a_well_formed_reply() {
        let result = parse_match_result(&sample_reply(["Chinatown", "Heat", "Drive"])).unwrap();
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.recommendations[1].title, "Heat");
        assert_eq!(result.time_management, "Uno per sera.");
    }

    #[test]
    fn unwraps_a_fenced_reply() {
        let fenced = format!("```json\n{}\n```", sample_reply(["A", "B", "C"]));
        assert!(parse_match_result(&fenced).is_ok());
    }

    #[test]
    fn maps_garbage_and_empty_replies_to_the_parse_message() {
        for raw in ["Ecco i miei consigli!", "", "{\"recommendations\": []}"] {
            let err = parse_match_result(raw).unwrap_err();
            assert_eq!(err, PortError::Service(PARSE_FAILURE_MESSAGE.to_string()));
        }
    }
}
