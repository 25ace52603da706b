// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{AiError, TextGenerator};
use crate::config::AiSection;
use crate::utils::http_client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(cfg: &AiSection) -> Result<Self, AiError> {
        Ok(Self {
            client: http_client(Duration::from_secs(cfg.timeout_secs))?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl TextGenerator for GeminiClient {
    fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, AiError> {
        let mut req = self.client.post(self.endpoint()).json(&request_body(prompt, schema));
        if let Some(key) = &self.api_key {
            req = req.header("x-goog-api-key", key);
        }
        let resp = req.send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let out: GenerateResponse = resp.json()?;
        response_text(out)
    }
}

pub(crate) fn request_body(prompt: &str, schema: &Value) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema
        }
    })
}

fn response_text(out: GenerateResponse) -> Result<String, AiError> {
    let text: String = out
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_requests_json_with_schema() {
        let schema = json!({ "type": "OBJECT" });
        let body = request_body("hi", &schema);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let out: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response_text(out).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn no_candidates_is_an_error() {
        let out: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(response_text(out), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn endpoint_uses_model_and_trims_slash() {
        let cfg = AiSection {
            base_url: "http://localhost:8080/".into(),
            model: "test-model".into(),
            ..Default::default()
        };
        let client = GeminiClient::new(&cfg).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/test-model:generateContent"
        );
    }
}
