//! Ollama-backed summarizer.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use nd_core::{Document, Error, Result, Summarizer};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.1";

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

pub struct OllamaModel {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaModel {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl fmt::Debug for OllamaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaModel")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// One prompt covering every document; the model sees each article as a
/// separate block.
fn build_prompt(documents: &[Document]) -> String {
    let joined = documents
        .iter()
        .map(|d| d.page_content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");
    format!(
        "Summarize the following news articles in a short, plain-language digest:\n\n{joined}\n\nSummary:"
    )
}

#[async_trait]
impl Summarizer for OllamaModel {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn summarize(&self, documents: &[Document]) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(documents),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Summarization(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Summarization(format!(
                "model server returned HTTP {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Summarization(e.to_string()))?;

        match body.response {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(Error::Summarization(
                "model returned no usable output".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::DocMetadata;

    fn doc(content: &str) -> Document {
        Document {
            page_content: content.to_string(),
            metadata: DocMetadata {
                title: "t".to_string(),
                url: None,
                published: None,
                source: "test".to_string(),
            },
        }
    }

    #[test]
    fn prompt_contains_every_document() {
        let prompt = build_prompt(&[doc("first article"), doc("second article")]);
        assert!(prompt.contains("first article"));
        assert!(prompt.contains("second article"));
        assert!(prompt.contains("---"));
    }

    #[test]
    fn response_parsing_tolerates_missing_field() {
        let body: GenerateResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert!(body.response.is_none());

        let body: GenerateResponse =
            serde_json::from_str(r#"{"response": "a digest", "done": true}"#).unwrap();
        assert_eq!(body.response.as_deref(), Some("a digest"));
    }
}
