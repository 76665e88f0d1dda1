use std::sync::Arc;

use tracing::info;

use nd_core::{Error, Result, Summarizer};

pub mod dummy;
pub mod ollama;

pub use dummy::DummyModel;
pub use ollama::OllamaModel;

/// Summarizer construction parameters.
///
/// The model handle is built once at process start and shared across
/// all requests; calls are stateless.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backend selector: `ollama` (default) or `dummy`.
    pub model_name: Option<String>,
    /// Base URL of the model server, for HTTP-backed models.
    pub model_url: Option<String>,
}

pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn Summarizer>> {
    let config = config.unwrap_or_default();
    let name = config.model_name.as_deref().unwrap_or("ollama");

    let model: Arc<dyn Summarizer> = match name {
        "ollama" => Arc::new(OllamaModel::new(config.model_url.clone())?),
        "dummy" => Arc::new(DummyModel),
        other => {
            return Err(Error::Summarization(format!(
                "unknown summarizer model: {other}"
            )))
        }
    };

    info!(model = model.name(), "summarizer initialized");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_known_models() {
        let dummy = create_model(Some(Config {
            model_name: Some("dummy".to_string()),
            model_url: None,
        }))
        .await
        .unwrap();
        assert_eq!(dummy.name(), "dummy");

        let ollama = create_model(None).await.unwrap();
        assert_eq!(ollama.name(), "ollama");
    }

    #[tokio::test]
    async fn rejects_unknown_model_names() {
        let err = create_model(Some(Config {
            model_name: Some("gpt-unknown".to_string()),
            model_url: None,
        }))
        .await;
        assert!(err.is_err());
    }
}
