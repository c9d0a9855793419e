use crate::error::{GeminiError, NovaError};
use crate::types::gemini::{GenerateContentRequest, GenerateContentResponse};
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// Thin client over the `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiApi {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiApi {
    pub fn new(
        client: reqwest::Client,
        base_url: &Url,
        model: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, NovaError> {
        let endpoint = base_url.join(&format!("models/{model}:generateContent"))?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post one request; 5xx and connection failures are retried.
    pub async fn generate(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, NovaError> {
        (|| async { self.post_once(body).await })
            .retry(default_retry_policy())
            .when(|e: &NovaError| e.is_retryable())
            .notify(|err, dur: Duration| {
                warn!("Gemini request retrying after error {}, sleeping {:?}", err, dur);
            })
            .await
    }

    async fn post_once(
        &self,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, NovaError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let parsed: GenerateContentResponse = resp.json().await?;
            debug!(
                model_version = parsed.model_version.as_deref().unwrap_or("-"),
                candidates = parsed.candidates.len(),
                "Gemini response received"
            );
            return Ok(parsed);
        }

        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NovaError::UpstreamStatus(status));
        }
        let bytes = resp.bytes().await?;
        match serde_json::from_slice::<GeminiError>(&bytes) {
            Ok(err) => Err(NovaError::GeminiServerError(err)),
            Err(_) => Err(NovaError::UpstreamStatus(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_includes_model() {
        let base = Url::parse("https://generativelanguage.googleapis.com/v1beta/").unwrap();
        let api = GeminiApi::new(reqwest::Client::new(), &base, "gemini-1.5-pro", "k").unwrap();
        assert_eq!(
            api.endpoint().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }
}
