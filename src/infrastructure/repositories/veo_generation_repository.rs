use super::generation_repository::{GenerationRepository, GenerationRequest, GenerationResponse};
use async_trait::async_trait;

/// HTTP implementation of the generation repository against the VEO API
pub struct VeoGenerationRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VeoGenerationRepository {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl GenerationRepository for VeoGenerationRepository {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, String> {
        let url = format!("{}/generate", self.base_url);

        tracing::info!(
            url = %url,
            duration = request.duration,
            style = %request.style,
            "Submitting generation job to provider"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("provider request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("provider returned {}: {}", status, body));
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| format!("provider response could not be parsed: {}", e))
    }
}
