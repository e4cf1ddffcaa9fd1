use crate::core::{CalculatorApi, Placeable};
use crate::domain::wire::{CalculationRequest, CalculationResponse, ErrorResponse, PlaceableRequest};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

/// Talks to a running calculator service over HTTP.
#[derive(Debug, Clone)]
pub struct CalculatorClient {
    base_url: Url,
    client: Client,
}

impl CalculatorClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = validate_url("api_url", base_url)?;
        // 確保 join 時保留路徑前綴 (例如 /api)
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CalcError::InvalidConfigValueError {
                field: "api_url".to_string(),
                value: self.base_url.to_string(),
                reason: format!("Cannot build endpoint '{}': {}", path, e),
            })
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.detail)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body
                }
            });

        Err(CalcError::RemoteError {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl CalculatorApi for CalculatorClient {
    async fn list_placeables(&self) -> Result<Vec<Placeable>> {
        let url = self.endpoint("placeables")?;
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn calculate(
        &self,
        placeables: Vec<PlaceableRequest>,
        use_deep_desert_cost: bool,
    ) -> Result<CalculationResponse> {
        let url = self.endpoint("calculate")?;
        tracing::debug!(
            "Posting {} placeables to: {} (deep desert: {})",
            placeables.len(),
            url,
            use_deep_desert_cost
        );

        let request = CalculationRequest {
            placeables,
            use_deep_desert_cost,
        };
        let response = self.client.post(url).json(&request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}
