use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{BackendError, RiskBackend};
use crate::models::{
    FoodCategory, FoodRecommendationRequest, FoodRecommendationResponse, HealthProfile,
    PredictionResult,
};

/// reqwest client for the prediction service.
pub struct HttpRiskBackend {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpRiskBackend {
    /// Create a client for the service at `base_url`.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{route}", self.base_url)
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout(self.timeout.map(|t| t.as_secs()).unwrap_or_default())
        } else if e.is_connect() {
            BackendError::Connection(self.base_url.clone())
        } else {
            BackendError::Http(e.to_string())
        }
    }

    /// POST a JSON body and decode the service's `{success, error, ...}` envelope.
    async fn post_envelope<B, R>(
        &self,
        route: &str,
        body: &B,
        success_of: impl Fn(&R) -> (bool, Option<String>),
    ) -> Result<R, BackendError>
    where
        B: serde::Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(route);
        tracing::debug!(%url, "Calling prediction service");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        // An unreadable body is a transport-level failure whatever the
        // status (e.g. the HTML error page of a crashed service).
        let parsed: R = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(%url, status = status.as_u16(), error = %e, "Unreadable response body");
            BackendError::ResponseParsing(format!("status {}: {e}", status.as_u16()))
        })?;

        let (success, error) = success_of(&parsed);
        if !status.is_success() || !success {
            tracing::warn!(%url, status = status.as_u16(), error = ?error, "Prediction service reported failure");
            return Err(BackendError::Application {
                status: status.as_u16(),
                message: error,
            });
        }

        Ok(parsed)
    }
}

#[async_trait]
impl RiskBackend for HttpRiskBackend {
    async fn predict(&self, profile: &HealthProfile) -> Result<PredictionResult, BackendError> {
        self.post_envelope("predict", profile, |r: &PredictionResult| {
            (r.success, r.error.clone())
        })
        .await
    }

    async fn recommend_food(
        &self,
        category: FoodCategory,
        profile: &HealthProfile,
    ) -> Result<FoodRecommendationResponse, BackendError> {
        let body = FoodRecommendationRequest {
            category,
            user_data: profile,
        };
        self.post_envelope("recommend_food", &body, |r: &FoodRecommendationResponse| {
            (r.success, r.error.clone())
        })
        .await
    }

    async fn health(&self) -> Result<(), BackendError> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Application {
                status: status.as_u16(),
                message: None,
            })
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
