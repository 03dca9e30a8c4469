//! Client side of the external prediction service.
//!
//! The service exposes `/predict` and `/recommend_food` (plus `/health`).
//! `RiskBackend` abstracts it so the flow can run against the real HTTP
//! client or the scripted mock in tests.

pub mod http;
pub mod mock;

pub use http::HttpRiskBackend;
pub use mock::{MockRiskBackend, RecordedCall};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    FoodCategory, FoodRecommendationResponse, HealthProfile, PredictionResult, RiskLabel,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Prediction service is not reachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Prediction service rejected the request (status {status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Application { status: u16, message: Option<String> },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Unexpected prediction value: {0:?}")]
    UnexpectedPrediction(Option<i64>),
}

impl BackendError {
    /// Failures where no usable answer came back from the service at all.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BackendError::Connection(_)
                | BackendError::Timeout(_)
                | BackendError::Http(_)
                | BackendError::ResponseParsing(_)
        )
    }
}

/// Access to the prediction and food-recommendation service.
///
/// Implementations return `Ok` only for an HTTP success status whose body
/// carries `success: true`; every other outcome is a `BackendError`.
#[async_trait]
pub trait RiskBackend: Send + Sync {
    async fn predict(&self, profile: &HealthProfile) -> Result<PredictionResult, BackendError>;

    async fn recommend_food(
        &self,
        category: FoodCategory,
        profile: &HealthProfile,
    ) -> Result<FoodRecommendationResponse, BackendError>;

    /// Reachability probe against the service's `/health`.
    async fn health(&self) -> Result<(), BackendError>;

    fn base_url(&self) -> &str;
}

/// Map a successful prediction body to its label.
///
/// Only 0 and 1 are defined; anything else (or a missing value) is an error
/// rather than a silent "low risk".
pub fn label_for(result: &PredictionResult) -> Result<RiskLabel, BackendError> {
    result
        .prediction
        .and_then(RiskLabel::from_prediction)
        .ok_or(BackendError::UnexpectedPrediction(result.prediction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(prediction: Option<i64>) -> PredictionResult {
        PredictionResult {
            success: true,
            prediction,
            error: None,
            prediction_text: None,
            risk_level: None,
            message: None,
        }
    }

    #[test]
    fn label_for_maps_binary_values() {
        assert_eq!(label_for(&result(Some(1))).unwrap(), RiskLabel::High);
        assert_eq!(label_for(&result(Some(0))).unwrap(), RiskLabel::Low);
    }

    #[test]
    fn label_for_rejects_other_values() {
        assert_eq!(
            label_for(&result(Some(7))),
            Err(BackendError::UnexpectedPrediction(Some(7)))
        );
        assert_eq!(
            label_for(&result(None)),
            Err(BackendError::UnexpectedPrediction(None))
        );
    }

    #[test]
    fn transport_classification() {
        assert!(BackendError::Connection("http://x".into()).is_transport());
        assert!(BackendError::Timeout(5).is_transport());
        assert!(!BackendError::Application { status: 400, message: None }.is_transport());
        assert!(!BackendError::UnexpectedPrediction(Some(3)).is_transport());
    }

    #[test]
    fn application_error_display_includes_detail() {
        let err = BackendError::Application {
            status: 400,
            message: Some("BMI must be between 10-60".into()),
        };
        assert!(err.to_string().contains("BMI must be between 10-60"));
        let bare = BackendError::Application { status: 500, message: None };
        assert!(bare.to_string().contains("no detail"));
    }
}
