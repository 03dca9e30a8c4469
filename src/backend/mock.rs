use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{BackendError, RiskBackend};
use crate::models::{FoodCategory, FoodRecommendationResponse, HealthProfile, PredictionResult};

/// A call observed by the mock backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Predict(HealthProfile),
    RecommendFood(FoodCategory, HealthProfile),
    Health,
}

type Scripted<T> = (Duration, Result<T, BackendError>);

/// Scripted backend for tests.
///
/// Each call pops the next scripted reply (after its delay); the last reply
/// is reused once the script runs out.
pub struct MockRiskBackend {
    predictions: Mutex<VecDeque<Scripted<PredictionResult>>>,
    recommendations: Mutex<VecDeque<Scripted<FoodRecommendationResponse>>>,
    healthy: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRiskBackend {
    pub fn new() -> Self {
        Self {
            predictions: Mutex::new(VecDeque::new()),
            recommendations: Mutex::new(VecDeque::new()),
            healthy: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Successful prediction body with the given raw value.
    pub fn prediction_body(value: i64) -> PredictionResult {
        PredictionResult {
            success: true,
            prediction: Some(value),
            error: None,
            prediction_text: None,
            risk_level: None,
            message: None,
        }
    }

    pub fn with_prediction(self, reply: Result<PredictionResult, BackendError>) -> Self {
        self.with_delayed_prediction(Duration::ZERO, reply)
    }

    pub fn with_delayed_prediction(
        self,
        delay: Duration,
        reply: Result<PredictionResult, BackendError>,
    ) -> Self {
        if let Ok(mut queue) = self.predictions.lock() {
            queue.push_back((delay, reply));
        }
        self
    }

    pub fn with_recommendation(
        self,
        reply: Result<FoodRecommendationResponse, BackendError>,
    ) -> Self {
        self.with_delayed_recommendation(Duration::ZERO, reply)
    }

    pub fn with_delayed_recommendation(
        self,
        delay: Duration,
        reply: Result<FoodRecommendationResponse, BackendError>,
    ) -> Self {
        if let Ok(mut queue) = self.recommendations.lock() {
            queue.push_back((delay, reply));
        }
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn next<T: Clone>(
        queue: &Mutex<VecDeque<Scripted<T>>>,
        what: &str,
    ) -> Scripted<T> {
        let Ok(mut queue) = queue.lock() else {
            return (
                Duration::ZERO,
                Err(BackendError::Http("mock lock poisoned".into())),
            );
        };
        match queue.len() {
            0 => (
                Duration::ZERO,
                Err(BackendError::Http(format!("no scripted {what} reply"))),
            ),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap_or_else(|| {
                (Duration::ZERO, Err(BackendError::Http("empty script".into())))
            }),
        }
    }
}

impl Default for MockRiskBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RiskBackend for MockRiskBackend {
    async fn predict(&self, profile: &HealthProfile) -> Result<PredictionResult, BackendError> {
        self.record(RecordedCall::Predict(*profile));
        let (delay, reply) = Self::next(&self.predictions, "prediction");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }

    async fn recommend_food(
        &self,
        category: FoodCategory,
        profile: &HealthProfile,
    ) -> Result<FoodRecommendationResponse, BackendError> {
        self.record(RecordedCall::RecommendFood(category, *profile));
        let (delay, reply) = Self::next(&self.recommendations, "recommendation");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }

    async fn health(&self) -> Result<(), BackendError> {
        self.record(RecordedCall::Health);
        if self.healthy {
            Ok(())
        } else {
            Err(BackendError::Connection("mock".into()))
        }
    }

    fn base_url(&self) -> &str {
        "http://mock.invalid"
    }
}
