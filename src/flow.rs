//! Prediction request/response flow.
//!
//! One visitor's journey through the prediction page is modelled as a
//! `ViewState` driven by `FlowEvent`s through the pure [`transition`]
//! function. `PredictionFlow` performs the side effects (progress captions,
//! backend calls, delayed category reveal) and feeds the resulting events
//! back into the visitor's `FlowSession`.
//!
//! Every submission and category selection opens a new generation on the
//! session. Events from an older generation are dropped, so a slow response
//! to an abandoned request can never overwrite a newer result.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::backend::{label_for, BackendError, RiskBackend};
use crate::config::FrontendConfig;
use crate::models::{
    FoodCategory, FoodRecommendation, FoodRecommendationResponse, HealthProfile, RiskLabel,
    UnknownCategory,
};
use crate::sessions::FlowSession;

/// Captions cycled while a submission is "processing".
pub const PROCESSING_STEPS: [&str; 3] = [
    "Menganalisis data kesehatan...",
    "Menghitung probabilitas risiko...",
    "Menyiapkan hasil prediksi...",
];

// ═══════════════════════════════════════════════════════════
// View state
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Submitting {
        step: usize,
    },
    Predicted {
        label: RiskLabel,
        categories_visible: bool,
    },
    LoadingFood {
        label: RiskLabel,
        category: FoodCategory,
    },
    Recommended {
        label: RiskLabel,
        category: FoodCategory,
        response: FoodRecommendationResponse,
    },
    Error {
        message: String,
        label: Option<RiskLabel>,
    },
}

impl ViewState {
    /// Risk label of the current prediction, if one exists.
    pub fn label(&self) -> Option<RiskLabel> {
        match self {
            ViewState::Predicted { label, .. }
            | ViewState::LoadingFood { label, .. }
            | ViewState::Recommended { label, .. } => Some(*label),
            ViewState::Error { label, .. } => *label,
            ViewState::Idle | ViewState::Submitting { .. } => None,
        }
    }

    /// Progress caption while submitting.
    pub fn caption(&self) -> Option<&'static str> {
        match self {
            ViewState::Submitting { step } => PROCESSING_STEPS.get(*step).copied(),
            _ => None,
        }
    }

    /// Category currently loading or shown.
    pub fn category(&self) -> Option<FoodCategory> {
        match self {
            ViewState::LoadingFood { category, .. } | ViewState::Recommended { category, .. } => {
                Some(*category)
            }
            _ => None,
        }
    }

    /// Recommendation list; empty in every state except `Recommended`.
    pub fn recommendations(&self) -> &[FoodRecommendation] {
        match self {
            ViewState::Recommended { response, .. } => response.items(),
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True while a backend call is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ViewState::Submitting { .. } | ViewState::LoadingFood { .. }
        )
    }

    /// The category picker is shown once a prediction exists and its reveal
    /// delay has passed (or any later state was reached).
    pub fn categories_visible(&self) -> bool {
        match self {
            ViewState::Predicted {
                categories_visible, ..
            } => *categories_visible,
            ViewState::LoadingFood { .. } | ViewState::Recommended { .. } => true,
            ViewState::Error { label, .. } => label.is_some(),
            ViewState::Idle | ViewState::Submitting { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    Submit,
    Progress(usize),
    PredictionSucceeded(RiskLabel),
    PredictionFailed(String),
    RevealCategories,
    SelectCategory(FoodCategory),
    FoodSucceeded(FoodRecommendationResponse),
    FoodFailed(String),
}

/// Compute the next view state.
///
/// Events that do not apply to the current state return it unchanged.
pub fn transition(state: &ViewState, event: FlowEvent) -> ViewState {
    use FlowEvent as E;
    use ViewState as S;

    match (state, event) {
        (_, E::Submit) => S::Submitting { step: 0 },

        (S::Submitting { .. }, E::Progress(step)) => S::Submitting {
            step: step.min(PROCESSING_STEPS.len() - 1),
        },
        (S::Submitting { .. }, E::PredictionSucceeded(label)) => S::Predicted {
            label,
            categories_visible: false,
        },
        (S::Submitting { .. }, E::PredictionFailed(message)) => S::Error {
            message,
            label: None,
        },

        (
            S::Predicted {
                label,
                categories_visible: false,
            },
            E::RevealCategories,
        ) => S::Predicted {
            label: *label,
            categories_visible: true,
        },

        (current, E::SelectCategory(category)) => match current.label() {
            Some(label) => S::LoadingFood { label, category },
            None => current.clone(),
        },

        (S::LoadingFood { label, category }, E::FoodSucceeded(response)) => S::Recommended {
            label: *label,
            category: *category,
            response,
        },
        (S::LoadingFood { label, .. }, E::FoodFailed(message)) => S::Error {
            message,
            label: Some(*label),
        },

        (current, _) => current.clone(),
    }
}

// ═══════════════════════════════════════════════════════════
// Errors and user-facing messages
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("Belum ada hasil prediksi. Lakukan prediksi terlebih dahulu.")]
    NoPrediction,

    #[error("Kategori tidak dikenal: {0}")]
    UnknownCategory(String),
}

impl From<UnknownCategory> for FlowError {
    fn from(err: UnknownCategory) -> Self {
        FlowError::UnknownCategory(err.0)
    }
}

/// Message shown when the prediction request fails.
pub fn prediction_error_message(err: &BackendError, backend_url: &str) -> String {
    match err {
        e if e.is_transport() => format!(
            "Error: Failed to fetch data from API. Pastikan backend Flask berjalan di {backend_url}"
        ),
        BackendError::Application { message, .. } => format!(
            "Error: {}",
            message.as_deref().unwrap_or("Something went wrong")
        ),
        BackendError::UnexpectedPrediction(Some(value)) => {
            format!("Error: Unexpected prediction value {value}")
        }
        BackendError::UnexpectedPrediction(None) => "Error: Prediction value missing".to_string(),
        other => format!("Error: {other}"),
    }
}

/// Message shown when the food recommendation request fails.
pub fn food_error_message(err: &BackendError, backend_url: &str) -> String {
    match err {
        e if e.is_transport() => {
            format!("Gagal terhubung ke server. Pastikan backend berjalan di {backend_url}")
        }
        BackendError::Application { message, .. } => format!(
            "Gagal mendapatkan rekomendasi makanan: {}",
            message.as_deref().unwrap_or("Unknown error")
        ),
        other => format!("Gagal mendapatkan rekomendasi makanan: {other}"),
    }
}

// ═══════════════════════════════════════════════════════════
// PredictionFlow
// ═══════════════════════════════════════════════════════════

/// Result of one flow step: the state the visitor now sees, plus the
/// backend failure behind it (if any) for callers that map errors.
#[derive(Debug, Clone)]
pub struct FlowOutcome {
    pub state: ViewState,
    pub error: Option<BackendError>,
}

pub struct PredictionFlow {
    backend: Arc<dyn RiskBackend>,
    step_delay: Duration,
    reveal_delay: Duration,
}

impl PredictionFlow {
    pub fn new(backend: Arc<dyn RiskBackend>, step_delay: Duration, reveal_delay: Duration) -> Self {
        Self {
            backend,
            step_delay,
            reveal_delay,
        }
    }

    pub fn from_config(backend: Arc<dyn RiskBackend>, config: &FrontendConfig) -> Self {
        Self::new(backend, config.step_delay, config.reveal_delay)
    }

    pub fn backend(&self) -> &Arc<dyn RiskBackend> {
        &self.backend
    }

    pub fn backend_url(&self) -> &str {
        self.backend.base_url()
    }

    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Submit a profile for prediction and wait for the outcome.
    pub async fn submit(&self, session: &Arc<FlowSession>, profile: HealthProfile) -> FlowOutcome {
        let generation = self.begin_submission(session, profile).await;
        self.run_submission(session, generation, profile).await
    }

    /// Put the session into `Submitting` at the first caption and open a new
    /// generation. The caller then drives [`Self::run_submission`], usually
    /// on a background task so the visitor can watch the captions.
    pub async fn begin_submission(&self, session: &FlowSession, profile: HealthProfile) -> u64 {
        let generation = session.begin_submission(profile).await;
        tracing::info!(session = %session.id(), generation, "Prediction submitted");
        generation
    }

    /// Cycle the processing captions, then issue exactly one prediction call.
    ///
    /// If a newer submission starts meanwhile this one stops updating the
    /// session and returns whatever the newer one shows.
    pub async fn run_submission(
        &self,
        session: &Arc<FlowSession>,
        generation: u64,
        profile: HealthProfile,
    ) -> FlowOutcome {
        for step in 0..PROCESSING_STEPS.len() {
            if step > 0 && !session.apply(generation, FlowEvent::Progress(step)).await {
                return self.superseded(session).await;
            }
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }
        if !session.is_current(generation).await {
            return self.superseded(session).await;
        }

        let result = self
            .backend
            .predict(&profile)
            .await
            .and_then(|body| label_for(&body));

        let (event, error) = match result {
            Ok(label) => {
                tracing::info!(session = %session.id(), label = %label, "Prediction received");
                (FlowEvent::PredictionSucceeded(label), None)
            }
            Err(e) => {
                tracing::warn!(session = %session.id(), error = %e, "Prediction failed");
                let message = prediction_error_message(&e, self.backend_url());
                (FlowEvent::PredictionFailed(message), Some(e))
            }
        };
        let succeeded = error.is_none();

        if !session.apply(generation, event).await {
            return self.superseded(session).await;
        }
        if succeeded {
            self.schedule_reveal(session, generation).await;
        }

        FlowOutcome {
            state: session.state().await,
            error,
        }
    }

    /// Fetch food recommendations for `category` and wait for the outcome.
    pub async fn select_category(
        &self,
        session: &Arc<FlowSession>,
        category: FoodCategory,
    ) -> Result<FlowOutcome, FlowError> {
        let (generation, profile) = self.begin_selection(session, category).await?;
        Ok(self.run_selection(session, generation, category, profile).await)
    }

    /// Enter `LoadingFood` for `category`. Fails when no prediction exists.
    pub async fn begin_selection(
        &self,
        session: &FlowSession,
        category: FoodCategory,
    ) -> Result<(u64, HealthProfile), FlowError> {
        let (generation, profile) = session.begin_selection(category).await?;
        tracing::info!(session = %session.id(), generation, category = %category, "Category selected");
        Ok((generation, profile))
    }

    /// Issue the recommendation call opened by [`Self::begin_selection`].
    pub async fn run_selection(
        &self,
        session: &Arc<FlowSession>,
        generation: u64,
        category: FoodCategory,
        profile: HealthProfile,
    ) -> FlowOutcome {
        let (event, error) = match self.backend.recommend_food(category, &profile).await {
            Ok(response) => {
                tracing::debug!(
                    session = %session.id(),
                    count = response.items().len(),
                    "Recommendations received"
                );
                (FlowEvent::FoodSucceeded(response), None)
            }
            Err(e) => {
                tracing::warn!(session = %session.id(), error = %e, "Food recommendation failed");
                let message = food_error_message(&e, self.backend_url());
                (FlowEvent::FoodFailed(message), Some(e))
            }
        };

        if !session.apply(generation, event).await {
            return self.superseded(session).await;
        }
        FlowOutcome {
            state: session.state().await,
            error,
        }
    }

    async fn schedule_reveal(&self, session: &Arc<FlowSession>, generation: u64) {
        if self.reveal_delay.is_zero() {
            session.apply(generation, FlowEvent::RevealCategories).await;
            return;
        }
        let session = Arc::clone(session);
        let delay = self.reveal_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.apply(generation, FlowEvent::RevealCategories).await;
        });
    }

    async fn superseded(&self, session: &Arc<FlowSession>) -> FlowOutcome {
        tracing::debug!(session = %session.id(), "Dropping result of superseded request");
        FlowOutcome {
            state: session.state().await,
            error: None,
        }
    }
}
