//! Prediction flow endpoints: the HTML form routes under `/prediksi` and the
//! JSON mirror under `/api`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::AppContext;
use crate::flow::{FlowError, ViewState};
use crate::models::{
    FoodCategory, FoodRecommendationResponse, HealthForm, HealthProfile, ProfileError, RiskLabel,
};
use crate::pages::{poll_interval, render_prediction, PredictionView};
use crate::sessions::{FlowSession, SessionSnapshot};

fn parse_session_id(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
}

// ═══════════════════════════════════════════════════════════
// HTML routes
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub sesi: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    pub sesi: Option<String>,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub glucose: String,
    #[serde(default)]
    pub insulin: String,
    #[serde(default)]
    pub bmi: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    pub sesi: Option<String>,
    #[serde(default)]
    pub category: String,
}

struct PageParts<'a> {
    session: Option<&'a FlowSession>,
    form: HealthForm,
    state: ViewState,
    form_error: Option<&'a ProfileError>,
    notice: Option<&'a str>,
}

fn render_page(ctx: &AppContext, status: StatusCode, parts: PageParts<'_>) -> Response {
    let html = render_prediction(&PredictionView {
        session_id: parts.session.map(|s| s.id()),
        form: &parts.form,
        form_error: parts.form_error,
        notice: parts.notice,
        state: &parts.state,
        backend_url: ctx.backend_url(),
        reveal_delay: ctx.config.reveal_delay,
        poll_interval: poll_interval(ctx.config.step_delay),
    });
    (status, Html(html)).into_response()
}

async fn render_session(ctx: &AppContext, status: StatusCode, session: &FlowSession) -> Response {
    render_page(
        ctx,
        status,
        PageParts {
            session: Some(session),
            form: session.form().await,
            state: session.state().await,
            form_error: None,
            notice: None,
        },
    )
}

/// 303 to the session's page, which polls until the background step ends.
fn see_session(session: &FlowSession) -> Response {
    Redirect::to(&format!("/prediksi?sesi={}", session.id())).into_response()
}

/// `GET /prediksi`: empty form, or the visitor's current state with `?sesi=`.
pub async fn show(State(ctx): State<AppContext>, Query(query): Query<SessionQuery>) -> Response {
    let session = match parse_session_id(query.sesi.as_deref()) {
        Some(id) => ctx.sessions.get(id).await,
        None => None,
    };

    match session {
        Some(session) => render_session(&ctx, StatusCode::OK, &session).await,
        None => render_page(
            &ctx,
            StatusCode::OK,
            PageParts {
                session: None,
                form: HealthForm::default(),
                state: ViewState::Idle,
                form_error: None,
                notice: None,
            },
        ),
    }
}

/// `POST /prediksi`: validate the form, start the prediction in the
/// background and send the visitor to the polling page.
pub async fn submit(State(ctx): State<AppContext>, Form(input): Form<SubmitForm>) -> Response {
    let session = ctx
        .sessions
        .get_or_create(parse_session_id(input.sesi.as_deref()))
        .await;
    let form = HealthForm {
        age: input.age,
        glucose: input.glucose,
        insulin: input.insulin,
        bmi: input.bmi,
    };

    let profile = match HealthProfile::parse_form(&form) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::debug!(session = %session.id(), error = %e, "Form rejected");
            session.remember_form(form.clone()).await;
            return render_page(
                &ctx,
                StatusCode::BAD_REQUEST,
                PageParts {
                    session: Some(&*session),
                    form,
                    state: session.state().await,
                    form_error: Some(&e),
                    notice: None,
                },
            );
        }
    };

    let generation = ctx.flow.begin_submission(&session, profile).await;
    let flow = Arc::clone(&ctx.flow);
    let running = Arc::clone(&session);
    tokio::spawn(async move {
        flow.run_submission(&running, generation, profile).await;
    });
    see_session(&session)
}

/// `POST /prediksi/kategori`: start the recommendation fetch for a category
/// in the background.
pub async fn select_category(
    State(ctx): State<AppContext>,
    Form(input): Form<CategoryForm>,
) -> Response {
    let session = match parse_session_id(input.sesi.as_deref()) {
        Some(id) => ctx.sessions.get(id).await,
        None => None,
    };
    let Some(session) = session else {
        return render_page(
            &ctx,
            StatusCode::NOT_FOUND,
            PageParts {
                session: None,
                form: HealthForm::default(),
                state: ViewState::Idle,
                form_error: None,
                notice: Some("Sesi tidak ditemukan atau sudah kedaluwarsa. Silakan lakukan prediksi ulang."),
            },
        );
    };

    let started = match input.category.parse::<FoodCategory>() {
        Ok(category) => ctx
            .flow
            .begin_selection(&session, category)
            .await
            .map(|(generation, profile)| (generation, category, profile)),
        Err(e) => Err(FlowError::from(e)),
    };

    match started {
        Ok((generation, category, profile)) => {
            let flow = Arc::clone(&ctx.flow);
            let running = Arc::clone(&session);
            tokio::spawn(async move {
                flow.run_selection(&running, generation, category, profile)
                    .await;
            });
            see_session(&session)
        }
        Err(e) => {
            let notice = e.to_string();
            render_page(
                &ctx,
                StatusCode::BAD_REQUEST,
                PageParts {
                    session: Some(&*session),
                    form: session.form().await,
                    state: session.state().await,
                    form_error: None,
                    notice: Some(&notice),
                },
            )
        }
    }
}

// ═══════════════════════════════════════════════════════════
// JSON routes
// ═══════════════════════════════════════════════════════════

/// A metric given either as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
}

impl Metric {
    fn into_text(self) -> String {
        match self {
            Metric::Number(n) => n.to_string(),
            Metric::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    pub age: Option<Metric>,
    pub bmi: Option<Metric>,
    pub glucose: Option<Metric>,
    pub insulin: Option<Metric>,
}

impl PredictRequest {
    fn into_form(self) -> HealthForm {
        let text = |m: Option<Metric>| m.map(Metric::into_text).unwrap_or_default();
        HealthForm {
            age: text(self.age),
            glucose: text(self.glucose),
            insulin: text(self.insulin),
            bmi: text(self.bmi),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub session_id: Uuid,
    pub label: RiskLabel,
    pub label_text: &'static str,
    pub prediction: i64,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub session_id: String,
    pub category: String,
}

async fn find_session(ctx: &AppContext, raw: &str) -> Result<Arc<FlowSession>, ApiError> {
    let id = Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::BadRequest(format!("Invalid session id: {raw}")))?;
    ctx.sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session {id} not found")))
}

/// `POST /api/predict`: run a prediction in a new session.
pub async fn predict(
    State(ctx): State<AppContext>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let profile = HealthProfile::parse_form(&request.into_form())?;
    let session = ctx.sessions.create().await;

    let outcome = ctx.flow.submit(&session, profile).await;
    if let Some(err) = outcome.error {
        return Err(err.into());
    }
    let label = outcome
        .state
        .label()
        .ok_or_else(|| ApiError::Internal("prediction finished without a label".into()))?;

    Ok(Json(PredictResponse {
        session_id: session.id(),
        label,
        label_text: label.label(),
        prediction: label.prediction_value(),
    }))
}

/// `POST /api/recommend`: food recommendations for a session's profile.
pub async fn recommend(
    State(ctx): State<AppContext>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<FoodRecommendationResponse>, ApiError> {
    let session = find_session(&ctx, &request.session_id).await?;
    let category: FoodCategory = request.category.parse()?;

    let outcome = ctx.flow.select_category(&session, category).await?;
    if let Some(err) = outcome.error {
        return Err(err.into());
    }
    match outcome.state {
        ViewState::Recommended { response, .. } => Ok(Json(response)),
        other => Err(ApiError::Internal(format!(
            "recommendation finished in unexpected state {other:?}"
        ))),
    }
}

/// `GET /api/sessions/:id`: current view state of a session.
pub async fn session(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let session = find_session(&ctx, &id).await?;
    Ok(Json(session.snapshot().await))
}
