//! Web front end router.
//!
//! HTML pages live at the root; the JSON mirror of the prediction flow is
//! nested under `/api/`. Every response carries `Cache-Control: no-store`
//! since pages embed per-visitor state.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::AppContext;

/// Build the full application router.
pub fn app_router(ctx: AppContext) -> Router {
    let pages = Router::new()
        .route("/", get(endpoints::pages::home))
        .route("/fitur", get(endpoints::pages::features))
        .route("/statistik", get(endpoints::pages::statistics))
        .route("/testimonial", get(endpoints::pages::testimonials))
        .route("/faq", get(endpoints::pages::faq))
        .route(
            "/prediksi",
            get(endpoints::prediction::show).post(endpoints::prediction::submit),
        )
        .route(
            "/prediksi/kategori",
            post(endpoints::prediction::select_category),
        );

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/predict", post(endpoints::prediction::predict))
        .route("/recommend", post(endpoints::prediction::recommend))
        .route("/sessions/:id", get(endpoints::prediction::session));

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .merge(pages)
        .nest("/api", api)
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::backend::{BackendError, MockRiskBackend, RecordedCall};
    use crate::config::FrontendConfig;
    use crate::models::{FoodCategory, FoodRecommendation, FoodRecommendationResponse, HealthProfile};

    fn test_config() -> FrontendConfig {
        FrontendConfig {
            step_delay: Duration::ZERO,
            reveal_delay: Duration::ZERO,
            ..FrontendConfig::default()
        }
    }

    fn test_ctx(mock: MockRiskBackend) -> (AppContext, Arc<MockRiskBackend>) {
        let mock = Arc::new(mock);
        (AppContext::new(test_config(), mock.clone()), mock)
    }

    fn food_response() -> FoodRecommendationResponse {
        FoodRecommendationResponse {
            success: true,
            recommendations: Some(vec![
                FoodRecommendation {
                    name: "Apel".into(),
                    glycemic_index: 36,
                    ..Default::default()
                },
                FoodRecommendation {
                    name: "Pir".into(),
                    glycemic_index: 38,
                    ..Default::default()
                },
            ]),
            gi_strategy: Some("GI <= 35".into()),
            ..Default::default()
        }
    }

    fn expected_profile() -> HealthProfile {
        HealthProfile {
            age: 45.0,
            bmi: 33.6,
            glucose: 148.0,
            insulin: 85.0,
        }
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_req(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_req(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ── Static pages ────────────────────────────────────

    #[tokio::test]
    async fn static_pages_render() {
        let (ctx, _) = test_ctx(MockRiskBackend::new());
        for (uri, needle) in [
            ("/", "Kenali Risiko"),
            ("/fitur", "Rekomendasi Makanan Sehat"),
            ("/statistik", "Kondisi Diabetes Terkini di Indonesia"),
            ("/testimonial", "Zulfahmi Nafiis"),
            ("/faq", "Apa itu DiabCare?"),
            ("/prediksi", "Prediksi Sekarang"),
        ] {
            let response = app_router(ctx.clone()).oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");
            let html = body_text(response).await;
            assert!(html.contains(needle), "{uri} missing {needle}");
        }
    }

    #[tokio::test]
    async fn testimonial_offset_is_clamped() {
        let (ctx, _) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(get_req("/testimonial?mulai=99"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains(r#"href="/testimonial?mulai=2""#));
    }

    #[tokio::test]
    async fn testimonial_garbage_offset_starts_at_zero() {
        let (ctx, _) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(get_req("/testimonial?mulai=abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"href="/testimonial?mulai=1""#));
    }

    #[tokio::test]
    async fn faq_search_without_results() {
        let (ctx, _) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(get_req("/faq?q=zzzz"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Tidak ada hasil yang ditemukan"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (ctx, _) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx).oneshot(get_req("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── HTML prediction flow ────────────────────────────

    fn location(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    /// GET `uri` until the page stops polling.
    async fn settled_page(ctx: &AppContext, uri: &str) -> String {
        for _ in 0..500 {
            let response = app_router(ctx.clone()).oneshot(get_req(uri)).await.unwrap();
            let html = body_text(response).await;
            if !html.contains(r#"http-equiv="refresh""#) {
                return html;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("{uri} kept polling");
    }

    async fn submit_form(ctx: &AppContext, body: &str) -> String {
        let response = app_router(ctx.clone())
            .oneshot(form_req("/prediksi", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        location(&response)
    }

    #[tokio::test]
    async fn form_submit_then_category_select() {
        let (ctx, mock) = test_ctx(
            MockRiskBackend::new()
                .with_prediction(Ok(MockRiskBackend::prediction_body(1)))
                .with_recommendation(Ok(food_response())),
        );

        let page = submit_form(&ctx, "age=45&glucose=148&insulin=85&bmi=33.6").await;
        assert!(page.starts_with("/prediksi?sesi="));
        let html = settled_page(&ctx, &page).await;
        assert!(html.contains("Hasil Prediksi: Risiko Tinggi"));
        assert!(html.contains("Pilih Kategori Makanan"));
        let sesi = page.trim_start_matches("/prediksi?sesi=");

        let response = app_router(ctx.clone())
            .oneshot(form_req(
                "/prediksi/kategori",
                &format!("sesi={sesi}&category=Buah"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), page);

        let html = settled_page(&ctx, &page).await;
        assert!(html.find("#1 Apel").unwrap() < html.find("#2 Pir").unwrap());
        assert!(html.contains("IG 36 &middot; Rendah"));

        assert_eq!(
            mock.calls(),
            vec![
                RecordedCall::Predict(expected_profile()),
                RecordedCall::RecommendFood(FoodCategory::Fruit, expected_profile()),
            ]
        );
    }

    #[tokio::test]
    async fn submit_answers_at_once_and_page_shows_captions() {
        let mock = Arc::new(
            MockRiskBackend::new().with_prediction(Ok(MockRiskBackend::prediction_body(1))),
        );
        let config = FrontendConfig {
            step_delay: Duration::from_millis(300),
            reveal_delay: Duration::ZERO,
            ..FrontendConfig::default()
        };
        let ctx = AppContext::new(config, mock.clone());

        let started = std::time::Instant::now();
        let page = submit_form(&ctx, "age=45&glucose=148&insulin=85&bmi=33.6").await;
        assert!(started.elapsed() < Duration::from_millis(300));

        let response = app_router(ctx.clone()).oneshot(get_req(&page)).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains(crate::flow::PROCESSING_STEPS[0]));
        assert!(html.contains(r#"http-equiv="refresh""#));
        assert!(html.contains("}, 300);"));
        assert!(mock.calls().is_empty());

        let html = settled_page(&ctx, &page).await;
        assert!(html.contains("Hasil Prediksi: Risiko Tinggi"));
        assert_eq!(mock.calls(), vec![RecordedCall::Predict(expected_profile())]);
    }

    #[tokio::test]
    async fn slow_recommendation_shows_loading_banner() {
        let (ctx, _) = test_ctx(
            MockRiskBackend::new()
                .with_prediction(Ok(MockRiskBackend::prediction_body(0)))
                .with_delayed_recommendation(Duration::from_millis(300), Ok(food_response())),
        );
        let page = submit_form(&ctx, "age=30&glucose=90&insulin=10&bmi=22").await;
        settled_page(&ctx, &page).await;
        let sesi = page.trim_start_matches("/prediksi?sesi=");

        let response = app_router(ctx.clone())
            .oneshot(form_req(
                "/prediksi/kategori",
                &format!("sesi={sesi}&category=Sayur"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app_router(ctx.clone()).oneshot(get_req(&page)).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Memuat rekomendasi Sayur..."));
        assert!(html.contains(r#"http-equiv="refresh""#));

        let html = settled_page(&ctx, &page).await;
        assert!(html.contains("#1 Apel"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let (ctx, mock) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(form_req("/prediksi", "age=abc&glucose=148&insulin=85&bmi="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("harus berupa angka"));
        assert!(html.contains(r#"value="abc""#));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn backend_down_shows_error_banner() {
        let (ctx, _) = test_ctx(
            MockRiskBackend::new()
                .with_prediction(Err(BackendError::Connection("http://127.0.0.1:5000".into()))),
        );
        let page = submit_form(&ctx, "age=45&glucose=148&insulin=85&bmi=33.6").await;
        let html = settled_page(&ctx, &page).await;
        assert!(html.contains("Error: Failed to fetch data from API"));
        assert!(!html.contains("Pilih Kategori Makanan"));
        assert!(!html.contains("food-card"));
    }

    #[tokio::test]
    async fn category_without_session_is_404_page() {
        let (ctx, mock) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(form_req("/prediksi/kategori", "category=Buah"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("Sesi tidak ditemukan"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn category_before_prediction_is_400_page() {
        let (ctx, mock) = test_ctx(MockRiskBackend::new());
        let session = ctx.sessions.create().await;
        let response = app_router(ctx)
            .oneshot(form_req(
                "/prediksi/kategori",
                &format!("sesi={}&category=Buah", session.id()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = body_text(response).await;
        assert!(html.contains("Belum ada hasil prediksi"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn session_page_keeps_submitted_values() {
        let (ctx, _) = test_ctx(
            MockRiskBackend::new().with_prediction(Ok(MockRiskBackend::prediction_body(0))),
        );
        let page = submit_form(&ctx, "age=30&glucose=90&insulin=10&bmi=22").await;
        let html = settled_page(&ctx, &page).await;
        assert!(html.contains("Risiko Rendah"));
        assert!(html.contains(r#"value="22""#));
        assert!(html.contains(r#"name="sesi""#));
    }

    // ── JSON API ────────────────────────────────────────

    #[tokio::test]
    async fn api_health_reports_backend_reachability() {
        let (ctx, _) = test_ctx(MockRiskBackend::new().unhealthy());
        let response = app_router(ctx).oneshot(get_req("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["backend_reachable"], false);
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn api_predict_accepts_numbers_and_strings() {
        let (ctx, mock) = test_ctx(
            MockRiskBackend::new().with_prediction(Ok(MockRiskBackend::prediction_body(1))),
        );
        let response = app_router(ctx)
            .oneshot(json_req(
                "/api/predict",
                serde_json::json!({"age": "45", "bmi": 33.6, "glucose": 148, "insulin": "85"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["label"], "high");
        assert_eq!(json["label_text"], "Risiko Tinggi");
        assert_eq!(json["prediction"], 1);
        assert!(json["session_id"].as_str().is_some());
        assert_eq!(mock.calls(), vec![RecordedCall::Predict(expected_profile())]);
    }

    #[tokio::test]
    async fn api_predict_rejects_missing_field() {
        let (ctx, mock) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(json_req(
                "/api/predict",
                serde_json::json!({"age": 45, "bmi": 30, "glucose": 100}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn api_predict_backend_down_is_502() {
        let (ctx, _) = test_ctx(
            MockRiskBackend::new().with_prediction(Err(BackendError::Timeout(5))),
        );
        let response = app_router(ctx)
            .oneshot(json_req(
                "/api/predict",
                serde_json::json!({"age": 45, "bmi": 30, "glucose": 100, "insulin": 20}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn api_recommend_round_trip_and_session_snapshot() {
        let (ctx, _) = test_ctx(
            MockRiskBackend::new()
                .with_prediction(Ok(MockRiskBackend::prediction_body(0)))
                .with_recommendation(Ok(food_response())),
        );
        let response = app_router(ctx.clone())
            .oneshot(json_req(
                "/api/predict",
                serde_json::json!({"age": 45, "bmi": 33.6, "glucose": 148, "insulin": 85}),
            ))
            .await
            .unwrap();
        let session_id = body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app_router(ctx.clone())
            .oneshot(json_req(
                "/api/recommend",
                serde_json::json!({"session_id": session_id, "category": "Buah"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["recommendations"][0]["name"], "Apel");
        assert_eq!(json["gi_strategy"], "GI <= 35");

        let response = app_router(ctx)
            .oneshot(get_req(&format!("/api/sessions/{session_id}")))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["view"]["state"], "recommended");
        assert_eq!(json["view"]["category"], "Buah");
        assert_eq!(json["generation"], 2);
    }

    #[tokio::test]
    async fn api_recommend_unknown_category_is_400() {
        let (ctx, _) = test_ctx(
            MockRiskBackend::new().with_prediction(Ok(MockRiskBackend::prediction_body(0))),
        );
        let session = ctx.sessions.create().await;
        let response = app_router(ctx)
            .oneshot(json_req(
                "/api/recommend",
                serde_json::json!({"session_id": session.id().to_string(), "category": "Roti"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn api_recommend_before_prediction_is_400() {
        let (ctx, mock) = test_ctx(MockRiskBackend::new());
        let session = ctx.sessions.create().await;
        let response = app_router(ctx)
            .oneshot(json_req(
                "/api/recommend",
                serde_json::json!({"session_id": session.id().to_string(), "category": "Sayur"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn api_recommend_backend_404_passes_through() {
        let (ctx, _) = test_ctx(
            MockRiskBackend::new()
                .with_prediction(Ok(MockRiskBackend::prediction_body(1)))
                .with_recommendation(Err(BackendError::Application {
                    status: 404,
                    message: Some("No recommendations found for this category with current GI filtering".into()),
                })),
        );
        let response = app_router(ctx.clone())
            .oneshot(json_req(
                "/api/predict",
                serde_json::json!({"age": 45, "bmi": 33.6, "glucose": 148, "insulin": 85}),
            ))
            .await
            .unwrap();
        let session_id = body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app_router(ctx)
            .oneshot(json_req(
                "/api/recommend",
                serde_json::json!({"session_id": session_id, "category": "Protein Hewani"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("No recommendations found"));
    }

    #[tokio::test]
    async fn api_unknown_session_is_404() {
        let (ctx, _) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(get_req(&format!("/api/sessions/{}", uuid::Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_malformed_session_id_is_400() {
        let (ctx, _) = test_ctx(MockRiskBackend::new());
        let response = app_router(ctx)
            .oneshot(get_req("/api/sessions/not-a-uuid"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
