//! The interactive prediction page: form, result card, category picker and
//! food recommendation cards.

use std::time::Duration;

use uuid::Uuid;

use super::layout::{escape_html, render_document, Page};
use crate::flow::ViewState;
use crate::models::food::{fat_note, fiber_note, sugar_note};
use crate::models::{
    FoodCategory, FoodRecommendation, FoodRecommendationResponse, GiBucket, HealthForm,
    ProfileError, ProfileField, RiskLabel,
};

pub const DISCLAIMER: &str = "Hasil prediksi dan rekomendasi makanan ini hanya bersifat indikatif \
dan tidak menggantikan diagnosis medis profesional. Selalu konsultasikan dengan dokter atau ahli \
gizi untuk saran medis yang tepat.";

/// Everything the prediction page needs to render.
pub struct PredictionView<'a> {
    pub session_id: Option<Uuid>,
    pub form: &'a HealthForm,
    pub form_error: Option<&'a ProfileError>,
    /// Request-level problem unrelated to the backend (unknown session,
    /// unknown category, no prediction yet).
    pub notice: Option<&'a str>,
    pub state: &'a ViewState,
    pub backend_url: &'a str,
    pub reveal_delay: Duration,
    /// Reload interval while the session is busy.
    pub poll_interval: Duration,
}

/// Fastest a busy page reloads itself.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Reload once per caption step so every caption is seen.
pub fn poll_interval(step_delay: Duration) -> Duration {
    step_delay.max(MIN_POLL_INTERVAL)
}

pub fn render_prediction(view: &PredictionView<'_>) -> String {
    let session_field = session_input(view.session_id);

    // Poll while the session's request runs in the background. Meta refresh
    // only takes whole seconds, so the script keeps caption pace.
    let head_extra = match (view.state.is_busy(), view.session_id) {
        (true, Some(id)) => {
            let url = format!("/prediksi?sesi={id}");
            let secs = view.poll_interval.as_secs_f64().ceil().max(1.0) as u64;
            format!(
                r#"<meta http-equiv="refresh" content="{secs};url={url}">
<script>setTimeout(function(){{location.replace('{url}');}}, {millis});</script>"#,
                millis = view.poll_interval.as_millis(),
            )
        }
        _ => String::new(),
    };

    let mut sections = vec![form_section(view, &session_field)];

    if let Some(notice) = view.notice {
        sections.push(format!(
            r#"<div class="banner banner-error" role="alert">{}</div>"#,
            escape_html(notice)
        ));
    }

    if let Some(message) = view.state.error_message() {
        sections.push(error_banner(message, view.backend_url));
    }

    if let Some(label) = view.state.label() {
        sections.push(result_card(label));
        sections.push(category_picker(view, label, &session_field));
    }

    match view.state {
        ViewState::LoadingFood { category, .. } => sections.push(format!(
            r#"<div class="banner banner-info">Memuat rekomendasi {}...</div>"#,
            escape_html(category.id())
        )),
        ViewState::Recommended {
            label,
            category,
            response,
        } => sections.push(recommendations_section(*label, *category, response)),
        _ => {}
    }

    if view.state.label().is_some() {
        sections.push(format!(
            r#"<div class="banner banner-info"><strong>Disclaimer:</strong> {}</div>"#,
            escape_html(DISCLAIMER)
        ));
    }

    let body = format!(
        r#"<h1>Prediksi Risiko <span style="color:#16a34a">Diabetes</span></h1>
<p class="lead">Masukkan data kesehatan Anda untuk mendapatkan prediksi risiko diabetes dan rekomendasi makanan sehat</p>
{}"#,
        sections.join("\n")
    );
    render_document("Prediksi", Page::Prediction, &head_extra, &body)
}

fn session_input(session_id: Option<Uuid>) -> String {
    session_id
        .map(|id| format!(r#"<input type="hidden" name="sesi" value="{id}">"#))
        .unwrap_or_default()
}

fn form_section(view: &PredictionView<'_>, session_field: &str) -> String {
    let inputs: String = ProfileField::ALL
        .iter()
        .map(|field| {
            let error = match view.form_error {
                Some(err) if err.field() == *field => format!(
                    r#"<p style="color:#b91c1c;margin:4px 0 0;font-size:.85rem">{}</p>"#,
                    escape_html(&err.to_string())
                ),
                _ => String::new(),
            };
            format!(
                r#"<label style="display:block">
  <span style="font-weight:600">{label}</span>
  <input type="text" inputmode="decimal" required name="{name}" value="{value}" placeholder="{placeholder}" style="width:100%;padding:12px;margin-top:6px;border:1px solid #d1d5db;border-radius:12px">
  {error}
</label>"#,
                label = escape_html(field.label()),
                name = field.as_str(),
                value = escape_html(view.form.value(*field)),
                placeholder = escape_html(field.placeholder()),
            )
        })
        .collect();

    let button = match view.state.caption() {
        Some(caption) => format!(r#"<button type="submit" class="btn" disabled>{caption}</button>"#),
        None => r#"<button type="submit" class="btn">Prediksi Sekarang</button>"#.to_string(),
    };

    format!(
        r#"<form method="post" action="/prediksi" class="card">
  {session_field}
  <div class="grid">{inputs}</div>
  <p style="text-align:center;margin-top:20px">{button}</p>
</form>"#
    )
}

fn error_banner(message: &str, backend_url: &str) -> String {
    format!(
        r#"<div class="banner banner-error" role="alert">
  <strong>{message}</strong>
  <p style="margin:6px 0 0">Pastikan backend Flask berjalan di {url} dan dapat diakses.</p>
</div>"#,
        message = escape_html(message),
        url = escape_html(backend_url),
    )
}

fn result_card(label: RiskLabel) -> String {
    let (color, background) = if label.is_high() {
        ("#b91c1c", "#fef2f2")
    } else {
        ("#15803d", "#f0fdf4")
    };
    format!(
        r#"<section class="card" style="margin-top:24px;background:{background};border-color:{color}">
  <h2 style="margin-top:0;color:{color}">Hasil Prediksi: {label}</h2>
  <p style="line-height:1.7">{explanation}</p>
</section>"#,
        label = label.label(),
        explanation = escape_html(label.explanation()),
    )
}

fn category_picker(view: &PredictionView<'_>, label: RiskLabel, session_field: &str) -> String {
    let selected = view.state.category();
    let disabled = if view.state.is_busy() { " disabled" } else { "" };
    let buttons: String = FoodCategory::ALL
        .iter()
        .map(|category| {
            let border = if Some(*category) == selected { "4px" } else { "1px" };
            format!(
                r#"<button type="submit" name="category" value="{id}" class="card"{disabled} style="cursor:pointer;text-align:left;border:{border} solid {accent}">
  <strong style="color:{accent}">{id}</strong><br><span class="muted">{description}</span>
</button>"#,
                id = escape_html(category.id()),
                accent = category.accent(),
                description = escape_html(category.description()),
            )
        })
        .collect();

    // Hold the picker back for the reveal delay after a fresh prediction
    let reveal_style = if view.state.categories_visible() {
        String::new()
    } else {
        format!(
            r#" style="animation-delay:{}ms""#,
            view.reveal_delay.as_millis()
        )
    };

    format!(
        r#"<section class="reveal" id="kategori"{reveal_style}>
  <h2>Pilih Kategori Makanan</h2>
  <p class="lead">{strategy}</p>
  <form method="post" action="/prediksi/kategori">
    {session_field}
    <div class="grid">{buttons}</div>
  </form>
</section>"#,
        strategy = escape_html(label.food_strategy()),
    )
}

fn recommendations_section(
    label: RiskLabel,
    category: FoodCategory,
    response: &FoodRecommendationResponse,
) -> String {
    let items = response.items();
    let cards = if items.is_empty() {
        r#"<p class="muted" style="text-align:center">Tidak ada rekomendasi untuk kategori ini.</p>"#
            .to_string()
    } else {
        let cards: String = items
            .iter()
            .enumerate()
            .map(|(rank, item)| food_card(rank + 1, item))
            .collect();
        format!(r#"<div class="grid">{cards}</div>"#)
    };

    let strategy = response
        .gi_strategy
        .as_deref()
        .map(|s| format!(r#"<p class="muted" style="text-align:center">Strategi IG: {}</p>"#, escape_html(s)))
        .unwrap_or_default();

    let tips: String = label
        .consumption_tips()
        .iter()
        .map(|tip| format!("<li>{}</li>", escape_html(tip)))
        .collect();

    let legend: String = [
        GiBucket::VeryLow,
        GiBucket::Low,
        GiBucket::Medium,
        GiBucket::High,
    ]
    .iter()
    .map(|bucket| {
        format!(
            r#"<span class="pill {class}">{icon} {label}: {description}</span> "#,
            class = bucket.css_class(),
            icon = bucket.icon(),
            label = bucket.label(),
            description = bucket.description(),
        )
    })
    .collect();

    format!(
        r#"<section id="rekomendasi">
  <h2>Rekomendasi {category}</h2>
  {strategy}
  <p style="text-align:center">{legend}</p>
  {cards}
  <div class="card" style="margin-top:24px">
    <h3 style="margin-top:0">Tips Konsumsi ({label})</h3>
    <ul>{tips}</ul>
  </div>
</section>"#,
        category = escape_html(category.id()),
        label = label.label(),
    )
}

fn food_card(rank: usize, item: &FoodRecommendation) -> String {
    let bucket = item.gi_bucket();
    let reason = if item.recommendation_reason.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="muted" style="font-size:.85rem">{}</p>"#,
            escape_html(&item.recommendation_reason)
        )
    };

    format!(
        r##"<div class="card food-card">
  <div style="display:flex;justify-content:space-between;align-items:center">
    <h3 style="margin:0">#{rank} {name}</h3>
    <span class="pill {class}">{icon} IG {gi} &middot; {bucket_label}</span>
  </div>
  <p class="muted" style="margin:6px 0">{bucket_description}</p>
  <table style="width:100%;font-size:.9rem">
    <tr><td>Kalori</td><td>{calories:.0} kkal</td><td>Karbohidrat</td><td>{carbs:.1} g</td></tr>
    <tr><td>Protein</td><td>{protein:.1} g</td><td>Lemak</td><td>{fat:.1} g</td></tr>
    <tr><td>Serat</td><td>{fiber:.1} g</td><td>Gula</td><td>{sugar:.1} g</td></tr>
    <tr><td>Natrium</td><td>{sodium:.0} mg</td><td>Rating</td><td>{rating:.1}</td></tr>
  </table>
  <p style="font-size:.85rem">{fiber_note} &middot; {fat_note} &middot; {sugar_note}</p>
  {reason}
</div>"##,
        name = escape_html(&item.name),
        class = bucket.css_class(),
        icon = bucket.icon(),
        gi = item.glycemic_index,
        bucket_label = bucket.label(),
        bucket_description = bucket.description(),
        calories = item.calories,
        carbs = item.carbohydrates,
        protein = item.protein,
        fat = item.fat,
        fiber = item.fiber,
        sugar = item.sugar_content,
        sodium = item.sodium_content,
        rating = item.rating,
        fiber_note = fiber_note(item.fiber),
        fat_note = fat_note(item.fat),
        sugar_note = sugar_note(item.sugar_content),
    )
}
