//! Features and statistics pages.

use super::layout::{escape_html, render_document, Page};
use crate::content::{Feature, Statistic, FEATURES, INDONESIA_CONTEXT, STATISTICS};

pub(crate) fn feature_card(feature: &Feature) -> String {
    format!(
        r#"<div class="card" style="border-top:4px solid {accent}">
  <div style="font-size:2rem">{icon}</div>
  <h3>{title}</h3>
  <p class="muted">{description}</p>
</div>"#,
        accent = feature.accent,
        icon = feature.icon,
        title = escape_html(feature.title),
        description = escape_html(feature.description),
    )
}

pub(crate) fn statistic_card(stat: &Statistic) -> String {
    format!(
        r#"<div class="card" style="text-align:center">
  <div class="stat-value">{value}</div>
  <div style="font-weight:600">{unit}</div>
  <p class="muted">{description}</p>
</div>"#,
        value = escape_html(stat.value),
        unit = escape_html(stat.unit),
        description = escape_html(stat.description),
    )
}

pub fn render_features() -> String {
    let cards: String = FEATURES.iter().map(feature_card).collect();
    let body = format!(
        r#"<h1>Kenapa Menggunakan <span style="color:#16a34a">DiabCare</span>?</h1>
<p class="lead">DiabCare menawarkan berbagai fitur untuk membantu Anda memahami dan mengelola risiko diabetes dengan lebih baik.</p>
<div class="grid">{cards}</div>
<p style="text-align:center;margin-top:32px"><a href="/prediksi" class="btn">Coba Prediksi Sekarang</a></p>"#
    );
    render_document("Fitur", Page::Features, "", &body)
}

pub fn render_statistics() -> String {
    let cards: String = STATISTICS.iter().map(statistic_card).collect();
    let context: String = INDONESIA_CONTEXT
        .iter()
        .map(|p| format!("<p style=\"line-height:1.7\">{}</p>", escape_html(p)))
        .collect();
    let body = format!(
        r#"<h1>Fakta Tentang <span style="color:#16a34a">Diabetes</span></h1>
<p class="lead">Diabetes adalah masalah kesehatan global yang memengaruhi jutaan orang. Kenali faktanya sekarang.</p>
<div class="grid">{cards}</div>
<h2>Kondisi Diabetes Terkini di Indonesia</h2>
<div class="card">{context}</div>"#
    );
    render_document("Statistik", Page::Statistics, "", &body)
}
