//! Static marketing pages.

use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

use crate::content::{Carousel, TESTIMONIALS};
use crate::pages;

pub async fn home() -> Html<String> {
    Html(pages::render_home())
}

pub async fn features() -> Html<String> {
    Html(pages::render_features())
}

pub async fn statistics() -> Html<String> {
    Html(pages::render_statistics())
}

#[derive(Debug, Default, Deserialize)]
pub struct TestimonialQuery {
    /// Carousel start offset. Unparseable values fall back to 0.
    pub mulai: Option<String>,
}

pub async fn testimonials(Query(query): Query<TestimonialQuery>) -> Html<String> {
    let start = query
        .mulai
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let carousel = Carousel::new(TESTIMONIALS.len(), Carousel::DEFAULT_WINDOW, start);
    Html(pages::render_testimonials(carousel))
}

#[derive(Debug, Default, Deserialize)]
pub struct FaqQuery {
    pub q: Option<String>,
}

pub async fn faq(Query(query): Query<FaqQuery>) -> Html<String> {
    Html(pages::render_faq(query.q.as_deref().unwrap_or("")))
}
