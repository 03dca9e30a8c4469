use super::layout::{escape_html, render_document, Page};
use crate::content::{Carousel, Testimonial, TESTIMONIALS};

fn stars(rating: u8) -> String {
    let filled = rating.min(Testimonial::MAX_RATING) as usize;
    let empty = Testimonial::MAX_RATING as usize - filled;
    format!(
        r#"<span style="color:#f59e0b" aria-label="{filled} dari {max}">{}{}</span>"#,
        "★".repeat(filled),
        "☆".repeat(empty),
        max = Testimonial::MAX_RATING,
    )
}

fn testimonial_card(t: &Testimonial) -> String {
    format!(
        r#"<div class="card">
  <div style="display:flex;align-items:center;gap:12px">
    <div style="width:48px;height:48px;border-radius:50%;background:{accent};color:#fff;display:flex;align-items:center;justify-content:center;font-weight:700">{initial}</div>
    <div><strong>{name}</strong><br><span class="muted">{role}</span></div>
  </div>
  <p style="line-height:1.6">&ldquo;{content}&rdquo;</p>
  {stars}
</div>"#,
        accent = t.accent,
        initial = escape_html(&t.initial().to_string()),
        name = escape_html(t.name),
        role = escape_html(t.role),
        content = escape_html(t.content),
        stars = stars(t.rating),
    )
}

fn carousel_link(target: Carousel, enabled: bool, text: &str) -> String {
    if enabled {
        format!(
            r#"<a href="/testimonial?mulai={}" class="btn btn-outline">{text}</a>"#,
            target.start()
        )
    } else {
        format!(r#"<span class="btn btn-outline" style="opacity:.4">{text}</span>"#)
    }
}

/// Testimonial page with the carousel window at `carousel`.
pub fn render_testimonials(carousel: Carousel) -> String {
    let window: String = TESTIMONIALS[carousel.visible()]
        .iter()
        .map(testimonial_card)
        .collect();
    let all: String = TESTIMONIALS.iter().map(testimonial_card).collect();

    let body = format!(
        r#"<h1>Apa Kata <span style="color:#16a34a">Pengguna Kami</span></h1>
<p class="lead">Ketahui pengalaman pengguna DiabCare dalam mengelola risiko diabetes mereka.</p>
<div style="display:flex;justify-content:space-between;margin-bottom:16px">
  {prev}
  {next}
</div>
<div class="grid" id="carousel">{window}</div>
<h2>Semua Testimonial</h2>
<div class="grid">{all}</div>"#,
        prev = carousel_link(carousel.prev(), carousel.has_prev(), "&larr; Sebelumnya"),
        next = carousel_link(carousel.next(), carousel.has_next(), "Berikutnya &rarr;"),
    );
    render_document("Testimonial", Page::Testimonials, "", &body)
}
