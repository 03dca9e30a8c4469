use super::layout::{escape_html, render_document, Page};
use crate::content::{filter_faqs, FAQS};

/// FAQ page filtered by `term`.
pub fn render_faq(term: &str) -> String {
    let matches = filter_faqs(&FAQS, term);

    let list = if matches.is_empty() {
        r#"<div class="card" style="text-align:center">
  <h3>Tidak ada hasil yang ditemukan</h3>
  <p class="muted">Coba kata kunci lain atau hubungi kami untuk pertanyaan lebih lanjut.</p>
</div>"#
            .to_string()
    } else {
        matches
            .iter()
            .map(|faq| {
                format!(
                    r#"<details class="card" style="margin-bottom:12px">
  <summary style="font-weight:600;cursor:pointer">{question} <span class="pill gi-low">{category}</span></summary>
  <p style="line-height:1.7">{answer}</p>
</details>"#,
                    question = escape_html(faq.question),
                    category = faq.category.as_str(),
                    answer = escape_html(faq.answer),
                )
            })
            .collect()
    };

    let body = format!(
        r#"<h1>Pertanyaan yang <span style="color:#16a34a">Sering Diajukan</span></h1>
<p class="lead">Temukan jawaban untuk pertanyaan umum tentang DiabCare dan diabetes.</p>
<form method="get" action="/faq" style="max-width:640px;margin:0 auto 24px;display:flex;gap:8px">
  <input type="search" name="q" value="{term}" placeholder="Cari pertanyaan..." style="flex:1;padding:12px;border:1px solid #d1d5db;border-radius:12px">
  <button type="submit" class="btn">Cari</button>
</form>
<div style="max-width:800px;margin:0 auto">{list}</div>"#,
        term = escape_html(term),
    );
    render_document("FAQ", Page::Faq, "", &body)
}
