//! Shared page chrome: head, navigation header and footer.

use crate::config::APP_NAME;

/// Top-level pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Features,
    Statistics,
    Testimonials,
    Faq,
    Prediction,
}

impl Page {
    pub const NAV: [Page; 5] = [
        Page::Home,
        Page::Features,
        Page::Statistics,
        Page::Testimonials,
        Page::Faq,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Features => "/fitur",
            Page::Statistics => "/statistik",
            Page::Testimonials => "/testimonial",
            Page::Faq => "/faq",
            Page::Prediction => "/prediksi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Beranda",
            Page::Features => "Fitur",
            Page::Statistics => "Statistik",
            Page::Testimonials => "Testimonial",
            Page::Faq => "FAQ",
            Page::Prediction => "Prediksi Diabetes",
        }
    }
}

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap `body` in the shared document shell.
///
/// `head_extra` is trusted markup (e.g. a refresh meta tag); `title` is escaped.
pub fn render_document(title: &str, active: Page, head_extra: &str, body: &str) -> String {
    let nav = Page::NAV
        .iter()
        .map(|page| {
            let class = if *page == active { " class=\"active\"" } else { "" };
            format!(
                r#"<a href="{path}"{class}>{label}</a>"#,
                path = page.path(),
                label = page.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r##"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app}</title>
{head_extra}
<style>
*,*::before,*::after{{box-sizing:border-box}}
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:linear-gradient(135deg,#f0fdf4,#eff6ff,#faf5ff);color:#1f2937;min-height:100vh}}
a{{color:inherit}}
header{{position:sticky;top:0;background:rgba(255,255,255,.9);border-bottom:1px solid #e5e7eb;z-index:10}}
.bar{{max-width:1100px;margin:0 auto;padding:14px 20px;display:flex;align-items:center;justify-content:space-between;gap:16px;flex-wrap:wrap}}
.brand{{font-weight:700;font-size:1.4rem;text-decoration:none;background:linear-gradient(90deg,#16a34a,#2563eb);-webkit-background-clip:text;color:transparent}}
nav a{{margin:0 10px;text-decoration:none;color:#4b5563;font-weight:500}}
nav a.active{{color:#16a34a;border-bottom:2px solid #16a34a}}
.btn{{display:inline-block;padding:12px 22px;border:none;border-radius:12px;background:linear-gradient(90deg,#16a34a,#2563eb);color:#fff;font-weight:600;font-size:1rem;text-decoration:none;cursor:pointer}}
.btn-outline{{background:#fff;color:#16a34a;border:2px solid #16a34a}}
.btn[disabled]{{opacity:.6;cursor:wait}}
main{{max-width:1100px;margin:0 auto;padding:40px 20px}}
h1{{font-size:2.4rem;margin:0 0 12px;text-align:center}}
h2{{font-size:1.8rem;margin:40px 0 12px;text-align:center}}
.lead{{color:#4b5563;font-size:1.1rem;text-align:center;max-width:720px;margin:0 auto 32px;line-height:1.6}}
.grid{{display:grid;grid-template-columns:repeat(auto-fit,minmax(260px,1fr));gap:20px}}
.card{{background:#fff;border:1px solid #f3f4f6;border-radius:16px;box-shadow:0 4px 20px rgba(0,0,0,.06);padding:24px}}
.stat-value{{font-size:2.6rem;font-weight:700}}
.muted{{color:#6b7280}}
.banner{{border-radius:12px;padding:16px;margin:16px 0}}
.banner-error{{background:#fef2f2;border:1px solid #fecaca;color:#991b1b}}
.banner-info{{background:#eff6ff;border:1px solid #bfdbfe;color:#1e40af}}
.gi-very-low{{background:#dcfce7;color:#166534}}
.gi-low{{background:#dbeafe;color:#1e40af}}
.gi-medium{{background:#fef9c3;color:#854d0e}}
.gi-high{{background:#fee2e2;color:#991b1b}}
.pill{{display:inline-block;padding:4px 10px;border-radius:999px;font-size:.8rem;font-weight:600}}
.reveal{{animation:diabcare-reveal .5s ease both}}
@keyframes diabcare-reveal{{from{{opacity:0;visibility:hidden}}to{{opacity:1;visibility:visible}}}}
footer{{background:#111827;color:#9ca3af;margin-top:60px}}
footer .cols{{max-width:1100px;margin:0 auto;padding:40px 20px;display:grid;grid-template-columns:repeat(auto-fit,minmax(200px,1fr));gap:24px}}
footer h4{{color:#fff;margin:0 0 12px}}
footer a{{display:block;text-decoration:none;margin:6px 0}}
footer .legal{{border-top:1px solid #1f2937;text-align:center;padding:16px;font-size:.85rem}}
</style>
</head>
<body>
<header>
  <div class="bar">
    <a href="/" class="brand">{app}</a>
    <nav>
      {nav}
    </nav>
    <a href="/prediksi" class="btn">Mulai Prediksi</a>
  </div>
</header>
<main>
{body}
</main>
<footer>
  <div class="cols">
    <div>
      <h4>{app}</h4>
      <p>Aplikasi prediksi risiko diabetes yang dikembangkan oleh mahasiswa Sains Data Terapan PENS.</p>
    </div>
    <div>
      <h4>Navigasi</h4>
      {footer_nav}
    </div>
    <div>
      <h4>Fitur</h4>
      <a href="/prediksi">Prediksi Diabetes</a>
      <a href="/fitur">Pemantauan Kesehatan</a>
      <a href="/fitur">Analisis Glukosa</a>
      <a href="/fitur">Evaluasi BMI</a>
      <a href="/fitur">Rekomendasi Makanan Sehat</a>
    </div>
    <div>
      <h4>Kontak</h4>
      <p>diabcare@gmail.com</p>
      <p>085806940713</p>
      <p>PENS, Surabaya, Indonesia</p>
    </div>
  </div>
  <div class="legal">&copy; 2025 {app} - Aplikasi Prediksi Diabetes &middot; Dikembangkan oleh Mahasiswa Sains Data Terapan PENS</div>
</footer>
</body>
</html>"##,
        title = escape_html(title),
        app = APP_NAME,
        head_extra = head_extra,
        nav = nav,
        body = body,
        footer_nav = Page::NAV
            .iter()
            .map(|p| format!(r#"<a href="{}">{}</a>"#, p.path(), p.label()))
            .collect::<Vec<_>>()
            .join("\n      "),
    )
}
