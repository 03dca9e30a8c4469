use super::info::{feature_card, statistic_card};
use super::layout::{render_document, Page};
use crate::content::{featured, headline_statistics};

pub fn render_home() -> String {
    let stats: String = headline_statistics().iter().map(statistic_card).collect();
    let features: String = featured().iter().map(feature_card).collect();

    let body = format!(
        r##"<section style="text-align:center;padding:40px 0">
  <p class="pill gi-very-low">📈 Platform Prediksi Diabetes Terdepan</p>
  <h1>Kenali Risiko <span style="color:#16a34a">Diabetes</span> Anda Sekarang</h1>
  <p class="lead">DiabCare membantu Anda memantau dan mengelola faktor risiko diabetes dengan cara yang mudah dan efektif. Dapatkan penilaian risiko diabetes yang akurat berdasarkan data kesehatan pribadi Anda.</p>
  <a href="/prediksi" class="btn">Mulai Prediksi &rarr;</a>
  <a href="/fitur" class="btn btn-outline">Pelajari Lebih Lanjut</a>
</section>

<section>
  <h2>Diabetes dalam Angka</h2>
  <p class="lead">Diabetes adalah masalah kesehatan global yang memengaruhi jutaan orang. Kenali faktanya sekarang.</p>
  <div class="grid">{stats}</div>
</section>

<section>
  <h2>Kenapa Menggunakan DiabCare?</h2>
  <p class="lead">DiabCare menawarkan berbagai fitur untuk membantu Anda memahami dan mengelola risiko diabetes dengan lebih baik.</p>
  <div class="grid">{features}</div>
  <p style="text-align:center;margin-top:24px"><a href="/fitur" class="btn btn-outline">Lihat Semua Fitur &rarr;</a></p>
</section>

<section class="card" style="margin-top:48px;background:linear-gradient(90deg,#16a34a,#2563eb);color:#fff">
  <h3 style="font-size:1.6rem;margin:0 0 8px">Mulai Prediksi Diabetes Anda Sekarang</h3>
  <p>DiabCare dapat membantu Anda mengetahui risiko diabetes Anda dengan mudah melalui informasi kesehatan Anda.</p>
  <a href="/prediksi" class="btn btn-outline">Mulai Prediksi &rarr;</a>
</section>"##
    );

    render_document("Beranda", Page::Home, "", &body)
}
