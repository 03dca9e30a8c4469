//! Static marketing content: features, statistics, testimonials and FAQ.
//!
//! The copy is product text, kept in Indonesian. The only logic here is the
//! FAQ search and the testimonial carousel paging.

use std::ops::Range;

// ═══════════════════════════════════════════════════════════
// Features
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "Deteksi Dini",
        description: "Identifikasi risiko diabetes sejak dini dengan prediksi berbasis machine learning yang akurat.",
        icon: "📈",
        accent: "#16a34a",
    },
    Feature {
        title: "Pemantauan Kesehatan",
        description: "Pantau faktor kesehatan utama yang mempengaruhi risiko diabetes Anda.",
        icon: "❤️",
        accent: "#2563eb",
    },
    Feature {
        title: "Penilaian Risiko",
        description: "Dapatkan penilaian risiko diabetes berdasarkan data kesehatan Anda secara real-time.",
        icon: "⚠️",
        accent: "#9333ea",
    },
    Feature {
        title: "Analisis Glukosa",
        description: "Pahami bagaimana kadar glukosa memengaruhi risiko diabetes Anda.",
        icon: "🩸",
        accent: "#d97706",
    },
    Feature {
        title: "Evaluasi BMI",
        description: "Ketahui bagaimana BMI Anda berkontribusi terhadap risiko diabetes.",
        icon: "⚖️",
        accent: "#0891b2",
    },
    Feature {
        title: "Rekomendasi Makanan Sehat",
        description: "Dapatkan rekomendasi makanan sehat yang sesuai untuk penderita diabetes guna membantu menjaga kadar gula darah agar tetap stabil.",
        icon: "🍎",
        accent: "#059669",
    },
];

/// The three features teased on the home page.
pub fn featured() -> &'static [Feature] {
    &FEATURES[..3]
}

// ═══════════════════════════════════════════════════════════
// Statistics
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct Statistic {
    pub value: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
}

pub const STATISTICS: [Statistic; 6] = [
    Statistic {
        value: "589",
        unit: "Juta",
        description: "Penderita diabetes di seluruh dunia",
    },
    Statistic {
        value: "10,6%",
        unit: "Populasi",
        description: "Populasi penderita diabetes di Indonesia",
    },
    Statistic {
        value: "50%",
        unit: "Kasus",
        description: "Tidak terdiagnosis dengan baik",
    },
    Statistic {
        value: "6.3%",
        unit: "Kematian",
        description: "Disebabkan oleh diabetes",
    },
    Statistic {
        value: "2x",
        unit: "Risiko",
        description: "Penyakit jantung pada penderita diabetes",
    },
    Statistic {
        value: "25%",
        unit: "Pasien",
        description: "Mengalami komplikasi mata",
    },
];

pub fn headline_statistics() -> &'static [Statistic] {
    &STATISTICS[..3]
}

/// Narrative shown under the statistics grid.
pub const INDONESIA_CONTEXT: [&str; 3] = [
    "Populasi diabetes di Indonesia terus mengalami peningkatan dari tahun ke tahun. Berdasarkan data dari Kementerian Kesehatan melalui Riset Kesehatan Dasar (Riskesdas), prevalensi diabetes pada penduduk usia 15 tahun ke atas tercatat sebesar 5,7% pada tahun 2007 dan meningkat menjadi sekitar 10,9% pada tahun 2018. Sementara itu, data terbaru dari International Diabetes Federation (IDF) menunjukkan bahwa pada tahun 2025 jumlah penderita diabetes di Indonesia diperkirakan mencapai lebih dari 20 juta orang.",
    "Peningkatan ini dipengaruhi oleh berbagai faktor, seperti perubahan pola hidup masyarakat yang semakin tidak aktif secara fisik, konsumsi makanan tinggi gula dan lemak, serta meningkatnya kasus obesitas terutama di usia produktif. Kurangnya kesadaran akan pentingnya deteksi dini dan pengelolaan gaya hidup sehat juga turut memperburuk situasi.",
    "DiabCare hadir untuk membantu Anda mengenali risiko diabetes sejak dini, sehingga Anda dapat mengambil langkah-langkah pencegahan yang diperlukan.",
];

// ═══════════════════════════════════════════════════════════
// Testimonials
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub content: &'static str,
    pub rating: u8,
    pub accent: &'static str,
}

impl Testimonial {
    pub const MAX_RATING: u8 = 5;

    /// Avatar initial.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

pub const TESTIMONIALS: [Testimonial; 6] = [
    Testimonial {
        name: "Zulfahmi Nafiis",
        role: "Pengguna DiabCare",
        content: "DiabCare membantu saya memahami risiko diabetes yang saya miliki. Sekarang saya lebih sadar akan pentingnya menjaga pola makan dan olahraga teratur.",
        rating: 5,
        accent: "#16a34a",
    },
    Testimonial {
        name: "Siti Rahayu",
        role: "Dokter Umum",
        content: "Sebagai dokter, saya merekomendasikan DiabCare kepada pasien saya untuk pemantauan awal. Aplikasi ini memberikan informasi yang akurat dan mudah dipahami.",
        rating: 5,
        accent: "#2563eb",
    },
    Testimonial {
        name: "Ahmad Hidayat",
        role: "Ahli Gizi",
        content: "DiabCare adalah alat yang sangat berguna untuk edukasi masyarakat tentang faktor risiko diabetes. Antarmuka yang intuitif membuatnya mudah digunakan oleh siapa saja.",
        rating: 4,
        accent: "#9333ea",
    },
    Testimonial {
        name: "Dewi Lestari",
        role: "Pengguna DiabCare",
        content: "Saya menggunakan DiabCare untuk memantau risiko diabetes saya setelah dokter mengatakan bahwa saya pre-diabetes. Aplikasi ini sangat membantu saya mengubah gaya hidup.",
        rating: 5,
        accent: "#d97706",
    },
    Testimonial {
        name: "Rudi Hartono",
        role: "Penderita Diabetes",
        content: "Sebagai penderita diabetes tipe 2, DiabCare membantu saya memahami kondisi saya dengan lebih baik. Saya jadi lebih disiplin dalam mengelola kesehatan saya.",
        rating: 5,
        accent: "#0891b2",
    },
    Testimonial {
        name: "Rina Wijaya",
        role: "Perawat",
        content: "DiabCare adalah alat edukasi yang bagus untuk pasien kami. Tampilan yang sederhana dan informatif memudahkan pasien memahami risiko diabetes mereka.",
        rating: 4,
        accent: "#e11d48",
    },
];

/// Carousel window over a list, moved one item at a time.
///
/// The start offset is always clamped so the window never runs past
/// either end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    start: usize,
    window: usize,
    len: usize,
}

impl Carousel {
    pub const DEFAULT_WINDOW: usize = 3;

    pub fn new(len: usize, window: usize, start: usize) -> Self {
        let window = window.max(1);
        let max_start = len.saturating_sub(window);
        Self {
            start: start.min(max_start),
            window,
            len,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Index range currently visible.
    pub fn visible(&self) -> Range<usize> {
        self.start..(self.start + self.window).min(self.len)
    }

    pub fn has_prev(&self) -> bool {
        self.start > 0
    }

    pub fn has_next(&self) -> bool {
        self.start + self.window < self.len
    }

    pub fn next(&self) -> Self {
        Self::new(self.len, self.window, self.start + 1)
    }

    pub fn prev(&self) -> Self {
        Self::new(self.len, self.window, self.start.saturating_sub(1))
    }
}

// ═══════════════════════════════════════════════════════════
// FAQ
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqCategory {
    Umum,
    Penggunaan,
    Akurasi,
    Kesehatan,
}

impl FaqCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FaqCategory::Umum => "umum",
            FaqCategory::Penggunaan => "penggunaan",
            FaqCategory::Akurasi => "akurasi",
            FaqCategory::Kesehatan => "kesehatan",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
    pub category: FaqCategory,
}

pub const FAQS: [Faq; 8] = [
    Faq {
        question: "Apa itu DiabCare?",
        answer: "DiabCare adalah website prediksi risiko diabetes yang dikembangkan oleh mahasiswa Sains Data Terapan PENS. Website ini membantu Anda menilai risiko diabetes berdasarkan beberapa parameter kesehatan seperti usia, kadar glukosa, insulin, dan BMI.",
        category: FaqCategory::Umum,
    },
    Faq {
        question: "Bagaimana cara menggunakan DiabCare?",
        answer: "Cukup masukkan data kesehatan Anda seperti usia, kadar glukosa, insulin, dan BMI pada halaman Prediksi. Sistem akan menganalisis data tersebut dan memberikan penilaian risiko diabetes Anda.",
        category: FaqCategory::Penggunaan,
    },
    Faq {
        question: "Apakah hasil prediksi DiabCare akurat?",
        answer: "DiabCare menggunakan model machine learning yang dilatih dengan dataset diabetes. Meskipun demikian, hasil prediksi hanya bersifat indikatif dan tidak menggantikan diagnosis medis profesional. Selalu konsultasikan dengan dokter untuk diagnosis yang tepat.",
        category: FaqCategory::Akurasi,
    },
    Faq {
        question: "Bagaimana cara mengetahui kadar glukosa saya?",
        answer: "Kadar glukosa dapat diukur melalui tes darah yang dilakukan di fasilitas kesehatan seperti rumah sakit, klinik, atau laboratorium. Anda juga dapat menggunakan alat pengukur glukosa darah (glukometer) di rumah.",
        category: FaqCategory::Kesehatan,
    },
    Faq {
        question: "Apa itu BMI dan bagaimana cara menghitungnya?",
        answer: "BMI (Body Mass Index) atau Indeks Massa Tubuh adalah ukuran yang digunakan untuk menilai apakah berat badan seseorang proporsional dengan tinggi badannya. BMI dihitung dengan membagi berat badan (dalam kilogram) dengan kuadrat tinggi badan (dalam meter). Rumusnya: BMI = Berat Badan (kg) / (Tinggi Badan (m) × Tinggi Badan (m)).",
        category: FaqCategory::Kesehatan,
    },
    Faq {
        question: "Apakah DiabCare dapat digunakan oleh semua orang?",
        answer: "DiabCare dapat digunakan oleh siapa saja yang ingin mengetahui risiko diabetes mereka, namun website ini dirancang khusus untuk orang dewasa dan tidak diperuntukkan bagi anak-anak atau remaja.",
        category: FaqCategory::Penggunaan,
    },
    Faq {
        question: "Bagaimana cara mencegah diabetes?",
        answer: "Beberapa cara untuk mencegah diabetes meliputi: menjaga berat badan ideal, melakukan aktivitas fisik secara teratur, mengonsumsi makanan sehat dan seimbang, mengurangi konsumsi gula dan karbohidrat olahan, serta menghindari merokok dan konsumsi alkohol berlebihan.",
        category: FaqCategory::Kesehatan,
    },
    Faq {
        question: "Apakah DiabCare tersedia dalam bahasa lain?",
        answer: "Saat ini, DiabCare hanya tersedia dalam Bahasa Indonesia. Kami berencana untuk menambahkan dukungan bahasa lain di masa mendatang.",
        category: FaqCategory::Penggunaan,
    },
];

/// FAQs whose question or answer contains `term`, case-insensitively.
///
/// An empty term matches everything.
pub fn filter_faqs<'a>(faqs: &'a [Faq], term: &str) -> Vec<&'a Faq> {
    let needle = term.to_lowercase();
    faqs.iter()
        .filter(|faq| {
            faq.question.to_lowercase().contains(&needle)
                || faq.answer.to_lowercase().contains(&needle)
        })
        .collect()
}
