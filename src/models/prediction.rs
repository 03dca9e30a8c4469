use serde::{Deserialize, Serialize};

/// Response body from the prediction service's `/predict`.
///
/// Only `success`, `prediction` and `error` are part of the contract;
/// the remaining fields are extras the reference backend sends and are
/// kept for logging when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub prediction: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Binary classification returned by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    High,
    Low,
}

impl RiskLabel {
    /// Map the raw `prediction` value. Only 0 and 1 are meaningful.
    pub fn from_prediction(value: i64) -> Option<Self> {
        match value {
            1 => Some(RiskLabel::High),
            0 => Some(RiskLabel::Low),
            _ => None,
        }
    }

    pub fn prediction_value(self) -> i64 {
        match self {
            RiskLabel::High => 1,
            RiskLabel::Low => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLabel::High => "Risiko Tinggi",
            RiskLabel::Low => "Risiko Rendah",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            RiskLabel::High => {
                "Berdasarkan data yang Anda berikan, hasil prediksi menunjukkan kemungkinan risiko \
                 diabetes Anda cukup tinggi. Disarankan untuk berkonsultasi dengan profesional \
                 kesehatan untuk evaluasi lebih lanjut."
            }
            RiskLabel::Low => {
                "Berdasarkan data yang Anda berikan, hasil prediksi menunjukkan risiko terkena \
                 diabetes Anda saat ini terlihat rendah. Tetap jaga gaya hidup sehat dengan pola \
                 makan yang seimbang dan rutin beraktivitas fisik."
            }
        }
    }

    /// How food recommendations will be chosen for this label.
    pub fn food_strategy(self) -> &'static str {
        match self {
            RiskLabel::High => {
                "Akan diprioritaskan makanan dengan Indeks Glikemik terendah untuk kontrol gula \
                 darah optimal"
            }
            RiskLabel::Low => {
                "Dapat mengonsumsi makanan dengan variasi Indeks Glikemik yang lebih fleksibel"
            }
        }
    }

    pub fn consumption_tips(self) -> [&'static str; 3] {
        match self {
            RiskLabel::High => [
                "Prioritaskan makanan GI terendah",
                "Kontrol porsi dengan ketat",
                "Konsultasi dengan dokter",
            ],
            RiskLabel::Low => [
                "Variasi makanan lebih fleksibel",
                "Tetap jaga pola makan sehat",
                "Rutin olahraga dan cek kesehatan",
            ],
        }
    }

    pub fn is_high(self) -> bool {
        matches!(self, RiskLabel::High)
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
