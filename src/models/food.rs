use serde::{Deserialize, Serialize};

use super::profile::HealthProfile;

// ═══════════════════════════════════════════════════════════
// Categories
// ═══════════════════════════════════════════════════════════

/// The seven food categories offered after a prediction.
///
/// Serialized as the exact id string the recommendation service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodCategory {
    #[serde(rename = "Buah")]
    Fruit,
    #[serde(rename = "Sayur")]
    Vegetable,
    #[serde(rename = "Biji-bijian")]
    Grain,
    #[serde(rename = "Kacang-kacangan")]
    Legume,
    #[serde(rename = "Karbohidrat")]
    Carbohydrate,
    #[serde(rename = "Protein Nabati")]
    PlantProtein,
    #[serde(rename = "Protein Hewani")]
    AnimalProtein,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown food category: {0}")]
pub struct UnknownCategory(pub String);

impl FoodCategory {
    pub const ALL: [FoodCategory; 7] = [
        FoodCategory::Fruit,
        FoodCategory::Vegetable,
        FoodCategory::Grain,
        FoodCategory::Legume,
        FoodCategory::Carbohydrate,
        FoodCategory::PlantProtein,
        FoodCategory::AnimalProtein,
    ];

    /// Wire id, also used as the display name.
    pub fn id(self) -> &'static str {
        match self {
            FoodCategory::Fruit => "Buah",
            FoodCategory::Vegetable => "Sayur",
            FoodCategory::Grain => "Biji-bijian",
            FoodCategory::Legume => "Kacang-kacangan",
            FoodCategory::Carbohydrate => "Karbohidrat",
            FoodCategory::PlantProtein => "Protein Nabati",
            FoodCategory::AnimalProtein => "Protein Hewani",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FoodCategory::Fruit => "Buah-buahan segar kaya vitamin dan serat",
            FoodCategory::Vegetable => "Sayuran hijau dan berwarna untuk nutrisi optimal",
            FoodCategory::Grain => "Biji-bijian utuh untuk energi berkelanjutan",
            FoodCategory::Legume => "Kacang dan biji untuk lemak sehat",
            FoodCategory::Carbohydrate => "Karbohidrat kompleks untuk energi stabil",
            FoodCategory::PlantProtein => "Protein dari tumbuhan untuk kesehatan optimal",
            FoodCategory::AnimalProtein => "Protein berkualitas tinggi dari hewan",
        }
    }

    /// Accent color of the category tile.
    pub fn accent(self) -> &'static str {
        match self {
            FoodCategory::Fruit => "#ef4444",
            FoodCategory::Vegetable => "#22c55e",
            FoodCategory::Grain => "#f59e0b",
            FoodCategory::Legume => "#f97316",
            FoodCategory::Carbohydrate => "#3b82f6",
            FoodCategory::PlantProtein => "#14b8a6",
            FoodCategory::AnimalProtein => "#a855f7",
        }
    }
}

impl std::str::FromStr for FoodCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FoodCategory::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

/// Request body for `/recommend_food`.
#[derive(Debug, Clone, Serialize)]
pub struct FoodRecommendationRequest<'a> {
    pub category: FoodCategory,
    pub user_data: &'a HealthProfile,
}

/// One recommended food item. Displayed as-is, never computed here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodRecommendation {
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub glycemic_index: i64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar_content: f64,
    pub sodium_content: f64,
    pub suitable_for_diabetes: i64,
    pub rating: f64,
    pub personalization_score: f64,
    pub model_used: String,
    pub gi_category: String,
    pub diabetes_friendly: bool,
    pub recommendation_reason: String,
}

impl FoodRecommendation {
    pub fn gi_bucket(&self) -> GiBucket {
        GiBucket::from_index(self.glycemic_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiRange {
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugInfo {
    pub user_seed: Option<i64>,
    pub gi_range: Option<GiRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmInfo {
    pub prediction_method: String,
    pub food_selection: String,
    pub categories: Vec<String>,
    pub gi_strategy_high_risk: String,
    pub gi_strategy_low_risk: String,
}

/// Response body from `/recommend_food`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecommendationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub recommendations: Option<Vec<FoodRecommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gi_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm_info: Option<AlgorithmInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FoodRecommendationResponse {
    pub fn items(&self) -> &[FoodRecommendation] {
        self.recommendations.as_deref().unwrap_or(&[])
    }
}

// ═══════════════════════════════════════════════════════════
// Presentational classification
// ═══════════════════════════════════════════════════════════

/// Cosmetic glycemic-index tier used for color-coding cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GiBucket {
    VeryLow,
    Low,
    Medium,
    High,
}

impl GiBucket {
    /// Upper bounds are inclusive: 35, 50 and 70 stay in the lower tier.
    pub fn from_index(gi: i64) -> Self {
        if gi <= 35 {
            GiBucket::VeryLow
        } else if gi <= 50 {
            GiBucket::Low
        } else if gi <= 70 {
            GiBucket::Medium
        } else {
            GiBucket::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GiBucket::VeryLow => "Sangat Rendah",
            GiBucket::Low => "Rendah",
            GiBucket::Medium => "Sedang",
            GiBucket::High => "Tinggi",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GiBucket::VeryLow => "Sangat aman untuk diabetes",
            GiBucket::Low => "Aman untuk diabetes",
            GiBucket::Medium => "Konsumsi terbatas",
            GiBucket::High => "Hindari untuk diabetes",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            GiBucket::VeryLow => "gi-very-low",
            GiBucket::Low => "gi-low",
            GiBucket::Medium => "gi-medium",
            GiBucket::High => "gi-high",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GiBucket::VeryLow | GiBucket::Low => "✅",
            GiBucket::Medium => "⚠️",
            GiBucket::High => "❌",
        }
    }
}

/// Short nutrition remarks printed under each card.
pub fn fiber_note(fiber: f64) -> &'static str {
    if fiber >= 3.0 {
        "Tinggi serat"
    } else if fiber >= 1.0 {
        "Sumber serat"
    } else {
        "Rendah serat"
    }
}

pub fn fat_note(fat: f64) -> &'static str {
    if fat <= 3.0 {
        "Rendah lemak"
    } else if fat <= 10.0 {
        "Sedang"
    } else {
        "Tinggi lemak"
    }
}

pub fn sugar_note(sugar: f64) -> &'static str {
    if sugar <= 5.0 {
        "Rendah gula"
    } else {
        "Perhatikan"
    }
}
