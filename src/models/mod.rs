pub mod food;
pub mod prediction;
pub mod profile;

pub use food::{
    AlgorithmInfo, DebugInfo, FoodCategory, FoodRecommendation, FoodRecommendationRequest,
    FoodRecommendationResponse, GiBucket, GiRange, UnknownCategory,
};
pub use prediction::{PredictionResult, RiskLabel};
pub use profile::{HealthForm, HealthProfile, ProfileError, ProfileField};
