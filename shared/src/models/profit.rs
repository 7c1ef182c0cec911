//! Profit estimation contract types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Crops offered in the profit estimator
pub const CROP_TYPES: &[&str] = &[
    "Wheat",
    "Rice",
    "Corn",
    "Tomato",
    "Potato",
    "Sugarcane",
    "Cotton",
    "Soybean",
];

/// Input of the profit estimation flow
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfitEstimationInput {
    #[validate(length(
        min = 1,
        code = "validation.cropTypeRequired",
        message = "Crop type is required."
    ))]
    pub crop_type: String,

    /// Cost to produce one unit (₹)
    #[validate(range(
        exclusive_min = 0.0,
        code = "validation.costPositive",
        message = "Cost must be a positive number."
    ))]
    pub production_cost_per_unit: f64,

    /// Expected total yield in units (quintals)
    #[validate(range(
        exclusive_min = 0.0,
        code = "validation.yieldPositive",
        message = "Yield must be a positive number."
    ))]
    pub expected_yield: f64,

    /// Free-text description of prices, demand and trends
    pub current_market_data: String,

    /// Output language name, e.g. "English"
    #[validate(length(
        min = 1,
        code = "validation.languageRequired",
        message = "Output language is required."
    ))]
    pub language: String,
}

/// Profit estimate returned by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitEstimationOutput {
    pub estimated_profit: f64,
    /// Assessment such as "Strong", "Moderate" or "Challenging"
    pub profit_outlook: String,
    pub recommendations: Vec<String>,
}

/// Badge tone for a profit outlook
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutlookTone {
    Strong,
    Moderate,
    Challenging,
    Neutral,
}

impl ProfitEstimationOutput {
    /// Outlook text is free-form; only the three known English words get a tone
    pub fn outlook_tone(&self) -> OutlookTone {
        match self.profit_outlook.trim().to_lowercase().as_str() {
            "strong" => OutlookTone::Strong,
            "moderate" => OutlookTone::Moderate,
            "challenging" => OutlookTone::Challenging,
            _ => OutlookTone::Neutral,
        }
    }
}
