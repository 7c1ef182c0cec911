//! Profit estimation for a planned crop

use serde_json::{json, Value};
use shared::{validate_form, ProfitEstimationInput, ProfitEstimationOutput};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AiOperation, AppError, AppResult};
use crate::external::{GenerationError, GenerationRequest, GenerativeModel};
use crate::services::prompt::PROFIT_ESTIMATION_PROMPT;

/// JSON schema the model must follow
pub fn profit_estimation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "estimatedProfit": { "type": "number" },
            "profitOutlook": { "type": "string" },
            "recommendations": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1
            }
        },
        "required": ["estimatedProfit", "profitOutlook", "recommendations"]
    })
}

/// Profit estimation over any generative model
pub struct ProfitEstimationService<'a, M> {
    model: &'a M,
    model_name: &'a str,
}

impl<'a, M: GenerativeModel> ProfitEstimationService<'a, M> {
    pub fn new(model: &'a M, model_name: &'a str) -> Self {
        Self { model, model_name }
    }

    pub async fn estimate(
        &self,
        input: ProfitEstimationInput,
    ) -> AppResult<ProfitEstimationOutput> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "estimate_profit",
            %request_id,
            model = %self.model_name,
            prompt = PROFIT_ESTIMATION_PROMPT.name(),
            crop = %input.crop_type
        );

        async move {
            validate_form(&input)?;

            let cost = input.production_cost_per_unit.to_string();
            let yield_units = input.expected_yield.to_string();
            let prompt = PROFIT_ESTIMATION_PROMPT.render(&[
                ("cropType", input.crop_type.as_str()),
                ("productionCostPerUnit", cost.as_str()),
                ("expectedYield", yield_units.as_str()),
                ("currentMarketData", input.current_market_data.as_str()),
                ("language", input.language.as_str()),
            ]);
            let request = GenerationRequest {
                model: self.model_name.to_string(),
                prompt,
                media: None,
                response_schema: profit_estimation_schema(),
            };

            let output = self
                .model
                .generate(request)
                .await
                .and_then(parse_output)
                .map_err(|e| AppError::generation(AiOperation::ProfitEstimation, e))?;

            tracing::info!(
                estimated_profit = output.estimated_profit,
                recommendations = output.recommendations.len(),
                "Profit estimation completed"
            );
            Ok::<_, AppError>(output)
        }
        .instrument(span)
        .await
    }
}

fn parse_output(value: Value) -> Result<ProfitEstimationOutput, GenerationError> {
    let output: ProfitEstimationOutput = serde_json::from_value(value)
        .map_err(|e| GenerationError::SchemaViolation(e.to_string()))?;

    if !output.estimated_profit.is_finite() {
        return Err(GenerationError::SchemaViolation(
            "estimatedProfit is not a finite number".to_string(),
        ));
    }
    if output.recommendations.is_empty() {
        return Err(GenerationError::SchemaViolation(
            "recommendations is empty".to_string(),
        ));
    }
    Ok(output)
}
