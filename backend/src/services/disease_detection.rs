//! Crop disease detection from a leaf photo
//!
//! Validates the input, renders the instruction, sends it with the image to
//! the vision model and checks the reply against the output schema.

use serde_json::{json, Value};
use shared::{
    validate_form, Confidence, DataUri, DiseaseDetectionInput, DiseaseDetectionOutput, Severity,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AiOperation, AppError, AppResult};
use crate::external::{GenerationError, GenerationRequest, GenerativeModel};
use crate::services::prompt::DISEASE_DETECTION_PROMPT;

/// JSON schema the model must follow
pub fn disease_detection_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "diseaseDetected": { "type": "boolean" },
            "diseaseName": { "type": "string" },
            "symptoms": {
                "type": "array",
                "items": { "type": "string" }
            },
            "severity": {
                "type": "string",
                "enum": Severity::VALUES
            },
            "recommendations": { "type": "string" },
            "confidence": {
                "type": "string",
                "enum": Confidence::VALUES
            }
        },
        "required": [
            "diseaseDetected", "diseaseName", "symptoms",
            "severity", "recommendations", "confidence"
        ]
    })
}

/// Disease detection over any generative model
pub struct DiseaseDetectionService<'a, M> {
    model: &'a M,
    model_name: &'a str,
}

impl<'a, M: GenerativeModel> DiseaseDetectionService<'a, M> {
    pub fn new(model: &'a M, model_name: &'a str) -> Self {
        Self { model, model_name }
    }

    pub async fn detect(&self, input: DiseaseDetectionInput) -> AppResult<DiseaseDetectionOutput> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "detect_disease",
            %request_id,
            model = %self.model_name,
            prompt = DISEASE_DETECTION_PROMPT.name()
        );

        async move {
            validate_form(&input)?;
            let media = DataUri::parse(&input.photo_data_uri).map_err(|e| {
                AppError::Internal(format!("validated photo failed to parse: {}", e))
            })?;

            let prompt = DISEASE_DETECTION_PROMPT.render(&[
                ("language", input.language.as_str()),
                ("description", input.description.as_deref().unwrap_or("")),
            ]);
            let request = GenerationRequest {
                model: self.model_name.to_string(),
                prompt,
                media: Some(media),
                response_schema: disease_detection_schema(),
            };

            let output = self
                .model
                .generate(request)
                .await
                .and_then(parse_output)
                .map_err(|e| AppError::generation(AiOperation::DiseaseDetection, e))?;

            tracing::info!(
                disease_detected = output.disease_detected,
                severity = %output.severity,
                confidence = %output.confidence,
                "Disease detection completed"
            );
            Ok::<_, AppError>(output)
        }
        .instrument(span)
        .await
    }
}

fn parse_output(value: Value) -> Result<DiseaseDetectionOutput, GenerationError> {
    serde_json::from_value(value).map_err(|e| GenerationError::SchemaViolation(e.to_string()))
}
