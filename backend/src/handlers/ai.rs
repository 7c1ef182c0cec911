//! HTTP handlers for the model-backed endpoints

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use shared::{
    validate_form, DiseaseDetectionForm, DiseaseDetectionInput, DiseaseDetectionOutput,
    OutlookTone, ProfitEstimationForm, ProfitEstimationOutput, UploadedImage,
};

use super::{AppJson, AppQuery, LangQuery};
use crate::error::{AppError, AppResult};
use crate::services::{DiseaseDetectionService, ProfitEstimationService};
use crate::AppState;

/// Diagnosis plus display hints for the result card
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetectionView {
    #[serde(flatten)]
    pub result: DiseaseDetectionOutput,
    /// False for healthy leaves (`N/A` severity)
    pub show_severity: bool,
}

impl From<DiseaseDetectionOutput> for DiseaseDetectionView {
    fn from(result: DiseaseDetectionOutput) -> Self {
        Self {
            show_severity: result.shows_severity(),
            result,
        }
    }
}

/// Profit estimate plus the outlook badge tone
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitEstimationView {
    #[serde(flatten)]
    pub result: ProfitEstimationOutput,
    pub outlook_tone: OutlookTone,
}

impl From<ProfitEstimationOutput> for ProfitEstimationView {
    fn from(result: ProfitEstimationOutput) -> Self {
        Self {
            outlook_tone: result.outlook_tone(),
            result,
        }
    }
}

/// Diagnose a leaf from a JSON contract input
pub async fn detect_disease(
    State(state): State<AppState>,
    AppJson(input): AppJson<DiseaseDetectionInput>,
) -> AppResult<Json<DiseaseDetectionView>> {
    let service = DiseaseDetectionService::new(&state.model, &state.config.ai.vision_model);
    let output = service.detect(input).await?;
    Ok(Json(output.into()))
}

fn read_image_failed(error: impl std::fmt::Display) -> AppError {
    tracing::warn!("Failed to read upload: {}", error);
    AppError::bad_request("Failed to read the image file.", "errors.readImageFailed")
}

/// Diagnose a leaf from the upload form (`image` file parts, optional
/// `description` text part)
pub async fn upload_disease_detection(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LangQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DiseaseDetectionView>> {
    let language = query.language()?;
    let mut multipart = multipart.map_err(read_image_failed)?;
    let mut form = DiseaseDetectionForm::default();

    while let Some(field) = multipart.next_field().await.map_err(read_image_failed)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(read_image_failed)?;
                if !bytes.is_empty() {
                    form.images.push(UploadedImage {
                        file_name,
                        mime_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            Some("description") => {
                form.description = Some(field.text().await.map_err(read_image_failed)?);
            }
            _ => {}
        }
    }

    validate_form(&form)?;
    let input = form
        .to_input(language)
        .ok_or_else(|| AppError::Internal("validated upload has no image".to_string()))?;

    let service = DiseaseDetectionService::new(&state.model, &state.config.ai.vision_model);
    let output = service.detect(input).await?;
    Ok(Json(output.into()))
}

/// Estimate profit from the estimator form
pub async fn estimate_profit(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LangQuery>,
    AppJson(form): AppJson<ProfitEstimationForm>,
) -> AppResult<Json<ProfitEstimationView>> {
    let language = query.language()?;
    validate_form(&form)?;
    let input = form
        .to_input(language)
        .ok_or_else(|| AppError::Internal("validated form has no numbers".to_string()))?;

    let service = ProfitEstimationService::new(&state.model, &state.config.ai.text_model);
    let output = service.estimate(input).await?;
    Ok(Json(output.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{Confidence, Severity};

    #[test]
    fn test_disease_view_hides_severity_for_healthy_leaf() {
        let view = DiseaseDetectionView::from(DiseaseDetectionOutput {
            disease_detected: false,
            disease_name: "Healthy".to_string(),
            symptoms: vec![],
            severity: Severity::NotApplicable,
            recommendations: "Keep watering regularly.".to_string(),
            confidence: Confidence::High,
        });
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["showSeverity"], false);
        assert_eq!(value["severity"], "N/A");
        assert_eq!(value["diseaseName"], "Healthy");
    }

    #[test]
    fn test_profit_view_carries_outlook_tone() {
        let view = ProfitEstimationView::from(ProfitEstimationOutput {
            estimated_profit: 45000.0,
            profit_outlook: "Moderate".to_string(),
            recommendations: vec!["Sell in two lots".to_string()],
        });
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["outlookTone"], "moderate");
        assert_eq!(value["estimatedProfit"], json!(45000.0));
        assert_eq!(value["recommendations"][0], "Sell in two lots");
    }
}
