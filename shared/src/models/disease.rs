//! Crop disease detection contract types

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::DataUri;

/// Input of the disease detection flow
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetectionInput {
    /// Leaf photo as `data:<mimetype>;base64,<encoded_data>`
    #[validate(custom(function = "validate_photo_data_uri"))]
    pub photo_data_uri: String,

    /// Optional farmer description of the plant or symptoms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Output language name, e.g. "English", "Hindi", "Marathi"
    #[validate(length(
        min = 1,
        code = "validation.languageRequired",
        message = "Output language is required."
    ))]
    pub language: String,
}

fn validate_photo_data_uri(value: &str) -> Result<(), ValidationError> {
    match DataUri::parse(value) {
        Ok(uri) if uri.is_image() => Ok(()),
        _ => Err(ValidationError::new("validation.photoInvalid")
            .with_message("Please upload an image file.".into())),
    }
}

/// Severity of a detected disease. Values are fixed English tokens and are
/// never translated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Severity {
    pub const VALUES: [&'static str; 4] = ["low", "medium", "high", "N/A"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model confidence in its diagnosis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const VALUES: [&'static str; 3] = ["low", "medium", "high"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnosis returned by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetectionOutput {
    pub disease_detected: bool,
    /// Disease name, or "Healthy" when nothing was found
    pub disease_name: String,
    pub symptoms: Vec<String>,
    pub severity: Severity,
    pub recommendations: String,
    pub confidence: Confidence,
}

impl DiseaseDetectionOutput {
    /// Severity badge is hidden for healthy leaves
    pub fn shows_severity(&self) -> bool {
        self.severity != Severity::NotApplicable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(photo: &str) -> DiseaseDetectionInput {
        DiseaseDetectionInput {
            photo_data_uri: photo.to_string(),
            description: None,
            language: "English".to_string(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input("data:image/jpeg;base64,aGVsbG8=").validate().is_ok());
    }

    #[test]
    fn test_rejects_non_image_uri() {
        assert!(input("data:text/plain;base64,aGVsbG8=").validate().is_err());
        assert!(input("https://example.com/leaf.jpg").validate().is_err());
    }

    #[test]
    fn test_rejects_empty_language() {
        let mut i = input("data:image/jpeg;base64,aGVsbG8=");
        i.language.clear();
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_output_wire_format() {
        let json = serde_json::json!({
            "diseaseDetected": true,
            "diseaseName": "Leaf Rust",
            "symptoms": ["Orange pustules", "Yellowing"],
            "severity": "medium",
            "recommendations": "Apply fungicide.",
            "confidence": "high"
        });
        let output: DiseaseDetectionOutput = serde_json::from_value(json).unwrap();
        assert_eq!(output.severity, Severity::Medium);
        assert_eq!(output.confidence, Confidence::High);
        assert_eq!(output.symptoms.len(), 2);
        assert!(output.shows_severity());
    }

    #[test]
    fn test_healthy_severity_token() {
        let json = serde_json::json!({
            "diseaseDetected": false,
            "diseaseName": "Healthy",
            "symptoms": [],
            "severity": "N/A",
            "recommendations": "Keep watering regularly.",
            "confidence": "medium"
        });
        let output: DiseaseDetectionOutput = serde_json::from_value(json).unwrap();
        assert_eq!(output.severity, Severity::NotApplicable);
        assert!(!output.shows_severity());
    }

    #[test]
    fn test_translated_severity_rejected() {
        let json = serde_json::json!({
            "diseaseDetected": true,
            "diseaseName": "पत्ती रतुआ",
            "symptoms": [],
            "severity": "मध्यम",
            "recommendations": "",
            "confidence": "high"
        });
        assert!(serde_json::from_value::<DiseaseDetectionOutput>(json).is_err());
    }
}
