//! Form validation for the dashboard
//!
//! Forms are checked before anything is sent; a failing form produces a map
//! from wire field name to the first message for that field and nothing is
//! submitted.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub use validator::Validate;

use crate::i18n::{Catalogs, LocaleContext};
use crate::models::{DiseaseDetectionInput, ProfitEstimationInput};
use crate::types::{DataUri, Language};

// ============================================================================
// Forms
// ============================================================================

/// A file picked in the upload control
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn to_data_uri(&self) -> DataUri {
        DataUri::from_bytes(&self.mime_type, &self.bytes)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.to_ascii_lowercase().starts_with("image/")
    }
}

fn validate_image_types(images: &[UploadedImage]) -> Result<(), ValidationError> {
    if images.iter().all(UploadedImage::is_image) {
        return Ok(());
    }
    Err(ValidationError::new("validation.photoInvalid")
        .with_message("Please upload an image file.".into()))
}

/// Leaf photo upload form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetectionForm {
    #[validate(
        length(
            min = 1,
            code = "validation.imageRequired",
            message = "Leaf image is required."
        ),
        custom(function = "validate_image_types")
    )]
    #[serde(default)]
    pub images: Vec<UploadedImage>,

    #[serde(default)]
    pub description: Option<String>,
}

impl DiseaseDetectionForm {
    /// Contract input built from the first image; `None` without an image
    pub fn to_input(&self, language: Language) -> Option<DiseaseDetectionInput> {
        let image = self.images.first()?;
        Some(DiseaseDetectionInput {
            photo_data_uri: image.to_data_uri().to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            language: language.prompt_name().to_string(),
        })
    }
}

/// Number typed into a form input: a JSON number or the raw input text
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    Number(f64),
    Text(String),
}

/// Blank, unparseable or non-finite input reads as missing so the field's
/// own rule reports it
fn number_input<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberInput>::deserialize(deserializer)? {
        Some(NumberInput::Number(n)) => Some(n),
        Some(NumberInput::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

/// Profit estimator form. Missing fields deserialize to empty values and are
/// reported by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfitEstimationForm {
    #[validate(length(
        min = 1,
        code = "validation.cropTypeRequired",
        message = "Crop type is required."
    ))]
    pub crop_type: String,

    #[validate(
        required(
            code = "validation.costPositive",
            message = "Cost must be a positive number."
        ),
        range(
            exclusive_min = 0.0,
            code = "validation.costPositive",
            message = "Cost must be a positive number."
        )
    )]
    #[serde(deserialize_with = "number_input")]
    pub production_cost_per_unit: Option<f64>,

    #[validate(
        required(
            code = "validation.yieldPositive",
            message = "Yield must be a positive number."
        ),
        range(
            exclusive_min = 0.0,
            code = "validation.yieldPositive",
            message = "Yield must be a positive number."
        )
    )]
    #[serde(deserialize_with = "number_input")]
    pub expected_yield: Option<f64>,

    #[validate(length(
        min = 10,
        code = "validation.marketDataTooShort",
        message = "Please provide some details about the market."
    ))]
    pub current_market_data: String,
}

impl ProfitEstimationForm {
    /// Contract input; `None` while either number is missing
    pub fn to_input(&self, language: Language) -> Option<ProfitEstimationInput> {
        Some(ProfitEstimationInput {
            crop_type: self.crop_type.clone(),
            production_cost_per_unit: self.production_cost_per_unit?,
            expected_yield: self.expected_yield?,
            current_market_data: self.current_market_data.clone(),
            language: language.prompt_name().to_string(),
        })
    }
}

// ============================================================================
// Field errors
// ============================================================================

/// First failure reported for a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    /// Catalog key of the message, e.g. `validation.costPositive`
    pub code: String,
    pub message: String,
}

/// Validation failures keyed by wire (camelCase) field name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (i, (field, error)) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { ", " };
            write!(f, "{}{}: {}", sep, field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one
    pub fn add(&mut self, field: &str, code: &str, message: &str) {
        self.0.entry(field.to_string()).or_insert_with(|| FieldError {
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// field → message in the default (English) wording
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, error)| (field.clone(), error.message.clone()))
            .collect()
    }

    /// field → message in the context's language. Codes without a catalog
    /// entry keep the default message.
    pub fn localize(&self, catalogs: &Catalogs, ctx: &LocaleContext) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(field, error)| {
                let text = catalogs
                    .template(ctx.language, &error.code)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.message.clone());
                (field.clone(), text)
            })
            .collect()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, kind) in errors.errors() {
            let ValidationErrorsKind::Field(list) = kind else {
                continue;
            };
            if let Some(error) = list.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                fields.add(&wire_name(field), &error.code, &message);
            }
        }
        fields
    }
}

/// snake_case struct field → camelCase wire name
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Run every rule on `value`
pub fn validate_form<T: Validate>(value: &T) -> Result<(), FieldErrors> {
    value.validate().map_err(FieldErrors::from)
}
