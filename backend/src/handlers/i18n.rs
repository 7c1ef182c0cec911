//! HTTP handlers for translation catalogs

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::i18n::DEFAULT_LANGUAGE;
use shared::Language;

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub language: Language,
    pub fallback: Language,
    /// Flat `dot.separated.key` → template
    pub entries: BTreeMap<String, String>,
}

/// Flat catalog for one language, without English fallbacks merged in
pub async fn get_catalog(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<CatalogView>> {
    let language: Language = lang
        .parse()
        .map_err(|_| AppError::NotFound(format!("Catalog {}", lang)))?;
    let catalog = state
        .catalogs
        .catalog(language)
        .ok_or_else(|| AppError::NotFound(format!("Catalog {}", language)))?;

    Ok(Json(CatalogView {
        language,
        fallback: DEFAULT_LANGUAGE,
        entries: catalog.entries().clone(),
    }))
}
