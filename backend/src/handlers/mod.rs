//! HTTP handlers

pub mod ai;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod i18n;
pub mod notification;

pub use ai::*;
pub use dashboard::*;
pub use extract::{AppJson, AppQuery};
pub use health::*;
pub use i18n::*;
pub use notification::*;

use serde::Deserialize;
use shared::Language;

use crate::error::{AppError, AppResult};

/// `?lang=` query; absent means English
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn language(&self) -> AppResult<Language> {
        parse_language(self.lang.as_deref())
    }
}

pub(crate) fn parse_language(lang: Option<&str>) -> AppResult<Language> {
    match lang {
        None | Some("") => Ok(Language::default()),
        Some(code) => code.parse().map_err(|_| {
            AppError::bad_request(
                format!("Unsupported language: {}", code),
                "errors.validationFailed",
            )
        }),
    }
}
