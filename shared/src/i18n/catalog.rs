//! Translation catalogs
//!
//! Locale files are nested JSON documents. At load time they are flattened
//! into a map from fully-qualified dot keys (`weather.cities.delhi`) to
//! template strings, so lookups never traverse nested structures.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use thiserror::Error;

use crate::types::Language;

const EN_JSON: &str = include_str!("../../locales/en.json");
const HI_JSON: &str = include_str!("../../locales/hi.json");
const MR_JSON: &str = include_str!("../../locales/mr.json");

/// Language every other catalog falls back to
pub const DEFAULT_LANGUAGE: Language = Language::En;

/// Errors raised while building or checking catalogs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog '{language}' is not valid JSON: {source}")]
    InvalidJson {
        language: Language,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog '{0}' must be a JSON object at the top level")]
    NotAnObject(Language),

    #[error("default catalog is missing keys: {}", .0.join(", "))]
    MissingDefaultKeys(Vec<String>),
}

/// Flat key → template mapping for one language
#[derive(Debug, Clone)]
pub struct Catalog {
    language: Language,
    entries: BTreeMap<String, String>,
}

impl Catalog {
    /// Build a catalog from a nested JSON document.
    ///
    /// Only string leaves become entries; numbers, booleans, arrays and nulls
    /// are skipped so that lookups for them fall through to the default
    /// language.
    pub fn from_json(language: Language, json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|source| CatalogError::InvalidJson { language, source })?;
        let Value::Object(root) = value else {
            return Err(CatalogError::NotAnObject(language));
        };

        let mut entries = BTreeMap::new();
        for (key, child) in root {
            flatten_into(&mut entries, key, child);
        }

        Ok(Self { language, entries })
    }

    /// Build a catalog from already-flat entries
    pub fn from_entries<I, K, V>(language: Language, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            language,
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_into(entries: &mut BTreeMap<String, String>, prefix: String, value: Value) {
    match value {
        Value::String(text) => {
            entries.insert(prefix, text);
        }
        Value::Object(children) => {
            for (key, child) in children {
                flatten_into(entries, format!("{}.{}", prefix, key), child);
            }
        }
        _ => {}
    }
}

/// Result of checking the catalogs against the keys the application uses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogReport {
    /// Keys present in the default catalog but missing per language; these
    /// resolve through the English fallback
    pub missing: BTreeMap<Language, Vec<String>>,
}

impl CatalogReport {
    pub fn is_complete(&self) -> bool {
        self.missing.values().all(Vec::is_empty)
    }
}

/// All loaded catalogs
#[derive(Debug, Clone)]
pub struct Catalogs {
    catalogs: HashMap<Language, Catalog>,
}

impl Catalogs {
    /// Load the catalogs bundled with the crate
    pub fn load() -> Result<Self, CatalogError> {
        Ok(Self::new(vec![
            Catalog::from_json(Language::En, EN_JSON)?,
            Catalog::from_json(Language::Hi, HI_JSON)?,
            Catalog::from_json(Language::Mr, MR_JSON)?,
        ]))
    }

    pub fn new(catalogs: Vec<Catalog>) -> Self {
        Self {
            catalogs: catalogs.into_iter().map(|c| (c.language(), c)).collect(),
        }
    }

    pub fn catalog(&self, language: Language) -> Option<&Catalog> {
        self.catalogs.get(&language)
    }

    /// Raw template lookup in one language, without fallback
    pub fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.catalogs.get(&language).and_then(|c| c.get(key))
    }

    /// Template lookup with fallback to the default language
    pub fn template(&self, language: Language, key: &str) -> Option<&str> {
        self.lookup(language, key)
            .or_else(|| self.lookup(DEFAULT_LANGUAGE, key))
    }

    /// Verify that every required key exists in the default catalog and list
    /// the keys each other language lacks.
    pub fn check(&self, required: &[&str]) -> Result<CatalogReport, CatalogError> {
        let default = self.catalogs.get(&DEFAULT_LANGUAGE);

        let missing_default: Vec<String> = required
            .iter()
            .filter(|key| !default.is_some_and(|c| c.contains(key)))
            .map(|key| key.to_string())
            .collect();
        if !missing_default.is_empty() {
            return Err(CatalogError::MissingDefaultKeys(missing_default));
        }

        let mut report = CatalogReport::default();
        let Some(default) = default else {
            return Ok(report);
        };

        for language in Language::ALL {
            if language == DEFAULT_LANGUAGE {
                continue;
            }
            let missing: Vec<String> = default
                .keys()
                .filter(|key| self.lookup(language, key).is_none())
                .map(str::to_string)
                .collect();
            report.missing.insert(language, missing);
        }

        Ok(report)
    }
}
