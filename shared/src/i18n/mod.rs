//! Localization store
//!
//! Resolves translation keys for the active language with a fallback to
//! English, then to the key itself. The active language and location live in
//! an explicit [`LocaleContext`] handed to every call; there is no global
//! selection.

mod catalog;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, CatalogError, CatalogReport, Catalogs, DEFAULT_LANGUAGE};

use crate::types::{Language, Location};

/// Keys the application resolves directly; checked at startup
pub const REQUIRED_KEYS: &[&str] = &[
    "header.language",
    "header.location",
    "header.notifications",
    "weather.humidity",
    "weather.wind",
    "weather.farmingAdvisory",
    "weather.advisory",
    "weather.advisoryText",
    "weather.cities.delhi",
    "weather.cities.mumbai",
    "weather.cities.bangalore",
    "weather.conditions.sunny",
    "weather.conditions.partlyCloudy",
    "weather.conditions.cloudy",
    "weather.conditions.rain",
    "weather.advisories.delhi",
    "weather.advisories.mumbai",
    "weather.advisories.bangalore",
    "days.mon",
    "days.tue",
    "days.wed",
    "days.thu",
    "days.fri",
    "days.sat",
    "days.sun",
    "trends.daysAgo",
    "trends.today",
    "notifications.priceAlert.title",
    "notifications.priceAlert.description",
    "notifications.diseaseDetected.title",
    "notifications.diseaseDetected.description",
    "notifications.locationSuccess.title",
    "notifications.locationSuccess.description",
    "notifications.locationError.title",
    "notifications.locationError.description",
    "time.justNow",
    "time.minutesAgo",
    "time.hoursAgo",
    "time.daysAgo",
    "validation.imageRequired",
    "validation.cropTypeRequired",
    "validation.costPositive",
    "validation.yieldPositive",
    "validation.marketDataTooShort",
    "validation.photoInvalid",
    "validation.languageRequired",
    "errors.analysisFailed",
    "errors.estimationFailed",
    "errors.readImageFailed",
    "errors.validationFailed",
    "errors.invalidRequest",
    "errors.notFound",
    "errors.internal",
];

/// Active language and location for one session or request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleContext {
    pub language: Language,
    pub location: Location,
}

impl LocaleContext {
    pub fn new(language: Language, location: Location) -> Self {
        Self { language, location }
    }

    pub fn with_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

/// A named value substituted into a `{name}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArg {
    pub key: String,
    pub value: String,
}

impl MessageArg {
    pub fn new(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}

/// Replace each `{name}` whose name has an argument; anything else is kept
/// verbatim, including unmatched placeholders and stray braces.
pub fn interpolate(template: &str, args: &[MessageArg]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|arg| arg.key == name) {
                    Some(arg) => {
                        out.push_str(&arg.value);
                        rest = &after[close + 1..];
                    }
                    None => {
                        out.push('{');
                        rest = after;
                    }
                }
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

impl Catalogs {
    /// Resolve `key` for the context's language without arguments
    pub fn t(&self, ctx: &LocaleContext, key: &str) -> String {
        self.resolve(ctx, key, &[])
    }

    /// Resolve `key`, falling back to English and then to the key itself,
    /// and interpolate `args` into the template. Never fails.
    pub fn resolve(&self, ctx: &LocaleContext, key: &str, args: &[MessageArg]) -> String {
        match self.template(ctx.language, key) {
            Some(template) => interpolate(template, args),
            None => key.to_string(),
        }
    }

    /// Localized "time ago" label for a notification timestamp
    pub fn relative_time(
        &self,
        ctx: &LocaleContext,
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> String {
        let elapsed = now.signed_duration_since(timestamp);
        let minutes = elapsed.num_minutes();
        if minutes < 1 {
            return self.t(ctx, "time.justNow");
        }
        if minutes < 60 {
            return self.resolve(ctx, "time.minutesAgo", &[MessageArg::new("count", minutes)]);
        }
        let hours = elapsed.num_hours();
        if hours < 24 {
            return self.resolve(ctx, "time.hoursAgo", &[MessageArg::new("count", hours)]);
        }
        self.resolve(
            ctx,
            "time.daysAgo",
            &[MessageArg::new("count", elapsed.num_days())],
        )
    }
}
