//! WebAssembly module for the AgriPredict dashboard
//!
//! Provides the browser side of the dashboard:
//! - Session state (active language and location, notification list)
//! - Translation lookups with English fallback
//! - Form validation before anything is submitted
//! - Weather condition icons

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::i18n::{Catalogs, LocaleContext, MessageArg};
use shared::{
    nearest_location, validate_form, weather_report, ConditionKind, DiseaseDetectionForm,
    FieldErrors, GeoCoordinates, Language, Location, NotificationCenter, NotificationType,
    ProfitEstimationForm, Validate, CROP_TYPES,
};
use wasm_bindgen::prelude::*;

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

#[cfg(target_arch = "wasm32")]
fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn console_warn(_message: &str) {}

// ============================================================================
// Icons
// ============================================================================

/// Icon asset for a sky condition
pub fn icon_for(kind: ConditionKind) -> &'static str {
    match kind {
        ConditionKind::Sunny => "sun",
        ConditionKind::PartlyCloudy => "cloud-sun",
        ConditionKind::Cloudy => "cloud",
        ConditionKind::Rain => "cloud-rain",
    }
}

fn parse_condition(kind: &str) -> Option<ConditionKind> {
    serde_json::from_value(serde_json::Value::String(kind.to_string())).ok()
}

/// Icon asset name for a condition kind (`sunny`, `partlyCloudy`, `cloudy`,
/// `rain`); undefined for anything else
#[wasm_bindgen]
pub fn condition_icon(kind: &str) -> Option<String> {
    parse_condition(kind).map(|k| icon_for(k).to_string())
}

// ============================================================================
// Pickers
// ============================================================================

#[derive(Serialize)]
struct LanguageOption {
    code: &'static str,
    name: &'static str,
}

fn language_options() -> Vec<LanguageOption> {
    Language::ALL
        .into_iter()
        .map(|language| LanguageOption {
            code: language.code(),
            name: language.native_name(),
        })
        .collect()
}

/// Language switcher entries, each named in its own script
#[wasm_bindgen]
pub fn languages_json() -> Result<String, JsValue> {
    serde_json::to_string(&language_options()).map_err(|e| js_error(e.to_string()))
}

#[derive(Serialize)]
struct CropOption {
    value: &'static str,
    label: String,
}

// ============================================================================
// Form validation
// ============================================================================

fn check_form<T>(form_json: &str) -> Result<FieldErrors, String>
where
    T: serde::de::DeserializeOwned + Validate,
{
    let form: T =
        serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))?;
    Ok(validate_form(&form).err().unwrap_or_default())
}

fn errors_json(errors: &FieldErrors) -> Result<String, String> {
    serde_json::to_string(&errors.messages()).map_err(|e| e.to_string())
}

/// Validate the profit estimator form. Returns a JSON object mapping field
/// names to messages; `{}` means the form may be submitted.
#[wasm_bindgen]
pub fn validate_profit_form(form_json: &str) -> Result<String, JsValue> {
    check_form::<ProfitEstimationForm>(form_json)
        .and_then(|errors| errors_json(&errors))
        .map_err(js_error)
}

/// Validate the leaf upload form, same contract as [`validate_profit_form`]
#[wasm_bindgen]
pub fn validate_disease_form(form_json: &str) -> Result<String, JsValue> {
    check_form::<DiseaseDetectionForm>(form_json)
        .and_then(|errors| errors_json(&errors))
        .map_err(js_error)
}

// ============================================================================
// Session
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationItem {
    id: String,
    title: String,
    description: String,
    time_ago: String,
    is_read: bool,
    #[serde(rename = "type")]
    notification_type: NotificationType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastItem {
    day: String,
    temperature_celsius: i32,
    condition: String,
    icon: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeatherCard {
    city: String,
    temperature_celsius: i32,
    condition: String,
    icon: &'static str,
    humidity_percent: i32,
    wind_kmh: i32,
    advisory: String,
    forecast: Vec<ForecastItem>,
}

/// Per-tab dashboard state. Starts in English at Delhi with the default
/// notifications; nothing survives a reload.
#[wasm_bindgen]
pub struct DashboardSession {
    ctx: LocaleContext,
    notifications: NotificationCenter,
    catalogs: Catalogs,
}

impl DashboardSession {
    fn create() -> Result<Self, String> {
        let catalogs = Catalogs::load().map_err(|e| e.to_string())?;
        let report = catalogs
            .check(shared::i18n::REQUIRED_KEYS)
            .map_err(|e| e.to_string())?;
        for (language, keys) in &report.missing {
            if !keys.is_empty() {
                console_warn(&format!(
                    "{} catalog falls back to English for {} keys",
                    language,
                    keys.len()
                ));
            }
        }

        Ok(Self {
            ctx: LocaleContext::default(),
            notifications: NotificationCenter::with_defaults(),
            catalogs,
        })
    }

    fn translate(&self, key: &str, params_json: Option<&str>) -> Result<String, String> {
        let args = match params_json {
            None => Vec::new(),
            Some(json) => parse_params(json)?,
        };
        Ok(self.catalogs.resolve(&self.ctx, key, &args))
    }

    fn notification_items(&self, now: DateTime<Utc>) -> Vec<NotificationItem> {
        self.notifications
            .notifications()
            .iter()
            .map(|n| NotificationItem {
                id: n.id.clone(),
                title: self.catalogs.t(&self.ctx, &n.title),
                description: self.catalogs.t(&self.ctx, &n.description),
                time_ago: self.catalogs.relative_time(&self.ctx, n.timestamp, now),
                is_read: n.is_read,
                notification_type: n.notification_type,
            })
            .collect()
    }

    fn weather_card(&self) -> WeatherCard {
        let report = weather_report(self.ctx.location);
        let t = |key: &str| self.catalogs.t(&self.ctx, key);

        WeatherCard {
            city: t(&report.current.city_key),
            temperature_celsius: report.current.temperature_celsius,
            condition: t(report.current.condition.label_key()),
            icon: icon_for(report.current.condition),
            humidity_percent: report.current.humidity_percent,
            wind_kmh: report.current.wind_kmh,
            advisory: t(&report.advisory_key),
            forecast: report
                .forecast
                .iter()
                .map(|day| ForecastItem {
                    day: t(&day.day_key),
                    temperature_celsius: day.temperature_celsius,
                    condition: t(day.condition.label_key()),
                    icon: icon_for(day.condition),
                })
                .collect(),
        }
    }

    fn crop_options(&self) -> Vec<CropOption> {
        CROP_TYPES
            .iter()
            .map(|&crop| CropOption {
                value: crop,
                label: self.catalogs.t(&self.ctx, &format!("crops.{}", crop)),
            })
            .collect()
    }

    fn move_to(&mut self, latitude: f64, longitude: f64) -> String {
        let location = nearest_location(&GeoCoordinates::new(latitude, longitude));
        self.ctx.set_location(location);
        let city = self.catalogs.t(&self.ctx, location.city_key());
        self.catalogs.resolve(
            &self.ctx,
            "notifications.locationSuccess.description",
            &[MessageArg::new("location", city)],
        )
    }
}

/// `{"name": value}` object into interpolation arguments
fn parse_params(json: &str) -> Result<Vec<MessageArg>, String> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(json).map_err(|e| format!("Invalid params JSON: {}", e))?;
    Ok(map
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => MessageArg::new(key, s),
            other => MessageArg::new(key, other),
        })
        .collect())
}

#[wasm_bindgen]
impl DashboardSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<DashboardSession, JsValue> {
        Self::create().map_err(js_error)
    }

    /// Active language code (`en`, `hi`, `mr`)
    pub fn language(&self) -> String {
        self.ctx.language.code().to_string()
    }

    /// Language name the AI flows expect, e.g. `Hindi`
    pub fn prompt_language(&self) -> String {
        self.ctx.language.prompt_name().to_string()
    }

    pub fn set_language(&mut self, code: &str) -> Result<(), JsValue> {
        let language: Language = code
            .parse()
            .map_err(|_| js_error(format!("Unsupported language: {}", code)))?;
        self.ctx.set_language(language);
        Ok(())
    }

    pub fn location(&self) -> String {
        self.ctx.location.name().to_string()
    }

    pub fn set_location(&mut self, name: &str) -> Result<(), JsValue> {
        let location: Location = name
            .parse()
            .map_err(|_| js_error(format!("Unknown location: {}", name)))?;
        self.ctx.set_location(location);
        Ok(())
    }

    /// Snap device coordinates to the nearest location, select it and return
    /// the localized confirmation text
    pub fn locate(&mut self, latitude: f64, longitude: f64) -> String {
        self.move_to(latitude, longitude)
    }

    /// Resolve a key in the active language. `params_json` is an optional
    /// `{"name": value}` object for `{name}` placeholders.
    pub fn t(&self, key: &str, params_json: Option<String>) -> Result<String, JsValue> {
        self.translate(key, params_json.as_deref()).map_err(js_error)
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        self.notifications.mark_read(id)
    }

    pub fn mark_all_read(&mut self) {
        self.notifications.mark_all_read();
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    /// Localized notification list; `now_ms` is `Date.now()`
    pub fn notifications_json(&self, now_ms: f64) -> Result<String, JsValue> {
        let now = DateTime::<Utc>::from_timestamp_millis(now_ms as i64)
            .ok_or_else(|| js_error("Invalid timestamp"))?;
        serde_json::to_string(&self.notification_items(now)).map_err(|e| js_error(e.to_string()))
    }

    /// Crop picker entries for the profit estimator; `value` is the English
    /// crop name sent with the form
    pub fn crop_options_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.crop_options()).map_err(|e| js_error(e.to_string()))
    }

    /// Localized weather card for the active location
    pub fn weather_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.weather_card()).map_err(|e| js_error(e.to_string()))
    }
}
