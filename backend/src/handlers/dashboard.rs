//! HTTP handlers for the dashboard widgets: weather, location and market data

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::i18n::{LocaleContext, MessageArg};
use shared::{
    filter_prices, highest_price_by_crop, mandi_prices, nearest_location, price_trends,
    top_prices, weather_report, ConditionKind, GeoCoordinates, Location, MandiPrice,
};
use std::collections::BTreeMap;

use super::{parse_language, AppQuery, LangQuery};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Rows shown in the dashboard market snapshot
pub const SNAPSHOT_SIZE: usize = 4;

// ============================================================================
// Weather
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionView {
    pub kind: ConditionKind,
    pub label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDayView {
    pub day: String,
    pub temperature_celsius: i32,
    pub condition: ConditionView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherView {
    pub location: Location,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_celsius: i32,
    pub condition: ConditionView,
    pub humidity_percent: i32,
    pub wind_kmh: i32,
    pub forecast: Vec<ForecastDayView>,
    pub advisory: String,
}

/// Localized weather widget for one location
pub async fn get_weather(
    State(state): State<AppState>,
    Path(location): Path<String>,
    AppQuery(query): AppQuery<LangQuery>,
) -> AppResult<Json<WeatherView>> {
    let location: Location = location
        .parse()
        .map_err(|_| AppError::NotFound(format!("Location {}", location)))?;
    let ctx = LocaleContext::new(query.language()?, location);
    let catalogs = &state.catalogs;
    let condition = |kind: ConditionKind| ConditionView {
        kind,
        label: catalogs.t(&ctx, kind.label_key()),
    };

    let report = weather_report(location);
    let forecast = report
        .forecast
        .iter()
        .map(|day| ForecastDayView {
            day: catalogs.t(&ctx, &day.day_key),
            temperature_celsius: day.temperature_celsius,
            condition: condition(day.condition),
        })
        .collect();

    Ok(Json(WeatherView {
        location,
        city: catalogs.t(&ctx, &report.current.city_key),
        latitude: report.coordinates.latitude,
        longitude: report.coordinates.longitude,
        temperature_celsius: report.current.temperature_celsius,
        condition: condition(report.current.condition),
        humidity_percent: report.current.humidity_percent,
        wind_kmh: report.current.wind_kmh,
        forecast,
        advisory: catalogs.t(&ctx, &report.advisory_key),
    }))
}

// ============================================================================
// Location
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NearestLocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestLocationView {
    pub location: Location,
    pub city: String,
    pub distance_km: f64,
    /// Toast shown after the location was set
    pub title: String,
    pub description: String,
}

/// Snap device coordinates to the closest supported location
pub async fn get_nearest_location(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<NearestLocationQuery>,
) -> AppResult<Json<NearestLocationView>> {
    let language = parse_language(query.lang.as_deref())?;
    if !(-90.0..=90.0).contains(&query.latitude) || !(-180.0..=180.0).contains(&query.longitude) {
        return Err(AppError::bad_request(
            "Coordinates are out of range",
            "notifications.locationError.description",
        ));
    }

    let position = GeoCoordinates::new(query.latitude, query.longitude);
    let location = nearest_location(&position);
    let ctx = LocaleContext::new(language, location);
    let city = state.catalogs.t(&ctx, location.city_key());

    tracing::debug!(%location, "Resolved nearest location");

    Ok(Json(NearestLocationView {
        location,
        distance_km: position.distance_km(&location.coordinates()),
        title: state.catalogs.t(&ctx, "notifications.locationSuccess.title"),
        description: state.catalogs.resolve(
            &ctx,
            "notifications.locationSuccess.description",
            &[MessageArg::new("location", &city)],
        ),
        city,
    }))
}

// ============================================================================
// Market prices
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MarketPricesQuery {
    /// Crop name; absent or `all` lists every crop
    pub crop: Option<String>,
    pub search: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPriceRow {
    #[serde(flatten)]
    pub price: MandiPrice,
    pub crop_label: String,
    /// Highest quote for this crop across all mandis
    pub is_highest: bool,
}

fn price_rows(
    state: &AppState,
    ctx: &LocaleContext,
    rows: Vec<MandiPrice>,
) -> Vec<MarketPriceRow> {
    let highest = highest_price_by_crop(&mandi_prices());
    rows.into_iter()
        .map(|price| MarketPriceRow {
            crop_label: state.catalogs.t(ctx, &format!("crops.{}", price.crop)),
            is_highest: highest.get(&price.crop).map(|h| h.id) == Some(price.id),
            price,
        })
        .collect()
}

/// Filterable mandi price table
pub async fn list_market_prices(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MarketPricesQuery>,
) -> AppResult<Json<Vec<MarketPriceRow>>> {
    let ctx = LocaleContext::with_language(parse_language(query.lang.as_deref())?);
    let crop = query
        .crop
        .as_deref()
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
    let rows = filter_prices(&mandi_prices(), crop, query.search.as_deref().unwrap_or(""));

    Ok(Json(price_rows(&state, &ctx, rows)))
}

/// Highest quotes for the dashboard snapshot card
pub async fn get_market_snapshot(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LangQuery>,
) -> AppResult<Json<Vec<MarketPriceRow>>> {
    let ctx = LocaleContext::with_language(query.language()?);
    let rows = top_prices(&mandi_prices(), SNAPSHOT_SIZE);
    Ok(Json(price_rows(&state, &ctx, rows)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointView {
    pub label: String,
    pub days_ago: u32,
    pub prices: BTreeMap<String, Decimal>,
}

/// Weekly price trend series
pub async fn get_market_trends(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LangQuery>,
) -> AppResult<Json<Vec<TrendPointView>>> {
    let ctx = LocaleContext::with_language(query.language()?);
    let points = price_trends()
        .into_iter()
        .map(|point| TrendPointView {
            label: state.catalogs.resolve(
                &ctx,
                point.label_key(),
                &[MessageArg::new("count", point.days_ago)],
            ),
            days_ago: point.days_ago,
            prices: point.prices,
        })
        .collect();
    Ok(Json(points))
}
