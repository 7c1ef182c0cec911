//! Browser tests for the exported bindings. Run with `wasm-pack test`.

#![cfg(target_arch = "wasm32")]

use agripredict_wasm::{languages_json, validate_profit_form, DashboardSession};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_unknown_language_throws() {
    let mut session = DashboardSession::new().unwrap();
    assert!(session.set_language("fr").is_err());
    assert_eq!(session.language(), "en");
}

#[wasm_bindgen_test]
fn test_unknown_location_throws() {
    let mut session = DashboardSession::new().unwrap();
    assert!(session.set_location("Pune").is_err());
    assert_eq!(session.location(), "Delhi");
}

#[wasm_bindgen_test]
fn test_malformed_params_throw() {
    let session = DashboardSession::new().unwrap();
    assert!(session.t("nav.dashboard", Some("[1]".to_string())).is_err());
}

#[wasm_bindgen_test]
fn test_profit_form_with_blank_cost() {
    let errors = validate_profit_form(
        r#"{"cropType":"Wheat","productionCostPerUnit":"","expectedYield":40,
            "currentMarketData":"Prices steady this week"}"#,
    )
    .unwrap();
    assert_eq!(
        errors,
        r#"{"productionCostPerUnit":"Cost must be a positive number."}"#
    );
    assert!(validate_profit_form("{").is_err());
}

#[wasm_bindgen_test]
fn test_notifications_json_rejects_bad_timestamp() {
    let session = DashboardSession::new().unwrap();
    assert!(session.notifications_json(f64::MAX).is_err());
    assert!(session.notifications_json(1_721_728_800_000.0).is_ok());
}

#[wasm_bindgen_test]
fn test_languages_json() {
    let json = languages_json().unwrap();
    assert!(json.starts_with(r#"[{"code":"en","name":"English"}"#));
}
