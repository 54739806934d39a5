use napi::Result as NapiResult;
use napi_derive::napi;

use grossup_core::fees::{self, FeeConfig, GrossUpInput};
use grossup_core::presentation::{self, Breakdown, Language};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn standard_config() -> NapiResult<FeeConfig> {
    FeeConfig::standard().map_err(to_napi_error)
}

fn parse_request(input_json: &str) -> NapiResult<GrossUpInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn parse_language(language: Option<String>) -> NapiResult<Language> {
    match language {
        Some(lang) => lang.parse().map_err(to_napi_error),
        None => Ok(Language::default()),
    }
}

// ---------------------------------------------------------------------------
// Fee solver
// ---------------------------------------------------------------------------

/// `{"net_profit": "100", "provider": "tabby", "include_settlement": false}`
/// in, enveloped calculation result out.
#[napi]
pub fn compute_gross_up(input_json: String) -> NapiResult<String> {
    let config = standard_config()?;
    let input = parse_request(&input_json)?;
    let output = fees::calculate_gross_up(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn fee_config() -> NapiResult<String> {
    let config = standard_config()?;
    serde_json::to_string(&config).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

#[napi]
pub fn breakdown(input_json: String, language: Option<String>) -> NapiResult<String> {
    let config = standard_config()?;
    let input = parse_request(&input_json)?;
    let language = parse_language(language)?;
    let result = fees::compute(&input, &config);
    let view = Breakdown::from_result(&result, &config, language);
    serde_json::to_string(&view).map_err(to_napi_error)
}

#[napi]
pub fn share_message(input_json: String, language: Option<String>) -> NapiResult<String> {
    let config = standard_config()?;
    let input = parse_request(&input_json)?;
    let language = parse_language(language)?;
    let result = fees::compute(&input, &config);
    Ok(presentation::share_message(&result, language))
}
