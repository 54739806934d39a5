use clap::Args;
use serde_json::{json, Value};

use grossup_core::fees::{calculate_gross_up, FeeConfig, GrossUpInput, Provider};
use grossup_core::presentation::{share_message, Breakdown, Language, PreferenceStore};

use crate::input;

/// The three solver inputs, shared by `quote` and `share`
#[derive(Args, Debug)]
pub struct GrossUpArgs {
    /// Net profit the merchant wants to keep (free text; invalid or negative becomes 0)
    #[arg(long, alias = "price", allow_hyphen_values = true)]
    pub net_profit: Option<String>,

    /// Provider whose settlement fee applies below the threshold
    #[arg(long, default_value = "tabby")]
    pub provider: Provider,

    /// Include the provider settlement fee (first sale of the settlement cycle)
    #[arg(long)]
    pub include_settlement: bool,

    /// Path to JSON request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Display language; defaults to the saved preference
    #[arg(long)]
    pub lang: Option<Language>,
}

/// Arguments for a gross-up quote
#[derive(Args, Debug)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub request: GrossUpArgs,
}

/// Arguments for the share message
#[derive(Args, Debug)]
pub struct ShareArgs {
    #[command(flatten)]
    pub request: GrossUpArgs,
}

fn resolve_request(args: &GrossUpArgs) -> Result<GrossUpInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::read_json(path);
    }
    if let Some(ref raw) = args.net_profit {
        return Ok(GrossUpInput::from_raw(raw, args.provider, args.include_settlement));
    }
    if let Some(request) = input::read_stdin::<GrossUpInput>()? {
        return Ok(request);
    }
    Err("--net-profit <amount>, --input <file.json> or stdin required".into())
}

fn resolve_language(
    args: &GrossUpArgs,
    store: &impl PreferenceStore,
) -> Result<Language, Box<dyn std::error::Error>> {
    match args.lang {
        Some(lang) => Ok(lang),
        None => Ok(store.load()?.language),
    }
}

pub fn run_quote(
    args: QuoteArgs,
    config: &FeeConfig,
    store: &impl PreferenceStore,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args.request)?;
    let language = resolve_language(&args.request, store)?;

    let output = calculate_gross_up(&request, config)?;
    let breakdown = Breakdown::from_result(&output.result, config, language);

    let mut value = serde_json::to_value(&output)?;
    if let Value::Object(ref mut map) = value {
        map.insert("breakdown".into(), serde_json::to_value(&breakdown)?);
    }
    Ok(value)
}

pub fn run_share(
    args: ShareArgs,
    config: &FeeConfig,
    store: &impl PreferenceStore,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args.request)?;
    let language = resolve_language(&args.request, store)?;

    let output = calculate_gross_up(&request, config)?;
    let message = share_message(&output.result, language);
    let url = share_url(&message);

    Ok(json!({
        "language": language,
        "message": message,
        "url": url,
    }))
}

/// WhatsApp share link carrying `message` as pre-filled text.
pub fn share_url(message: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    // form encoding uses '+' for spaces; the share target expects %20
    format!("https://wa.me/?text={}", encoded.replace('+', "%20"))
}
