use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};

use grossup_core::fees::Provider;

/// Arguments for the settlement calendar
#[derive(Args, Debug)]
pub struct SettlementDateArgs {
    /// Provider to look up (both when omitted)
    #[arg(long)]
    pub provider: Option<Provider>,

    /// Start date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub from: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct SettlementDateOutput {
    provider: Provider,
    settlement_weekday: String,
    next_settlement_date: NaiveDate,
    days_until: i64,
}

fn settlement_for(provider: Provider, from: NaiveDate) -> SettlementDateOutput {
    let next = provider.next_settlement_date(from);
    SettlementDateOutput {
        provider,
        settlement_weekday: provider.settlement_weekday().to_string(),
        next_settlement_date: next,
        days_until: (next - from).num_days(),
    }
}

pub fn run_settlement_date(args: SettlementDateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let from = args.from.unwrap_or_else(|| Local::now().date_naive());

    match args.provider {
        Some(provider) => Ok(json!({ "result": settlement_for(provider, from) })),
        None => {
            let results: Vec<SettlementDateOutput> = Provider::ALL
                .iter()
                .map(|p| settlement_for(*p, from))
                .collect();
            Ok(json!({ "results": results }))
        }
    }
}
