pub mod config;
pub mod provider;
pub mod solver;

pub use config::{FeeConfig, ProviderSettlementFees};
pub use provider::Provider;
pub use solver::{
    calculate_gross_up, compute, parse_net_profit, CalculationResult, GrossUpInput,
    SettlementKind,
};
