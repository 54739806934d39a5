use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FeeError;

/// Buy-now-pay-later provider the sale is processed through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[default]
    Tabby,
    Tamara,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Tabby, Provider::Tamara];

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Tabby => "Tabby",
            Provider::Tamara => "Tamara",
        }
    }

    /// Weekday on which the provider processes its weekly settlement run.
    pub fn settlement_weekday(&self) -> Weekday {
        match self {
            Provider::Tabby => Weekday::Tue,
            Provider::Tamara => Weekday::Sat,
        }
    }

    /// First settlement day on or after `from`.
    pub fn next_settlement_date(&self, from: NaiveDate) -> NaiveDate {
        let target = self.settlement_weekday().num_days_from_monday() as i64;
        let current = from.weekday().num_days_from_monday() as i64;
        let ahead = (target - current).rem_euclid(7);
        from + Duration::days(ahead)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tabby" => Ok(Provider::Tabby),
            "tamara" => Ok(Provider::Tamara),
            other => Err(FeeError::InvalidInput {
                field: "provider".into(),
                reason: format!("Unknown provider '{other}'. Use: tabby, tamara"),
            }),
        }
    }
}
