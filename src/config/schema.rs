use serde::{Deserialize, Serialize};

use crate::tariff::RateTable;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prefix for formatted amounts (default: "$")
    #[serde(default)]
    pub currency_symbol: Option<String>,

    /// Overrides for the published tariff; omitted sections keep their defaults
    #[serde(default)]
    pub rates: Option<RateTable>,
}

impl Config {
    pub fn effective_rates(&self) -> RateTable {
        self.rates.clone().unwrap_or_default()
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }
}
