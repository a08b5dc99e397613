//! Ledger configuration

use serde::Deserialize;

use core_kernel::{CoreError, Currency};
use crate::settlement::SettlementOptions;
use crate::split::SplitOptions;

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Ledger configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Currency for newly created groups
    pub currency: Currency,
    /// Log level filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Reject percentage/dynamic splits whose details do not add up
    pub strict_split_totals: bool,
    /// Reject settlements larger than the debt instead of capping them
    pub reject_overpayment: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            strict_split_totals: false,
            reject_overpayment: false,
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from `LEDGER_*` environment variables
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::Environment::with_prefix("LEDGER").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CoreError::Configuration(e.to_string()))
    }

    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            strict_totals: self.strict_split_totals,
        }
    }

    pub fn settlement_options(&self) -> SettlementOptions {
        SettlementOptions {
            reject_overpayment: self.reject_overpayment,
        }
    }
}
