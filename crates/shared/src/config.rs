//! Application configuration management.
//!
//! Every section carries defaults so a bare environment yields the same
//! values a fresh editing session starts with.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::money::CurrencyFormat;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for new proposals.
    pub proposal: ProposalDefaults,
    /// The performing party filled into new proposals.
    pub performer: PerformerDefaults,
    /// Electrical requirements printed in the contract.
    pub electrical: ElectricalDefaults,
    /// Currency presentation.
    pub currency: CurrencyFormat,
    /// History file location.
    pub history: HistoryConfig,
}

/// Proposal defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProposalDefaults {
    /// Profit margin percentage.
    pub margin_pct: Decimal,
    /// Days the quote stays valid.
    pub validity_days: u32,
    /// Payment terms text.
    pub payment_terms: String,
    /// Prefix of generated proposal numbers.
    pub number_prefix: String,
    /// Penalty for breach of contract, in percent of the fee.
    pub penalty_pct: u32,
    /// Court jurisdiction named in the contract.
    pub jurisdiction: String,
    /// What the band provides.
    pub band_responsibility: String,
    /// What the contracting party provides.
    pub contractor_responsibility: String,
}

impl Default for ProposalDefaults {
    fn default() -> Self {
        Self {
            margin_pct: Decimal::from(30),
            validity_days: 7,
            payment_terms: "50% na assinatura + 50% no dia do evento".to_string(),
            number_prefix: "RB".to_string(),
            penalty_pct: 50,
            jurisdiction: "Comarca de Jundiaí/SP".to_string(),
            band_responsibility: "Sonorização e iluminação do show".to_string(),
            contractor_responsibility: "Som mecânico para a festa".to_string(),
        }
    }
}

/// Performing party defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerformerDefaults {
    /// Registered company name.
    pub legal_name: String,
    /// Company tax identifier.
    pub tax_id: String,
}

impl Default for PerformerDefaults {
    fn default() -> Self {
        Self {
            legal_name: "Aditivo Media Management".to_string(),
            tax_id: "40.157.297/0001-18".to_string(),
        }
    }
}

/// Electrical requirement defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElectricalDefaults {
    /// Outlet rating.
    pub outlet: String,
    /// Supply voltage.
    pub voltage: String,
    /// Grounding requirement.
    pub grounding: String,
    /// Maximum distance from the power source to the stage.
    pub max_distance: String,
}

impl Default for ElectricalDefaults {
    fn default() -> Self {
        Self {
            outlet: "20A".to_string(),
            voltage: "220V".to_string(),
            grounding: "Adequado, conforme NBR 5410".to_string(),
            max_distance: "10 metros".to_string(),
        }
    }
}

/// History file configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Path of the exported history document.
    pub path: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: "gigflow_history.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GIGFLOW").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
