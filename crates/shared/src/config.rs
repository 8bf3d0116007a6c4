//! Application configuration management.

use serde::Deserialize;

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Approval workflow configuration.
    #[serde(default)]
    pub approval: ApprovalConfig,
    /// Journal entry numbering configuration.
    #[serde(default)]
    pub numbering: NumberingConfig,
    /// Currency label used on reports.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Approval workflow configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalConfig {
    /// Whether manual journal entries require a separate approval step
    /// before posting. Specialized posters bypass this.
    #[serde(default = "default_approval_required")]
    pub required: bool,
}

/// Journal entry numbering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NumberingConfig {
    /// Prefix for generated entry numbers.
    #[serde(default = "default_entry_prefix")]
    pub entry_prefix: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_approval_required() -> bool {
    true
}

fn default_entry_prefix() -> String {
    "JE".to_string()
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            required: default_approval_required(),
        }
    }
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            entry_prefix: default_entry_prefix(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            approval: ApprovalConfig::default(),
            numbering: NumberingConfig::default(),
            currency: default_currency(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERKIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
