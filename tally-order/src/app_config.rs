use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub formatter: FormatterConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FormatterConfig {
    /// Label used for discounts when the order carries no description
    #[serde(default = "default_discount_label")]
    pub default_discount_label: String,

    /// Item-applied-tax discriminator that marks shipping taxes
    #[serde(default = "default_shipping_tax_type")]
    pub shipping_tax_type: String,
}

fn default_discount_label() -> String { "Discount".to_string() }

fn default_shipping_tax_type() -> String { "shipping".to_string() }

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            default_discount_label: default_discount_label(),
            shipping_tax_type: default_shipping_tax_type(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `TALLY__FORMATTER__DEFAULT_DISCOUNT_LABEL=Rabatt`
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
