pub mod app_config;
pub mod formatter;
pub mod models;
pub mod resolver;
pub mod summary;

pub use app_config::FormatterConfig;
pub use formatter::OrderMonetarySummaryFormatter;
pub use models::{AppliedTaxLine, ItemAppliedTax, OrderExtension, OrderRecord};
pub use resolver::OrderTotalResolver;
pub use summary::{DiscountDetail, OrderMonetarySummary, ShippingHandling, TaxDetail};
pub use tally_shared::MoneyAmount;

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Failures that no caller input can cause, such as encoding a finished summary
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SummaryResult<T> = Result<T, SummaryError>;
