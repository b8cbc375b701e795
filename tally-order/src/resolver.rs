use crate::formatter::OrderMonetarySummaryFormatter;
use crate::models::OrderRecord;
use crate::summary::OrderMonetarySummary;
use crate::{SummaryError, SummaryResult};
use serde::Deserialize;
use serde_json::Value;

const MODEL_KEY: &str = "model";

/// Field resolver for order totals.
///
/// The query framework passes a loosely typed parent value; the loaded order
/// travels under its `"model"` key.
#[derive(Debug, Clone, Default)]
pub struct OrderTotalResolver {
    formatter: OrderMonetarySummaryFormatter,
}

impl OrderTotalResolver {
    pub fn new(formatter: OrderMonetarySummaryFormatter) -> Self {
        Self { formatter }
    }

    pub fn resolve(&self, parent: &Value) -> SummaryResult<OrderMonetarySummary> {
        self.resolve_model(parent.get(MODEL_KEY))
    }

    pub fn resolve_model(&self, model: Option<&Value>) -> SummaryResult<OrderMonetarySummary> {
        let model = match model {
            Some(value) if !value.is_null() => value,
            _ => {
                tracing::warn!("Order totals requested without a model");
                return Err(SummaryError::InvalidInput(
                    "\"model\" value should be specified".to_string(),
                ));
            }
        };

        let order = OrderRecord::deserialize(model).map_err(|e| {
            tracing::warn!("Order totals model is not an order: {}", e);
            SummaryError::InvalidInput(format!("\"model\" value is not an order: {}", e))
        })?;

        self.formatter.format(Some(&order))
    }

    /// Resolve into the response value the framework embeds in its reply
    pub fn resolve_value(&self, parent: &Value) -> SummaryResult<Value> {
        let summary = self.resolve(parent)?;
        serde_json::to_value(summary).map_err(|e| SummaryError::Internal(e.to_string()))
    }
}
