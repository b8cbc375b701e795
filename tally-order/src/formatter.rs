use crate::app_config::FormatterConfig;
use crate::models::{AppliedTaxLine, ItemAppliedTax, OrderRecord};
use crate::summary::{DiscountDetail, OrderMonetarySummary, ShippingHandling, TaxDetail};
use crate::{SummaryError, SummaryResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tally_shared::MoneyAmount;

/// Reshapes a loaded order into its monetary summary
#[derive(Debug, Clone, Default)]
pub struct OrderMonetarySummaryFormatter {
    config: FormatterConfig,
}

impl OrderMonetarySummaryFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// Format an order, failing when none was supplied
    pub fn format(&self, order: Option<&OrderRecord>) -> SummaryResult<OrderMonetarySummary> {
        let order = order.ok_or_else(|| {
            tracing::warn!("Order summary requested without an order");
            SummaryError::InvalidInput("order record is required".to_string())
        })?;

        Ok(self.summarize(order))
    }

    /// Build the summary for an order that is known to be present
    pub fn summarize(&self, order: &OrderRecord) -> OrderMonetarySummary {
        let currency = order.order_currency_code.as_str();
        let money = |value: Decimal| MoneyAmount::new(value, currency);

        let shipping_taxes = self.shipping_tax_groups(order.item_applied_taxes());

        let summary = OrderMonetarySummary {
            base_grand_total: money(order.base_grand_total),
            grand_total: money(order.grand_total),
            subtotal: money(order.subtotal),
            total_tax: money(order.tax_amount),
            taxes: order_tax_details(order.applied_taxes(), currency),
            discounts: self.discount_details(order, order.discount_amount),
            total_shipping: money(order.shipping_amount),
            shipping_handling: ShippingHandling {
                amount_excluding_tax: money(order.shipping_amount),
                amount_including_tax: money(order.shipping_incl_tax),
                total_amount: money(order.shipping_amount),
                taxes: shipping_tax_details(&shipping_taxes, currency),
                discounts: self.discount_details(order, order.shipping_discount_amount),
            },
        };

        tracing::debug!(
            order = order.increment_id.as_deref().unwrap_or("-"),
            currency,
            taxes = summary.taxes.len(),
            shipping_taxes = summary.shipping_handling.taxes.len(),
            discounts = summary.discounts.len(),
            "Formatted order summary"
        );

        summary
    }

    /// Tax lines of shipping entries, grouped per entry and keyed by title.
    ///
    /// A repeated title within one entry replaces the earlier line but keeps
    /// the position where the title first appeared.
    fn shipping_tax_groups<'a>(
        &self,
        item_taxes: &'a [ItemAppliedTax],
    ) -> Vec<Vec<&'a AppliedTaxLine>> {
        item_taxes
            .iter()
            .filter(|entry| entry.tax_type == self.config.shipping_tax_type)
            .map(|entry| {
                let mut lines: Vec<&AppliedTaxLine> = Vec::new();
                let mut by_title: HashMap<&str, usize> = HashMap::new();

                for line in entry.lines() {
                    match by_title.get(line.title.as_str()) {
                        Some(&index) => lines[index] = line,
                        None => {
                            by_title.insert(line.title.as_str(), lines.len());
                            lines.push(line);
                        }
                    }
                }
                lines
            })
            .collect()
    }

    /// Zero or one discount entry for the given amount
    fn discount_details(&self, order: &OrderRecord, amount: Decimal) -> Vec<DiscountDetail> {
        if order.discount_description.is_none() && amount.is_zero() {
            return Vec::new();
        }

        let label = order
            .discount_description
            .clone()
            .unwrap_or_else(|| self.config.default_discount_label.clone());

        vec![DiscountDetail {
            label,
            amount: MoneyAmount::new(amount.abs(), order.order_currency_code.as_str()),
        }]
    }
}

// Order-level taxes report a missing percent as a null rate
fn order_tax_details(lines: &[AppliedTaxLine], currency: &str) -> Vec<TaxDetail> {
    lines
        .iter()
        .map(|line| TaxDetail {
            title: line.title.clone(),
            amount: MoneyAmount::new(line.amount, currency),
            rate: if line.is_empty() { None } else { line.percent },
        })
        .collect()
}

// Shipping taxes report a missing percent as zero; an empty line gets no rate
fn shipping_tax_details(groups: &[Vec<&AppliedTaxLine>], currency: &str) -> Vec<TaxDetail> {
    groups
        .iter()
        .flatten()
        .map(|line| TaxDetail {
            title: line.title.clone(),
            amount: MoneyAmount::new(line.amount, currency),
            rate: (!line.is_empty()).then(|| line.percent.unwrap_or(Decimal::ZERO)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn shipping_entry(lines: Vec<AppliedTaxLine>) -> ItemAppliedTax {
        ItemAppliedTax::new("shipping", lines)
    }

    #[test]
    fn test_absent_order_is_invalid_input() {
        let formatter = OrderMonetarySummaryFormatter::default();
        let result = formatter.format(None);

        assert!(matches!(result, Err(SummaryError::InvalidInput(_))));
    }

    #[test]
    fn test_repeated_shipping_title_keeps_first_position() {
        let formatter = OrderMonetarySummaryFormatter::default();
        let entries = vec![shipping_entry(vec![
            AppliedTaxLine::new("State", Some(dec!(4)), dec!(0.40)),
            AppliedTaxLine::new("City", Some(dec!(1)), dec!(0.10)),
            AppliedTaxLine::new("State", Some(dec!(5)), dec!(0.50)),
        ])];

        let groups = formatter.shipping_tax_groups(&entries);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][0].title, "State");
        assert_eq!(groups[0][0].amount, dec!(0.50));
        assert_eq!(groups[0][1].title, "City");
    }

    #[test]
    fn test_same_title_in_separate_entries_is_kept_twice() {
        let formatter = OrderMonetarySummaryFormatter::default();
        let entries = vec![
            shipping_entry(vec![AppliedTaxLine::new("ShipTax", Some(dec!(7)), dec!(1))]),
            ItemAppliedTax::new(
                "product",
                vec![AppliedTaxLine::new("VAT", Some(dec!(20)), dec!(3))],
            ),
            shipping_entry(vec![AppliedTaxLine::new("ShipTax", Some(dec!(7)), dec!(2))]),
        ];

        let details = shipping_tax_details(&formatter.shipping_tax_groups(&entries), "USD");

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].amount.value, dec!(1));
        assert_eq!(details[1].amount.value, dec!(2));
    }

    #[test]
    fn test_rate_defaults_differ_between_order_and_shipping() {
        let lines = vec![AppliedTaxLine::new("Levy", None, dec!(2))];

        let order_level = order_tax_details(&lines, "USD");
        let group: Vec<&AppliedTaxLine> = lines.iter().collect();
        let shipping_level = shipping_tax_details(&[group], "USD");

        assert_eq!(order_level[0].rate, None);
        assert_eq!(shipping_level[0].rate, Some(Decimal::ZERO));
    }

    #[test]
    fn test_empty_line_has_no_rate_on_either_path() {
        let lines = vec![AppliedTaxLine::default()];

        let order_level = order_tax_details(&lines, "USD");
        let group: Vec<&AppliedTaxLine> = lines.iter().collect();
        let shipping_level = shipping_tax_details(&[group], "USD");

        assert_eq!(order_level[0].rate, None);
        assert_eq!(shipping_level[0].rate, None);
        assert_eq!(shipping_level[0].amount.value, Decimal::ZERO);
    }

    #[test]
    fn test_custom_shipping_discriminator() {
        let formatter = OrderMonetarySummaryFormatter::new(FormatterConfig {
            shipping_tax_type: "freight".to_string(),
            ..FormatterConfig::default()
        });
        let entries = vec![
            shipping_entry(vec![AppliedTaxLine::new("ShipTax", Some(dec!(7)), dec!(1))]),
            ItemAppliedTax::new(
                "freight",
                vec![AppliedTaxLine::new("FreightTax", Some(dec!(3)), dec!(2))],
            ),
        ];

        let groups = formatter.shipping_tax_groups(&entries);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0][0].title, "FreightTax");
    }

    #[test]
    fn test_discount_uses_absolute_amount() {
        let formatter = OrderMonetarySummaryFormatter::default();
        let mut order = OrderRecord::new("USD");
        order.discount_amount = dec!(-15.00);

        let discounts = formatter.discount_details(&order, order.discount_amount);

        assert_eq!(discounts.len(), 1);
        assert_eq!(discounts[0].label, "Discount");
        assert_eq!(discounts[0].amount.value, dec!(15.00));
    }
}
