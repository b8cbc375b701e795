use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::MoneyAmount;

/// Monetary totals of a single order, shaped for the query response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderMonetarySummary {
    pub base_grand_total: MoneyAmount,
    pub grand_total: MoneyAmount,
    pub subtotal: MoneyAmount,
    pub total_tax: MoneyAmount,
    pub taxes: Vec<TaxDetail>,
    pub discounts: Vec<DiscountDetail>,
    pub total_shipping: MoneyAmount,
    pub shipping_handling: ShippingHandling,
}

impl OrderMonetarySummary {
    /// Every money figure in the summary, nested ones included
    pub fn money_amounts(&self) -> Vec<&MoneyAmount> {
        let mut amounts = vec![
            &self.base_grand_total,
            &self.grand_total,
            &self.subtotal,
            &self.total_tax,
            &self.total_shipping,
            &self.shipping_handling.amount_excluding_tax,
            &self.shipping_handling.amount_including_tax,
            &self.shipping_handling.total_amount,
        ];

        amounts.extend(self.taxes.iter().map(|t| &t.amount));
        amounts.extend(self.discounts.iter().map(|d| &d.amount));
        amounts.extend(self.shipping_handling.taxes.iter().map(|t| &t.amount));
        amounts.extend(self.shipping_handling.discounts.iter().map(|d| &d.amount));
        amounts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingHandling {
    pub amount_excluding_tax: MoneyAmount,
    pub amount_including_tax: MoneyAmount,
    pub total_amount: MoneyAmount,
    pub taxes: Vec<TaxDetail>,
    pub discounts: Vec<DiscountDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxDetail {
    pub title: String,
    pub amount: MoneyAmount,
    /// Tax percent; serialized as null when the source supplied none
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountDetail {
    pub label: String,
    pub amount: MoneyAmount,
}
