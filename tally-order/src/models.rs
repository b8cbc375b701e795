use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fully loaded order as handed over by the order subsystem.
///
/// Monetary fields the subsystem leaves unset default to zero. The currency
/// code has no default: a document without one is not treated as an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    /// Human-facing order number, used for log context only
    #[serde(default)]
    pub increment_id: Option<String>,

    pub order_currency_code: String,

    #[serde(default)]
    pub base_grand_total: Decimal,

    #[serde(default)]
    pub grand_total: Decimal,

    #[serde(default)]
    pub subtotal: Decimal,

    #[serde(default)]
    pub tax_amount: Decimal,

    #[serde(default)]
    pub shipping_amount: Decimal,

    #[serde(default)]
    pub shipping_incl_tax: Decimal,

    /// Stored signed; orders usually carry discounts as negative figures
    #[serde(default)]
    pub discount_amount: Decimal,

    #[serde(default)]
    pub shipping_discount_amount: Decimal,

    #[serde(default)]
    pub discount_description: Option<String>,

    #[serde(default)]
    pub extension_attributes: OrderExtension,
}

impl OrderRecord {
    pub fn new(order_currency_code: impl Into<String>) -> Self {
        Self {
            increment_id: None,
            order_currency_code: order_currency_code.into(),
            base_grand_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            shipping_amount: Decimal::ZERO,
            shipping_incl_tax: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            shipping_discount_amount: Decimal::ZERO,
            discount_description: None,
            extension_attributes: OrderExtension::default(),
        }
    }

    /// Order-level tax lines; an absent collection reads as empty
    pub fn applied_taxes(&self) -> &[AppliedTaxLine] {
        self.extension_attributes.applied_taxes.as_deref().unwrap_or(&[])
    }

    /// Item- and shipping-scoped tax applications; an absent collection reads as empty
    pub fn item_applied_taxes(&self) -> &[ItemAppliedTax] {
        self.extension_attributes
            .item_applied_taxes
            .as_deref()
            .unwrap_or(&[])
    }
}

/// Tax breakdowns supplied alongside the core order record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderExtension {
    #[serde(default)]
    pub applied_taxes: Option<Vec<AppliedTaxLine>>,

    #[serde(default)]
    pub item_applied_taxes: Option<Vec<ItemAppliedTax>>,
}

/// A single computed tax line
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppliedTaxLine {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub percent: Option<Decimal>,

    #[serde(default)]
    pub amount: Decimal,
}

impl AppliedTaxLine {
    pub fn new(title: impl Into<String>, percent: Option<Decimal>, amount: Decimal) -> Self {
        Self {
            title: title.into(),
            percent,
            amount,
        }
    }

    /// A line the tax engine left blank: no title, no percent, no amount
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.percent.is_none() && self.amount.is_zero()
    }
}

/// Taxes applied to one item or to the shipping charge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemAppliedTax {
    /// Discriminator: "shipping" for shipping taxes, anything else for items
    #[serde(rename = "type")]
    pub tax_type: String,

    #[serde(default)]
    pub item_id: Option<i64>,

    #[serde(default)]
    pub applied_taxes: Option<Vec<AppliedTaxLine>>,
}

impl ItemAppliedTax {
    pub fn new(tax_type: impl Into<String>, applied_taxes: Vec<AppliedTaxLine>) -> Self {
        Self {
            tax_type: tax_type.into(),
            item_id: None,
            applied_taxes: Some(applied_taxes),
        }
    }

    pub fn lines(&self) -> &[AppliedTaxLine] {
        self.applied_taxes.as_deref().unwrap_or(&[])
    }
}
