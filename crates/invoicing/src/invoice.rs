use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use quickbill_core::Money;

/// Flat discount applied to every invoice, in percent.
pub const DISCOUNT_PERCENT: u64 = 10;

/// One product-and-quantity entry within an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    /// `quantity × unit_price`.
    pub fn total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// A composed invoice.
///
/// Quantities are taken at face value: there is no stock concept to check
/// them against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    customer: String,
    date: NaiveDate,
    lines: Vec<LineItem>,
}

impl Invoice {
    pub fn new(customer: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            customer: customer.into(),
            date,
            lines: Vec::new(),
        }
    }

    pub fn push_line(&mut self, name: impl Into<String>, unit_price: Money, quantity: u32) {
        self.lines.push(LineItem {
            name: name.into(),
            unit_price,
            quantity,
        });
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::ZERO, |acc, line| acc.saturating_add(line.total()))
    }

    /// Flat discount, rounded half-up to the cent.
    pub fn discount(&self) -> Money {
        self.subtotal().percent(DISCOUNT_PERCENT)
    }

    /// Subtotal minus discount, the final billed amount.
    pub fn grand_total(&self) -> Money {
        self.subtotal().saturating_sub(self.discount())
    }
}
