//! Invoice math and lifecycle rules.
//!
//! All amounts are [`Money`] rounded to two decimal places. Status
//! transitions are validated here so every mutation path (handler, sweep,
//! test) enforces the same lifecycle.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::status::InvoiceStatus;
use crate::types::{Date, Money};

/// Decimal places for all stored currency amounts.
pub const MONEY_SCALE: u32 = 2;

/// Amount for a single line item: `quantity * rate`.
pub fn line_amount(quantity: Decimal, rate: Decimal) -> Money {
    (quantity * rate).round_dp(MONEY_SCALE)
}

/// Subtotal of an invoice: the sum of its line item amounts.
pub fn subtotal_of<I: IntoIterator<Item = Money>>(amounts: I) -> Money {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc + a)
        .round_dp(MONEY_SCALE)
}

/// Total due on an invoice: `subtotal + tax - discount`.
///
/// Rejects negative components and discounts larger than the amount they
/// discount, so the stored total can never be negative.
pub fn invoice_total(subtotal: Money, tax: Money, discount: Money) -> Result<Money, CoreError> {
    if subtotal < Decimal::ZERO || tax < Decimal::ZERO || discount < Decimal::ZERO {
        return Err(CoreError::Validation(
            "Invoice amounts must not be negative".into(),
        ));
    }
    let gross = subtotal + tax;
    if discount > gross {
        return Err(CoreError::Validation(format!(
            "Discount {discount} exceeds invoice amount {gross}"
        )));
    }
    Ok((gross - discount).round_dp(MONEY_SCALE))
}

/// Whether `to` is a legal next state from `from`.
///
/// ```text
/// DRAFT    -> SENT | CANCELLED
/// SENT     -> PAID | OVERDUE | CANCELLED
/// OVERDUE  -> PAID | CANCELLED
/// PAID     -> (terminal)
/// CANCELLED-> (terminal)
/// ```
pub fn can_transition(from: InvoiceStatus, to: InvoiceStatus) -> bool {
    use InvoiceStatus::*;
    matches!(
        (from, to),
        (Draft, Sent)
            | (Draft, Cancelled)
            | (Sent, Paid)
            | (Sent, Overdue)
            | (Sent, Cancelled)
            | (Overdue, Paid)
            | (Overdue, Cancelled)
    )
}

/// Validate a transition, returning a descriptive error when illegal.
pub fn check_transition(from: InvoiceStatus, to: InvoiceStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition(format!(
            "Invoice cannot move from {from} to {to}"
        )))
    }
}

/// An invoice is overdue when it is awaiting payment past its due date.
pub fn is_overdue(status: InvoiceStatus, due_date: Date, today: Date) -> bool {
    matches!(status, InvoiceStatus::Sent | InvoiceStatus::Overdue) && due_date < today
}

/// Days past the due date, or 0 when not overdue.
pub fn days_overdue(status: InvoiceStatus, due_date: Date, today: Date) -> i64 {
    if is_overdue(status, due_date, today) {
        (today - due_date).num_days()
    } else {
        0
    }
}

/// Render a sequential invoice number, e.g. `INV-2026-0042`.
pub fn format_invoice_number(year: i32, seq: i64) -> String {
    format!("INV-{year}-{seq:04}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_line_amount_rounds_to_cents() {
        // 3 units at 33.333 -> 99.999 -> 100.00 after rounding.
        let rate = Decimal::new(33_333, 3);
        assert_eq!(line_amount(d(3), rate), Decimal::new(10_000, 2));
    }

    #[test]
    fn test_subtotal_sums_items() {
        let subtotal = subtotal_of([d(100), d(250), Decimal::new(1_050, 2)]);
        assert_eq!(subtotal, Decimal::new(36_050, 2));
    }

    #[test]
    fn test_total_applies_tax_and_discount() {
        let total = invoice_total(d(1000), d(150), d(50)).unwrap();
        assert_eq!(total, d(1100));
    }

    #[test]
    fn test_total_rejects_negative_components() {
        assert!(invoice_total(d(-1), d(0), d(0)).is_err());
        assert!(invoice_total(d(100), d(-5), d(0)).is_err());
    }

    #[test]
    fn test_total_rejects_excess_discount() {
        let result = invoice_total(d(100), d(10), d(111));
        assert!(result.is_err(), "discount above subtotal+tax must fail");
        // Exactly equal is allowed and yields zero.
        assert_eq!(invoice_total(d(100), d(10), d(110)).unwrap(), d(0));
    }

    #[test]
    fn test_lifecycle_transitions() {
        use InvoiceStatus::*;
        assert!(can_transition(Draft, Sent));
        assert!(can_transition(Sent, Paid));
        assert!(can_transition(Sent, Overdue));
        assert!(can_transition(Overdue, Paid));
        assert!(!can_transition(Draft, Paid), "draft cannot be paid directly");
        assert!(!can_transition(Paid, Sent), "paid is terminal");
        assert!(!can_transition(Cancelled, Sent), "cancelled is terminal");
    }

    #[test]
    fn test_overdue_derivation() {
        let due = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        assert!(is_overdue(InvoiceStatus::Sent, due, today));
        assert_eq!(days_overdue(InvoiceStatus::Sent, due, today), 9);

        // Paid and draft invoices are never overdue, whatever the date.
        assert!(!is_overdue(InvoiceStatus::Paid, due, today));
        assert_eq!(days_overdue(InvoiceStatus::Draft, due, today), 0);

        // Not yet past due.
        assert!(!is_overdue(InvoiceStatus::Sent, today, due));
    }

    #[test]
    fn test_invoice_number_format() {
        assert_eq!(format_invoice_number(2026, 42), "INV-2026-0042");
        assert_eq!(format_invoice_number(2026, 12345), "INV-2026-12345");
    }
}
