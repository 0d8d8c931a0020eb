//! Checks run on form submit, before the browser posts the form.
//!
//! Both guards read the hidden clean fields again instead of trusting the
//! formatter, since those fields can be filled without any input event.

use thiserror::Error;

use crate::amount::{parse_js_int, BoundedAmount};
use crate::locale::format_id;

/// Attribute text of one hidden field at submit time. A missing field reads
/// as the default (all empty).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldReading {
    pub value: String,
    pub min: String,
    pub max: String,
}

impl FieldReading {
    pub fn new(value: impl Into<String>, min: impl Into<String>, max: impl Into<String>) -> Self {
        FieldReading {
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    fn clean_value(&self) -> i64 {
        parse_js_int(&self.value).unwrap_or(0)
    }
}

impl From<&BoundedAmount> for FieldReading {
    fn from(amount: &BoundedAmount) -> Self {
        let bounds = amount.bounds();
        FieldReading::new(amount.raw(), bounds.min.to_string(), bounds.max.to_string())
    }
}

/// Why a submission was cancelled. `Display` is the alert text shown to the
/// user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Nominal Pengeluaran harus antara {} dan {}.", bound_text(.min), bound_text(.max))]
    ExpenseOutOfRange { min: Option<i64>, max: Option<i64> },
    #[error("Nominal Modal dan Jual minimal harus {}.", bound_text(.min))]
    IncomeBelowMinimum { min: Option<i64> },
}

// An undeclared bound never triggers a rejection on its own, but the
// message still names both sides.
fn bound_text(bound: &Option<i64>) -> String {
    bound.map(format_id).unwrap_or_else(|| "NaN".to_string())
}

pub fn check_expense(nominal: &FieldReading) -> Result<(), Rejection> {
    let value = nominal.clean_value();
    let min = parse_js_int(&nominal.min);
    let max = parse_js_int(&nominal.max);

    let below = min.map_or(false, |min| value < min);
    let above = max.map_or(false, |max| value > max);
    if below || above {
        return Err(Rejection::ExpenseOutOfRange { min, max });
    }
    Ok(())
}

/// The purchase-cost minimum applies to both fields; the sale price's own
/// attributes are ignored.
pub fn check_income(modal: &FieldReading, jual: &FieldReading) -> Result<(), Rejection> {
    let purchase = modal.clean_value();
    let sale = jual.clean_value();
    let min = parse_js_int(&modal.min);

    if let Some(floor) = min {
        if purchase < floor || sale < floor {
            return Err(Rejection::IncomeBelowMinimum { min });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_outside_bounds_is_blocked() {
        let reading = FieldReading::new("0", "1000", "200000");
        let err = check_expense(&reading).unwrap_err();
        assert_eq!(
            err,
            Rejection::ExpenseOutOfRange {
                min: Some(1000),
                max: Some(200_000)
            }
        );
        assert_eq!(
            err.to_string(),
            "Nominal Pengeluaran harus antara 1.000 dan 200.000."
        );

        let too_high = FieldReading::new("200001", "1000", "200000");
        assert!(check_expense(&too_high).is_err());
    }

    #[test]
    fn expense_inside_bounds_is_allowed() {
        assert!(check_expense(&FieldReading::new("1000", "1000", "200000")).is_ok());
        assert!(check_expense(&FieldReading::new("200000", "1000", "200000")).is_ok());
    }

    #[test]
    fn expense_unparseable_value_counts_as_zero() {
        assert!(check_expense(&FieldReading::new("", "1000", "200000")).is_err());
        assert!(check_expense(&FieldReading::new("abc", "0", "200000")).is_ok());
    }

    #[test]
    fn expense_missing_bound_only_checks_the_other_side() {
        let no_min = FieldReading::new("5", "", "200000");
        assert!(check_expense(&no_min).is_ok());

        let no_max_large = FieldReading::new("999999", "1000", "");
        assert!(check_expense(&no_max_large).is_ok());

        let no_max_small = FieldReading::new("5", "1000", "");
        let err = check_expense(&no_max_small).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Nominal Pengeluaran harus antara 1.000 dan NaN."
        );

        assert!(check_expense(&FieldReading::default()).is_ok());
    }

    #[test]
    fn income_purchase_below_min_is_blocked_regardless_of_sale() {
        let modal = FieldReading::new("500", "1000", "");
        for sale in ["0", "1000", "999999999"] {
            let jual = FieldReading::new(sale, "", "");
            let err = check_income(&modal, &jual).unwrap_err();
            assert_eq!(err.to_string(), "Nominal Modal dan Jual minimal harus 1.000.");
        }
    }

    #[test]
    fn income_sale_below_min_is_blocked() {
        let modal = FieldReading::new("5000", "1000", "");
        let jual = FieldReading::new("", "5000", "");
        assert_eq!(
            check_income(&modal, &jual),
            Err(Rejection::IncomeBelowMinimum { min: Some(1000) })
        );
    }

    #[test]
    fn income_at_or_above_min_is_allowed() {
        let modal = FieldReading::new("1000", "1000", "");
        let jual = FieldReading::new("25000", "", "");
        assert!(check_income(&modal, &jual).is_ok());
    }

    #[test]
    fn reading_from_a_typed_amount() {
        use crate::amount::{Bounds, Role};

        let bounds = Bounds { min: 1000, max: 200_000 };
        let empty = BoundedAmount::new(Role::Expense, bounds);
        assert_eq!(FieldReading::from(&empty), FieldReading::new("0", "1000", "200000"));
        assert!(check_expense(&FieldReading::from(&empty)).is_err());

        let typed = BoundedAmount::from_input(Role::Expense, bounds, "5.000");
        assert!(check_expense(&FieldReading::from(&typed)).is_ok());
    }

    #[test]
    fn income_without_min_never_blocks() {
        let modal = FieldReading::new("", "", "");
        let jual = FieldReading::new("", "", "");
        assert!(check_income(&modal, &jual).is_ok());
    }
}
