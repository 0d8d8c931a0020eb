use serde::{Deserialize, Serialize};

use crate::locale::format_id;

pub const DEFAULT_MIN: i64 = 0;
pub const DEFAULT_MAX: i64 = 200_000;

/// What a monetary field is used for. Each role owns one visible marker and
/// one hidden companion field that carries the submitted integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Expense,
    PurchaseCost,
    SalePrice,
}

impl Role {
    /// Precedence order used by [`Role::infer`].
    pub const ALL: [Role; 3] = [Role::Expense, Role::PurchaseCost, Role::SalePrice];

    pub fn marker(self) -> &'static str {
        match self {
            Role::Expense => "nominal",
            Role::PurchaseCost => "modal",
            Role::SalePrice => "jual",
        }
    }

    pub fn hidden_id(self) -> &'static str {
        match self {
            Role::Expense => "nominal_clean",
            Role::PurchaseCost => "modal_clean",
            Role::SalePrice => "jual_clean",
        }
    }

    /// Picks the role from a visible field id. An id containing several
    /// markers resolves to the first one in [`Role::ALL`].
    pub fn infer(field_id: &str) -> Option<Role> {
        Self::ALL
            .into_iter()
            .find(|role| field_id.contains(role.marker()))
    }

    /// Only the expense amount is capped while typing; the income fields are
    /// checked at submit time.
    pub fn clamps_to_max(self) -> bool {
        matches!(self, Role::Expense)
    }
}

/// Integer prefix parse with `parseInt(s, 10)` semantics: leading
/// whitespace, an optional sign, then as many digits as present. Values past
/// the `i64` range saturate.
pub fn parse_js_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut acc: i64 = 0;
    for b in rest.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let digit = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        };
    }
    seen.then_some(acc)
}

/// Keeps ASCII digits only, like `value.replace(/\D/g, '')`.
pub fn strip_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl Bounds {
    /// Reads the `min`/`max` attribute text of a hidden field. Anything that
    /// does not parse, and a literal zero, falls back to `fallback`.
    pub fn from_attrs_or(min: &str, max: &str, fallback: Bounds) -> Self {
        let pick = |text: &str, default: i64| {
            parse_js_int(text)
                .filter(|v| *v != 0)
                .unwrap_or(default)
        };
        Bounds {
            min: pick(min, fallback.min),
            max: pick(max, fallback.max),
        }
    }

    pub fn from_attrs(min: &str, max: &str) -> Self {
        Self::from_attrs_or(min, max, Bounds::default())
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A monetary input as one value: the integer that gets submitted plus the
/// grouped text shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundedAmount {
    role: Role,
    bounds: Bounds,
    value: i64,
    empty: bool,
}

impl BoundedAmount {
    pub fn new(role: Role, bounds: Bounds) -> Self {
        BoundedAmount {
            role,
            bounds,
            value: 0,
            empty: true,
        }
    }

    pub fn from_input(role: Role, bounds: Bounds, raw: &str) -> Self {
        let digits = strip_digits(raw);
        let mut value = parse_js_int(&digits).unwrap_or(0);
        if role.clamps_to_max() && value > bounds.max {
            value = bounds.max.max(0);
        }
        BoundedAmount {
            role,
            bounds,
            value,
            empty: digits.is_empty(),
        }
    }

    pub fn update(&mut self, raw: &str) {
        *self = Self::from_input(self.role, self.bounds, raw);
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Text for the visible field. Empty input stays empty instead of `0`.
    pub fn display(&self) -> String {
        if self.empty {
            String::new()
        } else {
            format_id(self.value)
        }
    }

    /// Text for the hidden field, never grouped.
    pub fn raw(&self) -> String {
        self.value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: i64, max: i64) -> Bounds {
        Bounds { min, max }
    }

    #[test]
    fn infer_follows_marker_precedence() {
        assert_eq!(Role::infer("nominal"), Some(Role::Expense));
        assert_eq!(Role::infer("nominal_display"), Some(Role::Expense));
        assert_eq!(Role::infer("harga_modal"), Some(Role::PurchaseCost));
        assert_eq!(Role::infer("harga_jual"), Some(Role::SalePrice));
        assert_eq!(Role::infer("modal_jual"), Some(Role::PurchaseCost));
        assert_eq!(Role::infer("jual_nominal"), Some(Role::Expense));
        assert_eq!(Role::infer("catatan"), None);
    }

    #[test]
    fn hidden_companions() {
        assert_eq!(Role::Expense.hidden_id(), "nominal_clean");
        assert_eq!(Role::PurchaseCost.hidden_id(), "modal_clean");
        assert_eq!(Role::SalePrice.hidden_id(), "jual_clean");
    }

    #[test]
    fn parse_js_int_reads_leading_integer() {
        assert_eq!(parse_js_int("1500"), Some(1500));
        assert_eq!(parse_js_int("  42abc"), Some(42));
        assert_eq!(parse_js_int("-7"), Some(-7));
        assert_eq!(parse_js_int("+9"), Some(9));
        assert_eq!(parse_js_int("12.5"), Some(12));
        assert_eq!(parse_js_int(""), None);
        assert_eq!(parse_js_int("abc"), None);
        assert_eq!(parse_js_int("-"), None);
    }

    #[test]
    fn parse_js_int_saturates() {
        assert_eq!(parse_js_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_js_int("-99999999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn bounds_fall_back_to_defaults() {
        assert_eq!(Bounds::from_attrs("", ""), bounds(0, 200_000));
        assert_eq!(Bounds::from_attrs("abc", "x"), bounds(0, 200_000));
        assert_eq!(Bounds::from_attrs("1000", "500000"), bounds(1000, 500_000));
        // a declared max of zero is treated like a missing one
        assert_eq!(Bounds::from_attrs("0", "0"), bounds(0, 200_000));
    }

    #[test]
    fn expense_is_clamped_to_max() {
        let amount = BoundedAmount::from_input(Role::Expense, bounds(1000, 200_000), "1234567");
        assert_eq!(amount.value(), 200_000);
        assert_eq!(amount.raw(), "200000");
        assert_eq!(amount.display(), "200.000");
    }

    #[test]
    fn income_roles_are_not_clamped() {
        for role in [Role::PurchaseCost, Role::SalePrice] {
            let amount = BoundedAmount::from_input(role, bounds(1000, 200_000), "1234567");
            assert_eq!(amount.value(), 1_234_567);
            assert_eq!(amount.display(), "1.234.567");
        }
    }

    #[test]
    fn in_range_values_pass_through() {
        let b = bounds(0, 200_000);
        for (raw, expected, shown) in [
            ("15000", 15_000, "15.000"),
            ("Rp 15.000", 15_000, "15.000"),
            ("7", 7, "7"),
            ("200000", 200_000, "200.000"),
        ] {
            let amount = BoundedAmount::from_input(Role::Expense, b, raw);
            assert_eq!(amount.value(), expected);
            assert_eq!(amount.display(), shown);
        }
    }

    #[test]
    fn empty_input_clears_visible_field() {
        let amount = BoundedAmount::from_input(Role::Expense, Bounds::default(), "abc");
        assert!(amount.is_empty());
        assert_eq!(amount.display(), "");
        assert_eq!(amount.raw(), "0");
    }

    #[test]
    fn zeros_are_shown_when_typed() {
        let amount = BoundedAmount::from_input(Role::Expense, Bounds::default(), "000");
        assert!(!amount.is_empty());
        assert_eq!(amount.display(), "0");
        assert_eq!(amount.value(), 0);
    }

    #[test]
    fn formatting_is_idempotent() {
        let b = bounds(1000, 200_000);
        for raw in ["1234567", "98765", "", "1.000"] {
            let first = BoundedAmount::from_input(Role::Expense, b, raw);
            let second = BoundedAmount::from_input(Role::Expense, b, &first.display());
            assert_eq!(first.display(), second.display());
            assert_eq!(first.raw(), second.raw());
        }
    }

    #[test]
    fn update_keeps_role_and_bounds() {
        let mut amount = BoundedAmount::new(Role::Expense, bounds(0, 50_000));
        amount.update("75000");
        assert_eq!(amount.value(), 50_000);
        assert_eq!(amount.role(), Role::Expense);
        assert_eq!(amount.bounds(), bounds(0, 50_000));
    }
}
