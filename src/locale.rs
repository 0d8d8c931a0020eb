//! Number rendering for the `id-ID` locale.
//!
//! Only the parts of `Number.prototype.toLocaleString('id-ID')` the page
//! relies on: dots between thousands groups, a comma before the fraction and
//! at most three fraction digits.

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const MAX_FRACTION_DIGITS: usize = 3;

fn group_digits(digits: &str) -> String {
    let s = digits.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Formats an integer with `id-ID` thousands grouping, e.g. `1234567` as
/// `1.234.567`.
pub fn format_id(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats a chart value. Chart series come from the page as plain JS
/// numbers, so fractions are possible and are rounded to three digits.
pub fn format_id_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let scaled = (value.abs() * 1000.0).round();
    let whole = (scaled / 1000.0).trunc();
    let frac = (scaled - whole * 1000.0).clamp(0.0, 999.0) as u32;

    let mut out = String::new();
    if value < 0.0 && scaled > 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(&format!("{:.0}", whole)));
    if frac > 0 {
        let digits = format!("{:0width$}", frac, width = MAX_FRACTION_DIGITS);
        out.push(DECIMAL_SEPARATOR);
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_id(0), "0");
        assert_eq!(format_id(999), "999");
        assert_eq!(format_id(1000), "1.000");
        assert_eq!(format_id(200000), "200.000");
        assert_eq!(format_id(1234567), "1.234.567");
    }

    #[test]
    fn negative_integers_keep_their_sign() {
        assert_eq!(format_id(-15000), "-15.000");
        assert_eq!(format_id(i64::MIN), "-9.223.372.036.854.775.808");
    }

    #[test]
    fn whole_chart_values_match_integer_formatting() {
        assert_eq!(format_id_number(0.0), "0");
        assert_eq!(format_id_number(75000.0), "75.000");
        assert_eq!(format_id_number(-2500.0), "-2.500");
    }

    #[test]
    fn chart_fractions_use_comma_and_three_digits() {
        assert_eq!(format_id_number(1234.5), "1.234,5");
        assert_eq!(format_id_number(0.125), "0,125");
        assert_eq!(format_id_number(10.0004), "10");
        assert_eq!(format_id_number(10.0006), "10,001");
    }

    #[test]
    fn non_finite_chart_values() {
        assert_eq!(format_id_number(f64::NAN), "NaN");
        assert_eq!(format_id_number(f64::INFINITY), "∞");
        assert_eq!(format_id_number(f64::NEG_INFINITY), "-∞");
    }
}
