// 💱 Display Formatting - en-IN grouping and calculator output
// Lakh/crore digit grouping, rupee amounts, and JavaScript-compatible number text

/// Rupee sign used for every money value on screen
pub const RUPEE: &str = "₹";

/// Group an integer digit string the Indian way: last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Fixed-point text for a non-negative finite value, ties rounded away from zero.
///
/// Works on the exact decimal expansion of the double (`1.25` → `1.3`,
/// `0.15` → `0.1` because 0.15 is stored slightly below the tie).
fn round_half_expand(abs: f64, decimals: usize) -> String {
    // Every finite double has at most 1074 fraction digits
    let exact = format!("{:.1100}", abs);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(decimals)).collect();
    let round_up = frac_part.as_bytes().get(decimals).map_or(false, |d| *d >= b'5');

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - decimals;
    let text = String::from_utf8_lossy(&digits).into_owned();
    if decimals == 0 {
        text
    } else {
        format!("{}.{}", &text[..split], &text[split..])
    }
}

/// Format with exactly `decimals` fraction digits and en-IN grouping.
///
/// `format_indian(12345678.9, 2)` gives `"1,23,45,678.90"`.
pub fn format_indian(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = round_half_expand(value.abs(), decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    // -0.4 rounded to zero decimals is shown as "0", not "-0"
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, group_indian(int_part), frac),
        None => format!("{}{}", sign, group_indian(int_part)),
    }
}

/// Whole-rupee amount, e.g. `₹9,650`
pub fn format_currency(amount: f64) -> String {
    format!("{}{}", RUPEE, format_indian(amount, 0))
}

/// Two-decimal grouped number, the default for non-rupee amounts
pub fn format_number(value: f64) -> String {
    format_indian(value, 2)
}

// ============================================================================
// JAVASCRIPT NUMBER TEXT
// ============================================================================

/// Put an explicit `+` on non-negative exponents (`1.5e10` → `1.5e+10`).
fn js_exponent(rust_exp: String) -> String {
    match rust_exp.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => rust_exp,
    }
}

/// Shortest round-trip text for a number, matching `Number.prototype.toString`.
///
/// Plain decimal notation between `1e-6` and `1e21`, exponent form outside.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        js_exponent(format!("{:e}", value))
    } else {
        format!("{}", value)
    }
}

/// `Number.prototype.toExponential(digits)`
pub fn to_exponential(value: f64, digits: usize) -> String {
    js_exponent(format!("{:.*e}", digits, value))
}

/// Round to `digits` significant digits, as `parseFloat(x.toPrecision(digits))`
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    format!("{:.*e}", digits - 1, value)
        .parse::<f64>()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_indian(0.0, 0), "0");
        assert_eq!(format_indian(999.0, 0), "999");
        assert_eq!(format_indian(1000.0, 0), "1,000");
        assert_eq!(format_indian(100000.0, 0), "1,00,000");
        assert_eq!(format_indian(1234567.0, 0), "12,34,567");
        assert_eq!(format_indian(100000000.0, 0), "10,00,00,000");
    }

    #[test]
    fn test_indian_decimals_and_sign() {
        assert_eq!(format_indian(12345678.9, 2), "1,23,45,678.90");
        assert_eq!(format_indian(83.0, 4), "83.0000");
        assert_eq!(format_indian(-1500.0, 0), "-1,500");
        assert_eq!(format_indian(-0.4, 0), "0");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_indian(1.25, 1), "1.3");
        assert_eq!(format_indian(2.5, 0), "3");
        assert_eq!(format_indian(999.5, 0), "1,000");
        assert_eq!(format_indian(9.995, 2), "9.99");
        assert_eq!(format_indian(-2.5, 0), "-3");
    }

    #[test]
    fn test_currency_rounds_to_whole_rupees() {
        assert_eq!(format_currency(9650.216), "₹9,650");
        assert_eq!(format_currency(450000.0), "₹4,50,000");
        assert_eq!(format_number(8300.0), "8,300.00");
    }

    #[test]
    fn test_js_number_text() {
        assert_eq!(js_number(4.0), "4");
        assert_eq!(js_number(0.5), "0.5");
        assert_eq!(js_number(-2.25), "-2.25");
        assert_eq!(js_number(std::f64::consts::PI), "3.141592653589793");
        assert_eq!(js_number(1e21), "1e+21");
        assert_eq!(js_number(1.5e-7), "1.5e-7");
        assert_eq!(js_number(123456789012.0), "123456789012");
    }

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(1099511627776.0, 6), "1.099512e+12");
        assert_eq!(to_exponential(0.00001234, 6), "1.234000e-5");
        assert_eq!(to_exponential(-5e-5, 6), "-5.000000e-5");
    }

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(0.1 + 0.2, 12), 0.3);
        assert_eq!(round_significant(2f64.sqrt(), 12), 1.41421356237);
        assert_eq!(round_significant(0.0, 12), 0.0);
    }
}
