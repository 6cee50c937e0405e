//! Label formatting for annotations, bar labels, and stats boxes.

use super::stats::return_pct;

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn grouped(value: f64, decimals: usize, force_sign: bool) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let body = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body.as_str(), None),
    };
    let sign = if value < 0.0 {
        "-"
    } else if force_sign {
        "+"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{}.{frac}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

/// `$12,345` style, no forced sign.
pub fn format_usd(value: f64, decimals: usize) -> String {
    format!("${}", grouped(value, decimals, false))
}

/// `$+1,234.56` / `$-12.00` style.
pub fn format_signed_usd(value: f64, decimals: usize) -> String {
    format!("${}", grouped(value, decimals, true))
}

/// Final-value annotation: `$12,345 (+2.3%)`.
pub fn value_annotation(initial: f64, last: f64) -> String {
    format!("{} ({:+.1}%)", format_usd(last, 0), return_pct(initial, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_usd(1234567.0, 0), "$1,234,567");
        assert_eq!(format_usd(999.4, 0), "$999");
        assert_eq!(format_usd(-1234.0, 0), "$-1,234");
    }

    #[test]
    fn signed_two_decimals() {
        assert_eq!(format_signed_usd(1234.5, 2), "$+1,234.50");
        assert_eq!(format_signed_usd(-42.0, 2), "$-42.00");
        assert_eq!(format_signed_usd(0.0, 2), "$+0.00");
    }

    #[test]
    fn annotation_text() {
        assert_eq!(value_annotation(10_000.0, 10_250.0), "$10,250 (+2.5%)");
        assert_eq!(value_annotation(0.0, 500.0), "$500 (+0.0%)");
    }
}
