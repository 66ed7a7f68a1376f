//! Display formatting shared by the dashboard cards and the PDF exports.

/// Compact count: `2.4M`, `45.0K`, `812`.
pub fn format_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{}", n.round() as i64)
    }
}

/// US-dollar amount with grouping and cents: `$12,345.60`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", format_grouped(cents / 100), cents % 100)
}

/// One decimal place with a percent sign.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Thousands separators: `4050` -> `4,050`.
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Uppercases the first character, leaves the rest untouched.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2_400_000.0), "2.4M");
        assert_eq!(format_number(45_000.0), "45.0K");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-12.0), "-$12.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(3.24), "3.2%");
        assert_eq!(format_percentage(28.1), "28.1%");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(100), "100");
        assert_eq!(format_grouped(4050), "4,050");
        assert_eq!(format_grouped(1_250_000), "1,250,000");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("performance"), "Performance");
        assert_eq!(title_case(""), "");
    }
}
