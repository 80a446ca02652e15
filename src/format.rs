use serde::{Deserialize, Serialize};

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Prefix,
    #[default]
    Suffix,
}

/// Presentation settings for prices. Defaults reproduce the ru-RU rendering
/// of Kyrgyz som amounts, e.g. `55 000 сом`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub group_separator: String,
    pub position: SymbolPosition,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "сом".to_string(),
            group_separator: "\u{a0}".to_string(),
            position: SymbolPosition::Suffix,
        }
    }
}

/// Format a price rounded to the nearest whole currency unit (halves away
/// from zero). Non-finite input renders as zero.
pub fn format_price(value: f64, format: &CurrencyFormat) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(&format.group_separator);
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    match (format.position, format.symbol.is_empty()) {
        (_, true) => format!("{sign}{grouped}"),
        (SymbolPosition::Suffix, false) => format!("{sign}{grouped}\u{a0}{}", format.symbol),
        (SymbolPosition::Prefix, false) => format!("{sign}{}{grouped}", format.symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> CurrencyFormat {
        CurrencyFormat {
            symbol: "KGS".into(),
            group_separator: " ".into(),
            position: SymbolPosition::Suffix,
        }
    }

    #[test]
    fn test_rounds_to_whole_units() {
        let f = plain();
        assert_eq!(format_price(55000.25, &f), "55 000\u{a0}KGS");
        assert_eq!(format_price(55000.5, &f), "55 001\u{a0}KGS");
        assert_eq!(format_price(0.49, &f), "0\u{a0}KGS");
    }

    #[test]
    fn test_grouping() {
        let f = CurrencyFormat { symbol: String::new(), ..plain() };
        assert_eq!(format_price(0.0, &f), "0");
        assert_eq!(format_price(999.0, &f), "999");
        assert_eq!(format_price(1000.0, &f), "1 000");
        assert_eq!(format_price(1234567.0, &f), "1 234 567");
        assert_eq!(format_price(-1234.4, &f), "-1 234");
    }

    #[test]
    fn test_default_ru_style() {
        assert_eq!(
            format_price(85000.75, &CurrencyFormat::default()),
            "85\u{a0}001\u{a0}сом"
        );
    }

    #[test]
    fn test_prefix_and_non_finite() {
        let f = CurrencyFormat {
            symbol: "$".into(),
            group_separator: ",".into(),
            position: SymbolPosition::Prefix,
        };
        assert_eq!(format_price(1500.0, &f), "$1,500");
        assert_eq!(format_price(f64::NAN, &f), "$0");
    }
}
