use serde::Deserialize;

/// Decimal formatting rules used when parsing localized amounts
///
/// The API renders currency in the US style (`$12,345`), but the separators
/// are kept configurable so extraction never depends on process-wide locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Character separating the integer and fractional parts
    #[serde(rename = "decimal-separator")]
    pub decimal_separator: char,

    /// Digit grouping character, removed before parsing
    #[serde(rename = "thousands-separator")]
    pub thousands_separator: char,

    /// Currency symbol stripped from amounts
    #[serde(rename = "currency-symbol")]
    pub currency_symbol: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new('.', ',', "$")
    }
}

impl NumberFormat {
    /// Creates a new number format
    pub fn new(decimal_separator: char, thousands_separator: char, currency_symbol: &str) -> Self {
        Self {
            decimal_separator,
            thousands_separator,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    /// Parses a localized decimal such as `12,345.50`
    ///
    /// Returns `None` for anything that is not a finite number, including
    /// placeholders like `N/A`.
    pub fn parse_decimal(&self, text: &str) -> Option<f64> {
        let mut normalized = String::with_capacity(text.len());
        for c in text.trim().chars() {
            if c == self.thousands_separator {
                continue;
            }
            if c == self.decimal_separator {
                normalized.push('.');
            } else {
                normalized.push(c);
            }
        }

        normalized
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Parses a currency amount such as `$12,345`
    pub fn parse_currency(&self, text: &str) -> Option<f64> {
        if self.currency_symbol.is_empty() {
            return self.parse_decimal(text);
        }
        self.parse_decimal(&text.replace(self.currency_symbol.as_str(), ""))
    }
}
