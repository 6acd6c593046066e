//! Amount formatting for labels, tooltips and terminal output.
//!
//! Aggregation never rounds; this is the only place amounts are.

/// Separators used when printing numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl NumberLocale {
    /// Separators for a BCP 47 tag such as `de-DE`; unknown tags print like `en-US`.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
        let (language, region) = match tag.split_once('-') {
            Some((language, region)) => (language, region),
            None => (tag.as_str(), ""),
        };
        let (decimal_separator, grouping_separator) = match (language, region) {
            ("de" | "it" | "fr", "ch") => ('.', '\''),
            ("de" | "es" | "it" | "pt" | "nl" | "id" | "tr" | "da", _) => (',', '.'),
            ("fr" | "ru" | "pl" | "cs" | "sv" | "nb" | "fi" | "uk", _) => (',', ' '),
            _ => return Self::default(),
        };
        Self {
            decimal_separator,
            grouping_separator,
        }
    }
}

/// Rounds to `decimals` places and groups thousands with the locale's separators.
///
/// Values that round to zero never carry a minus sign. Non-finite values are
/// printed as-is.
pub fn format_amount(locale: &NumberLocale, amount: f64, decimals: usize) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let rendered = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let is_zero = rendered.bytes().all(|b| b == b'0' || b == b'.');
    let mut out = String::with_capacity(rendered.len() + whole.len() / 3 + 1);
    if amount < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(whole, locale.grouping_separator));
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// [`format_amount`] with the currency's symbol, or its code when unknown.
pub fn format_currency(
    locale: &NumberLocale,
    amount: f64,
    currency: &str,
    decimals: usize,
) -> String {
    let formatted = format_amount(locale, amount, decimals);
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", formatted.as_str()),
    };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{digits} {}", currency.trim().to_ascii_uppercase()),
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.trim().to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "BRL" => Some("R$"),
        _ => None,
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
