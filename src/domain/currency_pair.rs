use serde::{Deserialize, Serialize};

/// Pairs the dashboard knows how to quote.
pub const KNOWN_PAIRS: &[&str] = &[
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD", "USD/CAD", "NZD/USD", "EUR/GBP",
    "EUR/JPY", "GBP/JPY", "USD/IDR", "USD/SGD", "EUR/AUD", "AUD/JPY", "CAD/JPY", "CHF/JPY",
    "EUR/CAD", "AUD/CAD", "EUR/CHF", "GBP/CHF", "AUD/NZD", "EUR/NZD", "USD/HKD", "USD/MXN",
];

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CurrencyPair {
    pub name: String,
}

/// Descriptive names for a pair, as shown on the dashboard cards.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PairInfo {
    pub base: &'static str,
    pub quote: &'static str,
    pub pip: &'static str,
}

impl PairInfo {
    pub fn description(&self) -> String {
        format!("{} / {}", self.base, self.quote)
    }
}

impl CurrencyPair {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    // Pair names are written `BASE/QUOTE`, e.g. "EUR/USD"
    pub fn get_base(text: &str) -> Option<&str> {
        text.split_once('/').map(|(base, _)| base).filter(|b| !b.is_empty())
    }

    pub fn get_quote(text: &str) -> Option<&str> {
        text.split_once('/').map(|(_, quote)| quote).filter(|q| !q.is_empty())
    }

    pub fn get_base_and_quote(text: &str) -> Option<(&str, &str)> {
        let base = Self::get_base(text)?;
        let quote = Self::get_quote(text)?;
        Some((base, quote))
    }

    // Split the name into base and quote currencies.
    pub fn split_pair_name(pair_name: &str) -> (&str, &str) {
        match Self::get_base_and_quote(pair_name) {
            Some((base, quote)) => (base, quote),
            None => ("Invalid", "Name"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_known(&self) -> bool {
        KNOWN_PAIRS.contains(&self.name.as_str())
    }

    /// Smallest conventional price increment: 0.01 for JPY pairs, 0.0001 otherwise.
    pub fn pip_size(&self) -> f64 {
        if self.name.contains("JPY") {
            0.01
        } else {
            0.0001
        }
    }

    /// Value of one pip for a position of `lot_size` base units.
    pub fn pip_value(&self, lot_size: f64) -> f64 {
        self.pip_size() * lot_size
    }

    /// Converts a raw price distance into pips.
    pub fn to_pips(&self, price_distance: f64) -> f64 {
        price_distance / self.pip_size()
    }

    pub fn info(&self) -> PairInfo {
        let (base, quote, pip) = match self.name.as_str() {
            "EUR/USD" => ("Euro", "US Dollar", "0.0001"),
            "GBP/USD" => ("British Pound", "US Dollar", "0.0001"),
            "USD/JPY" => ("US Dollar", "Japanese Yen", "0.01"),
            "USD/CHF" => ("US Dollar", "Swiss Franc", "0.0001"),
            "USD/IDR" => ("US Dollar", "Indonesian Rupiah", "1"),
            _ => ("Unknown", "Unknown", "0.0001"),
        };
        PairInfo { base, quote, pip }
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for CurrencyPair {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Format an amount the way the dashboard shows it for a given account currency.
pub fn format_currency(value: f64, currency: &str) -> String {
    match currency {
        "USD" => format!("${}", group_thousands(value, 2)),
        "IDR" => format!("Rp {}", group_thousands(value, 0)),
        "JPY" => format!("¥{}", group_thousands(value, 0)),
        _ => group_thousands(value, 2),
    }
}

fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
