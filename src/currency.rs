//! Country to currency/locale resolution and amount formatting.
//!
//! Resolution never fails: unknown or missing country codes resolve to
//! [`DEFAULT_CURRENCY_CONFIG`] (GBP, en-GB).

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::Event;

/// Currency, locale and display symbol for a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyConfig {
    /// ISO-4217 currency code
    pub currency: &'static str,
    /// BCP-47 locale tag
    pub locale: &'static str,
    pub symbol: &'static str,
}

impl CurrencyConfig {
    const fn new(currency: &'static str, locale: &'static str, symbol: &'static str) -> Self {
        Self {
            currency,
            locale,
            symbol,
        }
    }
}

pub const DEFAULT_CURRENCY_CONFIG: CurrencyConfig = CurrencyConfig::new("GBP", "en-GB", "£");

static COUNTRY_CURRENCY_MAP: Lazy<HashMap<&'static str, CurrencyConfig>> = Lazy::new(|| {
    HashMap::from([
        ("GBR", CurrencyConfig::new("GBP", "en-GB", "£")),
        ("USA", CurrencyConfig::new("USD", "en-US", "$")),
        ("CAN", CurrencyConfig::new("CAD", "en-CA", "CA$")),
        ("FRA", CurrencyConfig::new("EUR", "fr-FR", "€")),
        ("DEU", CurrencyConfig::new("EUR", "de-DE", "€")),
        ("IRL", CurrencyConfig::new("EUR", "en-IE", "€")),
        ("ITA", CurrencyConfig::new("EUR", "it-IT", "€")),
        ("ESP", CurrencyConfig::new("EUR", "es-ES", "€")),
        ("NLD", CurrencyConfig::new("EUR", "nl-NL", "€")),
        ("BEL", CurrencyConfig::new("EUR", "nl-BE", "€")),
        ("AUT", CurrencyConfig::new("EUR", "de-AT", "€")),
        ("PRT", CurrencyConfig::new("EUR", "pt-PT", "€")),
        ("CHE", CurrencyConfig::new("CHF", "de-CH", "CHF")),
        ("SWE", CurrencyConfig::new("SEK", "sv-SE", "kr")),
        ("NOR", CurrencyConfig::new("NOK", "nb-NO", "kr")),
        ("DNK", CurrencyConfig::new("DKK", "da-DK", "kr")),
        ("POL", CurrencyConfig::new("PLN", "pl-PL", "zł")),
        ("CZE", CurrencyConfig::new("CZK", "cs-CZ", "Kč")),
        ("AUS", CurrencyConfig::new("AUD", "en-AU", "A$")),
        ("NZL", CurrencyConfig::new("NZD", "en-NZ", "NZ$")),
        ("JPN", CurrencyConfig::new("JPY", "ja-JP", "¥")),
        ("SGP", CurrencyConfig::new("SGD", "en-SG", "S$")),
        ("HKG", CurrencyConfig::new("HKD", "zh-HK", "HK$")),
        ("MEX", CurrencyConfig::new("MXN", "es-MX", "MX$")),
        ("BRA", CurrencyConfig::new("BRL", "pt-BR", "R$")),
        ("ARG", CurrencyConfig::new("ARS", "es-AR", "AR$")),
    ])
});

/// Resolve the currency configuration for an ISO-3166 alpha-3 country code.
pub fn currency_config(country_code: Option<&str>) -> CurrencyConfig {
    country_code
        .and_then(|code| COUNTRY_CURRENCY_MAP.get(code))
        .copied()
        .unwrap_or(DEFAULT_CURRENCY_CONFIG)
}

/// Resolve the currency configuration from the event's first venue.
pub fn currency_config_for_event(event: &Event) -> CurrencyConfig {
    currency_config(event.primary_country())
}

pub fn locale_for_event(event: &Event) -> &'static str {
    currency_config_for_event(event).locale
}

pub fn is_eurozone_event(event: &Event) -> bool {
    currency_config_for_event(event).currency == "EUR"
}

/// Digit grouping and symbol placement for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberStyle {
    group: &'static str,
    decimal: char,
    symbol_first: bool,
    /// Separator between symbol and digits
    spacing: &'static str,
}

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

fn number_style(locale: &str) -> NumberStyle {
    match locale {
        "de-CH" => NumberStyle {
            group: "’",
            decimal: '.',
            symbol_first: true,
            spacing: NBSP,
        },
        "nl-NL" | "nl-BE" | "pt-BR" | "es-AR" => NumberStyle {
            group: ".",
            decimal: ',',
            symbol_first: true,
            spacing: NBSP,
        },
        "de-DE" | "de-AT" | "it-IT" | "es-ES" | "pt-PT" | "da-DK" => NumberStyle {
            group: ".",
            decimal: ',',
            symbol_first: false,
            spacing: NBSP,
        },
        "fr-FR" | "sv-SE" | "nb-NO" | "pl-PL" | "cs-CZ" => NumberStyle {
            group: NARROW_NBSP,
            decimal: ',',
            symbol_first: false,
            spacing: NBSP,
        },
        _ => NumberStyle {
            group: ",",
            decimal: '.',
            symbol_first: true,
            spacing: "",
        },
    }
}

/// Minor-unit digits for a currency.
fn fraction_digits(currency: &str) -> usize {
    match currency {
        "JPY" => 0,
        _ => 2,
    }
}

/// Symbol a locale uses for its own currency when it differs from the
/// internationally unambiguous one ("$" rather than "CA$" in en-CA).
fn local_symbol(locale: &str, currency: &str) -> Option<&'static str> {
    match (locale, currency) {
        ("en-CA", "CAD")
        | ("en-AU", "AUD")
        | ("en-NZ", "NZD")
        | ("en-SG", "SGD")
        | ("es-MX", "MXN")
        | ("es-AR", "ARS") => Some("$"),
        ("ja-JP", "JPY") => Some("\u{ffe5}"),
        _ => None,
    }
}

/// Display symbol for a currency in a locale; falls back to the code itself.
fn currency_symbol<'a>(currency: &'a str, locale: &str) -> &'a str {
    if let Some(symbol) = local_symbol(locale, currency) {
        return symbol;
    }
    if currency == DEFAULT_CURRENCY_CONFIG.currency {
        return DEFAULT_CURRENCY_CONFIG.symbol;
    }
    COUNTRY_CURRENCY_MAP
        .values()
        .find(|config| config.currency == currency)
        .map(|config| config.symbol)
        .unwrap_or(currency)
}

fn group_digits(digits: &str, separator: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Format an amount (in major units) as a currency string for a locale.
///
/// ```
/// use gigdeck::currency::format_currency;
///
/// assert_eq!(format_currency(12.5, "en-GB", "GBP"), "£12.50");
/// ```
pub fn format_currency(amount: f64, locale: &str, currency: &str) -> String {
    let style = number_style(locale);
    let digits = fraction_digits(currency);
    let symbol = currency_symbol(currency, locale);

    let fixed = format!("{:.*}", digits, amount.abs());
    let (whole, frac) = match fixed.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (fixed.as_str(), None),
    };

    let mut number = group_digits(whole, style.group);
    if let Some(frac) = frac {
        number.push(style.decimal);
        number.push_str(frac);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    if style.symbol_first {
        format!("{}{}{}{}", sign, symbol, style.spacing, number)
    } else {
        format!("{}{}{}{}", sign, number, style.spacing, symbol)
    }
}

/// Format an amount using the currency of the event's primary venue country.
pub fn format_price_for_event(amount: f64, event: &Event) -> String {
    let config = currency_config_for_event(event);
    format_currency(amount, config.locale, config.currency)
}
