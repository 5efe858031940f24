//! Masking and display formatting for emails, phone numbers and money.

use once_cell::sync::Lazy;
use regex::Regex;
use rhai::Engine;

use crate::config::DEFAULT_CURRENCY;
use crate::validate::is_email;

static PHONE_OBFUSCATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{5})([0-9]{4})(.*)$").expect("failed to compile phone obfuscation regex")
});

// ============================================================================
// Contact details
// ============================================================================

/// Keep the first char of the local part and the domain: `j***@example.com`
pub fn obfuscate_email(email: &str) -> String {
    if !is_email(email) {
        log::warn!("obfuscate_email: {:?} is not an email address", email);
        return email.to_string();
    }
    match email.split_once('@') {
        Some((user, domain)) => {
            let first = user.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => email.to_string(),
    }
}

/// Mask digits six to nine of a number that starts with at least nine digits
pub fn obfuscate_phone_number(phone: &str) -> String {
    PHONE_OBFUSCATE_REGEX
        .replace(phone, "${1}****${3}")
        .into_owned()
}

/// `(XXX) XXX-XXXX` for ten digits, or eleven with a leading `1` or `0`
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') || digits.starts_with('0') => &digits[1..],
        _ => return phone.to_string(),
    };
    format!(
        "({}) {}-{}",
        &national[..3],
        &national[3..6],
        &national[6..]
    )
}

// ============================================================================
// Currency
// ============================================================================

fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "KRW" => "₩",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "MXN" => "MX$",
        "BRL" => "R$",
        "ILS" => "₪",
        _ => return None,
    };
    Some(symbol)
}

fn fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// `inf`, `infinity` and `nan` in any case, with an optional sign. Overflowing
/// decimals such as `1e999` still format as `∞`.
fn is_non_finite_spelling(amount: &str) -> bool {
    let unsigned = amount.strip_prefix(['+', '-']).unwrap_or(amount);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|word| unsigned.eq_ignore_ascii_case(word))
}

/// Format a decimal string as US dollars, e.g. `"1234.5"` → `"$1,234.50"`
pub fn to_currency_format(amount: &str) -> String {
    to_currency_format_in(amount, DEFAULT_CURRENCY)
}

/// Format a decimal string in en-US style for an ISO 4217 code.
///
/// Codes without a known symbol print as the code followed by a no-break
/// space. A code that is not three ASCII letters leaves the input unchanged.
pub fn to_currency_format_in(amount: &str, currency: &str) -> String {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        log::warn!("to_currency_format: invalid currency code {:?}", currency);
        return amount.to_string();
    }
    let code = currency.to_ascii_uppercase();
    let prefix = match currency_symbol(&code) {
        Some(symbol) => symbol.to_string(),
        None => {
            log::warn!("to_currency_format: no symbol for {}, using the code", code);
            format!("{}\u{a0}", code)
        }
    };

    let trimmed = amount.trim();
    if is_non_finite_spelling(trimmed) {
        return "NaN".to_string();
    }
    let value = if trimmed.is_empty() {
        0.0
    } else {
        match trimmed.parse::<f64>() {
            Ok(v) => v,
            Err(_) => return "NaN".to_string(),
        }
    };
    if value.is_nan() {
        return "NaN".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{}{}∞", sign, prefix);
    }

    let digits = fraction_digits(&code);
    let scale = 10f64.powi(digits as i32);
    let rounded = (value.abs() * scale).round() / scale;
    let fixed = format!("{:.*}", digits, rounded);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let mut formatted = format!("{}{}{}", sign, prefix, group_thousands(whole));
    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}

pub fn register_functions(engine: &mut Engine) {
    engine.register_fn("obfuscate_email", obfuscate_email);
    engine.register_fn("obfuscate_phone_number", obfuscate_phone_number);
    engine.register_fn("format_phone_number", format_phone_number);
    engine.register_fn("to_currency_format", to_currency_format);
    engine.register_fn("to_currency_format", to_currency_format_in);
}
