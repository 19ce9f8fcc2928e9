//! Scalar normalizers for payment data.
//!
//! All functions here are total: they accept arbitrary (possibly hostile)
//! text from an invoice and never fail.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Model used when the payment id carries no usable model/reference pair.
pub const FALLBACK_MODEL: &str = "HR00";

/// Reference used together with [`FALLBACK_MODEL`].
pub const FALLBACK_REFERENCE: &str = "0000";

/// `HR99` means "no reference" in the Croatian scheme and is never passed on.
const SENTINEL_MODEL: &str = "HR99";

/// Normalize an IBAN to uppercase ASCII letters and digits.
///
/// Whitespace and punctuation are dropped. Idempotent; no checksum validation.
pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Split a payment id such as `"HR05 37567-261-015"` into `(model, reference)`.
///
/// Accepted grammar: `HR`, an optional space, two digits, whitespace, then a
/// non-empty reference. The model is returned uppercased without the space.
/// Anything else, including the `HR99` model and a bare `"HR05"`, yields
/// `(FALLBACK_MODEL, FALLBACK_REFERENCE)`.
pub fn split_model_reference(payment_id: &str) -> (String, String) {
    let collapsed = payment_id.split_whitespace().collect::<Vec<_>>().join(" ");

    parse_model_reference(&collapsed)
        .filter(|(model, reference)| model != SENTINEL_MODEL && !reference.is_empty())
        .unwrap_or_else(|| (FALLBACK_MODEL.to_string(), FALLBACK_REFERENCE.to_string()))
}

fn parse_model_reference(s: &str) -> Option<(String, String)> {
    let prefix = s.get(..2)?;
    if !prefix.eq_ignore_ascii_case("HR") {
        return None;
    }

    let rest = &s[2..];
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let digits = rest.get(..2)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let reference = rest[2..].strip_prefix(' ')?;
    Some((format!("HR{digits}"), reference.trim().to_string()))
}

/// Convert a decimal amount string to integer minor units (cents).
///
/// Spaces (including NBSP) and any character other than digits, `.` and `,`
/// are removed; `,` is read as a decimal point. With several separators the
/// last one is the decimal point and the others are thousands separators.
/// A bare number is whole currency units (`"100"` → `"10000"`). The fraction
/// is padded or truncated to two digits. Leading zeros are stripped and an
/// empty result becomes `"0"`.
pub fn amount_to_cents(amount: &str) -> String {
    let sanitized: String = amount
        .chars()
        .filter_map(|c| match c {
            ',' => Some('.'),
            '0'..='9' | '.' => Some(c),
            _ => None,
        })
        .collect();

    let (integer, fraction) = match sanitized.rsplit_once('.') {
        Some((integer, fraction)) => (integer.replace('.', ""), fraction.to_string()),
        None => (sanitized, String::new()),
    };

    let mut fraction: String = fraction.chars().take(2).collect();
    while fraction.len() < 2 {
        fraction.push('0');
    }

    let cents = format!("{integer}{fraction}");
    match cents.trim_start_matches('0') {
        "" => "0".to_string(),
        digits => digits.to_string(),
    }
}

/// Parse a monetary string with the same sanitizer and separator rules as
/// [`amount_to_cents`], additionally keeping a `-` that precedes the number.
/// Returns `None` when no digits remain.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let mut negative = false;
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '0'..='9' | '.' => s.push(c),
            ',' => s.push('.'),
            '-' if s.is_empty() => negative = true,
            _ => {}
        }
    }

    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some((integer, fraction)) = s.rsplit_once('.') {
        let integer = match integer.replace('.', "") {
            digits if digits.is_empty() => "0".to_string(),
            digits => digits,
        };
        let fraction = if fraction.is_empty() { "0" } else { fraction };
        s = format!("{integer}.{fraction}");
    }
    if negative {
        s.insert(0, '-');
    }

    Decimal::from_str(&s).ok()
}

/// Derive the tax-inclusive (gross) total when the document omits it.
///
/// An explicit value always wins. Otherwise `payable + prepaid` when both are
/// present and numeric, else `payable` alone.
pub fn derive_tax_inclusive(tax_inclusive: &str, payable: &str, prepaid: &str) -> String {
    if !tax_inclusive.is_empty() || payable.is_empty() {
        return tax_inclusive.to_string();
    }

    if !prepaid.is_empty() {
        let sum = parse_amount(payable)
            .zip(parse_amount(prepaid))
            .and_then(|(payable, prepaid)| payable.checked_add(prepaid));
        if let Some(sum) = sum {
            return sum.normalize().to_string();
        }
    }

    payable.to_string()
}

/// Format an amount the Croatian way: two decimals, comma separator (`1234,56`).
pub fn format_hr_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2)).replace('.', ",")
}
