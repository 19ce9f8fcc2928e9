//! UNTDID 4461 payment means codes recognised on Croatian invoices.

use serde::{Deserialize, Serialize};

/// Label returned for codes outside the table.
pub const UNKNOWN_PAYMENT_MEANS_LABEL: &str = "Nepoznato";

/// Payment means codes with their Croatian display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMeans {
    /// `10`: Cash.
    Cash,
    /// `30`: Credit transfer (virman).
    CreditTransfer,
    /// `42`: Payment to bank account.
    PaymentToBankAccount,
    /// `48`: Bank card.
    BankCard,
    /// `49`: Direct debit.
    DirectDebit,
}

impl PaymentMeans {
    /// UNTDID 4461 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cash => "10",
            Self::CreditTransfer => "30",
            Self::PaymentToBankAccount => "42",
            Self::BankCard => "48",
            Self::DirectDebit => "49",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Gotovina",
            Self::CreditTransfer => "Uplata / kreditni transfer (virman)",
            Self::PaymentToBankAccount => "Plaćanje na bankovni račun",
            Self::BankCard => "Kartično plaćanje",
            Self::DirectDebit => "Izravno terećenje (direct debit)",
        }
    }

    /// Parse from a code string; surrounding whitespace is ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "10" => Some(Self::Cash),
            "30" => Some(Self::CreditTransfer),
            "42" => Some(Self::PaymentToBankAccount),
            "48" => Some(Self::BankCard),
            "49" => Some(Self::DirectDebit),
            _ => None,
        }
    }
}

/// Human label for a payment means code; unknown codes map to
/// [`UNKNOWN_PAYMENT_MEANS_LABEL`].
pub fn payment_means_label(code: &str) -> &'static str {
    PaymentMeans::from_code(code)
        .map(|means| means.label())
        .unwrap_or(UNKNOWN_PAYMENT_MEANS_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(payment_means_label("30"), "Uplata / kreditni transfer (virman)");
        assert_eq!(payment_means_label(" 42 "), "Plaćanje na bankovni račun");
        assert_eq!(payment_means_label("10"), "Gotovina");
        assert_eq!(payment_means_label("48"), "Kartično plaćanje");
        assert_eq!(payment_means_label("49"), "Izravno terećenje (direct debit)");
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(payment_means_label("58"), UNKNOWN_PAYMENT_MEANS_LABEL);
        assert_eq!(payment_means_label(""), UNKNOWN_PAYMENT_MEANS_LABEL);
        assert_eq!(UNKNOWN_PAYMENT_MEANS_LABEL, "Nepoznato");
    }

    #[test]
    fn code_roundtrip() {
        for means in [
            PaymentMeans::Cash,
            PaymentMeans::CreditTransfer,
            PaymentMeans::PaymentToBankAccount,
            PaymentMeans::BankCard,
            PaymentMeans::DirectDebit,
        ] {
            assert_eq!(PaymentMeans::from_code(means.code()), Some(means));
        }
    }
}
