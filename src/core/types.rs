use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::normalize::parse_amount;
use super::payment_means::payment_means_label;

/// Canonical record extracted from one UBL invoice document.
///
/// Amounts are kept as the strings found in the document; conversion to
/// minor units happens only when a payment payload is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// `cbc:ID`
    pub invoice_id: String,
    pub issue_date: String,
    pub issue_time: String,
    pub due_date: String,
    /// `cbc:DocumentCurrencyCode`, e.g. "EUR".
    pub currency: String,
    /// First `cbc:Note` of the document.
    pub note: String,
    pub supplier: Party,
    pub customer: Party,
    pub totals: MonetaryTotals,
    /// Rows from both tax breakdown locations, tagged by [`TaxSource`].
    pub vat_subtotals: Vec<TaxBreakdownRow>,
    /// Invoice lines in document order.
    pub lines: Vec<LineItem>,
    pub payment: PaymentInfo,
    /// Embedded PDF, present only when confirmed to be a PDF.
    pub attachment: Option<PdfAttachment>,
}

/// Supplier or customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Trade name, else legal name, else company name, else identifier.
    pub name: String,
    /// OIB (Croatian personal/company identification number).
    pub oib: String,
    pub vat_id: String,
    pub email: String,
    pub postal_code: String,
    pub street: String,
    pub city: String,
    /// `cac:AddressLine/cbc:Line`, used when no street is given.
    pub address_line: String,
}

impl Party {
    /// Street name, falling back to the generic address line.
    pub fn address(&self) -> &str {
        if self.street.is_empty() {
            &self.address_line
        } else {
            &self.street
        }
    }
}

/// `cac:LegalMonetaryTotal` plus the document tax amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryTotals {
    /// Tax-exclusive amount.
    pub net: String,
    /// `cac:TaxTotal/cbc:TaxAmount`.
    pub vat: String,
    /// Gross total; derived from payable (+ prepaid) when absent.
    pub tax_inclusive: String,
    pub prepaid: String,
    /// Amount still owed.
    pub payable: String,
}

impl MonetaryTotals {
    /// Payable amount as a number; missing or unparsable counts as zero.
    pub fn payable_amount(&self) -> Decimal {
        parse_amount(&self.payable).unwrap_or_default()
    }

    /// Prepaid amount as a number; missing or unparsable counts as zero.
    pub fn prepaid_amount(&self) -> Decimal {
        parse_amount(&self.prepaid).unwrap_or_default()
    }

    /// Whether at least one cent is left to pay.
    pub fn is_payable(&self) -> bool {
        self.payable_amount()
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
            > Decimal::ZERO
    }

    /// Fully paid in advance: nothing payable, something prepaid.
    pub fn is_settled(&self) -> bool {
        !self.is_payable() && self.prepaid_amount() > Decimal::ZERO
    }
}

/// Which document location a tax breakdown row was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxSource {
    /// Standard `cac:TaxTotal/cac:TaxSubtotal`.
    #[serde(rename = "UBL")]
    Ubl,
    /// Croatian extension `hrextac:HRTaxTotal/hrextac:HRTaxSubtotal`.
    #[serde(rename = "HR")]
    HrExtension,
}

impl TaxSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ubl => "UBL",
            Self::HrExtension => "HR",
        }
    }
}

/// One VAT breakdown row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdownRow {
    pub source: TaxSource,
    /// Tax scheme, normally "VAT".
    pub scheme_id: String,
    /// Category code; for extension rows the category name when no code is given.
    pub category_id: String,
    pub category_name: String,
    pub percent: String,
    pub taxable_amount: String,
    pub tax_amount: String,
}

impl TaxBreakdownRow {
    /// Taxable base plus tax; unparsable parts count as zero.
    pub fn gross_amount(&self) -> Decimal {
        let taxable = parse_amount(&self.taxable_amount).unwrap_or_default();
        let tax = parse_amount(&self.tax_amount).unwrap_or_default();
        taxable.checked_add(tax).unwrap_or(taxable)
    }
}

/// One `cac:InvoiceLine`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    /// `unitCode` attribute of the quantity, empty when absent.
    pub unit_code: String,
    pub unit_price: String,
    /// Line extension (net) amount.
    pub net_amount: String,
    pub tax_percent: String,
}

/// Payment instructions from `cac:PaymentMeans`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub means_code: String,
    pub instruction_note: String,
    /// Raw `cbc:PaymentID`.
    pub payment_id: String,
    /// Model split from the payment id (fallback pair when unusable).
    pub model: String,
    pub reference: String,
    pub iban_raw: String,
    /// IBAN reduced to uppercase letters and digits.
    pub iban: String,
}

impl PaymentInfo {
    pub fn means_label(&self) -> &'static str {
        payment_means_label(&self.means_code)
    }
}

/// An embedded PDF document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfAttachment {
    /// Base64 body with whitespace removed.
    pub content_b64: String,
    pub mime_type: String,
    pub filename: String,
    /// Decoded size in bytes, computed without decoding.
    pub size: usize,
}
