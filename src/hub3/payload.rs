use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EracunError, InvoiceRecord, Party, amount_to_cents};

/// Fixed HUB3 purpose code sent with every payment.
pub const PURPOSE_CODE: &str = "COST";

/// Separator between the description parts.
const DESCRIPTION_SEPARATOR: &str = " | ";

/// Payer or payee block of the barcode payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub3Party {
    pub name: String,
    /// Street, or the generic address line when no street is given.
    pub address: String,
    /// Postal code. The renderer calls this field `city`.
    pub city: String,
}

impl From<&Party> for Hub3Party {
    fn from(party: &Party) -> Self {
        Self {
            name: party.name.clone(),
            address: party.address().to_string(),
            city: party.postal_code.clone(),
        }
    }
}

/// The JSON document the barcode renderer decrypts.
///
/// Field names and their order are fixed by the renderer; serialization
/// follows declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub3Payload {
    pub payer: Hub3Party,
    pub payee: Hub3Party,
    pub iban: String,
    pub currency: String,
    /// Payable amount in minor units.
    pub amount: String,
    pub model: String,
    pub reference: String,
    pub code: String,
    pub description: String,
}

impl Hub3Payload {
    /// Build the payload for an invoice, or `None` when nothing is payable.
    ///
    /// The customer pays the supplier. The amount is the payable total, not
    /// the gross total, so prepaid invoices are charged only the remainder.
    pub fn from_record(record: &InvoiceRecord) -> Option<Self> {
        if !record.totals.is_payable() {
            debug!(payable = %record.totals.payable, "nothing payable, barcode suppressed");
            return None;
        }

        Some(Self {
            payer: Hub3Party::from(&record.customer),
            payee: Hub3Party::from(&record.supplier),
            iban: record.payment.iban.clone(),
            currency: record.currency.clone(),
            amount: amount_to_cents(&record.totals.payable),
            model: record.payment.model.clone(),
            reference: record.payment.reference.clone(),
            code: PURPOSE_CODE.to_string(),
            description: payment_description(record),
        })
    }

    /// Compact JSON with slashes and non-ASCII characters left unescaped.
    pub fn to_json(&self) -> Result<String, EracunError> {
        serde_json::to_string(self).map_err(|e| EracunError::Json(e.to_string()))
    }
}

/// `"Račun <id>"` and the invoice note, joined by `" | "`; empty parts are left out.
pub fn payment_description(record: &InvoiceRecord) -> String {
    let id = (!record.invoice_id.is_empty()).then(|| format!("Račun {}", record.invoice_id));
    let note = (!record.note.is_empty()).then(|| record.note.clone());

    id.into_iter()
        .chain(note)
        .collect::<Vec<_>>()
        .join(DESCRIPTION_SEPARATOR)
        .trim()
        .to_string()
}
