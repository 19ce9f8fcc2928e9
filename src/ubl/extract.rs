use tracing::debug;

use super::attachment::find_pdf_attachment;
use super::document::{Document, Node};
use crate::core::*;

const SUPPLIER_PARTY: &str = "/ubl:Invoice/cac:AccountingSupplierParty/cac:Party";
const CUSTOMER_PARTY: &str = "/ubl:Invoice/cac:AccountingCustomerParty/cac:Party";

const PARTY_NAME: [&str; 4] = [
    "cac:PartyName/cbc:Name",
    "cac:PartyLegalEntity/cbc:RegistrationName",
    "cac:PartyTaxScheme/cbc:RegistrationName",
    "cac:PartyIdentification/cbc:ID",
];
const PARTY_OIB: [&str; 2] = [
    "cac:PartyLegalEntity/cbc:CompanyID",
    "cac:PartyIdentification/cbc:ID",
];

const TOTAL_NET: [&str; 2] = [
    "/ubl:Invoice/cac:LegalMonetaryTotal/cbc:TaxExclusiveAmount",
    "/ubl:Invoice/cac:LegalMonetaryTotal/cbc:LineExtensionAmount",
];
const TOTAL_VAT: &str = "/ubl:Invoice/cac:TaxTotal/cbc:TaxAmount";
const TOTAL_TAX_INCLUSIVE: &str = "/ubl:Invoice/cac:LegalMonetaryTotal/cbc:TaxInclusiveAmount";
const TOTAL_PREPAID: &str = "/ubl:Invoice/cac:LegalMonetaryTotal/cbc:PrepaidAmount";
const TOTAL_PAYABLE: &str = "/ubl:Invoice/cac:LegalMonetaryTotal/cbc:PayableAmount";

const UBL_TAX_SUBTOTAL: &str = "/ubl:Invoice/cac:TaxTotal/cac:TaxSubtotal";
const HR_TAX_SUBTOTAL: &str = "/ubl:Invoice/ext:UBLExtensions/ext:UBLExtension/ext:ExtensionContent\
/hrextac:HRFISK20Data/hrextac:HRTaxTotal/hrextac:HRTaxSubtotal";

const INVOICE_LINE: &str = "/ubl:Invoice/cac:InvoiceLine";
const PAYMENT_MEANS: &str = "/ubl:Invoice/cac:PaymentMeans";

/// Parse raw XML bytes into an [`InvoiceRecord`].
///
/// Fails only when the input is not well-formed XML; every missing field
/// becomes an empty string.
pub fn parse_invoice(xml: &[u8]) -> Result<InvoiceRecord, EracunError> {
    let doc = Document::parse(xml)?;
    Ok(extract_invoice(&doc))
}

/// Build an [`InvoiceRecord`] from an already parsed document.
pub fn extract_invoice(doc: &Document) -> InvoiceRecord {
    let record = InvoiceRecord {
        invoice_id: doc.text("/ubl:Invoice/cbc:ID", None),
        issue_date: doc.text("/ubl:Invoice/cbc:IssueDate", None),
        issue_time: doc.text("/ubl:Invoice/cbc:IssueTime", None),
        due_date: doc.text("/ubl:Invoice/cbc:DueDate", None),
        currency: doc.text("/ubl:Invoice/cbc:DocumentCurrencyCode", None),
        note: doc.text("/ubl:Invoice/cbc:Note", None),
        supplier: extract_party(doc, doc.first(SUPPLIER_PARTY, None)),
        customer: extract_party(doc, doc.first(CUSTOMER_PARTY, None)),
        totals: extract_totals(doc),
        vat_subtotals: extract_tax_breakdown(doc),
        lines: doc
            .select(INVOICE_LINE, None)
            .into_iter()
            .map(|line| extract_line(doc, line))
            .collect(),
        payment: extract_payment(doc),
        attachment: find_pdf_attachment(doc),
    };

    debug!(
        invoice_id = %record.invoice_id,
        lines = record.lines.len(),
        vat_subtotals = record.vat_subtotals.len(),
        has_attachment = record.attachment.is_some(),
        "invoice extracted"
    );
    record
}

fn extract_party(doc: &Document, party: Option<Node<'_>>) -> Party {
    let Some(party) = party else {
        return Party::default();
    };
    let ctx = Some(party);

    Party {
        name: doc.text(&PARTY_NAME, ctx),
        oib: doc.text(&PARTY_OIB, ctx),
        vat_id: doc.text("cac:PartyTaxScheme/cbc:CompanyID", ctx),
        email: doc.text("cac:Contact/cbc:ElectronicMail", ctx),
        postal_code: doc.text("cac:PostalAddress/cbc:PostalZone", ctx),
        street: doc.text("cac:PostalAddress/cbc:StreetName", ctx),
        city: doc.text("cac:PostalAddress/cbc:CityName", ctx),
        address_line: doc.text("cac:PostalAddress/cac:AddressLine/cbc:Line", ctx),
    }
}

fn extract_totals(doc: &Document) -> MonetaryTotals {
    let payable = doc.text(TOTAL_PAYABLE, None);
    let prepaid = doc.text(TOTAL_PREPAID, None);
    let tax_inclusive =
        derive_tax_inclusive(&doc.text(TOTAL_TAX_INCLUSIVE, None), &payable, &prepaid);

    MonetaryTotals {
        net: doc.text(&TOTAL_NET, None),
        vat: doc.text(TOTAL_VAT, None),
        tax_inclusive,
        prepaid,
        payable,
    }
}

/// Rows from both breakdown locations: standard UBL first, then the
/// Croatian extension, each in document order.
fn extract_tax_breakdown(doc: &Document) -> Vec<TaxBreakdownRow> {
    let ubl = doc.select(UBL_TAX_SUBTOTAL, None).into_iter().map(|ts| {
        let ctx = Some(ts);
        TaxBreakdownRow {
            source: TaxSource::Ubl,
            scheme_id: doc.text("cac:TaxCategory/cac:TaxScheme/cbc:ID", ctx),
            category_id: doc.text("cac:TaxCategory/cbc:ID", ctx),
            category_name: doc.text("cac:TaxCategory/cbc:Name", ctx),
            percent: doc.text("cac:TaxCategory/cbc:Percent", ctx),
            taxable_amount: doc.text("cbc:TaxableAmount", ctx),
            tax_amount: doc.text("cbc:TaxAmount", ctx),
        }
    });

    let hr = doc.select(HR_TAX_SUBTOTAL, None).into_iter().map(|ts| {
        let ctx = Some(ts);
        let category_name = doc.text("hrextac:HRTaxCategory/cbc:Name", ctx);
        let category_id = match doc.text("hrextac:HRTaxCategory/cbc:ID", ctx) {
            id if id.is_empty() => category_name.clone(),
            id => id,
        };
        TaxBreakdownRow {
            source: TaxSource::HrExtension,
            scheme_id: doc.text("hrextac:HRTaxCategory/hrextac:HRTaxScheme/cbc:ID", ctx),
            category_id,
            category_name,
            percent: doc.text("hrextac:HRTaxCategory/cbc:Percent", ctx),
            taxable_amount: doc.text("cbc:TaxableAmount", ctx),
            tax_amount: doc.text("cbc:TaxAmount", ctx),
        }
    });

    ubl.chain(hr).collect()
}

fn extract_line(doc: &Document, line: Node<'_>) -> LineItem {
    let ctx = Some(line);
    LineItem {
        id: doc.text("cbc:ID", ctx),
        name: doc.text("cac:Item/cbc:Name", ctx),
        quantity: doc.text("cbc:InvoicedQuantity", ctx),
        unit_code: doc.text("cbc:InvoicedQuantity/@unitCode", ctx),
        unit_price: doc.text("cac:Price/cbc:PriceAmount", ctx),
        net_amount: doc.text("cbc:LineExtensionAmount", ctx),
        tax_percent: doc.text("cac:Item/cac:ClassifiedTaxCategory/cbc:Percent", ctx),
    }
}

fn extract_payment(doc: &Document) -> PaymentInfo {
    let field = |leaf: &str| doc.text(format!("{PAYMENT_MEANS}/{leaf}").as_str(), None);

    let payment_id = field("cbc:PaymentID");
    let iban_raw = field("cac:PayeeFinancialAccount/cbc:ID");
    let (model, reference) = split_model_reference(&payment_id);

    PaymentInfo {
        means_code: field("cbc:PaymentMeansCode"),
        instruction_note: field("cbc:InstructionNote"),
        iban: normalize_iban(&iban_raw),
        payment_id,
        model,
        reference,
        iban_raw,
    }
}
