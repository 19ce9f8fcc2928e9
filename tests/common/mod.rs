//! Shared XML fixtures for the integration tests.

#![allow(dead_code)]

/// `%PDF-1.4\n%eracun test\n` in base64.
pub const PDF_B64: &str = "JVBERi0xLjQKJWVyYWN1biB0ZXN0Cg==";

/// The PNG signature in base64.
pub const PNG_B64: &str = "iVBORw0KGgo=";

pub const KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

const OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
         xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
         xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2"
         xmlns:ext="urn:oasis:names:specification:ubl:schema:xsd:CommonExtensionComponents-2"
         xmlns:hrextac="urn:mfin.gov.hr:schema:xsd:HRExtensionAggregateComponents-1">"#;

/// A complete Croatian invoice: two lines, two VAT rows, a PDF attachment,
/// prepaid 0, payable 1.250,00 EUR.
pub fn full_invoice() -> String {
    format!(
        r#"{OPEN}
  <ext:UBLExtensions>
    <ext:UBLExtension>
      <ext:ExtensionContent>
        <hrextac:HRFISK20Data>
          <hrextac:HRTaxTotal>
            <cbc:TaxAmount currencyID="EUR">200.00</cbc:TaxAmount>
            <hrextac:HRTaxSubtotal>
              <cbc:TaxableAmount currencyID="EUR">800.00</cbc:TaxableAmount>
              <cbc:TaxAmount currencyID="EUR">200.00</cbc:TaxAmount>
              <hrextac:HRTaxCategory>
                <cbc:ID>S</cbc:ID>
                <cbc:Name>PDV 25%</cbc:Name>
                <cbc:Percent>25</cbc:Percent>
                <hrextac:HRTaxScheme><cbc:ID>VAT</cbc:ID></hrextac:HRTaxScheme>
              </hrextac:HRTaxCategory>
            </hrextac:HRTaxSubtotal>
          </hrextac:HRTaxTotal>
        </hrextac:HRFISK20Data>
      </ext:ExtensionContent>
    </ext:UBLExtension>
  </ext:UBLExtensions>
  <cbc:CustomizationID>urn:cen.eu:en16931:2017#compliant#urn:mfin.gov.hr:cius-2025:1.0</cbc:CustomizationID>
  <cbc:ID>1-P1-1</cbc:ID>
  <cbc:IssueDate>2025-01-15</cbc:IssueDate>
  <cbc:IssueTime>12:30:00</cbc:IssueTime>
  <cbc:DueDate>2025-02-14</cbc:DueDate>
  <cbc:InvoiceTypeCode>380</cbc:InvoiceTypeCode>
  <cbc:Note>Usluge za 01/2025</cbc:Note>
  <cbc:DocumentCurrencyCode>EUR</cbc:DocumentCurrencyCode>
  <cac:AdditionalDocumentReference>
    <cbc:ID>1-P1-1</cbc:ID>
    <cac:Attachment>
      <cbc:EmbeddedDocumentBinaryObject mimeCode="application/pdf" filename="Račun 1-P1-1.pdf">
        {PDF_B64}
      </cbc:EmbeddedDocumentBinaryObject>
    </cac:Attachment>
  </cac:AdditionalDocumentReference>
  <cac:AccountingSupplierParty>
    <cac:Party>
      <cbc:EndpointID schemeID="9934">12345678901</cbc:EndpointID>
      <cac:PartyIdentification><cbc:ID>9934:12345678901</cbc:ID></cac:PartyIdentification>
      <cac:PostalAddress>
        <cbc:StreetName>Ilica 1</cbc:StreetName>
        <cbc:CityName>Zagreb</cbc:CityName>
        <cbc:PostalZone>10000</cbc:PostalZone>
        <cac:Country><cbc:IdentificationCode>HR</cbc:IdentificationCode></cac:Country>
      </cac:PostalAddress>
      <cac:PartyTaxScheme>
        <cbc:CompanyID>HR12345678901</cbc:CompanyID>
        <cac:TaxScheme><cbc:ID>VAT</cbc:ID></cac:TaxScheme>
      </cac:PartyTaxScheme>
      <cac:PartyLegalEntity>
        <cbc:RegistrationName>Dobavljač d.o.o.</cbc:RegistrationName>
        <cbc:CompanyID>12345678901</cbc:CompanyID>
      </cac:PartyLegalEntity>
      <cac:Contact><cbc:ElectronicMail>racuni@dobavljac.hr</cbc:ElectronicMail></cac:Contact>
    </cac:Party>
  </cac:AccountingSupplierParty>
  <cac:AccountingCustomerParty>
    <cac:Party>
      <cac:PartyName><cbc:Name>Kupac j.d.o.o.</cbc:Name></cac:PartyName>
      <cac:PostalAddress>
        <cac:AddressLine><cbc:Line>Vukovarska 5, 21000 Split</cbc:Line></cac:AddressLine>
        <cbc:CityName>Split</cbc:CityName>
        <cbc:PostalZone>21000</cbc:PostalZone>
      </cac:PostalAddress>
      <cac:PartyIdentification><cbc:ID>98765432109</cbc:ID></cac:PartyIdentification>
    </cac:Party>
  </cac:AccountingCustomerParty>
  <cac:PaymentMeans>
    <cbc:PaymentMeansCode>30</cbc:PaymentMeansCode>
    <cbc:InstructionNote>Plaćanje po računu</cbc:InstructionNote>
    <cbc:PaymentID>HR 05 1-P1-1</cbc:PaymentID>
    <cac:PayeeFinancialAccount><cbc:ID>hr12 1001 0051 8630 0016 0</cbc:ID></cac:PayeeFinancialAccount>
  </cac:PaymentMeans>
  <cac:TaxTotal>
    <cbc:TaxAmount currencyID="EUR">250.00</cbc:TaxAmount>
    <cac:TaxSubtotal>
      <cbc:TaxableAmount currencyID="EUR">800.00</cbc:TaxableAmount>
      <cbc:TaxAmount currencyID="EUR">200.00</cbc:TaxAmount>
      <cac:TaxCategory>
        <cbc:ID>S</cbc:ID>
        <cbc:Percent>25</cbc:Percent>
        <cac:TaxScheme><cbc:ID>VAT</cbc:ID></cac:TaxScheme>
      </cac:TaxCategory>
    </cac:TaxSubtotal>
    <cac:TaxSubtotal>
      <cbc:TaxableAmount currencyID="EUR">400.00</cbc:TaxableAmount>
      <cbc:TaxAmount currencyID="EUR">50.00</cbc:TaxAmount>
      <cac:TaxCategory>
        <cbc:ID>AA</cbc:ID>
        <cbc:Name>PDV 13%</cbc:Name>
        <cbc:Percent>12.5</cbc:Percent>
        <cac:TaxScheme><cbc:ID>VAT</cbc:ID></cac:TaxScheme>
      </cac:TaxCategory>
    </cac:TaxSubtotal>
  </cac:TaxTotal>
  <cac:LegalMonetaryTotal>
    <cbc:LineExtensionAmount currencyID="EUR">1200.00</cbc:LineExtensionAmount>
    <cbc:TaxExclusiveAmount currencyID="EUR">1000.00</cbc:TaxExclusiveAmount>
    <cbc:TaxInclusiveAmount currencyID="EUR">1250.00</cbc:TaxInclusiveAmount>
    <cbc:PayableAmount currencyID="EUR">1.250,00</cbc:PayableAmount>
  </cac:LegalMonetaryTotal>
  <cac:InvoiceLine>
    <cbc:ID>1</cbc:ID>
    <cbc:InvoicedQuantity unitCode="HUR">10</cbc:InvoicedQuantity>
    <cbc:LineExtensionAmount currencyID="EUR">800.00</cbc:LineExtensionAmount>
    <cac:Item>
      <cbc:Name>Savjetovanje</cbc:Name>
      <cac:ClassifiedTaxCategory><cbc:ID>S</cbc:ID><cbc:Percent>25</cbc:Percent></cac:ClassifiedTaxCategory>
    </cac:Item>
    <cac:Price><cbc:PriceAmount currencyID="EUR">80.00</cbc:PriceAmount></cac:Price>
  </cac:InvoiceLine>
  <cac:InvoiceLine>
    <cbc:ID>2</cbc:ID>
    <cbc:InvoicedQuantity>4</cbc:InvoicedQuantity>
    <cbc:LineExtensionAmount currencyID="EUR">400.00</cbc:LineExtensionAmount>
    <cac:Item><cbc:Name>Knjige &amp; priručnici</cbc:Name></cac:Item>
    <cac:Price><cbc:PriceAmount currencyID="EUR">100.00</cbc:PriceAmount></cac:Price>
  </cac:InvoiceLine>
</Invoice>"#
    )
}

/// The smallest useful invoice: one line, both parties, payable `payable`,
/// payment id `payment_id`.
pub fn minimal_invoice(payable: &str, payment_id: &str) -> String {
    format!(
        r#"{OPEN}
  <cbc:ID>R-2025-7</cbc:ID>
  <cbc:DocumentCurrencyCode>EUR</cbc:DocumentCurrencyCode>
  <cac:AccountingSupplierParty><cac:Party>
    <cac:PartyName><cbc:Name>Obrt Marko</cbc:Name></cac:PartyName>
    <cac:PostalAddress><cbc:StreetName>Riva 2</cbc:StreetName><cbc:PostalZone>51000</cbc:PostalZone></cac:PostalAddress>
  </cac:Party></cac:AccountingSupplierParty>
  <cac:AccountingCustomerParty><cac:Party>
    <cac:PartyName><cbc:Name>Ana Anić</cbc:Name></cac:PartyName>
    <cac:PostalAddress><cbc:StreetName>Korzo 9</cbc:StreetName><cbc:PostalZone>51000</cbc:PostalZone></cac:PostalAddress>
  </cac:Party></cac:AccountingCustomerParty>
  <cac:PaymentMeans>
    <cbc:PaymentMeansCode>58</cbc:PaymentMeansCode>
    <cbc:PaymentID>{payment_id}</cbc:PaymentID>
    <cac:PayeeFinancialAccount><cbc:ID>HR1723600001101234565</cbc:ID></cac:PayeeFinancialAccount>
  </cac:PaymentMeans>
  <cac:LegalMonetaryTotal>
    <cbc:PayableAmount currencyID="EUR">{payable}</cbc:PayableAmount>
  </cac:LegalMonetaryTotal>
  <cac:InvoiceLine>
    <cbc:ID>1</cbc:ID>
    <cbc:InvoicedQuantity unitCode="C62">1</cbc:InvoicedQuantity>
    <cbc:LineExtensionAmount currencyID="EUR">{payable}</cbc:LineExtensionAmount>
    <cac:Item><cbc:Name>Popravak</cbc:Name></cac:Item>
    <cac:Price><cbc:PriceAmount currencyID="EUR">{payable}</cbc:PriceAmount></cac:Price>
  </cac:InvoiceLine>
</Invoice>"#
    )
}

/// Invoice whose single embedded object has the given attributes and body.
pub fn invoice_with_attachment(attributes: &str, body: &str) -> String {
    format!(
        r#"{OPEN}
  <cbc:ID>ATT/1</cbc:ID>
  <cac:AdditionalDocumentReference>
    <cbc:ID>1</cbc:ID>
    <cac:Attachment>
      <cbc:EmbeddedDocumentBinaryObject {attributes}>{body}</cbc:EmbeddedDocumentBinaryObject>
    </cac:Attachment>
  </cac:AdditionalDocumentReference>
</Invoice>"#
    )
}

/// Fully prepaid invoice: payable 0, prepaid given, no tax-inclusive total.
pub fn prepaid_invoice(payable: &str, prepaid: &str) -> String {
    format!(
        r#"{OPEN}
  <cbc:ID>PRE-1</cbc:ID>
  <cac:LegalMonetaryTotal>
    <cbc:PrepaidAmount currencyID="EUR">{prepaid}</cbc:PrepaidAmount>
    <cbc:PayableAmount currencyID="EUR">{payable}</cbc:PayableAmount>
  </cac:LegalMonetaryTotal>
</Invoice>"#
    )
}
