//! HUB3 payload, encryption and the upload pipeline.
//!
//! Run with: `cargo test --features hub3 --test hub3_tests`

#![cfg(feature = "hub3")]

mod common;

use eracun::EracunError;
use eracun::hub3::*;
use eracun::ubl::{parse_invoice, recover_pdf};

fn config() -> Hub3Config {
    Hub3Config::new(DEFAULT_RENDERER_URL, EncryptionKey::new(common::KEY).unwrap()).unwrap()
}

fn data_param(url: &str) -> &str {
    url.split_once("?data=").map(|(_, data)| data).unwrap()
}

#[test]
fn payload_json_format() {
    let record = parse_invoice(common::full_invoice().as_bytes()).unwrap();
    let payload = Hub3Payload::from_record(&record).unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

    insta::assert_json_snapshot!(json, @r#"
    {
      "amount": "125000",
      "code": "COST",
      "currency": "EUR",
      "description": "Račun 1-P1-1 | Usluge za 01/2025",
      "iban": "HR1210010051863000160",
      "model": "HR05",
      "payee": {
        "address": "Ilica 1",
        "city": "10000",
        "name": "Dobavljač d.o.o."
      },
      "payer": {
        "address": "Vukovarska 5, 21000 Split",
        "city": "21000",
        "name": "Kupac j.d.o.o."
      },
      "reference": "1-P1-1"
    }
    "#);
}

#[test]
fn payload_field_order_is_fixed() {
    let record = parse_invoice(common::full_invoice().as_bytes()).unwrap();
    let json = Hub3Payload::from_record(&record).unwrap().to_json().unwrap();
    let keys = [
        "\"payer\"",
        "\"payee\"",
        "\"iban\"",
        "\"currency\"",
        "\"amount\"",
        "\"model\"",
        "\"reference\"",
        "\"code\"",
        "\"description\"",
    ];
    let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    assert!(json.contains("01/2025"));
}

#[test]
fn end_to_end_minimal_invoice() {
    let xml = common::minimal_invoice("150.00", "HR01 123-456");
    let upload = process_upload(xml.as_bytes(), "racun.xml", Some("application/xml"), &config())
        .unwrap();

    assert_eq!(upload.record.lines.len(), 1);
    assert_eq!(upload.record.payment.model, "HR01");
    assert_eq!(upload.record.payment.reference, "123-456");

    let url = upload.barcode_url.unwrap();
    assert!(url.starts_with("https://hub3.dd-lab.hr/?data="));
    let data = data_param(&url);
    assert!(!data.is_empty());
    assert!(!data.contains(['+', '/', '=']));

    let json = decrypt_payload(data, config().key()).unwrap();
    let payload: Hub3Payload = serde_json::from_str(&json).unwrap();
    assert_eq!(payload.amount, "15000");
    assert_eq!(payload.payer.name, "Ana Anić");
    assert_eq!(payload.payee.address, "Riva 2");
    assert_eq!(payload.description, "Račun R-2025-7");
}

#[test]
fn same_payload_encrypts_differently_but_decrypts_identically() {
    let record = parse_invoice(common::full_invoice().as_bytes()).unwrap();
    let payload = Hub3Payload::from_record(&record).unwrap();
    let key = EncryptionKey::new(common::KEY).unwrap();

    let a = encrypt_payload(&payload, &key).unwrap();
    let b = encrypt_payload(&payload, &key).unwrap();
    assert_ne!(a, b);
    assert_eq!(decrypt_payload(&a, &key).unwrap(), payload.to_json().unwrap());
    assert_eq!(decrypt_payload(&b, &key).unwrap(), payload.to_json().unwrap());
}

#[test]
fn nothing_payable_means_no_barcode() {
    for payable in ["0.00", "-10.00", "", "n/a"] {
        let xml = common::minimal_invoice(payable, "HR01 1");
        let upload = process_upload(xml.as_bytes(), "racun.xml", None, &config()).unwrap();
        assert!(upload.barcode_url.is_none(), "{payable:?}");
    }

    let settled = parse_invoice(common::prepaid_invoice("0", "99.00").as_bytes()).unwrap();
    assert_eq!(barcode_url(&settled, &config()).unwrap(), None);
}

#[test]
fn currency_text_around_payable_still_yields_barcode() {
    for (payable, cents) in [("EUR 12,00", "1200"), ("12.00 EUR", "1200"), ("150.00 EUR", "15000")] {
        let xml = common::minimal_invoice(payable, "HR01 123-456");
        let upload = process_upload(xml.as_bytes(), "racun.xml", None, &config()).unwrap();
        assert!(upload.record.totals.is_payable(), "{payable:?}");

        let url = upload.barcode_url.unwrap();
        let json = decrypt_payload(data_param(&url), config().key()).unwrap();
        let payload: Hub3Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload.amount, cents, "{payable:?}");
    }
}

#[test]
fn upload_keeps_xml_for_download() {
    let xml = common::full_invoice();
    let upload = process_upload(xml.as_bytes(), "racun.xml", Some("text/xml"), &config()).unwrap();
    let pdf = recover_pdf(&upload.xml_payload).unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF"));
}

#[test]
fn upload_admission_runs_before_parsing() {
    let config = config();
    let xml = common::minimal_invoice("1.00", "HR01 1");

    assert!(matches!(
        process_upload(xml.as_bytes(), "racun.xml", Some("application/pdf"), &config),
        Err(EracunError::Upload(_))
    ));
    assert!(matches!(
        process_upload(xml.as_bytes(), "racun.txt", None, &config),
        Err(EracunError::Upload(_))
    ));
    assert!(matches!(
        process_upload(b"  \n", "racun.xml", None, &config),
        Err(EracunError::Upload(_))
    ));
    assert!(matches!(
        process_upload(b"<Invoice>", "racun.xml", None, &config),
        Err(EracunError::Xml { .. })
    ));
}

#[test]
fn wrong_key_does_not_yield_the_payload() {
    let url = barcode_url(
        &parse_invoice(common::full_invoice().as_bytes()).unwrap(),
        &config(),
    )
    .unwrap()
    .unwrap();
    let other = EncryptionKey::new(&[0x42; 32]).unwrap();
    match decrypt_payload(data_param(&url), &other) {
        Ok(json) => assert!(!json.contains("COST")),
        Err(e) => assert!(matches!(e, EracunError::Decryption(_))),
    }
}
