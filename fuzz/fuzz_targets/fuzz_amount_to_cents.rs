#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let cents = eracun::amount_to_cents(data);
    assert!(!cents.is_empty() && cents.bytes().all(|b| b.is_ascii_digit()));

    let _ = eracun::split_model_reference(data);
    let _ = eracun::normalize_iban(data);
    let _ = eracun::parse_amount(data);
});
