#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary XML wrapped the way a client would send it back.
    let payload = eracun::ubl::encode_xml_payload(data);
    let _ = eracun::ubl::recover_pdf(&payload);

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = eracun::ubl::recover_pdf(text);
    }
});
