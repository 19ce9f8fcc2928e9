#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must not panic; errors are fine.
    if let Ok(record) = eracun::ubl::parse_invoice(data) {
        let _ = eracun::amount_to_cents(&record.totals.payable);
        if let Some(attachment) = record.attachment {
            let _ = attachment.decode();
        }
    }
});
