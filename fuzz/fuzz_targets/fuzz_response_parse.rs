#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must not panic; errors are fine.
    if let Ok(doc) = evatr::rpc::ResponseDocument::parse(data) {
        let _ = doc.error_code();
        let _ = doc.match_status("Erg_Name");
        let _ = doc.requested_at();
    }
});
