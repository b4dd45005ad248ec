#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let n = evatr::core::normalize(s);
        let _ = evatr::core::is_valid_domestic(&n);
        let _ = evatr::core::is_valid_foreign(&n);
        let _ = evatr::core::VatNumber::foreign(s);
    }
});
