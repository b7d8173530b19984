#![no_main]

use libfuzzer_sys::fuzz_target;
use segfield::{GUARD, decode};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }

    // decode never panics and strips every marker.
    let stripped = decode(text);
    assert!(!stripped.contains(GUARD));

    // Marker-free text passes through untouched.
    assert_eq!(decode(&stripped), stripped);

    // Only markers are ever removed.
    let expected: String = text.chars().filter(|c| *c != GUARD).collect();
    assert_eq!(stripped, expected);
});
