#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use segfield::{locate_values, segment_at};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    values: Vec<String>,
    probes: Vec<i16>,
}

fuzz_target!(|input: Input| {
    if input.text.len() > 4096 || input.values.len() > 64 {
        return;
    }

    // Exactly one range per value, never a panic.
    let ranges = locate_values(&input.text, &input.values);
    assert_eq!(ranges.len(), input.values.len());

    // Starts never move backward: the scan cursor is monotonic.
    for pair in ranges.windows(2) {
        assert!(pair[0].start <= pair[1].start);
    }

    // segment_at is total over arbitrary offsets.
    for probe in &input.probes {
        let idx = segment_at(isize::from(*probe), &ranges);
        if input.values.is_empty() {
            assert_eq!(idx, 0);
        } else {
            assert!(idx < input.values.len());
        }
    }
});
